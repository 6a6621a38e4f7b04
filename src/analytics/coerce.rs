use std::str::FromStr;

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A per-trade result as it arrives from storage or a client: a number, or a
/// textual encoding of one (`"50"`, `"-2.5%"`, `""`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawPoints {
    Integer(i64),
    Float(f64),
    Text(String),
    #[serde(skip_deserializing)]
    Exact(Decimal),
}

impl From<Decimal> for RawPoints {
    fn from(value: Decimal) -> Self {
        RawPoints::Exact(value)
    }
}

impl From<i64> for RawPoints {
    fn from(value: i64) -> Self {
        RawPoints::Integer(value)
    }
}

impl From<&str> for RawPoints {
    fn from(value: &str) -> Self {
        RawPoints::Text(value.to_string())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CoercionMode {
    /// Anything that is not a number becomes zero.
    #[default]
    Lenient,
    /// Anything that is not a number is rejected.
    Strict,
}

/// Turn a raw value into a magnitude.
///
/// Text is trimmed and a trailing `%` is stripped before parsing. Null, blank,
/// unparsable and non-finite values yield `Some(0)` in lenient mode and `None`
/// in strict mode.
pub fn coerce(raw: Option<&RawPoints>, mode: CoercionMode) -> Option<Decimal> {
    let parsed = match raw {
        None => None,
        Some(RawPoints::Integer(n)) => Some(Decimal::from(*n)),
        Some(RawPoints::Float(f)) => Decimal::from_f64(*f),
        Some(RawPoints::Exact(d)) => Some(*d),
        Some(RawPoints::Text(s)) => parse_text(s),
    };

    match (parsed, mode) {
        (Some(v), _) => Some(v),
        (None, CoercionMode::Lenient) => Some(Decimal::ZERO),
        (None, CoercionMode::Strict) => None,
    }
}

/// Lenient coercion used by every aggregate. Uncoercible input counts as zero.
pub fn coerce_points(raw: Option<&RawPoints>) -> Decimal {
    coerce(raw, CoercionMode::Lenient).unwrap_or(Decimal::ZERO)
}

fn parse_text(s: &str) -> Option<Decimal> {
    let s = s.trim();
    let s = s.strip_suffix('%').unwrap_or(s).trim_end();
    if s.is_empty() {
        return None;
    }
    let unsigned = s.strip_prefix('+').unwrap_or(s);
    Decimal::from_str(unsigned)
        .or_else(|_| Decimal::from_scientific(unsigned))
        .ok()
}
