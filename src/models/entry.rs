use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Unit;

/// One instruction parsed out of a trade cell.
///
/// Unparseable tokens are kept as invalid entries with a zero value so the
/// caller can warn about them without losing the input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeEntry {
    pub symbol: Option<String>,
    pub value: Decimal,
    pub is_breakeven: bool,
    pub raw_text: String,
    pub is_valid: bool,
}

impl TradeEntry {
    pub fn points(symbol: Option<String>, value: Decimal, raw_text: impl Into<String>) -> Self {
        Self {
            symbol,
            value,
            is_breakeven: false,
            raw_text: raw_text.into(),
            is_valid: true,
        }
    }

    /// Break-even always carries a zero value.
    pub fn breakeven(symbol: Option<String>, raw_text: impl Into<String>) -> Self {
        Self {
            symbol,
            value: Decimal::ZERO,
            is_breakeven: true,
            raw_text: raw_text.into(),
            is_valid: true,
        }
    }

    pub fn unparsed(raw_text: impl Into<String>) -> Self {
        Self {
            symbol: None,
            value: Decimal::ZERO,
            is_breakeven: false,
            raw_text: raw_text.into(),
            is_valid: false,
        }
    }
}

impl TradeEntry {
    /// Normalized text of the entry, suffixed with the unit (`NQ:+50P`,
    /// `ES:-2%`). Invalid entries come back as their raw text.
    pub fn label(&self, unit: Unit) -> String {
        if !self.is_valid {
            return self.raw_text.clone();
        }

        let body = if self.is_breakeven {
            "BE".to_string()
        } else if self.value.is_sign_negative() {
            format!("{}{}", self.value, unit.suffix())
        } else {
            format!("+{}{}", self.value, unit.suffix())
        };

        match &self.symbol {
            Some(sym) => format!("{sym}:{body}"),
            None => body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_uses_unit_suffix() {
        let win = TradeEntry::points(Some("NQ".into()), Decimal::from(50), "NQ:50P");
        let loss = TradeEntry::points(None, Decimal::from(-20), "-20P");

        assert_eq!(win.label(Unit::Points), "NQ:+50P");
        assert_eq!(win.label(Unit::Percent), "NQ:+50%");
        assert_eq!(loss.label(Unit::Percent), "-20%");
        assert_eq!(TradeEntry::breakeven(Some("ES".into()), "ES:BE").label(Unit::Percent), "ES:BE");
        assert_eq!(TradeEntry::unparsed("oops").label(Unit::Points), "oops");
    }
}
