pub mod entry;
pub mod record;

pub use entry::TradeEntry;
pub use record::{JournalRecord, NewSubmission};

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Unit: how the stored magnitude is read back
// ---------------------------------------------------------------------------

/// Unit attached to a trade magnitude. The parser never interprets it; it only
/// changes labels and suffixes on the way out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[default]
    Points,
    Percent,
}

impl Unit {
    /// Unknown codes fall back to points.
    pub fn from_code(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "percent" | "pct" | "%" => Unit::Percent,
            _ => Unit::Points,
        }
    }

    pub fn suffix(&self) -> &'static str {
        match self {
            Unit::Points => "P",
            Unit::Percent => "%",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unit::Points => write!(f, "points"),
            Unit::Percent => write!(f, "percent"),
        }
    }
}
