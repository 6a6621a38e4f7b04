use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;

use crate::models::TradeEntry;

/// Separator between trades inside one cell.
const TRADE_SEPARATOR: char = '~';

/// `[SYMBOL:]<signed int>P` or `[SYMBOL:]BE`. ASCII digits only.
static TRADE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:(?P<sym>[A-Za-z0-9_]+):)?(?P<body>(?P<signed>[+-]?[0-9]+)P|BE)$")
        .expect("trade pattern is a valid regex")
});

/// Tokens that mean "nothing here" and are dropped without a warning.
const PLACEHOLDERS: &[&str] = &["", "none", "nan", "error", "-error"];

/// Parse a free-text trade cell such as `"NQ:+50P ~ ES:-20P ~ BE"`.
///
/// Never fails: a token that matches no grammar either disappears (known
/// placeholders) or comes back as an invalid zero-value entry. Output order
/// follows token order.
pub fn parse_trades_cell(cell: Option<&str>) -> Vec<TradeEntry> {
    let Some(cell) = cell else {
        return Vec::new();
    };

    cell.split(TRADE_SEPARATOR)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .filter_map(parse_token)
        .collect()
}

fn parse_token(token: &str) -> Option<TradeEntry> {
    let Some(caps) = TRADE_PATTERN.captures(token) else {
        if is_placeholder(token) {
            return None;
        }
        return Some(TradeEntry::unparsed(token));
    };

    let symbol = caps.name("sym").map(|m| m.as_str().to_string());

    match caps.name("signed") {
        None => Some(TradeEntry::breakeven(symbol, token)),
        Some(signed) => match parse_signed(signed.as_str()) {
            Some(value) => Some(TradeEntry::points(symbol, value, token)),
            // too many digits to represent
            None => Some(TradeEntry::unparsed(token)),
        },
    }
}

fn parse_signed(s: &str) -> Option<Decimal> {
    Decimal::from_str(s.strip_prefix('+').unwrap_or(s)).ok()
}

fn is_placeholder(token: &str) -> bool {
    let lowered = token.to_lowercase();
    PLACEHOLDERS.contains(&lowered.as_str())
}

/// Raw text of every entry the parser could not understand.
pub fn invalid_tokens(entries: &[TradeEntry]) -> Vec<String> {
    entries
        .iter()
        .filter(|e| !e.is_valid)
        .map(|e| e.raw_text.clone())
        .collect()
}
