pub mod labels;
pub mod parser;

pub use labels::{day_label, month_name, period_label, week_label, Locale};
pub use parser::{invalid_tokens, parse_trades_cell};
