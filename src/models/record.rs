use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::analytics::{MetricInput, RawPoints};
use crate::models::TradeEntry;

/// Database row for journal_records table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JournalRecord {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub trade_date: NaiveDate,
    pub week_label: String,
    pub day_label: String,
    pub symbol: Option<String>,
    #[sqlx(rename = "points")]
    pub value: Decimal,
    pub is_breakeven: bool,
    pub raw_text: String,
    pub created_at: DateTime<Utc>,
}

impl JournalRecord {
    pub fn to_metric_input(&self) -> MetricInput {
        MetricInput {
            date: self.trade_date,
            value: Some(RawPoints::from(self.value)),
            is_breakeven: self.is_breakeven,
            symbol: self.symbol.clone(),
        }
    }
}

/// One submitted cell, fanned out into its parsed entries. All entries share
/// the date and the labels computed at entry time.
#[derive(Debug, Clone)]
pub struct NewSubmission {
    pub trade_date: NaiveDate,
    pub week_label: String,
    pub day_label: String,
    pub entries: Vec<TradeEntry>,
}
