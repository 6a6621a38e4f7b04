use std::collections::BTreeMap;

use chrono::Datelike;
use rust_decimal::Decimal;
use serde::Serialize;

use super::engine::MetricInput;

/// Points and trade count for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyRollup {
    pub year: i32,
    pub month: u32,
    pub total_points: Decimal,
    pub trades: u64,
}

/// Points and trade count for one day of the calendar view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DailyAggregate {
    pub total_points: Decimal,
    pub trades: u64,
}

/// Group by (year, month), oldest first. Break-even records count as trades.
/// Totals saturate at the `Decimal` bounds.
pub fn monthly_rollup(records: &[MetricInput]) -> Vec<MonthlyRollup> {
    let mut groups: BTreeMap<(i32, u32), (Decimal, u64)> = BTreeMap::new();

    for r in records {
        let slot = groups.entry((r.date.year(), r.date.month())).or_default();
        slot.0 = slot.0.saturating_add(r.points());
        slot.1 += 1;
    }

    groups
        .into_iter()
        .map(|((year, month), (total_points, trades))| MonthlyRollup {
            year,
            month,
            total_points,
            trades,
        })
        .collect()
}

/// Sum per day-of-month inside the (year, month) window. Days without records
/// are absent from the map.
pub fn daily_points(records: &[MetricInput], year: i32, month: u32) -> BTreeMap<u32, DailyAggregate> {
    let mut days: BTreeMap<u32, DailyAggregate> = BTreeMap::new();

    for r in filter_month(records, year, month) {
        let day = days.entry(r.date.day()).or_default();
        day.total_points = day.total_points.saturating_add(r.points());
        day.trades += 1;
    }

    days
}

pub fn filter_month(records: &[MetricInput], year: i32, month: u32) -> Vec<MetricInput> {
    records
        .iter()
        .filter(|r| r.date.year() == year && r.date.month() == month)
        .cloned()
        .collect()
}

/// Keep records whose symbol is selected. Records without a symbol always
/// pass, and an empty selection keeps everything.
pub fn filter_symbols(records: &[MetricInput], symbols: &[String]) -> Vec<MetricInput> {
    if symbols.is_empty() {
        return records.to_vec();
    }

    records
        .iter()
        .filter(|r| match &r.symbol {
            None => true,
            Some(sym) => symbols.iter().any(|s| s == sym),
        })
        .cloned()
        .collect()
}
