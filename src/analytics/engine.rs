use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};

use super::coerce::{coerce_points, RawPoints};

/// One dated trade result fed to the metrics engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricInput {
    pub date: NaiveDate,
    #[serde(default)]
    pub value: Option<RawPoints>,
    #[serde(default)]
    pub is_breakeven: bool,
    #[serde(default)]
    pub symbol: Option<String>,
}

impl MetricInput {
    /// Result of this trade: zero for break-even, otherwise the coerced value.
    pub fn points(&self) -> Decimal {
        if self.is_breakeven {
            Decimal::ZERO
        } else {
            coerce_points(self.value.as_ref())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquityPoint {
    pub date: NaiveDate,
    pub points: Decimal,
    pub cumulative: Decimal,
}

/// Gross profit over gross loss. `Infinite` when there are gains and no
/// losses, `Undefined` when there is neither.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProfitFactor {
    Finite(Decimal),
    Infinite,
    #[default]
    Undefined,
}

impl ProfitFactor {
    fn from_sums(gross_profit: Decimal, gross_loss: Decimal) -> Self {
        if !gross_loss.is_zero() {
            // a quotient past the representable range saturates
            ProfitFactor::Finite(gross_profit.checked_div(gross_loss).unwrap_or(Decimal::MAX))
        } else if gross_profit > Decimal::ZERO {
            ProfitFactor::Infinite
        } else {
            ProfitFactor::Undefined
        }
    }
}

impl fmt::Display for ProfitFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfitFactor::Finite(v) => write!(f, "{:.2}", v),
            ProfitFactor::Infinite => f.write_str("∞"),
            ProfitFactor::Undefined => f.write_str("-"),
        }
    }
}

// Finite values go out as decimal strings like every other Decimal field.
impl Serialize for ProfitFactor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ProfitFactor::Finite(v) => serializer.serialize_str(&v.to_string()),
            ProfitFactor::Infinite => serializer.serialize_str("∞"),
            ProfitFactor::Undefined => serializer.serialize_none(),
        }
    }
}

/// Aggregated performance over a record set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsSummary {
    pub equity: Vec<EquityPoint>,
    pub total_trades: u64,
    pub wins: u64,
    pub losses: u64,
    pub breakevens: u64,
    pub total_points: Decimal,
    pub win_rate: Decimal,
    pub avg_win: Decimal,
    /// Positive magnitude.
    pub avg_loss: Decimal,
    pub profit_factor: ProfitFactor,
    pub expectancy: Decimal,
    pub max_drawdown: Decimal,
}

impl Default for MetricsSummary {
    fn default() -> Self {
        Self {
            equity: Vec::new(),
            total_trades: 0,
            wins: 0,
            losses: 0,
            breakevens: 0,
            total_points: Decimal::ZERO,
            win_rate: Decimal::ZERO,
            avg_win: Decimal::ZERO,
            avg_loss: Decimal::ZERO,
            profit_factor: ProfitFactor::Undefined,
            expectancy: Decimal::ZERO,
            max_drawdown: Decimal::ZERO,
        }
    }
}

/// Stable sort by date; same-day records keep their input order.
fn sorted_by_date(records: &[MetricInput]) -> Vec<&MetricInput> {
    let mut sorted: Vec<&MetricInput> = records.iter().collect();
    sorted.sort_by_key(|r| r.date);
    sorted
}

/// Running cumulative sum over the date-sorted records, one point per record.
/// Sums saturate at `Decimal::MAX` / `Decimal::MIN` instead of overflowing.
pub fn equity_curve(records: &[MetricInput]) -> Vec<EquityPoint> {
    let mut cumulative = Decimal::ZERO;
    sorted_by_date(records)
        .into_iter()
        .map(|r| {
            let points = r.points();
            cumulative = cumulative.saturating_add(points);
            EquityPoint {
                date: r.date,
                points,
                cumulative,
            }
        })
        .collect()
}

/// Largest drop from the running peak of the series (peak starts at the first
/// point). Zero for empty or non-decreasing series.
pub fn max_drawdown(equity: &[EquityPoint]) -> Decimal {
    let mut peak: Option<Decimal> = None;
    let mut worst = Decimal::ZERO;

    for point in equity {
        let current_peak = match peak {
            Some(p) if p >= point.cumulative => p,
            _ => point.cumulative,
        };
        peak = Some(current_peak);
        worst = worst.max(current_peak.saturating_sub(point.cumulative));
    }

    worst
}

/// Compute the full summary for a record set. Total: empty input gives the
/// zero summary, every division by zero has a defined result, and sums that
/// would leave the `Decimal` range saturate.
pub fn compute_metrics(records: &[MetricInput]) -> MetricsSummary {
    if records.is_empty() {
        return MetricsSummary::default();
    }

    let equity = equity_curve(records);

    let mut wins = 0u64;
    let mut losses = 0u64;
    let mut gross_profit = Decimal::ZERO;
    let mut gross_loss = Decimal::ZERO;

    for point in &equity {
        if point.points > Decimal::ZERO {
            wins += 1;
            gross_profit = gross_profit.saturating_add(point.points);
        } else if point.points < Decimal::ZERO {
            losses += 1;
            gross_loss = gross_loss.saturating_add(point.points.abs());
        }
    }

    let breakevens = records.iter().filter(|r| r.is_breakeven).count() as u64;

    let decided = wins + losses;
    let win_rate = if decided > 0 {
        Decimal::from(wins) / Decimal::from(decided)
    } else {
        Decimal::ZERO
    };

    let avg_win = if wins > 0 {
        gross_profit / Decimal::from(wins)
    } else {
        Decimal::ZERO
    };

    let avg_loss = if losses > 0 {
        gross_loss / Decimal::from(losses)
    } else {
        Decimal::ZERO
    };

    let expectancy = win_rate
        .saturating_mul(avg_win)
        .saturating_sub((Decimal::ONE - win_rate).saturating_mul(avg_loss));
    let max_drawdown = max_drawdown(&equity);
    let total_points = equity.last().map(|p| p.cumulative).unwrap_or(Decimal::ZERO);

    MetricsSummary {
        total_trades: records.len() as u64,
        wins,
        losses,
        breakevens,
        total_points,
        win_rate,
        avg_win,
        avg_loss,
        profit_factor: ProfitFactor::from_sums(gross_profit, gross_loss),
        expectancy,
        max_drawdown,
        equity,
    }
}
