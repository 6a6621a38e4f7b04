pub mod coerce;
pub mod engine;
pub mod rollup;

pub use coerce::{coerce, coerce_points, CoercionMode, RawPoints};
pub use engine::{compute_metrics, equity_curve, EquityPoint, MetricInput, MetricsSummary, ProfitFactor};
pub use rollup::{daily_points, filter_month, filter_symbols, monthly_rollup, DailyAggregate, MonthlyRollup};
