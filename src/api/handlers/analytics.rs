use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use axum::extract::{Query, State};
use axum::{Extension, Json};
use chrono::NaiveDate;
use metrics::{counter, gauge, histogram};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::analytics::{
    compute_metrics, daily_points, equity_curve, filter_symbols, monthly_rollup, DailyAggregate,
    EquityPoint, MetricInput, MetricsSummary,
};
use crate::db::journal_repo;
use crate::errors::AppError;
use crate::journal::{month_name, period_label};
use crate::models::JournalRecord;
use crate::session::Session;
use crate::AppState;

use super::{owner_of, ApiResponse};

#[derive(Serialize)]
pub struct MonthlyRow {
    pub period: String,
    pub year: i32,
    pub month: u32,
    pub total_points: Decimal,
    pub trades: u64,
}

#[derive(Deserialize)]
pub struct CalendarQuery {
    pub year: i32,
    pub month: u32,
    /// Comma-separated, e.g. `NQ,ES`. Empty means all symbols.
    pub symbols: Option<String>,
}

#[derive(Serialize)]
pub struct CalendarView {
    pub year: i32,
    pub month: u32,
    pub month_name: String,
    pub days: BTreeMap<u32, DailyAggregate>,
    pub equity: Vec<EquityPoint>,
    pub total_points: Decimal,
    pub trades: u64,
}

fn to_inputs(records: &[JournalRecord]) -> Vec<MetricInput> {
    records.iter().map(JournalRecord::to_metric_input).collect()
}

/// GET /api/analytics/summary: global metrics and equity curve.
pub async fn summary(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Result<Json<ApiResponse<MetricsSummary>>, AppError> {
    let owner_id = owner_of(&session)?;

    if let Some(hit) = state.cache.get(owner_id).await {
        counter!("metrics_cache_hits_total").increment(1);
        return Ok(Json(ApiResponse::ok((*hit).clone())));
    }
    counter!("metrics_cache_misses_total").increment(1);

    // Version is read before the fetch; a write landing in between makes
    // put() discard this result.
    let version = state.cache.version(owner_id).await;
    let records = journal_repo::fetch_all(&state.db, owner_id).await?;

    let started = Instant::now();
    let summary = compute_metrics(&to_inputs(&records));
    histogram!("metrics_compute_seconds").record(started.elapsed().as_secs_f64());

    tracing::debug!(
        owner_id = %owner_id,
        records = records.len(),
        version = version,
        "Metrics computed"
    );

    if state.cache.put(owner_id, version, Arc::new(summary.clone())).await {
        gauge!("metrics_cache_entries").set(state.cache.len().await as f64);
    }
    Ok(Json(ApiResponse::ok(summary)))
}

/// GET /api/analytics/monthly: points and trade count per month.
pub async fn monthly(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Result<Json<ApiResponse<Vec<MonthlyRow>>>, AppError> {
    let owner_id = owner_of(&session)?;
    let records = journal_repo::fetch_all(&state.db, owner_id).await?;
    let locale = state.config.locale;

    let rows = monthly_rollup(&to_inputs(&records))
        .into_iter()
        .map(|m| MonthlyRow {
            period: period_label(m.year, m.month, locale),
            year: m.year,
            month: m.month,
            total_points: m.total_points,
            trades: m.trades,
        })
        .collect();

    Ok(Json(ApiResponse::ok(rows)))
}

/// GET /api/analytics/calendar: per-day totals and the month's equity curve.
pub async fn calendar(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<ApiResponse<CalendarView>>, AppError> {
    let owner_id = owner_of(&session)?;
    let (first, last) = month_bounds(query.year, query.month)
        .ok_or_else(|| AppError::BadRequest(format!("invalid month {}/{}", query.month, query.year)))?;

    let symbols: Vec<String> = query
        .symbols
        .as_deref()
        .unwrap_or_default()
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    let records = journal_repo::fetch_range(&state.db, owner_id, Some(first), Some(last)).await?;
    let inputs = filter_symbols(&to_inputs(&records), &symbols);

    let days = daily_points(&inputs, query.year, query.month);
    let equity = equity_curve(&inputs);
    let total_points = equity.last().map(|p| p.cumulative).unwrap_or(Decimal::ZERO);

    Ok(Json(ApiResponse::ok(CalendarView {
        year: query.year,
        month: query.month,
        month_name: month_name(query.month, state.config.locale)
            .unwrap_or_default()
            .to_string(),
        days,
        trades: inputs.len() as u64,
        equity,
        total_points,
    })))
}

/// First and last day of a month, `None` for an invalid month.
fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((first, next.pred_opt()?))
}
