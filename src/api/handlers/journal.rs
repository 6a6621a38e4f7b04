use axum::extract::{Query, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::IntoResponse;
use axum::{Extension, Json};
use chrono::{DateTime, NaiveDate, Utc};
use metrics::counter;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::db::journal_repo;
use crate::errors::AppError;
use crate::journal::{day_label, invalid_tokens, parse_trades_cell, week_label};
use crate::models::{JournalRecord, NewSubmission, TradeEntry, Unit};
use crate::session::Session;
use crate::AppState;

use super::{owner_of, ApiResponse};

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
pub struct ParseRequest {
    pub trades: Option<String>,
}

#[derive(Serialize)]
pub struct ParsePreview {
    pub entries: Vec<TradeEntry>,
    /// Normalized entry text in the configured unit.
    pub labels: Vec<String>,
    pub warnings: Vec<String>,
    pub unit: Unit,
}

#[derive(Deserialize)]
pub struct CreateEntryRequest {
    pub trade_date: NaiveDate,
    pub trades: String,
    pub week_label: Option<String>,
    pub day_label: Option<String>,
}

#[derive(Serialize)]
pub struct CreatedEntries {
    pub records: Vec<JournalRecord>,
    pub warnings: Vec<String>,
}

#[derive(Deserialize)]
pub struct HistoryQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

#[derive(Serialize)]
struct CsvRow<'a> {
    trade_date: NaiveDate,
    week: &'a str,
    day: &'a str,
    symbol: Option<&'a str>,
    value: Decimal,
    is_breakeven: bool,
    raw_text: &'a str,
    created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/journal/parse: preview how a cell would be split, no write.
pub async fn parse_preview(
    State(state): State<AppState>,
    Json(body): Json<ParseRequest>,
) -> Json<ApiResponse<ParsePreview>> {
    let entries = parse_trades_cell(body.trades.as_deref());
    let warnings = invalid_tokens(&entries);
    let unit = state.config.unit;
    let labels = entries.iter().map(|e| e.label(unit)).collect();

    Json(ApiResponse::ok(ParsePreview {
        entries,
        labels,
        warnings,
        unit,
    }))
}

/// POST /api/journal/entries: parse one cell and store its entries.
pub async fn create(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Json(body): Json<CreateEntryRequest>,
) -> Result<Json<ApiResponse<CreatedEntries>>, AppError> {
    let owner_id = owner_of(&session)?;

    if body.trades.trim().is_empty() {
        return Err(AppError::BadRequest("enter at least one trade".into()));
    }

    let entries = parse_trades_cell(Some(&body.trades));
    let warnings = invalid_tokens(&entries);
    counter!("journal_submissions_total").increment(1);
    counter!("journal_invalid_tokens_total").increment(warnings.len() as u64);

    if entries.is_empty() {
        tracing::info!(owner_id = %owner_id, "Submission held only placeholders, nothing stored");
        return Ok(Json(ApiResponse::ok(CreatedEntries {
            records: Vec::new(),
            warnings,
        })));
    }

    let locale = state.config.locale;
    let submission = NewSubmission {
        trade_date: body.trade_date,
        week_label: non_blank(body.week_label).unwrap_or_else(|| week_label(body.trade_date, locale)),
        day_label: non_blank(body.day_label).unwrap_or_else(|| day_label(body.trade_date, locale)),
        entries,
    };

    let records = journal_repo::insert_entries(&state.db, owner_id, &submission).await?;
    state.cache.invalidate(owner_id).await;
    counter!("journal_entries_inserted_total").increment(records.len() as u64);

    tracing::info!(
        owner_id = %owner_id,
        trade_date = %submission.trade_date,
        inserted = records.len(),
        invalid = warnings.len(),
        "Journal entries stored"
    );

    Ok(Json(ApiResponse::ok(CreatedEntries { records, warnings })))
}

/// GET /api/journal/entries: history, newest first.
pub async fn list(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<ApiResponse<Vec<JournalRecord>>>, AppError> {
    let owner_id = owner_of(&session)?;

    if let (Some(from), Some(to)) = (query.from, query.to) {
        if from > to {
            return Err(AppError::BadRequest("`from` must not be after `to`".into()));
        }
    }

    let mut records = journal_repo::fetch_range(&state.db, owner_id, query.from, query.to).await?;
    records.reverse();

    Ok(Json(ApiResponse::ok(records)))
}

/// GET /api/journal/export.csv: full history as a CSV download.
pub async fn export_csv(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Result<impl IntoResponse, AppError> {
    let owner_id = owner_of(&session)?;
    let records = journal_repo::fetch_all(&state.db, owner_id).await?;

    let mut writer = csv::Writer::from_writer(Vec::new());
    for r in &records {
        writer.serialize(CsvRow {
            trade_date: r.trade_date,
            week: &r.week_label,
            day: &r.day_label,
            symbol: r.symbol.as_deref(),
            value: r.value,
            is_breakeven: r.is_breakeven,
            raw_text: &r.raw_text,
            created_at: r.created_at,
        })?;
    }
    let body = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("failed to flush CSV export: {e}"))?;

    Ok((
        [
            (CONTENT_TYPE, "text/csv; charset=utf-8"),
            (CONTENT_DISPOSITION, "attachment; filename=\"journal.csv\""),
        ],
        body,
    ))
}

/// GET /api/journal/symbols
pub async fn symbols(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Result<Json<ApiResponse<Vec<String>>>, AppError> {
    let owner_id = owner_of(&session)?;
    let symbols = journal_repo::distinct_symbols(&state.db, owner_id).await?;
    Ok(Json(ApiResponse::ok(symbols)))
}

fn non_blank(s: Option<String>) -> Option<String> {
    s.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
