use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{JournalRecord, NewSubmission};

const RECORD_COLUMNS: &str =
    "id, owner_id, trade_date, week_label, day_label, symbol, points, is_breakeven, raw_text, created_at";

/// Insert every entry of one submission in a single transaction, in token
/// order. Either all rows land or none do.
pub async fn insert_entries(
    pool: &PgPool,
    owner_id: Uuid,
    submission: &NewSubmission,
) -> anyhow::Result<Vec<JournalRecord>> {
    let mut tx = pool.begin().await?;
    let mut records = Vec::with_capacity(submission.entries.len());

    let sql = format!(
        r#"
        INSERT INTO journal_records
            (owner_id, trade_date, week_label, day_label, symbol, points, is_breakeven, raw_text)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING {RECORD_COLUMNS}
        "#
    );

    for entry in &submission.entries {
        let record = sqlx::query_as::<_, JournalRecord>(&sql)
            .bind(owner_id)
            .bind(submission.trade_date)
            .bind(&submission.week_label)
            .bind(&submission.day_label)
            .bind(&entry.symbol)
            .bind(entry.value)
            .bind(entry.is_breakeven)
            .bind(&entry.raw_text)
            .fetch_one(&mut *tx)
            .await?;
        records.push(record);
    }

    tx.commit().await?;
    Ok(records)
}

/// All of one owner's records, oldest first. Same-day rows keep insertion order.
pub async fn fetch_all(pool: &PgPool, owner_id: Uuid) -> anyhow::Result<Vec<JournalRecord>> {
    let records = sqlx::query_as::<_, JournalRecord>(&format!(
        "SELECT {RECORD_COLUMNS} FROM journal_records WHERE owner_id = $1 ORDER BY trade_date, entry_seq"
    ))
    .bind(owner_id)
    .fetch_all(pool)
    .await?;

    Ok(records)
}

/// Records with `from <= trade_date <= to`; open bounds when `None`.
pub async fn fetch_range(
    pool: &PgPool,
    owner_id: Uuid,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> anyhow::Result<Vec<JournalRecord>> {
    let records = sqlx::query_as::<_, JournalRecord>(&format!(
        r#"
        SELECT {RECORD_COLUMNS} FROM journal_records
        WHERE owner_id = $1
          AND ($2::date IS NULL OR trade_date >= $2)
          AND ($3::date IS NULL OR trade_date <= $3)
        ORDER BY trade_date, entry_seq
        "#
    ))
    .bind(owner_id)
    .bind(from)
    .bind(to)
    .fetch_all(pool)
    .await?;

    Ok(records)
}

pub async fn distinct_symbols(pool: &PgPool, owner_id: Uuid) -> anyhow::Result<Vec<String>> {
    let rows: Vec<(String,)> = sqlx::query_as(
        r#"
        SELECT DISTINCT symbol FROM journal_records
        WHERE owner_id = $1 AND symbol IS NOT NULL
        ORDER BY symbol
        "#,
    )
    .bind(owner_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(|r| r.0).collect())
}

pub async fn count_records(pool: &PgPool, owner_id: Uuid) -> anyhow::Result<i64> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM journal_records WHERE owner_id = $1")
        .bind(owner_id)
        .fetch_one(pool)
        .await?;

    Ok(row.0)
}
