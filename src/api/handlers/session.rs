use axum::extract::State;
use axum::{Extension, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::db::journal_repo;
use crate::errors::AppError;
use crate::journal::Locale;
use crate::models::Unit;
use crate::session::Session;
use crate::AppState;

use super::{owner_of, ApiResponse};

#[derive(Serialize)]
pub struct SessionInfo {
    pub owner_id: Uuid,
    pub email: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub record_count: i64,
    pub locale: Locale,
    pub unit: Unit,
}

/// GET /api/session: who the bearer token belongs to.
pub async fn current(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Result<Json<ApiResponse<SessionInfo>>, AppError> {
    let owner_id = owner_of(&session)?;
    let record_count = journal_repo::count_records(&state.db, owner_id).await?;

    let (email, expires_at) = match session {
        Session::Authenticated { email, expires_at, .. } => (email, Some(expires_at)),
        Session::Anonymous => (None, None),
    };

    Ok(Json(ApiResponse::ok(SessionInfo {
        owner_id,
        email,
        expires_at,
        record_count,
        locale: state.config.locale,
        unit: state.config.unit,
    })))
}
