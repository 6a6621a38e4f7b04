pub mod analytics;
pub mod health;
pub mod journal;
pub mod metrics;
pub mod session;

use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::session::Session;

#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

/// Owner of the request, as established by the session middleware.
pub fn owner_of(session: &Session) -> Result<Uuid, AppError> {
    session.owner_id().ok_or(AppError::Unauthorized)
}
