pub mod analytics;
pub mod api;
pub mod cache;
pub mod config;
pub mod db;
pub mod errors;
pub mod journal;
pub mod metrics;
pub mod models;
pub mod session;

use std::sync::Arc;

use crate::api::auth::TokenVerifier;
use crate::cache::MetricsCache;
use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub db: sqlx::PgPool,
    pub config: AppConfig,
    pub verifier: Arc<TokenVerifier>,
    pub cache: MetricsCache,
    pub metrics_handle: metrics_exporter_prometheus::PrometheusHandle,
}
