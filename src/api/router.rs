use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::AppState;
use super::auth::require_session;
use super::handlers;

pub fn create_router(state: AppState) -> Router {
    // Public routes: no authentication required
    let public = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/metrics", get(handlers::metrics::render));

    // Protected API routes: every request is bound to the token's owner
    let protected = Router::new()
        .route("/api/session", get(handlers::session::current))
        // Journal
        .route("/api/journal/parse", post(handlers::journal::parse_preview))
        .route(
            "/api/journal/entries",
            get(handlers::journal::list).post(handlers::journal::create),
        )
        .route("/api/journal/export.csv", get(handlers::journal::export_csv))
        .route("/api/journal/symbols", get(handlers::journal::symbols))
        // Analytics
        .route("/api/analytics/summary", get(handlers::analytics::summary))
        .route("/api/analytics/monthly", get(handlers::analytics::monthly))
        .route("/api/analytics/calendar", get(handlers::analytics::calendar))
        .layer(middleware::from_fn_with_state(state.clone(), require_session));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    public
        .merge(protected)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
