use std::sync::Arc;

use tradejournal::api::auth::TokenVerifier;
use tradejournal::api::router::create_router;
use tradejournal::cache::MetricsCache;
use tradejournal::config::AppConfig;
use tradejournal::{db, metrics, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;
    let addr = format!("{}:{}", config.host, config.port);

    tracing::info!("Connecting to database...");
    let db = db::init_pool(&config.database_url, config.db_max_connections).await?;
    db::run_migrations(&db).await?;
    tracing::info!("Database connected, migrations applied");

    let metrics_handle = metrics::init_metrics()?;
    let verifier = TokenVerifier::new(&config.jwt_secret, &config.jwt_audience);

    tracing::info!(
        locale = %config.locale,
        unit = %config.unit,
        cache_capacity = config.metrics_cache_capacity,
        "Journal settings loaded"
    );

    let state = AppState {
        db,
        cache: MetricsCache::new(config.metrics_cache_capacity),
        config,
        verifier: Arc::new(verifier),
        metrics_handle,
    };
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {addr}");
    axum::serve(listener, router).await?;

    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer())
        .init();
}
