use std::env;

use crate::journal::labels::Locale;
use crate::models::Unit;

const DEFAULT_JWT_AUDIENCE: &str = "authenticated";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub db_max_connections: u32,

    // Access tokens are issued by the managed auth backend; we only verify them.
    pub jwt_secret: String,
    pub jwt_audience: String,

    // Journal presentation
    pub locale: Locale,
    pub unit: Unit,

    pub metrics_cache_capacity: usize,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup. `from_env` is the
    /// process-environment flavour of this.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Self {
            database_url: var("DATABASE_URL")
                .ok_or_else(|| anyhow::anyhow!("DATABASE_URL must be set"))?,
            host: var("HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port: var("PORT").unwrap_or_else(|| "8080".into()).parse()?,
            db_max_connections: var("DB_MAX_CONNECTIONS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),

            jwt_secret: var("JWT_SECRET")
                .ok_or_else(|| anyhow::anyhow!("JWT_SECRET must be set"))?,
            jwt_audience: var("JWT_AUDIENCE").unwrap_or_else(|| DEFAULT_JWT_AUDIENCE.into()),

            locale: var("JOURNAL_LOCALE")
                .map(|v| Locale::from_code(&v))
                .unwrap_or_default(),
            unit: var("JOURNAL_UNIT")
                .map(|v| Unit::from_code(&v))
                .unwrap_or_default(),

            metrics_cache_capacity: var("METRICS_CACHE_CAPACITY")
                .and_then(|v| v.parse().ok())
                .filter(|&n: &usize| n > 0)
                .unwrap_or(256),
        })
    }
}
