//! Database connection pool management
//!
//! Provides database pool creation and configuration for the read path.
//! The pool is created lazily: no connection is opened until the first
//! acquisition, so a service can start while PostgreSQL is unreachable.

pub mod env_utils;
mod metrics;

use env_utils::{parse_env_required, parse_env_with_default};
use metrics::update_pool_metrics;
pub use metrics::{acquire_error_kind, acquire_with_metrics};

use sqlx::postgres::{PgPool, PgPoolOptions};
use std::fmt;
use std::time::Duration;
use tracing::{debug, info};

/// Database connection pool configuration
#[derive(Clone)]
pub struct DbConfig {
    /// Service name for metrics labeling
    pub service_name: String,
    /// PostgreSQL connection URL
    pub database_url: String,
    /// Maximum number of connections (handle pool capacity)
    pub max_connections: u32,
    /// Minimum number of connections kept open once connected
    pub min_connections: u32,
    /// Connection acquisition timeout (get connection from pool)
    pub acquire_timeout_secs: u64,
    /// Connection idle timeout
    pub idle_timeout_secs: u64,
    /// Connection maximum lifetime
    pub max_lifetime_secs: u64,
}

impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("service_name", &self.service_name)
            .field("database_url", &"[REDACTED]")
            .field("max_connections", &self.max_connections)
            .field("min_connections", &self.min_connections)
            .field("acquire_timeout_secs", &self.acquire_timeout_secs)
            .field("idle_timeout_secs", &self.idle_timeout_secs)
            .field("max_lifetime_secs", &self.max_lifetime_secs)
            .finish()
    }
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            service_name: String::from("unknown"),
            database_url: String::new(),
            max_connections: 10,
            min_connections: 0,
            acquire_timeout_secs: 5,
            idle_timeout_secs: 600,
            max_lifetime_secs: 1800,
        }
    }
}

impl DbConfig {
    /// Create a new DbConfig from environment variables
    pub fn from_env(service_name: &str) -> Result<Self, String> {
        let database_url = parse_env_required("DATABASE_URL")?;
        Ok(Self::from_env_with_url(service_name, database_url))
    }

    /// Like [`DbConfig::from_env`], but uses `fallback_url` when
    /// `DATABASE_URL` is unset. Pool tuning variables are read either way.
    pub fn from_env_or_url(service_name: &str, fallback_url: &str) -> Self {
        let database_url = std::env::var("DATABASE_URL")
            .ok()
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| fallback_url.to_string());
        Self::from_env_with_url(service_name, database_url)
    }

    fn from_env_with_url(service_name: &str, database_url: String) -> Self {
        let defaults = Self::default();

        Self {
            service_name: service_name.to_string(),
            database_url,
            max_connections: parse_env_with_default("DB_MAX_CONNECTIONS", defaults.max_connections),
            min_connections: parse_env_with_default("DB_MIN_CONNECTIONS", defaults.min_connections),
            acquire_timeout_secs: parse_env_with_default(
                "DB_ACQUIRE_TIMEOUT_SECS",
                defaults.acquire_timeout_secs,
            ),
            idle_timeout_secs: parse_env_with_default(
                "DB_IDLE_TIMEOUT_SECS",
                defaults.idle_timeout_secs,
            ),
            max_lifetime_secs: parse_env_with_default(
                "DB_MAX_LIFETIME_SECS",
                defaults.max_lifetime_secs,
            ),
        }
    }

    /// Log pool configuration details
    pub fn log_config(&self) {
        info!(
            "Database Pool Configuration: \
             max_connections={}, min_connections={}, \
             acquire_timeout={}s, idle_timeout={}s, max_lifetime={}s",
            self.max_connections,
            self.min_connections,
            self.acquire_timeout_secs,
            self.idle_timeout_secs,
            self.max_lifetime_secs
        );
    }
}

/// Create a lazily-connecting PostgreSQL pool with background metrics
///
/// Fails only when the URL cannot be parsed or the pool would have no
/// capacity. Connectivity problems surface later as acquisition errors.
pub async fn create_pool(config: DbConfig) -> Result<PgPool, sqlx::Error> {
    if config.max_connections == 0 {
        return Err(sqlx::Error::Configuration(
            "max_connections must be at least 1".into(),
        ));
    }

    debug!(
        "Creating database pool: service={}, max={}, min={}, acquire_timeout={}s, idle_timeout={}s",
        config.service_name,
        config.max_connections,
        config.min_connections,
        config.acquire_timeout_secs,
        config.idle_timeout_secs
    );

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        // Bounds how long a saturated pool makes a caller wait
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(config.max_lifetime_secs))
        .test_before_acquire(true)
        .connect_lazy(&config.database_url)?;

    info!(
        service = %config.service_name,
        max_connections = config.max_connections,
        "Database pool created (lazy)"
    );

    update_pool_metrics(&pool, &config.service_name);

    {
        let pool_clone = pool.clone();
        let service = config.service_name.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(30));
            loop {
                interval.tick().await;
                if pool_clone.is_closed() {
                    break;
                }
                update_pool_metrics(&pool_clone, &service);
            }
        });
    }

    Ok(pool)
}
