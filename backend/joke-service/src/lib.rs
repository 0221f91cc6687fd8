/// Joke Service Library
///
/// Serves the joke list from PostgreSQL through a single read endpoint while
/// shielding callers from database latency and outages.
///
/// # Modules
///
/// - `models`: Joke records and the freshness hint returned to callers
/// - `db`: Data source gateway (`JokeSource`) and its PostgreSQL implementation
/// - `cache`: Process-wide cache of the last known-good joke list
/// - `services`: Retrying fetcher and the read coordinator
/// - `handlers`: HTTP request handlers and route registration
/// - `error`: Error types and HTTP mapping
/// - `config`: Configuration management
/// - `metrics`: Prometheus collectors
pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};

/// Service name used for metrics labels and logs
pub const SERVICE_NAME: &str = "joke-service";
