/// Configuration management for Joke Service
///
/// Everything comes from environment variables (optionally seeded from a
/// `.env` file by the binary). Malformed numeric values are rejected rather
/// than silently replaced by defaults.
use resilience::{database_read_config, RetryConfig};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application settings
    pub app: AppConfig,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Read path (cache, retry, cache-control) configuration
    pub jokes: JokesConfig,
    /// Log output configuration
    pub logging: LoggingConfig,
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (dev, staging, prod)
    pub env: String,
    /// Server host to bind to
    pub host: String,
    /// Server port to bind to
    pub port: u16,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database URL
    pub url: String,
    /// Max connections in pool
    pub max_connections: u32,
}

/// Read path tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JokesConfig {
    pub cache_ttl_secs: u64,
    pub fetch_attempts: u32,
    pub retry_delay_ms: u64,
    pub fresh_max_age_secs: u64,
    pub stale_max_age_secs: u64,
    /// Oldest cached list still served as a fallback; `None` = no limit
    pub max_staleness_secs: Option<u64>,
}

impl Default for JokesConfig {
    fn default() -> Self {
        let retry = database_read_config();

        Self {
            cache_ttl_secs: 300,
            fetch_attempts: retry.max_attempts,
            retry_delay_ms: retry.delay.as_millis() as u64,
            fresh_max_age_secs: 300,
            stale_max_age_secs: 60,
            max_staleness_secs: None,
        }
    }
}

impl JokesConfig {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn max_staleness(&self) -> Option<Duration> {
        self.max_staleness_secs.map(Duration::from_secs)
    }

    pub fn retry_config(&self) -> RetryConfig {
        RetryConfig::fixed(
            self.fetch_attempts,
            Duration::from_millis(self.retry_delay_ms),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub format: LogFormat,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());
        let defaults = JokesConfig::default();

        let jokes = JokesConfig {
            cache_ttl_secs: parse_env_or_default("JOKES_CACHE_TTL_SECS", defaults.cache_ttl_secs)?,
            fetch_attempts: parse_env_or_default("JOKES_FETCH_ATTEMPTS", defaults.fetch_attempts)?,
            retry_delay_ms: parse_env_or_default("JOKES_RETRY_DELAY_MS", defaults.retry_delay_ms)?,
            fresh_max_age_secs: parse_env_or_default(
                "JOKES_FRESH_MAX_AGE_SECS",
                defaults.fresh_max_age_secs,
            )?,
            stale_max_age_secs: parse_env_or_default(
                "JOKES_STALE_MAX_AGE_SECS",
                defaults.stale_max_age_secs,
            )?,
            max_staleness_secs: parse_env_optional("JOKES_MAX_STALENESS_SECS")?,
        };

        if jokes.fetch_attempts == 0 {
            return Err("JOKES_FETCH_ATTEMPTS must be at least 1".to_string());
        }

        let format = match std::env::var("LOG_FORMAT") {
            Ok(value) if value.eq_ignore_ascii_case("json") => LogFormat::Json,
            Ok(value) if value.eq_ignore_ascii_case("text") || value.is_empty() => LogFormat::Text,
            Ok(value) => return Err(format!("Unsupported LOG_FORMAT '{}'", value)),
            Err(_) => LogFormat::Text,
        };

        let max_connections: u32 = parse_env_or_default("DB_MAX_CONNECTIONS", 10)?;
        if max_connections == 0 {
            return Err("DB_MAX_CONNECTIONS must be at least 1".to_string());
        }

        Ok(Config {
            app: AppConfig {
                env: app_env,
                host: std::env::var("JOKE_SERVICE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_env_or_default("JOKE_SERVICE_PORT", 8080)?,
            },
            database: DatabaseConfig {
                url: std::env::var("DATABASE_URL")
                    .unwrap_or_else(|_| "postgres://localhost/jokes".to_string()),
                max_connections,
            },
            jokes,
            logging: LoggingConfig { format },
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.app.host, self.app.port)
    }
}

fn parse_env_or_default<T>(key: &str, default: T) -> Result<T, String>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(val) => val
            .parse()
            .map_err(|e| format!("Failed to parse {}='{}': {}", key, val, e)),
        Err(_) => Ok(default),
    }
}

fn parse_env_optional<T>(key: &str) -> Result<Option<T>, String>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(val) if val.trim().is_empty() => Ok(None),
        Ok(val) => val
            .parse()
            .map(Some)
            .map_err(|e| format!("Failed to parse {}='{}': {}", key, val, e)),
        Err(_) => Ok(None),
    }
}
