use crate::models::Joke;
use async_trait::async_trait;
use db_pool::{acquire_error_kind, acquire_with_metrics};
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::{debug, warn};

/// Every column of every row, as one JSON object per joke
pub const SELECT_JOKES: &str = "SELECT to_jsonb(j) AS record FROM jokes j";

/// Failure of a single fetch attempt
#[derive(Debug, Clone, thiserror::Error)]
pub enum SourceError {
    /// No handle could be obtained (database unreachable, pool saturated)
    #[error("cannot connect to the database: {0}")]
    Connect(String),

    /// A handle was obtained but the query failed
    #[error("cannot read jokes: {0}")]
    Query(String),
}

/// Data source gateway for the joke list
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JokeSource: Send + Sync {
    /// Run the fixed jokes query once
    async fn fetch_jokes(&self) -> Result<Vec<Joke>, SourceError>;

    /// Cheap connectivity check for readiness probes
    async fn ping(&self) -> Result<(), SourceError>;
}

/// PostgreSQL-backed joke source
#[derive(Clone)]
pub struct PgJokeSource {
    pool: PgPool,
    service_name: String,
}

impl PgJokeSource {
    pub fn new(pool: PgPool, service_name: impl Into<String>) -> Self {
        Self {
            pool,
            service_name: service_name.into(),
        }
    }

    async fn acquire(&self) -> Result<sqlx::pool::PoolConnection<sqlx::Postgres>, SourceError> {
        acquire_with_metrics(&self.pool, &self.service_name)
            .await
            .map_err(|e| {
                warn!(kind = acquire_error_kind(&e), error = %e, "Connection acquisition failed");
                SourceError::Connect(e.to_string())
            })
    }
}

#[async_trait]
impl JokeSource for PgJokeSource {
    async fn fetch_jokes(&self) -> Result<Vec<Joke>, SourceError> {
        // Returned to the pool when `conn` drops, on every path out of here
        let mut conn = self.acquire().await?;

        let rows: Vec<Json<Joke>> = sqlx::query_scalar(SELECT_JOKES)
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| {
                warn!(error = %e, "Jokes query failed");
                SourceError::Query(e.to_string())
            })?;

        debug!(count = rows.len(), "Fetched jokes from database");
        Ok(rows.into_iter().map(|Json(joke)| joke).collect())
    }

    async fn ping(&self) -> Result<(), SourceError> {
        let mut conn = self.acquire().await?;

        sqlx::query("SELECT 1")
            .execute(&mut *conn)
            .await
            .map(|_| ())
            .map_err(|e| {
                warn!(error = %e, "Ping query failed");
                SourceError::Query(e.to_string())
            })
    }
}
