/// Read path for the joke list
///
/// The fetcher wraps the data source in a bounded retry. The coordinator
/// serves from cache, refreshes on a miss, and falls back to the last good
/// list when the database cannot be read.
use crate::cache::{CacheEntry, JokeCache};
use crate::config::JokesConfig;
use crate::db::{JokeSource, SourceError};
use crate::error::{AppError, Result};
use crate::metrics::jokes::{JOKES_CACHE_EVENTS, JOKES_FETCH_ATTEMPTS, JOKES_FETCH_DURATION_SECONDS};
use crate::models::{Freshness, Joke, JokesPayload};
use resilience::{with_retry, RetryConfig, RetryError};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, warn};

/// Fetches the joke list, retrying transient failures.
pub struct RetryingFetcher {
    source: Arc<dyn JokeSource>,
    retry: RetryConfig,
}

impl RetryingFetcher {
    pub fn new(source: Arc<dyn JokeSource>, retry: RetryConfig) -> Self {
        Self { source, retry }
    }

    /// Run up to `max_attempts` queries, waiting a fixed delay after each
    /// failure. The error carries the cause of the last attempt.
    pub async fn fetch(&self) -> std::result::Result<Vec<Joke>, RetryError<SourceError>> {
        let source = &self.source;
        let start = Instant::now();

        let result = with_retry(self.retry.clone(), move || async move {
            let attempt = source.fetch_jokes().await;
            let label = match &attempt {
                Ok(_) => "success",
                Err(SourceError::Connect(_)) => "connect_error",
                Err(SourceError::Query(_)) => "query_error",
            };
            JOKES_FETCH_ATTEMPTS.with_label_values(&[label]).inc();
            attempt
        })
        .await;

        let label = if result.is_ok() { "success" } else { "exhausted" };
        JOKES_FETCH_DURATION_SECONDS
            .with_label_values(&[label])
            .observe(start.elapsed().as_secs_f64());

        result
    }

    pub fn source(&self) -> &Arc<dyn JokeSource> {
        &self.source
    }
}

/// Read coordinator: cache first, then database, then stale fallback.
///
/// Holds no per-request state. Concurrent misses may each run a full fetch;
/// whichever finishes last owns the cache.
pub struct JokeService {
    cache: Arc<JokeCache>,
    fetcher: RetryingFetcher,
    fresh_max_age_secs: u64,
    stale_max_age_secs: u64,
    max_staleness: Option<Duration>,
}

impl JokeService {
    pub fn new(source: Arc<dyn JokeSource>, config: &JokesConfig) -> Self {
        Self::with_cache(
            source,
            Arc::new(JokeCache::new(config.cache_ttl())),
            config,
        )
    }

    pub fn with_cache(
        source: Arc<dyn JokeSource>,
        cache: Arc<JokeCache>,
        config: &JokesConfig,
    ) -> Self {
        Self {
            cache,
            fetcher: RetryingFetcher::new(source, config.retry_config()),
            fresh_max_age_secs: config.fresh_max_age_secs,
            stale_max_age_secs: config.stale_max_age_secs,
            max_staleness: config.max_staleness(),
        }
    }

    pub fn cache(&self) -> &Arc<JokeCache> {
        &self.cache
    }

    pub fn source(&self) -> &Arc<dyn JokeSource> {
        self.fetcher.source()
    }

    pub async fn get_jokes(&self) -> Result<JokesPayload> {
        if let Some(jokes) = self.cache.fresh() {
            debug!(count = jokes.len(), "Serving jokes from cache");
            JOKES_CACHE_EVENTS.with_label_values(&["hit"]).inc();
            return Ok(self.payload(jokes, Freshness::Fresh));
        }

        JOKES_CACHE_EVENTS.with_label_values(&["miss"]).inc();

        match self.fetcher.fetch().await {
            Ok(jokes) => {
                let jokes = self.cache.update(jokes);
                JOKES_CACHE_EVENTS.with_label_values(&["update"]).inc();
                Ok(self.payload(jokes, Freshness::Fresh))
            }
            Err(err) => {
                let entry = self.cache.peek();

                if self.can_serve_stale(&entry) {
                    warn!(
                        error = %err,
                        count = entry.data.len(),
                        age = ?entry.age(),
                        "Database unavailable, serving stale jokes"
                    );
                    JOKES_CACHE_EVENTS.with_label_values(&["stale_served"]).inc();
                    return Ok(self.payload(entry.data, Freshness::Stale));
                }

                error!(error = %err, "Database unavailable and no cached jokes to fall back on");
                Err(AppError::from(err))
            }
        }
    }

    /// Any non-empty entry qualifies unless a staleness ceiling is set
    fn can_serve_stale(&self, entry: &CacheEntry) -> bool {
        if entry.is_empty() {
            return false;
        }

        match (self.max_staleness, entry.age()) {
            (Some(ceiling), Some(age)) => age <= ceiling,
            _ => true,
        }
    }

    fn payload(&self, jokes: Arc<Vec<Joke>>, freshness: Freshness) -> JokesPayload {
        let max_age_secs = match freshness {
            Freshness::Fresh => self.fresh_max_age_secs,
            Freshness::Stale => self.stale_max_age_secs,
        };

        JokesPayload {
            jokes,
            freshness,
            max_age_secs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MockJokeSource;
    use mockall::Sequence;

    fn jokes(n: usize) -> Vec<Joke> {
        (0..n)
            .map(|i| Joke::new(format!("joke {i}"), "punchline"))
            .collect()
    }

    fn service(source: MockJokeSource) -> JokeService {
        JokeService::new(Arc::new(source), &JokesConfig::default())
    }

    #[tokio::test(start_paused = true)]
    async fn test_cold_cache_fetches_once_and_populates() {
        let mut source = MockJokeSource::new();
        source.expect_fetch_jokes().times(1).returning(|| Ok(jokes(2)));
        let service = service(source);

        let payload = service.get_jokes().await.unwrap();

        assert_eq!(payload.jokes.len(), 2);
        assert_eq!(payload.freshness, Freshness::Fresh);
        assert_eq!(payload.max_age_secs, 300);
        assert!(service.cache().is_valid());
    }

    #[tokio::test(start_paused = true)]
    async fn test_third_attempt_success_after_two_delays() {
        let mut seq = Sequence::new();
        let mut source = MockJokeSource::new();
        source
            .expect_fetch_jokes()
            .times(2)
            .in_sequence(&mut seq)
            .returning(|| Err(SourceError::Connect("refused".into())));
        source
            .expect_fetch_jokes()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(jokes(1)));
        let service = service(source);

        let start = tokio::time::Instant::now();
        let payload = service.get_jokes().await.unwrap();

        assert_eq!(payload.jokes.len(), 1);
        assert_eq!(start.elapsed(), Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_connect_failures_surface_database_connection_error() {
        let mut source = MockJokeSource::new();
        source
            .expect_fetch_jokes()
            .times(3)
            .returning(|| Err(SourceError::Connect("pool timed out".into())));
        let service = service(source);

        let err = service.get_jokes().await.unwrap_err();
        assert!(matches!(err, AppError::DatabaseConnection(_)));
        assert!(!service.cache().peek().valid);
    }

    #[tokio::test(start_paused = true)]
    async fn test_query_failure_last_surfaces_service_unavailable() {
        let mut seq = Sequence::new();
        let mut source = MockJokeSource::new();
        source
            .expect_fetch_jokes()
            .times(2)
            .in_sequence(&mut seq)
            .returning(|| Err(SourceError::Connect("refused".into())));
        source
            .expect_fetch_jokes()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Err(SourceError::Query("relation does not exist".into())));
        let service = service(source);

        let err = service.get_jokes().await.unwrap_err();
        assert!(matches!(err, AppError::ServiceUnavailable(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_successful_fetch_is_not_a_fallback() {
        let mut seq = Sequence::new();
        let mut source = MockJokeSource::new();
        source
            .expect_fetch_jokes()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(Vec::new()));
        source
            .expect_fetch_jokes()
            .times(3)
            .in_sequence(&mut seq)
            .returning(|| Err(SourceError::Connect("refused".into())));
        let service = service(source);

        assert!(service.get_jokes().await.unwrap().jokes.is_empty());

        tokio::time::advance(Duration::from_secs(301)).await;
        assert!(service.get_jokes().await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_staleness_ceiling_blocks_old_fallback() {
        let mut seq = Sequence::new();
        let mut source = MockJokeSource::new();
        source
            .expect_fetch_jokes()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(jokes(5)));
        source
            .expect_fetch_jokes()
            .times(6)
            .in_sequence(&mut seq)
            .returning(|| Err(SourceError::Query("timeout".into())));

        let config = JokesConfig {
            max_staleness_secs: Some(600),
            ..Default::default()
        };
        let service = JokeService::new(Arc::new(source), &config);
        service.get_jokes().await.unwrap();

        // Within the ceiling: stale fallback
        tokio::time::advance(Duration::from_secs(400)).await;
        let payload = service.get_jokes().await.unwrap();
        assert_eq!(payload.freshness, Freshness::Stale);

        // Past the ceiling: cold-start error path
        tokio::time::advance(Duration::from_secs(400)).await;
        assert!(matches!(
            service.get_jokes().await,
            Err(AppError::ServiceUnavailable(_))
        ));
    }
}
