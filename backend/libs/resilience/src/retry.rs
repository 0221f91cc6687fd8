/// Bounded retry policy with a fixed delay between attempts
use crate::metrics::RetryMetrics;
use std::future::Future;
use std::time::Duration;
use tracing::{error, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryConfig {
    /// Total number of attempts, including the first one
    pub max_attempts: u32,
    /// Pause after each failed attempt except the last
    pub delay: Duration,
}

impl RetryConfig {
    pub fn fixed(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RetryError<E> {
    #[error("gave up after {attempts} attempt(s): {last_error}")]
    Exhausted { attempts: u32, last_error: E },
}

impl<E> RetryError<E> {
    /// Error returned by the final attempt
    pub fn last_error(&self) -> &E {
        match self {
            RetryError::Exhausted { last_error, .. } => last_error,
        }
    }

    pub fn into_last_error(self) -> E {
        match self {
            RetryError::Exhausted { last_error, .. } => last_error,
        }
    }

    pub fn attempts(&self) -> u32 {
        match self {
            RetryError::Exhausted { attempts, .. } => *attempts,
        }
    }
}

/// Execute a future with retry logic
///
/// `f` is invoked once per attempt and each attempt is awaited to completion
/// before the delay starts. A budget of zero is treated as a single attempt.
/// No delay follows the final failed attempt.
pub async fn with_retry<F, Fut, T, E>(config: RetryConfig, mut f: F) -> Result<T, RetryError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let max_attempts = config.max_attempts.max(1);
    let mut attempt = 0;

    loop {
        attempt += 1;

        match f().await {
            Ok(result) => {
                RetryMetrics::record_attempts("success", attempt);
                return Ok(result);
            }
            Err(e) => {
                if attempt >= max_attempts {
                    error!(attempts = attempt, error = %e, "Retry budget exhausted");
                    RetryMetrics::record_attempts("exhausted", attempt);
                    return Err(RetryError::Exhausted {
                        attempts: attempt,
                        last_error: e,
                    });
                }

                warn!(
                    error = %e,
                    "Attempt {}/{} failed, retrying in {:?}",
                    attempt, max_attempts, config.delay
                );

                tokio::time::sleep(config.delay).await;
            }
        }
    }
}
