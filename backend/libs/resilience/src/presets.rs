/// Preset policies for the call types the read path makes
use crate::retry::RetryConfig;
use crate::timeout::TimeoutConfig;
use std::time::Duration;

/// Idempotent database reads (PostgreSQL)
///
/// 3 attempts total with a fixed 1s pause after each failure. Each attempt
/// is bounded by the pool's acquire timeout and the server's statement
/// timeout, so no extra timeout wraps it.
pub fn database_read_config() -> RetryConfig {
    RetryConfig::fixed(3, Duration::from_secs(1))
}

/// Readiness probes: 2s, no retry (the orchestrator polls again)
pub fn health_check_config() -> TimeoutConfig {
    TimeoutConfig {
        duration: Duration::from_secs(2),
    }
}
