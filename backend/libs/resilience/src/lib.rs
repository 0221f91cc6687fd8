/// Resilience patterns for data-source access
///
/// This library provides the building blocks the read path uses to absorb
/// transient failures:
/// - **Retry**: Bounded attempt budget with a fixed delay, preserving the last error
/// - **Timeout**: Enforces time limits on probes and external calls
/// - **Preset Configurations**: Pre-tuned settings for database reads and health probes
///
/// # Example: Database Read with Retry
///
/// ```rust,no_run
/// use resilience::{presets, with_retry};
///
/// #[tokio::main]
/// async fn main() {
///     let result = with_retry(presets::database_read_config(), || async {
///         // Your database query
///         Ok::<_, String>(vec!["row"])
///     })
///     .await;
/// }
/// ```
///
/// # Example: Health Probe with Timeout
///
/// ```rust,no_run
/// use resilience::{presets, timeout::with_timeout_result};
///
/// #[tokio::main]
/// async fn main() {
///     let config = presets::health_check_config();
///
///     let result = with_timeout_result(
///         config.duration,
///         async {
///             // SELECT 1
///             Ok::<_, String>(())
///         }
///     ).await;
/// }
/// ```

pub mod metrics;
pub mod presets;
pub mod retry;
pub mod timeout;

// Re-export main types for convenience
pub use presets::{database_read_config, health_check_config};
pub use retry::{with_retry, RetryConfig, RetryError};
pub use timeout::{with_timeout_result, TimeoutConfig, TimeoutError};
