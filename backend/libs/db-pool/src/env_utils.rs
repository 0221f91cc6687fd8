//! Environment variable parsing utilities
//!
//! Provides safe, ergonomic functions for parsing environment variables
//! with sensible defaults, eliminating the need for unwrap() calls.

use std::str::FromStr;

/// Parse an environment variable with a default fallback
///
/// Missing and unparseable values both fall back to `default`.
///
/// # Example
/// ```ignore
/// let max: u32 = parse_env_with_default("DB_MAX_CONNECTIONS", 10);
/// ```
pub fn parse_env_with_default<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Parse an environment variable, returning Result
///
/// # Example
/// ```ignore
/// let database_url = parse_env_required::<String>("DATABASE_URL")?;
/// ```
pub fn parse_env_required<T: FromStr>(key: &str) -> Result<T, String> {
    std::env::var(key)
        .map_err(|_| format!("Environment variable {} not found", key))?
        .parse()
        .map_err(|_| format!("Failed to parse environment variable {}", key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[serial_test::serial]
    fn test_parse_env_with_default() {
        let result: u32 = parse_env_with_default("NONEXISTENT_VAR_XYZ", 42);
        assert_eq!(result, 42);

        std::env::set_var("TEST_POOL_SIZE", "8");
        let result: u32 = parse_env_with_default("TEST_POOL_SIZE", 10);
        assert_eq!(result, 8);

        std::env::set_var("TEST_POOL_SIZE", "eight");
        let result: u32 = parse_env_with_default("TEST_POOL_SIZE", 10);
        assert_eq!(result, 10);
        std::env::remove_var("TEST_POOL_SIZE");
    }

    #[test]
    #[serial_test::serial]
    fn test_parse_env_required() {
        let result = parse_env_required::<u32>("NONEXISTENT_VAR_XYZ");
        assert!(result.is_err());

        std::env::set_var("TEST_REQ", "456");
        let result = parse_env_required::<u32>("TEST_REQ");
        assert_eq!(result, Ok(456));
        std::env::remove_var("TEST_REQ");
    }
}
