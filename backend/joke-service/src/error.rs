/// Error types for Joke Service
///
/// Only a cold-start failure reaches callers: the database is unavailable
/// and no cached jokes exist to fall back on. Both variants map to 503.
use crate::db::SourceError;
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use resilience::RetryError;

/// Result type for joke-service operations
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Every attempt ended without a database handle
    #[error("Database connection error: {0}")]
    DatabaseConnection(String),

    /// Any other terminal failure on the read path
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AppError {
    /// Stable machine-readable kind
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::DatabaseConnection(_) => "database_connection_error",
            AppError::ServiceUnavailable(_) => "service_unavailable",
        }
    }

    /// Human-readable message safe to show to callers
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::DatabaseConnection(_) => {
                "Unable to connect to the database. Please try again later."
            }
            AppError::ServiceUnavailable(_) => {
                "The service is temporarily unavailable. Please try again later."
            }
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::DatabaseConnection(_) | AppError::ServiceUnavailable(_) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        HttpResponse::build(status).json(serde_json::json!({
            "error": self.kind(),
            "message": self.user_message(),
            "status": status.as_u16(),
        }))
    }
}

/// Classify a terminal fetch failure by the cause of its final attempt
impl From<RetryError<SourceError>> for AppError {
    fn from(err: RetryError<SourceError>) -> Self {
        let detail = err.to_string();
        match err.into_last_error() {
            SourceError::Connect(_) => AppError::DatabaseConnection(detail),
            SourceError::Query(_) => AppError::ServiceUnavailable(detail),
        }
    }
}
