//! Error types for aviary-cs
//!
//! Maps service failures onto the HTTP taxonomy: validation failures are
//! 400, uniqueness conflicts are 409, missing resources are 404, and any
//! other persistence failure propagates as 500. No retries; a failure is a
//! terminal outcome for that request.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Invalid request (400) - missing/empty required input
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Conflict (409) - uniqueness violation
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),

    /// Database error (500 unless it is a unique violation; create paths
    /// classify those as Conflict before this variant is reached)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// aviary-common error
    #[error("Common error: {0}")]
    Common(#[from] aviary_common::Error),
}

impl ApiError {
    /// Classify a database error from an insert against a UNIQUE column.
    ///
    /// Unique-constraint violations become Conflict (409); anything else
    /// stays a generic database failure (500).
    pub fn conflict_on_unique(err: sqlx::Error, message: &str) -> Self {
        match err {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                ApiError::Conflict(message.to_string())
            }
            other => ApiError::Database(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg),
            ApiError::Database(ref err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "DATABASE_ERROR",
                err.to_string(),
            ),
            ApiError::Common(ref err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "COMMON_ERROR",
                err.to_string(),
            ),
        };

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
