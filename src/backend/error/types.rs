/**
 * Backend Error Types
 *
 * This module defines error types specific to the backend server.
 * These errors are returned from HTTP handlers and converted to HTTP
 * responses by the `conversion` module.
 *
 * # Error Categories
 *
 * ## Handler Errors
 *
 * Handler errors carry their own status code:
 * - Missing or invalid credentials (401)
 * - Acting on someone else's resource (403)
 * - Unknown resources (404)
 * - Duplicates and finished lifecycles (409)
 *
 * ## Database Errors
 *
 * `sqlx` failures are logged and reported as 500 without leaking the
 * driver message to the client. A missing pool is reported as 503.
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::shared::SharedError;

/// Backend-specific error types
///
/// # Usage
///
/// ```rust
/// use scoutlink::backend::error::BackendError;
///
/// let err = BackendError::not_found("Player advertisement not found");
/// assert_eq!(err.status_code(), axum::http::StatusCode::NOT_FOUND);
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Handler error (e.g., missing headers, invalid request)
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// The database pool is not configured
    #[error("Database not configured")]
    DatabaseUnavailable,

    /// Query or connection failure
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    /// State management error (e.g., token signing failure)
    #[error("State error: {message}")]
    StateError {
        /// Human-readable error message
        message: String,
    },

    /// Shared error (validation, lifecycle)
    #[error(transparent)]
    SharedError(#[from] SharedError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl BackendError {
    /// Create a new handler error with a status code
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::UNAUTHORIZED, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::FORBIDDEN, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::NOT_FOUND, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::CONFLICT, message)
    }

    /// Create a new state error
    pub fn state(message: impl Into<String>) -> Self {
        Self::StateError {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `HandlerError` - Uses the status code from the error
    /// - `DatabaseUnavailable` - 503 Service Unavailable
    /// - `DatabaseError` - 409 for unique violations, 404 when a referenced
    ///   row is gone, otherwise 500
    /// - `StateError` - 500 Internal Server Error
    /// - `SharedError` - 400 for validation, 409 for lifecycle, 500 for serialization
    /// - `SerializationError` - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } => *status,
            Self::DatabaseUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::DatabaseError(err) if is_unique_violation(err) => StatusCode::CONFLICT,
            Self::DatabaseError(err) if is_foreign_key_violation(err) => StatusCode::NOT_FOUND,
            Self::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::StateError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::SharedError(err) => match err {
                SharedError::SerializationError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
                SharedError::ValidationError { .. } => StatusCode::BAD_REQUEST,
                SharedError::InvalidTransition { .. } => StatusCode::CONFLICT,
            },
            Self::SerializationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the message that is safe to show to the client
    pub fn message(&self) -> String {
        match self {
            Self::HandlerError { message, .. } => message.clone(),
            Self::DatabaseUnavailable => "Database not configured".to_string(),
            Self::DatabaseError(err) if is_unique_violation(err) => {
                "Resource already exists".to_string()
            }
            Self::DatabaseError(err) if is_foreign_key_violation(err) => {
                "Referenced resource not found".to_string()
            }
            Self::DatabaseError(_) => "Internal server error".to_string(),
            Self::StateError { .. } => "Internal server error".to_string(),
            Self::SharedError(err) => err.to_string(),
            Self::SerializationError(err) => err.to_string(),
        }
    }
}

fn has_sqlstate(err: &sqlx::Error, code: &str) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some(code),
        _ => false,
    }
}

/// Postgres SQLSTATE 23505
fn is_unique_violation(err: &sqlx::Error) -> bool {
    has_sqlstate(err, "23505")
}

/// Postgres SQLSTATE 23503, e.g. favoriting an advertisement deleted
/// after it was looked up
fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    has_sqlstate(err, "23503")
}
