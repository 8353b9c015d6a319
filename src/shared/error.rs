//! Shared Error Types
//!
//! This module defines error types that are shared between the API layer and
//! the domain types. These errors represent common failure cases such as
//! invalid input or an illegal status change.
//!
//! # Error Categories
//!
//! - `SerializationError` - JSON serialization/deserialization failures
//! - `ValidationError` - Data validation failures
//! - `InvalidTransition` - A status change that the lifecycle does not allow
//!
//! # Usage
//!
//! ```rust
//! use scoutlink::shared::error::SharedError;
//!
//! let error = SharedError::validation("league", "League is required");
//! ```
use thiserror::Error;

/// Shared error types that can occur in the domain layer
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// JSON serialization or deserialization error
    #[error("Serialization error: {message}")]
    SerializationError {
        /// Human-readable error message
        message: String,
    },

    /// Data validation error
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },

    /// Status change rejected by the lifecycle rules
    #[error("Cannot change status from '{from}' to '{to}'")]
    InvalidTransition {
        from: String,
        to: String,
    },
}

impl SharedError {
    /// Create a new serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::SerializationError {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new invalid transition error
    pub fn invalid_transition(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::InvalidTransition {
            from: from.into(),
            to: to.into(),
        }
    }
}

impl From<serde_json::Error> for SharedError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(format!("JSON error: {}", err))
    }
}
