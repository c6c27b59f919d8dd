// src/error.rs

//! Unified error handling for the order pipeline.
//!
//! Every failure is classified exactly once, at the point where it occurs,
//! into one of the variants below. [`AppError::retryable`] encodes whether
//! redelivering the triggering message can plausibly fix the failure; the
//! Consumer uses it to decide between reporting a message for retry and
//! dropping it.

use std::fmt;

use thiserror::Error;

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Required configuration (queue url, table name) is missing
    #[error("Configuration error: {0}")]
    Config(String),

    /// An order submission violated a validation rule
    #[error("Validation error: {field} {message}")]
    Validation { field: String, message: String },

    /// A payload could not be understood as structured data
    #[error("Malformed payload: {0}")]
    Malformed(String),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Queue submission failed
    #[error("Queue error: {0}")]
    Queue(String),

    /// Table read/write failed
    #[error("Storage error: {0}")]
    Storage(String),

    /// Anything not classified above
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl AppError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error citing the offending field.
    pub fn validation(field: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.to_string(),
        }
    }

    /// Create a malformed-payload error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed(message.into())
    }

    /// Create a queue error.
    pub fn queue(message: impl Into<String>) -> Self {
        Self::Queue(message.into())
    }

    /// Create a storage error.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Create an unexpected error.
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected(message.into())
    }

    /// Whether redelivery of the triggering message can fix this failure.
    ///
    /// Transient queue/storage failures and unclassified errors are
    /// retryable; configuration, validation, and parse failures are not,
    /// since redelivering the same input reproduces the same failure.
    pub fn retryable(&self) -> bool {
        matches!(
            self,
            AppError::Queue(_) | AppError::Storage(_) | AppError::Unexpected(_)
        )
    }
}
