//! SDK error types.
//!
//! The taxonomy mirrors how failures actually reach the client: transport
//! problems at the fetch boundary, application errors carried inside a
//! well-formed envelope (possibly on HTTP 200), validation failures caught
//! before dispatch, and unparseable responses.

use thiserror::Error;

/// Result type alias for SDK operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// SDK error type.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Network failure or a body that was not JSON. Surfaced as a generic
    /// "request failed" condition; never an unhandled rejection.
    #[error("request failed: {message}")]
    Transport {
        /// Error message
        message: String,
        /// Underlying error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The request timed out.
    #[error("request timed out after {duration:?}")]
    Timeout {
        /// Configured timeout
        duration: std::time::Duration,
    },

    /// The server answered with a well-formed envelope carrying
    /// `success: false`. The message is the server-supplied `error` or
    /// `message` field when present.
    #[error("{message}")]
    Application {
        /// Server-supplied or fallback message
        message: String,
    },

    /// Request rejected client-side before dispatch.
    #[error("validation failed: {message}")]
    Validation {
        /// Summary message
        message: String,
        /// Field-level details
        fields: Vec<FieldError>,
    },

    /// The response body could not be interpreted as the expected shape.
    #[error("invalid API response: {message}")]
    InvalidResponse {
        /// Error message
        message: String,
    },

    /// Client configuration problem.
    #[error("configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },
}

impl ApiError {
    /// Whether an automatic retry may help. Only transport-level failures
    /// qualify; application errors are final.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::Timeout { .. })
    }

    /// Fallback message used when the server supplies none.
    pub const GENERIC_FAILURE: &'static str = "The request could not be completed";

    /// Build an application error from optional server-supplied fields.
    pub fn application(error: Option<String>, message: Option<String>) -> Self {
        let message = error
            .filter(|s| !s.is_empty())
            .or(message.filter(|s| !s.is_empty()))
            .unwrap_or_else(|| Self::GENERIC_FAILURE.to_string());
        Self::Application { message }
    }

    /// Build a validation error with field details.
    pub fn validation(message: impl Into<String>, fields: Vec<FieldError>) -> Self {
        Self::Validation {
            message: message.into(),
            fields,
        }
    }

    /// Map a transport-layer failure. `timeout` is the client's configured
    /// request timeout, so the timeout variant reports the value that
    /// actually applied.
    pub(crate) fn from_reqwest(err: reqwest::Error, timeout: std::time::Duration) -> Self {
        if err.is_timeout() {
            ApiError::Timeout { duration: timeout }
        } else {
            ApiError::Transport {
                message: err.to_string(),
                source: Some(Box::new(err)),
            }
        }
    }
}

/// Field-specific validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Field name.
    pub field: String,
    /// Error message.
    pub message: String,
}

impl FieldError {
    /// Create a new field error.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}
