//! Error types for the Kupo indexer client.

use thiserror::Error;

use crate::datum::DecodeError;

/// Errors that can occur when talking to Kupo.
#[derive(Debug, Error)]
pub enum KupoError {
    /// Kupo answered with a non-success status.
    #[error("API error: {status_code} - {message}")]
    Api {
        /// HTTP status code.
        status_code: u16,
        /// Response body, if any.
        message: String,
    },

    /// Network error.
    #[error("network error: {0}")]
    Network(String),

    /// Request timeout.
    #[error("request timeout: {0}")]
    Timeout(String),

    /// A response or datum could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// `/health` carried neither the checkpoint header nor body field.
    #[error("health response carries no most recent checkpoint")]
    MissingCheckpoint,

    /// A datum or match the caller depends on does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Client configuration error.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl KupoError {
    /// Creates an API error from status code and message.
    pub fn api(status_code: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status_code,
            message: message.into(),
        }
    }

    /// Returns true if the request never got a usable answer (connection
    /// failure or timeout).
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Timeout(_))
    }

    /// Returns true if the request should be retried later: retryable
    /// errors plus rate limiting and server-side failures.
    ///
    /// [`KupoClient`](crate::KupoClient) retries on this classification.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Api { status_code, .. } => *status_code == 429 || *status_code >= 500,
            other => other.is_retryable(),
        }
    }
}

impl From<reqwest::Error> for KupoError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_connect() {
            Self::Network(format!("connection failed: {err}"))
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for KupoError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

impl From<DecodeError> for KupoError {
    fn from(err: DecodeError) -> Self {
        Self::Decode(err.to_string())
    }
}

/// Result type alias for Kupo operations.
pub type Result<T> = std::result::Result<T, KupoError>;
