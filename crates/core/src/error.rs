//! Error types shared across the watcher crates.

use thiserror::Error;

/// Errors raised while loading the feed specification.
#[derive(Debug, Error)]
pub enum FeedSpecError {
    /// The specification file could not be read.
    #[error("failed to read feed spec '{path}': {source}")]
    Io {
        /// Path that was opened.
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid JSON or lacks the top-level structure.
    #[error("malformed feed spec document: {0}")]
    Json(#[from] serde_json::Error),

    /// A feed entry is missing fields or carries invalid values.
    #[error("invalid feed spec at index {index}: {reason}")]
    InvalidFeedSpec {
        /// Position of the feed in the `feeds` array.
        index: usize,
        /// What was wrong with it.
        reason: String,
    },
}

impl FeedSpecError {
    pub fn invalid(index: usize, reason: impl Into<String>) -> Self {
        Self::InvalidFeedSpec {
            index,
            reason: reason.into(),
        }
    }
}

/// Errors raised while building the application configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required endpoint or identifier is missing or unusable.
    #[error("misconfigured endpoint '{key}': {reason} ({hint})")]
    MisconfiguredEndpoint {
        /// Configuration key at fault.
        key: &'static str,
        /// What is wrong.
        reason: String,
        /// How to fix it.
        hint: &'static str,
    },

    /// Layered configuration could not be extracted.
    #[error("configuration error: {0}")]
    Extract(#[from] Box<figment::Error>),
}

impl ConfigError {
    pub fn misconfigured(key: &'static str, reason: impl Into<String>, hint: &'static str) -> Self {
        Self::MisconfiguredEndpoint {
            key,
            reason: reason.into(),
            hint,
        }
    }
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Extract(Box::new(err))
    }
}

/// Soft failure of a republication request.
///
/// These never abort a run; the next scheduled run retries naturally.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RepublishError {
    /// Connection could not be made, was closed, or timed out.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The validator answered with something that could not be decoded.
    #[error("decode failure: {0}")]
    Decode(String),
}
