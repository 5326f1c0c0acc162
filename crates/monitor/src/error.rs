use pubwatch_core::FeedSpecError;
use thiserror::Error;

/// Failures that end a watch run early.
#[derive(Debug, Error)]
pub enum MonitorError {
    /// The indexer has not advanced since the previous run.
    #[error("slot hasn't changed since last update (previous {previous}, current {current})")]
    StaleCheckpoint { previous: u64, current: u64 },

    #[error("checkpoint store: {0:#}")]
    Checkpoint(anyhow::Error),

    #[error(transparent)]
    FeedSpec(#[from] FeedSpecError),

    #[error("indexer: {0:#}")]
    Indexer(anyhow::Error),
}

impl MonitorError {
    /// A stale checkpoint is an expected outcome rather than a failure.
    #[must_use]
    pub fn is_stale(&self) -> bool {
        matches!(self, Self::StaleCheckpoint { .. })
    }
}
