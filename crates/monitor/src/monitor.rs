//! One watch run: compare what is on-chain with what should be, and ask the
//! validator for whatever is missing or stale.

use crate::checkpoint::{advance_checkpoint, CheckpointError};
use crate::error::MonitorError;
use pubwatch_core::time::now_secs;
use pubwatch_core::{
    build_interval_map, build_window_map, compare_gaps, compare_intervals, compare_windows,
    load_feed_specs, remove_gaps, ChainIndexer, CheckpointStore, DetectionPolicy,
    RepublishRequest, Republisher, Settings,
};
use std::path::PathBuf;
use tracing::{info, warn};

/// Per-run inputs that do not come from collaborators.
#[derive(Debug, Clone)]
pub struct MonitorOptions {
    pub feeds_path: PathBuf,
    pub fsp_policy: String,
    pub validity_token: String,
    pub interval_threshold_secs: i64,
    pub policy: DetectionPolicy,
}

impl MonitorOptions {
    #[must_use]
    pub fn from_settings(feeds_path: impl Into<PathBuf>, settings: &Settings) -> Self {
        Self {
            feeds_path: feeds_path.into(),
            fsp_policy: settings.fsp_policy.clone(),
            validity_token: settings.validity_token.clone(),
            interval_threshold_secs: settings.app.monitor.interval_threshold_secs,
            policy: settings.app.monitor.policy,
        }
    }
}

/// Result of a run that got past the checkpoint check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every monitored feed is present and fresh.
    UpToDate,
    /// A republication was requested for `feeds`.
    ///
    /// `delivered` is false when the validator could not be reached or its
    /// reply could not be read; the next scheduled run retries.
    Requested { feeds: Vec<String>, delivered: bool },
}

pub struct Monitor<I, R, C> {
    indexer: I,
    republisher: R,
    checkpoint: C,
    options: MonitorOptions,
}

impl<I, R, C> Monitor<I, R, C>
where
    I: ChainIndexer,
    R: Republisher,
    C: CheckpointStore,
{
    pub fn new(indexer: I, republisher: R, checkpoint: C, options: MonitorOptions) -> Self {
        Self {
            indexer,
            republisher,
            checkpoint,
            options,
        }
    }

    /// Runs against the current wall clock.
    ///
    /// # Errors
    /// See [`Monitor::run_at`].
    pub async fn run(&self) -> Result<RunOutcome, MonitorError> {
        self.run_at(now_secs()).await
    }

    /// Runs with `now` (seconds since the epoch) as the reference time.
    ///
    /// # Errors
    /// Returns [`MonitorError::StaleCheckpoint`] when the indexer has not
    /// advanced since the last run, and other variants when the checkpoint,
    /// feed specification or indexer fail. Republication failures are not
    /// errors.
    pub async fn run_at(&self, now: i64) -> Result<RunOutcome, MonitorError> {
        let current = self
            .indexer
            .most_recent_checkpoint()
            .await
            .map_err(MonitorError::Indexer)?;
        let previous = advance_checkpoint(&self.checkpoint, current).map_err(|e| match e {
            CheckpointError::Stale { previous, current } => {
                MonitorError::StaleCheckpoint { previous, current }
            }
            CheckpointError::Store(source) => MonitorError::Checkpoint(source),
        })?;
        info!(previous, current, "checkpoint advanced");

        let spec = load_feed_specs(&self.options.feeds_path)?;

        let policy_id = self
            .indexer
            .resolve_policy(&self.options.fsp_policy, &self.options.validity_token)
            .await
            .map_err(MonitorError::Indexer)?;
        info!(policy = %policy_id, "policy");

        let records = self
            .indexer
            .feed_records(&policy_id, 0)
            .await
            .map_err(MonitorError::Indexer)?;
        info!(count = records.len(), "unspent datum");

        let threshold = self.options.interval_threshold_secs;
        let intervals = build_interval_map(&spec.feeds, threshold);
        let gaps = compare_gaps(&intervals, &records);
        let remaining = remove_gaps(&gaps, &records);
        let overdue = match self.options.policy {
            DetectionPolicy::Delta => compare_intervals(&intervals, &remaining, now),
            DetectionPolicy::HourBaseline => {
                compare_windows(&build_window_map(&spec.feeds), &remaining, now, threshold)
            }
        };

        let mut feeds = gaps;
        for pair in overdue {
            if !feeds.contains(&pair) {
                feeds.push(pair);
            }
        }

        if feeds.is_empty() {
            info!("no new pairs needed on-chain...");
            return Ok(RunOutcome::UpToDate);
        }
        info!(feeds = ?feeds, "we need to request the following feeds");

        let request = RepublishRequest::new(feeds);
        let delivered = match self.republisher.request_feeds(&request).await {
            Ok(_) => true,
            Err(e) => {
                warn!(error = %e, "republish request failed, next run will retry");
                false
            }
        };

        Ok(RunOutcome::Requested {
            feeds: request.feeds,
            delivered,
        })
    }
}
