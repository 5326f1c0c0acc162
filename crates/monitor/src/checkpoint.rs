//! Cross-run checkpoint persistence.
//!
//! The checkpoint is the indexer slot seen by the last successful run, kept
//! as plain decimal text so existing slot files stay readable. A run only
//! proceeds when the indexer has moved strictly past the stored value.
//!
//! Missing or corrupt files are handled gracefully: both mean "no previous
//! checkpoint" so the next run starts fresh.

use anyhow::Context;
use pubwatch_core::CheckpointStore;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors from advancing a checkpoint.
#[derive(Error, Debug)]
pub enum CheckpointError {
    /// The new checkpoint does not exceed the stored one.
    #[error("checkpoint {current} does not advance past {previous}")]
    Stale { previous: u64, current: u64 },

    /// The store could not be read or written.
    #[error("checkpoint store failed: {0:#}")]
    Store(anyhow::Error),
}

/// Records `current` if it is strictly greater than the stored checkpoint.
///
/// Returns the previous checkpoint (0 when none was stored).
///
/// # Errors
/// Returns [`CheckpointError::Stale`] without writing when `current` does not
/// advance, or [`CheckpointError::Store`] when the store fails.
pub fn advance_checkpoint<S>(store: &S, current: u64) -> Result<u64, CheckpointError>
where
    S: CheckpointStore + ?Sized,
{
    let previous = store.load().map_err(CheckpointError::Store)?.unwrap_or(0);
    if current <= previous {
        return Err(CheckpointError::Stale { previous, current });
    }
    store.save(current).map_err(CheckpointError::Store)?;
    Ok(previous)
}

/// Checkpoint kept in a single text file.
#[derive(Debug, Clone)]
pub struct FileCheckpointStore {
    path: PathBuf,
}

impl FileCheckpointStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// See [`advance_checkpoint`].
    ///
    /// # Errors
    /// Fails when the checkpoint is stale or the file cannot be written.
    pub fn advance(&self, current: u64) -> Result<u64, CheckpointError> {
        advance_checkpoint(self, current)
    }
}

impl CheckpointStore for FileCheckpointStore {
    fn load(&self) -> anyhow::Result<Option<u64>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(path = %self.path.display(), "no checkpoint file found, starting fresh");
                return Ok(None);
            }
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "failed to read checkpoint, starting fresh"
                );
                return Ok(None);
            }
        };

        match content.trim().parse::<u64>() {
            Ok(checkpoint) => Ok(Some(checkpoint)),
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "corrupt checkpoint, starting fresh"
                );
                Ok(None)
            }
        }
    }

    fn save(&self, checkpoint: u64) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating {}", parent.display()))?;
            }
        }
        fs::write(&self.path, checkpoint.to_string())
            .with_context(|| format!("writing {}", self.path.display()))?;

        debug!(path = %self.path.display(), checkpoint, "saved checkpoint");
        Ok(())
    }
}
