pub mod checkpoint;
pub mod error;
pub mod monitor;

pub use checkpoint::{advance_checkpoint, CheckpointError, FileCheckpointStore};
pub use error::MonitorError;
pub use monitor::{Monitor, MonitorOptions, RunOutcome};
