pub mod config;
pub mod config_loader;
pub mod error;
pub mod feeds;
pub mod gaps;
pub mod record;
pub mod time;
pub mod traits;

pub use config::{
    AppConfig, DetectionPolicy, FspConfig, IndexerConfig, MonitorConfig, Settings, ValidatorConfig,
};
pub use config_loader::ConfigLoader;
pub use error::{ConfigError, FeedSpecError, RepublishError};
pub use feeds::{
    build_interval_map, build_window_map, load_feed_specs, parse_feed_specs, FeedMeta, FeedSpec,
    FeedSpecFile,
};
pub use gaps::{
    collate_latest, compare_gaps, compare_intervals, compare_windows, remove_gaps, IntervalMap,
    LatestTimestamps,
};
pub use record::{FeedKey, OnChainRecord};
pub use time::{absolute_delta, hour_baseline_due, to_seconds};
pub use traits::{ChainIndexer, CheckpointStore, RepublishRequest, RepublishResponse, Republisher};
