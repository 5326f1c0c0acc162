//! Feed specification loading (CER feeds JSON) and interval map construction.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::FeedSpecError;
use crate::gaps::IntervalMap;
use crate::record::FeedKey;

/// Default feed type when the specification omits one.
pub const DEFAULT_FEED_TYPE: &str = "CER";

/// A monitored feed as described by the feed specification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedSpec {
    pub pair: String,
    pub label: String,
    /// Expected refresh interval in seconds. Zero disables monitoring.
    pub interval: i64,
    pub deviation: i64,
    pub source: String,
    pub calculation: String,
    pub status: String,
    #[serde(rename = "type")]
    pub feed_type: String,
}

impl FeedSpec {
    #[must_use]
    pub fn key(&self) -> FeedKey {
        FeedKey::new(&self.feed_type, &self.pair)
    }

    #[must_use]
    pub fn is_monitored(&self) -> bool {
        self.interval != 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedMeta {
    pub version: String,
}

/// Parsed feed specification document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedSpecFile {
    pub meta: FeedMeta,
    pub feeds: Vec<FeedSpec>,
}

#[derive(Debug, Deserialize)]
struct RawFeedSpecFile {
    meta: FeedMeta,
    feeds: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct RawFeedSpec {
    pair: String,
    label: String,
    interval: i64,
    deviation: i64,
    source: String,
    calculation: String,
    status: String,
    #[serde(rename = "type")]
    feed_type: Option<String>,
}

impl TryFrom<RawFeedSpec> for FeedSpec {
    type Error = String;

    fn try_from(raw: RawFeedSpec) -> Result<Self, Self::Error> {
        if raw.interval < 0 {
            return Err(format!(
                "interval must be >= 0 for pair '{}', got {}",
                raw.pair, raw.interval
            ));
        }
        if raw.pair.trim().is_empty() {
            return Err("pair cannot be empty".to_string());
        }
        Ok(Self {
            pair: raw.pair,
            label: raw.label,
            interval: raw.interval,
            deviation: raw.deviation,
            source: raw.source,
            calculation: raw.calculation,
            status: raw.status,
            feed_type: raw.feed_type.unwrap_or_else(|| DEFAULT_FEED_TYPE.to_string()),
        })
    }
}

/// Parses a feed specification document from a JSON string.
///
/// # Errors
/// Returns [`FeedSpecError::Json`] for malformed documents and
/// [`FeedSpecError::InvalidFeedSpec`] naming the offending feed index when a
/// feed is missing fields or carries out-of-range values.
pub fn parse_feed_specs(json: &str) -> Result<FeedSpecFile, FeedSpecError> {
    let raw: RawFeedSpecFile = serde_json::from_str(json)?;
    from_raw(raw)
}

/// Reads and validates the feed specification file.
///
/// # Errors
/// Returns an error if the file cannot be read or fails validation.
pub fn load_feed_specs(path: impl AsRef<Path>) -> Result<FeedSpecFile, FeedSpecError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| FeedSpecError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let raw: RawFeedSpecFile = serde_json::from_reader(BufReader::new(file))?;
    let spec = from_raw(raw)?;

    info!(version = %spec.meta.version, "cer-feeds version");
    info!(count = spec.feeds.len(), "number of feeds");
    Ok(spec)
}

fn from_raw(raw: RawFeedSpecFile) -> Result<FeedSpecFile, FeedSpecError> {
    let feeds = raw
        .feeds
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            let parsed: RawFeedSpec = serde_json::from_value(value)
                .map_err(|e| FeedSpecError::invalid(index, e.to_string()))?;
            FeedSpec::try_from(parsed).map_err(|reason| FeedSpecError::invalid(index, reason))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(FeedSpecFile {
        meta: raw.meta,
        feeds,
    })
}

/// Builds the interval map used for threshold comparison.
///
/// Feeds with a zero interval are excluded. The threshold is subtracted once
/// here; the result may be negative, which makes the feed always due.
#[must_use]
pub fn build_interval_map(feeds: &[FeedSpec], threshold: i64) -> IntervalMap {
    feeds
        .iter()
        .filter(|feed| feed.is_monitored())
        .map(|feed| (feed.key(), feed.interval.saturating_sub(threshold)))
        .collect()
}

/// Builds the raw window map used by the hour-baseline policy.
#[must_use]
pub fn build_window_map(feeds: &[FeedSpec]) -> IntervalMap {
    build_interval_map(feeds, 0)
}
