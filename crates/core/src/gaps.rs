//! Gap detection over collated on-chain feed timestamps.
//!
//! Two complementary checks decide which feeds must be republished:
//!
//! - [`compare_intervals`] measures the age of every feed seen on-chain
//!   against its expected interval. It is blind to feeds that have no
//!   on-chain history at all.
//! - [`compare_gaps`] reports the monitored feeds that never appear on-chain.
//!
//! All functions here are pure; they log but never fail.

use std::collections::{HashMap, HashSet};

use tracing::info;

use crate::record::{FeedKey, OnChainRecord};
use crate::time::{absolute_delta, hour_baseline_due};

/// Expected refresh interval (seconds) per monitored feed.
pub type IntervalMap = HashMap<FeedKey, i64>;

/// Latest on-chain timestamp (seconds) per feed.
///
/// Iteration follows the order in which each key was first seen while
/// collating. Equality compares contents only.
#[derive(Debug, Clone, Default)]
pub struct LatestTimestamps {
    entries: Vec<(FeedKey, i64)>,
    index: HashMap<FeedKey, usize>,
}

impl LatestTimestamps {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `seconds` for `key`, keeping the larger value.
    pub fn observe(&mut self, key: FeedKey, seconds: i64) {
        if let Some(&slot) = self.index.get(&key) {
            let current = &mut self.entries[slot].1;
            if *current < seconds {
                *current = seconds;
            }
            return;
        }
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, seconds));
    }

    #[must_use]
    pub fn get(&self, key: &FeedKey) -> Option<i64> {
        self.index.get(key).map(|&slot| self.entries[slot].1)
    }

    #[must_use]
    pub fn contains(&self, key: &FeedKey) -> bool {
        self.index.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&FeedKey, i64)> + '_ {
        self.entries.iter().map(|(key, seconds)| (key, *seconds))
    }

    pub fn keys(&self) -> impl Iterator<Item = &FeedKey> + '_ {
        self.entries.iter().map(|(key, _)| key)
    }
}

impl PartialEq for LatestTimestamps {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(key, secs)| other.get(key) == Some(secs))
    }
}

impl Eq for LatestTimestamps {}

/// Reduces records to the latest timestamp (seconds) per feed key.
#[must_use]
pub fn collate_latest(records: &[OnChainRecord]) -> LatestTimestamps {
    let mut latest = LatestTimestamps::new();
    for record in records {
        latest.observe(record.feed_key(), record.timestamp_secs());
    }
    latest
}

/// Returns the short pair names of feeds whose on-chain age exceeds their interval.
///
/// `intervals` is expected to already carry the safety threshold. Feeds seen
/// on-chain without an interval entry are logged and skipped. Feeds with an
/// interval but no on-chain record are not reported here; see
/// [`compare_gaps`].
#[must_use]
pub fn compare_intervals(intervals: &IntervalMap, records: &[OnChainRecord], now: i64) -> Vec<String> {
    select_overdue(intervals, records, |interval, latest| {
        let delta = absolute_delta(now, latest);
        (interval < delta).then_some(delta)
    })
}

/// Same as [`compare_intervals`] but evaluates each feed against the
/// hour-aligned publication window (see [`hour_baseline_due`]).
///
/// `windows` holds the raw feed intervals; `threshold` is the grace period.
#[must_use]
pub fn compare_windows(
    windows: &IntervalMap,
    records: &[OnChainRecord],
    now: i64,
    threshold: i64,
) -> Vec<String> {
    select_overdue(windows, records, |window, latest| {
        hour_baseline_due(now, latest, window, threshold).then(|| absolute_delta(now, latest))
    })
}

fn select_overdue<F>(intervals: &IntervalMap, records: &[OnChainRecord], is_due: F) -> Vec<String>
where
    F: Fn(i64, i64) -> Option<i64>,
{
    let latest = collate_latest(records);
    let mut required: Vec<String> = Vec::new();

    for (feed, timestamp) in latest.iter() {
        let Some(&interval) = intervals.get(feed) else {
            info!(feed = %feed, "feed not being monitored");
            continue;
        };
        let pair = feed.short_pair();
        if required.iter().any(|existing| existing == pair) {
            continue;
        }
        if let Some(delta) = is_due(interval, timestamp) {
            info!(feed = %feed, delta, actual = timestamp, "feed out of date");
            required.push(pair.to_string());
        }
    }

    required
}

/// Returns the short pair names of monitored feeds absent from the records.
///
/// Sorted ascending.
#[must_use]
pub fn compare_gaps(intervals: &IntervalMap, records: &[OnChainRecord]) -> Vec<String> {
    let latest = collate_latest(records);
    let on_chain: HashSet<&str> = latest.keys().map(FeedKey::short_pair).collect();

    let mut gaps: Vec<String> = intervals
        .keys()
        .map(FeedKey::short_pair)
        .filter(|pair| !on_chain.contains(pair))
        .map(str::to_string)
        .collect();
    gaps.sort();
    gaps.dedup();

    for pair in &gaps {
        info!(pair = %pair, "feed missing from chain");
    }
    gaps
}

/// Drops every record whose short pair name appears in `gaps`.
///
/// Order and duplicates of the retained records are preserved.
#[must_use]
pub fn remove_gaps(gaps: &[String], records: &[OnChainRecord]) -> Vec<OnChainRecord> {
    if gaps.is_empty() {
        return records.to_vec();
    }
    let excluded: HashSet<&str> = gaps.iter().map(String::as_str).collect();
    records
        .iter()
        .filter(|record| !excluded.contains(record.feed_key().short_pair()))
        .cloned()
        .collect()
}
