//! Timestamp normalization and publication-window arithmetic.
//!
//! All values are seconds since the Unix epoch unless a name says otherwise.
//! On-chain timestamps arrive in milliseconds and are truncated, never
//! rounded, when converted.

use chrono::Utc;

/// Length of the publication cycle the hour baseline is aligned to.
pub const HOUR_SECS: i64 = 3600;

/// Converts an on-chain millisecond timestamp to whole seconds.
///
/// Integer division truncating toward zero, so `1723186803981` becomes
/// `1723186803`.
#[must_use]
pub fn to_seconds(timestamp_ms: i64) -> i64 {
    timestamp_ms / 1000
}

/// Absolute difference between two timestamps.
#[must_use]
pub fn absolute_delta(a: i64, b: i64) -> i64 {
    a.abs_diff(b).try_into().unwrap_or(i64::MAX)
}

/// Returns true when a feed last published at `latest` is overdue.
///
/// The cycle is anchored to the top of the hour containing `now`. A feed on a
/// `window`-second cycle is expected to have published no earlier than
/// `window` seconds before the end of that hour, less `threshold` seconds of
/// grace:
///
/// ```text
/// hour_start = now - now mod 3600
/// due        = latest < hour_start + 3600 - window - threshold
/// ```
#[must_use]
pub fn hour_baseline_due(now: i64, latest: i64, window: i64, threshold: i64) -> bool {
    let hour_start = now - now.rem_euclid(HOUR_SECS);
    let cutoff = (hour_start + HOUR_SECS)
        .saturating_sub(window)
        .saturating_sub(threshold);
    latest < cutoff
}

/// Current wall-clock time in seconds.
#[must_use]
pub fn now_secs() -> i64 {
    Utc::now().timestamp()
}
