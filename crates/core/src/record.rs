use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::time::to_seconds;

/// Normalized feed identifier of the form `TYPE/PAIR`, always uppercase.
///
/// The same key space is used for the interval map built from the feed
/// specification and for the timestamps collated from on-chain records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeedKey(String);

impl FeedKey {
    /// Builds a key from a feed type and pair, e.g. `("CER", "ADA-iUSD")`.
    #[must_use]
    pub fn new(feed_type: &str, pair: &str) -> Self {
        Self(format!("{feed_type}/{pair}").to_uppercase())
    }

    /// Collapses an on-chain identifier (`TYPE/PAIR/version`) to `TYPE/PAIR`.
    ///
    /// Everything before the last `/` is kept. An identifier without a `/`
    /// is kept whole.
    #[must_use]
    pub fn from_identifier(identifier: &str) -> Self {
        let base = identifier
            .rsplit_once('/')
            .map_or(identifier, |(head, _)| head);
        Self(base.to_uppercase())
    }

    /// Short pair name used in republication requests (text after the first `/`).
    #[must_use]
    pub fn short_pair(&self) -> &str {
        self.0.split_once('/').map_or(self.0.as_str(), |(_, pair)| pair)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FeedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FeedKey {
    /// Treats the input as an already collapsed `TYPE/PAIR` key.
    fn from(key: &str) -> Self {
        Self(key.to_uppercase())
    }
}

/// A single feed snapshot decoded from an on-chain datum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnChainRecord {
    /// Raw identifier, e.g. `CER/ADA-iUSD/3`.
    pub feed_id: String,
    /// Publication time in milliseconds since the epoch.
    pub timestamp_ms: i64,
    /// Price numerator.
    pub amount: i128,
    /// Price denominator.
    pub denominator: i128,
}

impl OnChainRecord {
    #[must_use]
    pub fn new(feed_id: impl Into<String>, timestamp_ms: i64, amount: i128, denominator: i128) -> Self {
        Self {
            feed_id: feed_id.into(),
            timestamp_ms,
            amount,
            denominator,
        }
    }

    #[must_use]
    pub fn feed_key(&self) -> FeedKey {
        FeedKey::from_identifier(&self.feed_id)
    }

    #[must_use]
    pub fn timestamp_secs(&self) -> i64 {
        to_seconds(self.timestamp_ms)
    }

    /// Published price as `amount / denominator`.
    ///
    /// Returns `None` for a zero denominator or values outside the decimal range.
    #[must_use]
    pub fn price(&self) -> Option<Decimal> {
        let amount = Decimal::try_from_i128_with_scale(self.amount, 0).ok()?;
        let denominator = Decimal::try_from_i128_with_scale(self.denominator, 0).ok()?;
        amount.checked_div(denominator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_feed_key_from_identifier_drops_version() {
        let key = FeedKey::from_identifier("CER/ADA-iUSD/3");
        assert_eq!(key.as_str(), "CER/ADA-IUSD");
        assert_eq!(key.short_pair(), "ADA-IUSD");
    }

    #[test]
    fn test_feed_key_from_identifier_without_separator() {
        let key = FeedKey::from_identifier("ada-usd");
        assert_eq!(key.as_str(), "ADA-USD");
        assert_eq!(key.short_pair(), "ADA-USD");
    }

    #[test]
    fn test_feed_key_new_matches_collapsed_identifier() {
        assert_eq!(
            FeedKey::new("CER", "iBTC-ADA"),
            FeedKey::from_identifier("CER/iBTC-ADA/3")
        );
    }

    #[test]
    fn test_short_pair_uses_first_separator() {
        let key = FeedKey::from("cer/foo/bar");
        assert_eq!(key.short_pair(), "FOO/BAR");
    }

    #[test]
    fn test_record_accessors() {
        let record = OnChainRecord::new("CER/ADA-USD/3", 1_723_186_803_981, 697, 2000);
        assert_eq!(record.feed_key().as_str(), "CER/ADA-USD");
        assert_eq!(record.timestamp_secs(), 1_723_186_803);
        assert_eq!(record.price(), Some(dec!(0.3485)));
    }

    #[test]
    fn test_record_price_zero_denominator() {
        let record = OnChainRecord::new("CER/ADA-USD/3", 0, 697, 0);
        assert_eq!(record.price(), None);
    }
}
