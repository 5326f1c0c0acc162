//! Kupo HTTP client with rate limiting.
//!
//! Provides typed access to the Kupo endpoints the watcher needs:
//! `/health`, `/matches` and `/datums`. Every request waits on a
//! `governor` rate limiter and is bounded by the configured timeout.
//! Transient failures (network, timeout, 429, 5xx) are retried a bounded
//! number of times with doubling delays.
//!
//! # Example
//!
//! ```ignore
//! use pubwatch_kupo::{KupoClient, KupoClientConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = KupoClient::new(KupoClientConfig::new("http://localhost:1442"))?;
//!
//!     let slot = client.most_recent_checkpoint().await?;
//!     let policy = client
//!         .resolve_policy("0690081bc113f74e04640ea78a87d88abbd2f18831c44c4064524230", "000de140")
//!         .await?;
//!     let records = client.feed_records(&policy, 0).await?;
//!     println!("{} records at slot {slot}", records.len());
//!
//!     Ok(())
//! }
//! ```

use crate::datum::{decode_feed_datum, decode_policy_id};
use crate::error::{KupoError, Result};
use crate::types::{DatumResponse, Health, Match};
use async_trait::async_trait;
use governor::{Quota, RateLimiter};
use nonzero_ext::nonzero;
use pubwatch_core::{ChainIndexer, IndexerConfig, OnChainRecord};
use reqwest::Client;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

// =============================================================================
// Constants
// =============================================================================

/// Default local Kupo address.
pub const KUPO_LOCAL_URL: &str = "http://localhost:1442";

/// Response header carrying the indexer's most recent slot.
pub const CHECKPOINT_HEADER: &str = "X-Most-Recent-Checkpoint";

// =============================================================================
// Configuration
// =============================================================================

/// Configuration for the Kupo client.
#[derive(Debug, Clone)]
pub struct KupoClientConfig {
    /// Base URL, e.g. `http://kupo:1442`.
    pub base_url: String,

    /// Requests per second limit.
    pub requests_per_second: NonZeroU32,

    /// Request timeout in seconds.
    pub timeout_secs: u64,

    /// Extra attempts for a request that failed transiently.
    pub max_retries: u32,

    /// Delay before the first retry, doubled on each further retry.
    pub retry_backoff: Duration,
}

impl Default for KupoClientConfig {
    fn default() -> Self {
        Self {
            base_url: KUPO_LOCAL_URL.to_string(),
            requests_per_second: nonzero!(20u32),
            timeout_secs: 30,
            max_retries: 2,
            retry_backoff: Duration::from_millis(500),
        }
    }
}

impl KupoClientConfig {
    /// Creates a configuration for the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::default().with_base_url(base_url)
    }

    /// Creates a configuration from the `indexer` section.
    ///
    /// A zero rate keeps the default.
    #[must_use]
    pub fn from_settings(base_url: impl Into<String>, indexer: &IndexerConfig) -> Self {
        let mut config = Self::new(base_url).with_timeout_secs(indexer.timeout_secs);
        if let Some(rate) = NonZeroU32::new(indexer.requests_per_second) {
            config = config.with_rate_limit(rate);
        }
        config
    }

    /// Sets the base URL.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the rate limit.
    #[must_use]
    pub fn with_rate_limit(mut self, requests_per_second: NonZeroU32) -> Self {
        self.requests_per_second = requests_per_second;
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Sets the retry budget for transient failures.
    #[must_use]
    pub fn with_retries(mut self, max_retries: u32, backoff: Duration) -> Self {
        self.max_retries = max_retries;
        self.retry_backoff = backoff;
        self
    }
}

// =============================================================================
// Client
// =============================================================================

/// Kupo API client.
pub struct KupoClient {
    config: KupoClientConfig,
    http: Client,
    rate_limiter: Arc<
        RateLimiter<
            governor::state::NotKeyed,
            governor::state::InMemoryState,
            governor::clock::DefaultClock,
        >,
    >,
}

impl std::fmt::Debug for KupoClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KupoClient")
            .field("base_url", &self.config.base_url)
            .field("requests_per_second", &self.config.requests_per_second)
            .finish_non_exhaustive()
    }
}

impl KupoClient {
    /// Creates a new client with the given configuration.
    ///
    /// # Errors
    /// Returns error if the base URL is empty or the HTTP client cannot be built.
    pub fn new(config: KupoClientConfig) -> Result<Self> {
        if config.base_url.trim().is_empty() {
            return Err(KupoError::Configuration("base URL cannot be empty".to_string()));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| KupoError::Network(format!("failed to build HTTP client: {e}")))?;

        let quota = Quota::per_second(config.requests_per_second);
        let rate_limiter = Arc::new(RateLimiter::direct(quota));

        Ok(Self {
            config,
            http,
            rate_limiter,
        })
    }

    /// Returns the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn url(&self, path_and_query: &str) -> String {
        format!(
            "{}{}",
            self.config.base_url.trim_end_matches('/'),
            path_and_query
        )
    }

    /// Issues a GET request, retrying transient failures.
    async fn send(&self, path_and_query: &str) -> Result<reqwest::Response> {
        let mut delay = self.config.retry_backoff;
        let mut retries: u32 = 0;

        loop {
            match self.send_once(path_and_query).await {
                Err(e) if e.is_transient() && retries < self.config.max_retries => {
                    retries += 1;
                    warn!(
                        path = path_and_query,
                        error = %e,
                        retry = retries,
                        "transient indexer failure, retrying"
                    );
                    sleep(delay).await;
                    delay *= 2;
                }
                result => return result,
            }
        }
    }

    /// Waits for the rate limiter and issues a single GET request.
    async fn send_once(&self, path_and_query: &str) -> Result<reqwest::Response> {
        self.rate_limiter.until_ready().await;

        let url = self.url(path_and_query);
        debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        Self::check_status(response).await
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, path_and_query: &str) -> Result<T> {
        let response = self.send(path_and_query).await?;
        Ok(response.json::<T>().await?)
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(KupoError::api(status.as_u16(), text));
        }
        Ok(response)
    }

    // =========================================================================
    // Health
    // =========================================================================

    /// Most recent checkpoint (slot) the indexer has synchronised.
    ///
    /// Read from the `X-Most-Recent-Checkpoint` header, falling back to the
    /// `most_recent_checkpoint` field of the JSON body.
    ///
    /// # Errors
    /// Returns [`KupoError::MissingCheckpoint`] when neither is present.
    pub async fn most_recent_checkpoint(&self) -> Result<u64> {
        let response = self.send("/health").await?;

        if let Some(value) = response.headers().get(CHECKPOINT_HEADER) {
            let text = value
                .to_str()
                .map_err(|e| KupoError::Decode(format!("checkpoint header: {e}")))?;
            return text
                .trim()
                .parse::<u64>()
                .map_err(|e| KupoError::Decode(format!("checkpoint header '{text}': {e}")));
        }

        let body = response.text().await?;
        serde_json::from_str::<Health>(&body)
            .ok()
            .and_then(|health| health.most_recent_checkpoint)
            .ok_or(KupoError::MissingCheckpoint)
    }

    // =========================================================================
    // Matches & Datums
    // =========================================================================

    /// Lists matches for a Kupo pattern, e.g. `{policy}.*` or `*`.
    ///
    /// `query` is appended verbatim after `?`; flags such as `unspent`
    /// carry no value.
    ///
    /// # Errors
    /// Returns error if the API call fails.
    pub async fn matches(&self, pattern: &str, query: &str) -> Result<Vec<Match>> {
        let path = if query.is_empty() {
            format!("/matches/{pattern}")
        } else {
            format!("/matches/{pattern}?{query}")
        };
        self.get(&path).await
    }

    /// Datum hashes of the unspent outputs holding assets of `policy_id`.
    ///
    /// # Errors
    /// Returns error if the API call fails.
    pub async fn feed_datum_hashes(&self, policy_id: &str, created_after: u64) -> Result<Vec<String>> {
        let matches = self
            .matches(
                &format!("{policy_id}.*"),
                &format!("created_after={created_after}&unspent"),
            )
            .await?;
        Ok(datum_hashes(matches))
    }

    /// Hex-encoded CBOR datum for `hash`.
    ///
    /// # Errors
    /// Returns [`KupoError::NotFound`] when Kupo does not know the datum.
    pub async fn datum(&self, hash: &str) -> Result<String> {
        let response: DatumResponse = self.get(&format!("/datums/{hash}")).await?;
        response
            .datum
            .ok_or_else(|| KupoError::NotFound(format!("datum {hash}")))
    }

    /// Resolves the active feed policy id through the Fact Statement Pointer.
    ///
    /// # Errors
    /// Returns [`KupoError::NotFound`] when no unspent pointer output exists.
    pub async fn resolve_policy(&self, fsp_policy: &str, validity_token: &str) -> Result<String> {
        let matches = self
            .matches(
                "*",
                &format!("policy_id={fsp_policy}&asset_name={validity_token}&unspent"),
            )
            .await?;
        let hash = datum_hashes(matches).into_iter().next().ok_or_else(|| {
            KupoError::NotFound(format!(
                "unspent pointer output for {fsp_policy}.{validity_token}"
            ))
        })?;
        let datum = self.datum(&hash).await?;
        Ok(decode_policy_id(&datum)?)
    }

    /// Fetches and decodes every unspent feed datum under `policy_id`.
    ///
    /// # Errors
    /// Returns error if a request fails or a datum is not a feed record.
    pub async fn feed_records(&self, policy_id: &str, created_after: u64) -> Result<Vec<OnChainRecord>> {
        let hashes = self.feed_datum_hashes(policy_id, created_after).await?;
        debug!(count = hashes.len(), policy_id, "fetching feed datums");

        let mut records = Vec::with_capacity(hashes.len());
        for hash in &hashes {
            let datum = self.datum(hash).await?;
            let record = decode_feed_datum(&datum)
                .and_then(|decoded| decoded.into_record())
                .map_err(|e| KupoError::Decode(format!("datum {hash}: {e}")))?;
            records.push(record);
        }
        Ok(records)
    }
}

fn datum_hashes(matches: Vec<Match>) -> Vec<String> {
    matches
        .into_iter()
        .filter_map(|m| {
            if m.datum_hash.is_none() {
                debug!(
                    transaction_id = m.transaction_id.as_deref().unwrap_or("?"),
                    "match without datum hash skipped"
                );
            }
            m.datum_hash
        })
        .collect()
}

// =============================================================================
// ChainIndexer Implementation
// =============================================================================

#[async_trait]
impl ChainIndexer for KupoClient {
    async fn most_recent_checkpoint(&self) -> anyhow::Result<u64> {
        Ok(KupoClient::most_recent_checkpoint(self).await?)
    }

    async fn resolve_policy(&self, fsp_policy: &str, validity_token: &str) -> anyhow::Result<String> {
        Ok(KupoClient::resolve_policy(self, fsp_policy, validity_token).await?)
    }

    async fn feed_records(&self, policy_id: &str, created_after: u64) -> anyhow::Result<Vec<OnChainRecord>> {
        Ok(KupoClient::feed_records(self, policy_id, created_after).await?)
    }
}
