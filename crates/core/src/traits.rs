use crate::error::RepublishError;
use crate::record::OnChainRecord;
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Read access to the chain indexer.
#[async_trait]
pub trait ChainIndexer: Send + Sync {
    /// Most recent chain checkpoint (slot) the indexer has processed.
    async fn most_recent_checkpoint(&self) -> Result<u64>;

    /// Resolves the active feed policy id through the Fact Statement Pointer.
    async fn resolve_policy(&self, fsp_policy: &str, validity_token: &str) -> Result<String>;

    /// Fetches and decodes every unspent feed datum under `policy_id`.
    async fn feed_records(&self, policy_id: &str, created_after: u64) -> Result<Vec<OnChainRecord>>;
}

/// Payload sent to the validator to ask for new publications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepublishRequest {
    pub feeds: Vec<String>,
}

impl RepublishRequest {
    #[must_use]
    pub fn new(feeds: Vec<String>) -> Self {
        Self { feeds }
    }

    /// JSON body, e.g. `{"feeds":["ADA-USD"]}`.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::json!({ "feeds": self.feeds }).to_string()
    }
}

/// Validator reply: decoded JSON when possible, raw text otherwise.
#[derive(Debug, Clone, PartialEq)]
pub enum RepublishResponse {
    Json(serde_json::Value),
    Text(String),
}

impl RepublishResponse {
    /// Parses `text` as JSON, falling back to the raw text.
    #[must_use]
    pub fn from_text(text: String) -> Self {
        match serde_json::from_str(&text) {
            Ok(value) => Self::Json(value),
            Err(_) => Self::Text(text),
        }
    }
}

/// Sends republication requests to the validator.
#[async_trait]
pub trait Republisher: Send + Sync {
    async fn request_feeds(
        &self,
        request: &RepublishRequest,
    ) -> std::result::Result<RepublishResponse, RepublishError>;
}

/// Single cross-run value recording the last processed chain checkpoint.
pub trait CheckpointStore: Send + Sync {
    /// Previously stored checkpoint, `None` when nothing has been stored yet.
    fn load(&self) -> Result<Option<u64>>;

    fn save(&self, checkpoint: u64) -> Result<()>;
}
