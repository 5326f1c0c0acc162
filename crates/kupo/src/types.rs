//! Wire models for the Kupo HTTP API.

use serde::{Deserialize, Serialize};

/// Chain point at which an output was created or spent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub slot_no: u64,
    pub header_hash: Option<String>,
}

/// One entry of a `/matches` response.
///
/// Only the fields the watcher reads are modelled; Kupo sends more.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub transaction_id: Option<String>,
    pub output_index: Option<u64>,
    pub address: Option<String>,
    /// Absent for outputs without a datum or with an inline datum.
    pub datum_hash: Option<String>,
    pub created_at: Option<Point>,
}

/// Body of `/datums/{hash}`. Kupo answers `{"datum": null}` for unknown hashes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatumResponse {
    pub datum: Option<String>,
}

/// JSON body of `/health`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    pub connection_status: Option<String>,
    pub most_recent_checkpoint: Option<u64>,
    pub most_recent_node_tip: Option<u64>,
}
