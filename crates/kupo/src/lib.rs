//! Kupo chain indexer integration for the Orcfax publication watcher.
//!
//! This crate provides:
//! - REST client with rate limiting for the Kupo HTTP API
//! - Fact Statement Pointer resolution of the active feed policy
//! - CBOR datum decoding into [`pubwatch_core::OnChainRecord`]
//!
//! # API Endpoints
//!
//! - `GET /health` - most recent checkpoint
//! - `GET /matches/{pattern}?...` - unspent outputs for a policy
//! - `GET /datums/{hash}` - datum by hash

pub mod client;
pub mod datum;
pub mod error;
pub mod types;

pub use client::{KupoClient, KupoClientConfig, CHECKPOINT_HEADER, KUPO_LOCAL_URL};
pub use datum::{
    decode_feed_datum, decode_policy_id, encode_hex, feed_datum, DatumValue, DecodeError,
    FeedDatum, MAX_DATUM_DEPTH,
};
pub use error::{KupoError, Result};
pub use types::{DatumResponse, Health, Match, Point};
