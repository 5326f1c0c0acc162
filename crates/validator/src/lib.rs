//! Validator websocket integration for the Orcfax publication watcher.
//!
//! Asks the validator to collect and publish fresh prices for a set of feeds
//! through its `validate_on_demand/` socket.

pub mod client;
pub mod error;

pub use client::{user_agent, ValidatorClient, ValidatorClientConfig};
pub use error::ValidatorError;
