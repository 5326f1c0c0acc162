use pubwatch_core::RepublishError;
use std::time::Duration;
use thiserror::Error;
use tokio_tungstenite::tungstenite;

/// Errors that can occur while talking to the validator websocket.
#[derive(Error, Debug)]
pub enum ValidatorError {
    /// The validator URI cannot be used for a websocket connection.
    #[error("invalid validator URI: {0}")]
    InvalidUri(String),

    /// Failed to establish the websocket connection.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The connection closed before a reply arrived.
    #[error("connection closed: {0}")]
    ConnectionClosed(String),

    /// WebSocket protocol error.
    #[error("websocket protocol error: {0}")]
    Protocol(String),

    /// No reply within the configured timeout.
    #[error("no reply within {0:?}")]
    Timeout(Duration),

    /// The reply could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),
}

impl ValidatorError {
    /// Maps an error raised while opening the connection.
    pub(crate) fn from_connect(err: tungstenite::Error) -> Self {
        match err {
            tungstenite::Error::Url(e) => Self::InvalidUri(e.to_string()),
            tungstenite::Error::Http(response) => {
                Self::ConnectionFailed(format!("handshake rejected with status {}", response.status()))
            }
            other => Self::ConnectionFailed(other.to_string()),
        }
    }

    /// Maps an error raised on an established connection.
    pub(crate) fn from_stream(err: tungstenite::Error) -> Self {
        match err {
            tungstenite::Error::ConnectionClosed
            | tungstenite::Error::AlreadyClosed
            | tungstenite::Error::Io(_) => Self::ConnectionClosed(err.to_string()),
            other => Self::Protocol(other.to_string()),
        }
    }

    /// Returns true if a fresh connection attempt may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ConnectionFailed(_) | Self::ConnectionClosed(_))
    }
}

impl From<ValidatorError> for RepublishError {
    fn from(err: ValidatorError) -> Self {
        match err {
            ValidatorError::Decode(msg) => Self::Decode(msg),
            other => Self::Transport(other.to_string()),
        }
    }
}
