//! Request/response client for the validator's on-demand validation socket.
//!
//! Each request opens a connection, sends one JSON text frame, waits for one
//! reply and closes. Failed connects and connections closed before a reply
//! arrives are retried with exponential backoff, even when the validator had
//! already read the request, so it may receive the same feed list twice. A
//! request whose reply does not arrive within the timeout is not retried.

use crate::error::ValidatorError;
use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use pubwatch_core::{RepublishError, RepublishRequest, RepublishResponse, Republisher, ValidatorConfig};
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::{sleep, timeout};
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::header::{HeaderValue, USER_AGENT};
use tokio_tungstenite::tungstenite::http::Request;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{debug, info, warn};
use url::Url;

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// User agent sent on every handshake.
#[must_use]
pub fn user_agent() -> String {
    format!("orcfax-pubwatch/{}", env!("CARGO_PKG_VERSION"))
}

/// Configuration for the validator client.
#[derive(Debug, Clone)]
pub struct ValidatorClientConfig {
    /// Full validation endpoint, e.g. `wss://validator/ws/validate_on_demand/`.
    pub url: Url,
    /// Bound on connecting and on waiting for the reply.
    pub timeout: Duration,
    /// Connection attempts before giving up (at least one is always made).
    pub max_connect_attempts: u32,
    /// Delay after the first failed attempt.
    pub initial_backoff: Duration,
    /// Upper bound for the doubled delay.
    pub max_backoff: Duration,
    /// Plaintext connection; `wss` is rewritten to `ws`.
    pub local: bool,
}

impl ValidatorClientConfig {
    #[must_use]
    pub fn new(url: Url) -> Self {
        Self {
            url,
            timeout: Duration::from_secs(30),
            max_connect_attempts: 3,
            initial_backoff: Duration::from_secs(1),
            max_backoff: Duration::from_secs(30),
            local: false,
        }
    }

    /// Builds a configuration from the `validator` section.
    #[must_use]
    pub fn from_settings(url: Url, validator: &ValidatorConfig) -> Self {
        Self::new(url)
            .with_timeout(Duration::from_secs(validator.timeout_secs))
            .with_max_connect_attempts(validator.max_connect_attempts)
            .with_backoff(
                Duration::from_millis(validator.initial_backoff_ms),
                Duration::from_millis(validator.max_backoff_ms),
            )
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_max_connect_attempts(mut self, attempts: u32) -> Self {
        self.max_connect_attempts = attempts;
        self
    }

    #[must_use]
    pub fn with_backoff(mut self, initial: Duration, max: Duration) -> Self {
        self.initial_backoff = initial;
        self.max_backoff = max;
        self
    }

    #[must_use]
    pub fn with_local(mut self, local: bool) -> Self {
        self.local = local;
        self
    }
}

/// Validator websocket client.
#[derive(Debug, Clone)]
pub struct ValidatorClient {
    config: ValidatorClientConfig,
    endpoint: Url,
}

impl ValidatorClient {
    /// Creates a client, resolving the endpoint for local mode.
    ///
    /// # Errors
    /// Returns [`ValidatorError::InvalidUri`] for a non-websocket scheme.
    pub fn new(config: ValidatorClientConfig) -> Result<Self, ValidatorError> {
        let mut endpoint = config.url.clone();
        match endpoint.scheme() {
            "ws" => {}
            "wss" if config.local => {
                endpoint
                    .set_scheme("ws")
                    .map_err(|()| ValidatorError::InvalidUri(config.url.to_string()))?;
            }
            "wss" => {}
            other => {
                return Err(ValidatorError::InvalidUri(format!(
                    "unsupported scheme '{other}' in {}",
                    config.url
                )))
            }
        }
        Ok(Self { config, endpoint })
    }

    /// Endpoint actually connected to.
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Sends `payload` as one text frame and returns the first reply.
    ///
    /// # Errors
    /// Returns the last connection error once attempts are exhausted, or the
    /// first non-retryable error.
    pub async fn send(&self, payload: &str) -> Result<RepublishResponse, ValidatorError> {
        let attempts = self.config.max_connect_attempts.max(1);
        let mut delay = self.config.initial_backoff;
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;
            match self.exchange(payload).await {
                Ok(reply) => return Ok(reply),
                Err(e) if e.is_retryable() && attempt < attempts => {
                    warn!(
                        endpoint = %self.endpoint,
                        error = %e,
                        attempt,
                        "closed connection error, attempting exponential retry"
                    );
                    sleep(delay).await;
                    delay = (delay * 2).min(self.config.max_backoff);
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn handshake_request(&self) -> Result<Request<()>, ValidatorError> {
        let mut request = self
            .endpoint
            .as_str()
            .into_client_request()
            .map_err(|e| ValidatorError::InvalidUri(e.to_string()))?;
        let agent = HeaderValue::from_str(&user_agent())
            .map_err(|e| ValidatorError::Protocol(e.to_string()))?;
        request.headers_mut().insert(USER_AGENT, agent);
        Ok(request)
    }

    async fn exchange(&self, payload: &str) -> Result<RepublishResponse, ValidatorError> {
        let request = self.handshake_request()?;
        let (mut socket, _response) = timeout(self.config.timeout, connect_async(request))
            .await
            .map_err(|_| ValidatorError::ConnectionFailed("connect timed out".to_string()))?
            .map_err(ValidatorError::from_connect)?;
        info!("connected to websocket");

        socket
            .send(Message::Text(payload.to_string()))
            .await
            .map_err(ValidatorError::from_stream)?;
        info!(payload, "request sent");

        let reply = timeout(self.config.timeout, next_reply(&mut socket))
            .await
            .map_err(|_| ValidatorError::Timeout(self.config.timeout))??;

        if let Err(e) = socket.close(None).await {
            debug!(error = %e, "close after reply failed");
        }
        Ok(reply)
    }
}

async fn next_reply(socket: &mut Socket) -> Result<RepublishResponse, ValidatorError> {
    while let Some(message) = socket.next().await {
        match message.map_err(ValidatorError::from_stream)? {
            Message::Text(text) => return Ok(RepublishResponse::from_text(text)),
            Message::Binary(bytes) => {
                return String::from_utf8(bytes)
                    .map(RepublishResponse::from_text)
                    .map_err(|e| ValidatorError::Decode(format!("binary reply: {e}")))
            }
            Message::Close(frame) => {
                let reason = frame.map_or_else(
                    || "closed without reply".to_string(),
                    |f| format!("{} {}", f.code, f.reason),
                );
                return Err(ValidatorError::ConnectionClosed(reason));
            }
            Message::Ping(_) | Message::Pong(_) | Message::Frame(_) => {}
        }
    }
    Err(ValidatorError::ConnectionClosed(
        "stream ended before reply".to_string(),
    ))
}

#[async_trait]
impl Republisher for ValidatorClient {
    async fn request_feeds(&self, request: &RepublishRequest) -> Result<RepublishResponse, RepublishError> {
        let payload = request.to_json();
        let reply = self.send(&payload).await?;
        match &reply {
            RepublishResponse::Json(value) => info!(reply = %value, "validator replied"),
            RepublishResponse::Text(text) => info!(reply = %text, "validator replied"),
        }
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_user_agent() {
        assert_eq!(user_agent(), format!("orcfax-pubwatch/{}", env!("CARGO_PKG_VERSION")));
        assert!(user_agent().starts_with("orcfax-pubwatch/"));
    }

    #[test]
    fn test_config_from_settings() {
        let settings = ValidatorConfig {
            uri: None,
            timeout_secs: 5,
            max_connect_attempts: 4,
            initial_backoff_ms: 250,
            max_backoff_ms: 2_000,
        };
        let config = ValidatorClientConfig::from_settings(url("wss://v.example/validate_on_demand/"), &settings);
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.max_connect_attempts, 4);
        assert_eq!(config.initial_backoff, Duration::from_millis(250));
        assert_eq!(config.max_backoff, Duration::from_secs(2));
        assert!(!config.local);
    }

    #[test]
    fn test_local_mode_rewrites_secure_scheme() {
        let config = ValidatorClientConfig::new(url("wss://v.example/validate_on_demand/")).with_local(true);
        let client = ValidatorClient::new(config).unwrap();
        assert_eq!(client.endpoint().as_str(), "ws://v.example/validate_on_demand/");
    }

    #[test]
    fn test_secure_scheme_kept_by_default() {
        let client = ValidatorClient::new(ValidatorClientConfig::new(url("wss://v.example/x/"))).unwrap();
        assert_eq!(client.endpoint().scheme(), "wss");
    }

    #[test]
    fn test_http_scheme_rejected() {
        let err = ValidatorClient::new(ValidatorClientConfig::new(url("https://v.example/x/"))).unwrap_err();
        assert!(matches!(err, ValidatorError::InvalidUri(_)));
    }

    #[test]
    fn test_handshake_carries_user_agent() {
        let client = ValidatorClient::new(ValidatorClientConfig::new(url("ws://127.0.0.1:9/x/"))).unwrap();
        let request = client.handshake_request().unwrap();
        assert_eq!(
            request.headers().get(USER_AGENT).and_then(|v| v.to_str().ok()),
            Some(user_agent().as_str())
        );
    }
}
