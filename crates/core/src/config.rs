use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ConfigError;

/// File name of the checkpoint kept in the system temp directory.
pub const CHECKPOINT_FILE_NAME: &str = "pubwatch_slotfile";

/// Path appended to the validator base URI for on-demand validation.
pub const VALIDATION_PATH: &str = "validate_on_demand/";

/// Safety margin subtracted from every feed interval.
pub const DEFAULT_INTERVAL_THRESHOLD_SECS: i64 = 120;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub indexer: IndexerConfig,
    pub validator: ValidatorConfig,
    pub fsp: FspConfig,
    pub monitor: MonitorConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexerConfig {
    /// Kupo base URL (`KUPO_URL`).
    pub url: Option<String>,
    pub timeout_secs: u64,
    pub requests_per_second: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidatorConfig {
    /// Validator websocket base URI (`ORCFAX_VALIDATOR`).
    pub uri: Option<String>,
    pub timeout_secs: u64,
    pub max_connect_attempts: u32,
    pub initial_backoff_ms: u64,
    pub max_backoff_ms: u64,
}

/// Fact Statement Pointer lookup parameters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FspConfig {
    /// `FSP_POLICY`
    pub policy_id: Option<String>,
    /// `VALIDITY_TOKEN`
    pub validity_token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    pub interval_threshold_secs: i64,
    pub policy: DetectionPolicy,
    pub checkpoint_path: Option<PathBuf>,
}

/// How overdue feeds are decided.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionPolicy {
    /// Age since last publication compared with the interval less the threshold.
    #[default]
    Delta,
    /// Hour-aligned publication windows with the threshold as grace.
    HourBaseline,
}

impl Default for IndexerConfig {
    fn default() -> Self {
        Self {
            url: None,
            timeout_secs: 30,
            requests_per_second: 20,
        }
    }
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            uri: None,
            timeout_secs: 30,
            max_connect_attempts: 3,
            initial_backoff_ms: 1_000,
            max_backoff_ms: 30_000,
        }
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            interval_threshold_secs: DEFAULT_INTERVAL_THRESHOLD_SECS,
            policy: DetectionPolicy::Delta,
            checkpoint_path: None,
        }
    }
}

/// Configuration with every required value present and parsed.
#[derive(Debug, Clone)]
pub struct Settings {
    pub indexer_url: Url,
    pub validation_url: Url,
    pub fsp_policy: String,
    pub validity_token: String,
    pub checkpoint_path: PathBuf,
    pub app: AppConfig,
}

impl AppConfig {
    /// Checks required endpoints and identifiers.
    ///
    /// # Errors
    /// Returns [`ConfigError::MisconfiguredEndpoint`] naming the first value
    /// that is missing or malformed.
    pub fn validate(self) -> Result<Settings, ConfigError> {
        let validator_uri = required(
            self.validator.uri.as_deref(),
            "validator.uri",
            "ensure 'ORCFAX_VALIDATOR' is set (`export ORCFAX_VALIDATOR=wss://`)",
        )?;
        let validation_url = validation_url(validator_uri)?;

        let indexer_raw = required(
            self.indexer.url.as_deref(),
            "indexer.url",
            "ensure 'KUPO_URL' is set (`export KUPO_URL=http://`)",
        )?;
        let indexer_url = Url::parse(indexer_raw).map_err(|e| {
            ConfigError::misconfigured("indexer.url", e.to_string(), "use an http(s):// URL")
        })?;
        if !matches!(indexer_url.scheme(), "http" | "https") {
            return Err(ConfigError::misconfigured(
                "indexer.url",
                format!("unsupported scheme '{}'", indexer_url.scheme()),
                "use an http(s):// URL",
            ));
        }

        let fsp_policy = required(
            self.fsp.policy_id.as_deref(),
            "fsp.policy_id",
            "ensure 'FSP_POLICY' is set",
        )?
        .to_string();
        let validity_token = required(
            self.fsp.validity_token.as_deref(),
            "fsp.validity_token",
            "ensure 'VALIDITY_TOKEN' is set",
        )?
        .to_string();

        if self.monitor.interval_threshold_secs < 0 {
            return Err(ConfigError::misconfigured(
                "monitor.interval_threshold_secs",
                format!("must be >= 0, got {}", self.monitor.interval_threshold_secs),
                "set a non-negative grace period in seconds (default 120)",
            ));
        }

        let checkpoint_path = self
            .monitor
            .checkpoint_path
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join(CHECKPOINT_FILE_NAME));

        Ok(Settings {
            indexer_url,
            validation_url,
            fsp_policy,
            validity_token,
            checkpoint_path,
            app: self,
        })
    }
}

fn required<'a>(
    value: Option<&'a str>,
    key: &'static str,
    hint: &'static str,
) -> Result<&'a str, ConfigError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ConfigError::misconfigured(key, "not set", hint)),
    }
}

fn validation_url(base: &str) -> Result<Url, ConfigError> {
    const HINT: &str = "ensure 'ORCFAX_VALIDATOR' is a websocket URI (`export ORCFAX_VALIDATOR=wss://`)";

    let mut joined = base.to_string();
    if !joined.ends_with('/') {
        joined.push('/');
    }
    joined.push_str(VALIDATION_PATH);

    let url = Url::parse(&joined)
        .map_err(|e| ConfigError::misconfigured("validator.uri", e.to_string(), HINT))?;
    if !matches!(url.scheme(), "ws" | "wss") {
        return Err(ConfigError::misconfigured(
            "validator.uri",
            format!("unsupported scheme '{}'", url.scheme()),
            HINT,
        ));
    }
    Ok(url)
}
