use crate::config::AppConfig;
use crate::error::ConfigError;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use std::path::Path;

/// Default location of the optional TOML configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "config/Pubwatch.toml";

/// Variables read verbatim as strings, in merge order (later wins), paired
/// with the configuration key they set.
///
/// Policy ids and token names are hex text; figment's `Env` provider would
/// turn an all-digit value into an integer and drop leading zeros.
const STRING_ENV: [(&str, &str); 6] = [
    ("PUBWATCH_FSP__POLICY_ID", "fsp.policy_id"),
    ("PUBWATCH_FSP__VALIDITY_TOKEN", "fsp.validity_token"),
    ("ORCFAX_VALIDATOR", "validator.uri"),
    ("KUPO_URL", "indexer.url"),
    ("FSP_POLICY", "fsp.policy_id"),
    ("VALIDITY_TOKEN", "fsp.validity_token"),
];

pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads configuration from the default TOML path and the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a layer cannot be parsed into [`AppConfig`].
    pub fn load() -> Result<AppConfig, ConfigError> {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    /// Loads configuration by merging defaults, the TOML file at `path`
    /// (if present), `PUBWATCH_`-prefixed variables and the legacy variables
    /// `ORCFAX_VALIDATOR`, `KUPO_URL`, `FSP_POLICY` and `VALIDITY_TOKEN`.
    ///
    /// Nested keys use a double underscore, e.g. `PUBWATCH_MONITOR__POLICY`.
    ///
    /// # Errors
    ///
    /// Returns an error if a layer cannot be parsed into [`AppConfig`].
    pub fn load_from(path: impl AsRef<Path>) -> Result<AppConfig, ConfigError> {
        let config: AppConfig = Self::figment(path.as_ref()).extract()?;
        Ok(config)
    }

    fn figment(path: &Path) -> Figment {
        let figment = Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(path))
            .merge(
                Env::prefixed("PUBWATCH_")
                    .filter(|key| !key.as_str().to_ascii_lowercase().starts_with("fsp__"))
                    .split("__"),
            );

        STRING_ENV
            .iter()
            .filter_map(|(var, key)| std::env::var(var).ok().map(|value| (*key, value)))
            .fold(figment, |figment, entry| figment.merge(entry))
    }
}
