//! CLI configuration module.
//!
//! Configuration is layered with the `config` crate:
//!
//! ```text
//!   defaults  <  pressquote.toml (optional)  <  PRESSQUOTE_* environment
//! ```

use std::fs;
use std::path::PathBuf;

use ::config::builder::DefaultState;
use ::config::{Config, ConfigBuilder, Environment, File};
use pressquote_core::{CoreError, RateCard, OFFSET_COMPARISON_THRESHOLD};
use serde::Deserialize;

/// Optional configuration file, looked up in the working directory.
const CONFIG_FILE: &str = "pressquote";

/// Prefix of the environment overrides (`PRESSQUOTE_OFFSET_THRESHOLD`, ...).
const ENV_PREFIX: &str = "PRESSQUOTE";

/// CLI configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Quantity above which offset is priced alongside digital
    pub offset_threshold: u32,

    /// JSON rate card replacing the standard one
    pub rate_card_path: Option<PathBuf>,

    /// Pretty-print the JSON response
    pub pretty: bool,

    /// Default tracing filter, overridden by `RUST_LOG`
    pub log_filter: String,
}

impl Settings {
    /// Load configuration from `pressquote.toml` and the environment.
    pub fn load() -> Result<Self, SettingsError> {
        let builder = Config::builder()
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true));

        Self::from_builder(builder)
    }

    /// Applies defaults below whatever sources `builder` already carries.
    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, SettingsError> {
        let settings: Settings = builder
            .set_default("offset_threshold", i64::from(OFFSET_COMPARISON_THRESHOLD))?
            .set_default("pretty", true)?
            .set_default("log_filter", "info")?
            .build()?
            .try_deserialize()?;

        if settings.offset_threshold < 1 {
            return Err(SettingsError::InvalidValue {
                key: "offset_threshold".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(settings)
    }

    /// Reads the configured rate card, if any.
    pub fn load_rate_card(&self) -> Result<Option<RateCard>, SettingsError> {
        let Some(path) = &self.rate_card_path else {
            return Ok(None);
        };

        let json = fs::read_to_string(path).map_err(|source| SettingsError::RateCardRead {
            path: path.clone(),
            source,
        })?;

        Ok(Some(RateCard::from_json(&json)?))
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Configuration error: {0}")]
    Source(#[from] ::config::ConfigError),

    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("Cannot read rate card {}: {source}", path.display())]
    RateCardRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    RateCard(#[from] CoreError),
}
