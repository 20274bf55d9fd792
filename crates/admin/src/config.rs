//! Environment configuration for the admin binary.

use std::path::PathBuf;

use thiserror::Error;
use tradeline_observability::tracing::LogFormat;

pub const DEFAULT_FIXTURE: &str = "data.json";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("TRADELINE_LOG_FORMAT must be `json` or `pretty`, got {0:?}")]
    InvalidLogFormat(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminConfig {
    /// `TRADELINE_FIXTURE`: timeline JSON to load.
    pub fixture: PathBuf,
    /// `fixture` fell back to [`DEFAULT_FIXTURE`].
    pub fixture_defaulted: bool,
    /// `TRADELINE_COMMANDS`: optional JSON array of offer commands to replay.
    pub commands: Option<PathBuf>,
    /// `TRADELINE_LOG_FORMAT`: `None` keeps the observability default.
    pub log_format: Option<LogFormat>,
}

impl AdminConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let configured_fixture = get("TRADELINE_FIXTURE").map(PathBuf::from);
        let fixture_defaulted = configured_fixture.is_none();

        let log_format = match get("TRADELINE_LOG_FORMAT") {
            None => None,
            Some(raw) => Some(LogFormat::parse(&raw).ok_or(ConfigError::InvalidLogFormat(raw))?),
        };

        Ok(Self {
            fixture: configured_fixture.unwrap_or_else(|| PathBuf::from(DEFAULT_FIXTURE)),
            fixture_defaulted,
            commands: get("TRADELINE_COMMANDS").map(PathBuf::from),
            log_format,
        })
    }

    /// Report fallbacks taken while reading the environment. Call once tracing
    /// is initialised; nothing is logged while the config is being built.
    pub fn log_defaults(&self) {
        if self.fixture_defaulted {
            tracing::warn!(
                fixture = %self.fixture.display(),
                "TRADELINE_FIXTURE not set; using default fixture"
            );
        }
    }
}
