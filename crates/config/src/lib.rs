//! Configuration models and loaders for the geospace toolkit.

use std::fs::File;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Default chrono format for timestamps read from text inputs.
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Timestamp matching settings parsed from `.toml` or YAML manifests.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct MatchConfig {
    /// Matching window in microseconds; candidates must be strictly closer.
    pub tolerance_us: f64,
    pub allow_duplicates: bool,
    /// Query elements between progress reports (`0` disables them).
    pub progress_interval: usize,
    /// chrono format string used to parse timestamp columns.
    pub timestamp_format: String,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            tolerance_us: 400_000.0,
            allow_duplicates: false,
            progress_interval: 5_000,
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
        }
    }
}

impl MatchConfig {
    /// Reject settings the matcher cannot honour.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.tolerance_us.is_finite() || self.tolerance_us < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "tolerance_us must be a finite, non-negative number (got {})",
                self.tolerance_us
            )));
        }
        if self.timestamp_format.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "timestamp_format must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Load and validate matcher settings from a TOML or YAML file.
pub fn load_match_config<P: AsRef<Path>>(path: P) -> Result<MatchConfig, ConfigError> {
    let config: MatchConfig = load_record(path)?;
    config.validate()?;
    Ok(config)
}

fn load_record<T, P>(path: P) -> Result<T, ConfigError>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if path.extension().map(|ext| ext == "toml").unwrap_or(false) {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}
