//! Configuration loading: TOML file with environment variable overrides.
//!
//! Reads `farmhub.toml` (or the path given with `--config`). Every field has
//! a sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::path::Path;

use farmhub_domain::device::DeviceDefaults;
use farmhub_domain::device::irrigation::validate_flow_rate;
use farmhub_domain::device::soil_moisture::validate_threshold;
use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Fallbacks for device options left unset at creation.
    pub defaults: DefaultsConfig,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Device creation defaults.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Moisture threshold for new soil sensors, percent.
    pub soil_threshold: f64,
    /// Flow rate for new irrigation controllers, litres per minute.
    pub water_flow_rate: f64,
}

impl Config {
    /// Load configuration from `path` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or is
    /// malformed, or if a default is out of range.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::from_file(path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("FARMHUB_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
        if let Some(threshold) = var("FARMHUB_SOIL_THRESHOLD").and_then(|v| v.trim().parse().ok())
        {
            self.defaults.soil_threshold = threshold;
        }
        if let Some(rate) = var("FARMHUB_WATER_FLOW_RATE").and_then(|v| v.trim().parse().ok()) {
            self.defaults.water_flow_rate = rate;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        validate_threshold(self.defaults.soil_threshold)
            .map_err(|err| ConfigError::Validation(format!("defaults.soil_threshold: {err}")))?;
        validate_flow_rate(self.defaults.water_flow_rate)
            .map_err(|err| ConfigError::Validation(format!("defaults.water_flow_rate: {err}")))?;
        Ok(())
    }

    /// Defaults handed to the registry.
    #[must_use]
    pub fn device_defaults(&self) -> DeviceDefaults {
        DeviceDefaults {
            soil_threshold: self.defaults.soil_threshold,
            water_flow_rate: self.defaults.water_flow_rate,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "farmhub=warn,farmhub_app=info".to_string(),
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        let defaults = DeviceDefaults::default();
        Self {
            soil_threshold: defaults.soil_threshold,
            water_flow_rate: defaults.water_flow_rate,
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
