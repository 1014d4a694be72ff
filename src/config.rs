//! # Configuration System
//!
//! Environment-aware configuration loading for the orchestration core.
//! Defaults work out of the box; an optional TOML file and
//! `ORCHESTRATION_CORE_*` environment variables override them. No silent
//! fallbacks after load: values are validated before use.

use crate::constants::DEFAULT_EVENT_CAPACITY;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Errors raised while loading or validating configuration
#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("Failed to load configuration: {message}")]
    Load { message: String },

    #[error("Invalid configuration value for {field}: {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

impl ConfigurationError {
    /// Create a load error
    pub fn load(message: impl Into<String>) -> Self {
        Self::Load {
            message: message.into(),
        }
    }

    /// Create an invalid value error
    pub fn invalid_value(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for configuration operations
pub type ConfigResult<T> = Result<T, ConfigurationError>;

/// Root configuration for the orchestration core
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreConfig {
    /// Deployment environment: development, test, or production
    #[serde(default = "detect_environment")]
    pub environment: String,

    /// Lifecycle event channel settings
    #[serde(default)]
    pub events: EventsConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Lifecycle event channel settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventsConfig {
    /// Capacity of the broadcast channel behind the event publisher
    #[serde(default = "default_event_capacity")]
    pub broadcast_capacity: usize,
}

/// Logging settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Explicit filter directive; when unset, the environment decides
    #[serde(default)]
    pub level: Option<String>,
}

fn default_event_capacity() -> usize {
    DEFAULT_EVENT_CAPACITY
}

/// Detect the deployment environment from process environment variables
fn detect_environment() -> String {
    env::var("ORCHESTRATION_ENV")
        .or_else(|_| env::var("APP_ENV"))
        .unwrap_or_else(|_| "development".to_string())
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            broadcast_capacity: default_event_capacity(),
        }
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            environment: detect_environment(),
            events: EventsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl CoreConfig {
    /// Load configuration from defaults and environment variables only
    pub fn load() -> ConfigResult<Self> {
        Self::load_with_sources(None::<&Path>)
    }

    /// Load configuration from a TOML file, then environment overrides
    pub fn load_from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        Self::load_with_sources(Some(path.as_ref()))
    }

    fn load_with_sources(path: Option<&Path>) -> ConfigResult<Self> {
        let mut builder = Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(false));
        }

        let settings = builder
            .add_source(
                Environment::with_prefix("ORCHESTRATION_CORE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| ConfigurationError::load(e.to_string()))?;

        let config: CoreConfig = settings
            .try_deserialize()
            .map_err(|e| ConfigurationError::load(e.to_string()))?;

        config.validate()?;

        debug!(
            environment = %config.environment,
            event_capacity = config.events.broadcast_capacity,
            "Configuration loaded"
        );

        Ok(config)
    }

    /// Validate the loaded configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if self.events.broadcast_capacity == 0 {
            return Err(ConfigurationError::invalid_value(
                "events.broadcast_capacity",
                "0",
                "event channel capacity must be positive",
            ));
        }

        match self.environment.as_str() {
            "development" | "test" | "production" => Ok(()),
            other => Err(ConfigurationError::invalid_value(
                "environment",
                other,
                "expected development, test, or production",
            )),
        }
    }

    /// Check if this is the production environment
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = CoreConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.events.broadcast_capacity, DEFAULT_EVENT_CAPACITY);
        assert!(config.logging.level.is_none());
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let config = CoreConfig {
            events: EventsConfig {
                broadcast_capacity: 0,
            },
            ..CoreConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigurationError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_unknown_environment_rejected() {
        let config = CoreConfig {
            environment: "staging".to_string(),
            ..CoreConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_toml_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp file");
        writeln!(
            file,
            "environment = \"test\"\n\n[events]\nbroadcast_capacity = 64\n\n[logging]\nlevel = \"debug\""
        )
        .expect("write config");

        let config = CoreConfig::load_from_file(file.path()).expect("load config");
        assert_eq!(config.environment, "test");
        assert_eq!(config.events.broadcast_capacity, 64);
        assert_eq!(config.logging.level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = CoreConfig::load_from_file("/nonexistent/orchestration-core.toml")
            .expect("load config");
        assert_eq!(config.events.broadcast_capacity, DEFAULT_EVENT_CAPACITY);
    }
}
