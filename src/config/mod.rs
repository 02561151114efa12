//! Configuration management for the resilience layer
//!
//! This module handles loading, validation, and merging of all configuration.

mod loader;
pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::utils::error::{ResilienceError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Metrics, health and alerting configuration
    #[serde(default)]
    pub monitoring: MonitoringConfig,
    /// Timeout controller configuration
    #[serde(default)]
    pub timeouts: TimeoutConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ResilienceError::Config(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_yaml(&content)?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Parse and validate configuration from a YAML document
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(content)
            .map_err(|e| ResilienceError::Config(format!("Failed to parse config: {}", e)))?;

        config.validate_all()?;
        Ok(config)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let config = Self::from_vars(std::env::vars())?;
        config.validate_all()?;
        Ok(config)
    }

    /// Load the file (when given) and overlay environment overrides on top.
    ///
    /// Every `RESILIENCE_*` variable that is set replaces the file's value.
    pub async fn load<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path).await?,
            None => Self::default(),
        };

        config.apply_vars(std::env::vars())?;
        config.validate_all()?;
        Ok(config)
    }

    /// Merge two configurations, with other taking precedence where it
    /// differs from the built-in defaults
    pub fn merge(mut self, other: Self) -> Self {
        self.monitoring = self.monitoring.merge(other.monitoring);
        self.timeouts = self.timeouts.merge(other.timeouts);
        self.logging = self.logging.merge(other.logging);
        self
    }

    /// Validate every section, mapping failures to a configuration error
    pub fn validate_all(&self) -> Result<()> {
        Validate::validate(self).map_err(ResilienceError::Config)
    }
}
