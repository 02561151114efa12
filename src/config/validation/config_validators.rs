//! Core configuration validators
//!
//! This module provides validation implementations for the top-level
//! configuration and its logging section.

use super::trait_def::Validate;
use crate::config::Config;
use crate::config::models::*;
use tracing::debug;
use tracing_subscriber::EnvFilter;

impl Validate for Config {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating configuration");

        self.monitoring.validate()?;
        self.timeouts.validate()?;
        self.logging.validate()?;

        debug!("Configuration validation completed");
        Ok(())
    }
}

impl Validate for LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        if self.level.trim().is_empty() {
            return Err("Log level cannot be empty".to_string());
        }

        EnvFilter::try_new(&self.level)
            .map_err(|e| format!("Invalid log level '{}': {}", self.level, e))?;

        Ok(())
    }
}
