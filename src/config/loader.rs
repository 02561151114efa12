//! Configuration loading utilities
//!
//! This module reads configuration overrides from environment variables.

use super::Config;
use crate::utils::error::{ResilienceError, Result};
use std::collections::HashMap;
use std::str::FromStr;
use tracing::debug;

/// Prefix shared by every recognised environment variable
pub(crate) const ENV_PREFIX: &str = "RESILIENCE_";

impl Config {
    /// Build a configuration from `(name, value)` pairs such as `std::env::vars()`.
    ///
    /// Unknown variables are ignored; a recognised variable with an
    /// unparseable value is a configuration error.
    pub fn from_vars<I>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut config = Self::default();
        config.apply_vars(vars)?;
        Ok(config)
    }

    /// Overwrite the fields named by the recognised variables that are present.
    ///
    /// Fields without a variable keep their current value, and a variable
    /// always wins even when it repeats the built-in default.
    pub fn apply_vars<I>(&mut self, vars: I) -> Result<()>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        debug!("Applying configuration overrides from environment variables");

        let vars: HashMap<String, String> = vars
            .into_iter()
            .filter(|(key, _)| key.starts_with(ENV_PREFIX))
            .collect();

        // Timeout configuration
        if let Some(value) = parse_var(&vars, "DEFAULT_TIMEOUT_MS")? {
            self.timeouts.default_ms = value;
        }
        if let Some(value) = parse_var(&vars, "API_TIMEOUT_MS")? {
            self.timeouts.api_ms = value;
        }
        if let Some(value) = parse_var(&vars, "DATABASE_TIMEOUT_MS")? {
            self.timeouts.database_ms = value;
        }
        if let Some(value) = parse_var(&vars, "FILE_TIMEOUT_MS")? {
            self.timeouts.file_ms = value;
        }
        if let Some(value) = parse_var(&vars, "NETWORK_TIMEOUT_MS")? {
            self.timeouts.network_ms = value;
        }
        if let Some(value) = parse_var(&vars, "MAX_TIMEOUT_MS")? {
            self.timeouts.max_ms = value;
        }

        // Metrics configuration
        if let Some(value) = parse_var(&vars, "MAX_RESPONSE_SAMPLES")? {
            self.monitoring.metrics.max_response_samples = value;
        }
        if let Some(value) = parse_var(&vars, "CLEANUP_INTERVAL_SECS")? {
            self.monitoring.metrics.cleanup_interval_secs = value;
        }

        // Logging configuration
        if let Some(level) = vars.get(&format!("{}LOG_LEVEL", ENV_PREFIX)) {
            self.logging.level = level.clone();
        }
        if let Some(value) = parse_var(&vars, "LOG_JSON")? {
            self.logging.json = value;
        }

        Ok(())
    }
}

fn parse_var<T>(vars: &HashMap<String, String>, name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let key = format!("{}{}", ENV_PREFIX, name);
    match vars.get(&key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| ResilienceError::Config(format!("Invalid {}: {}", key, e))),
        None => Ok(None),
    }
}
