//! Logging setup
//!
//! Installs the process-wide `tracing` subscriber from [`LoggingConfig`].

use crate::config::LoggingConfig;
use crate::utils::error::{ResilienceError, Result};
use tracing_subscriber::EnvFilter;

/// Build the filter for a logging configuration; `RUST_LOG` wins when set.
pub fn build_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&config.level).map_err(|e| {
            ResilienceError::Config(format!("Invalid log level '{}': {}", config.level, e))
        }),
    }
}

/// Initialize the global subscriber.
///
/// Returns `Ok(false)` when a subscriber was already installed (for example by
/// the host application or another test), `Ok(true)` when this call installed it.
pub fn init_logging(config: &LoggingConfig) -> Result<bool> {
    let filter = build_filter(config)?;

    let installed = if config.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .try_init()
            .is_ok()
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_thread_ids(false)
            .try_init()
            .is_ok()
    };

    Ok(installed)
}
