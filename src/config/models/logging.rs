//! Logging configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Default filter directive, overridden by `RUST_LOG` when set
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl LoggingConfig {
    /// Merge logging configurations
    pub fn merge(mut self, other: Self) -> Self {
        if other.level != default_log_level() {
            self.level = other.level;
        }
        if other.json {
            self.json = other.json;
        }
        self
    }
}
