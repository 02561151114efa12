//! Timeout configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Deadlines applied by the timeout controller, in milliseconds
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeoutConfig {
    /// General default used when no explicit timeout is supplied
    #[serde(default = "default_timeout_ms")]
    pub default_ms: u64,
    /// Outbound third-party API calls
    #[serde(default = "default_timeout_ms")]
    pub api_ms: u64,
    /// Database calls; never exceeds `default_ms`
    #[serde(default = "default_database_timeout_ms")]
    pub database_ms: u64,
    /// File transfers
    #[serde(default = "default_file_timeout_ms")]
    pub file_ms: u64,
    /// Raw network operations
    #[serde(default = "default_timeout_ms")]
    pub network_ms: u64,
    /// Timeouts above this are accepted but logged as suspicious
    #[serde(default = "default_max_timeout_ms")]
    pub max_ms: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            default_ms: default_timeout_ms(),
            api_ms: default_timeout_ms(),
            database_ms: default_database_timeout_ms(),
            file_ms: default_file_timeout_ms(),
            network_ms: default_timeout_ms(),
            max_ms: default_max_timeout_ms(),
        }
    }
}

impl TimeoutConfig {
    /// Merge timeout configurations, with other taking precedence where it
    /// differs from the defaults
    pub fn merge(mut self, other: Self) -> Self {
        if other.default_ms != default_timeout_ms() {
            self.default_ms = other.default_ms;
        }
        if other.api_ms != default_timeout_ms() {
            self.api_ms = other.api_ms;
        }
        if other.database_ms != default_database_timeout_ms() {
            self.database_ms = other.database_ms;
        }
        if other.file_ms != default_file_timeout_ms() {
            self.file_ms = other.file_ms;
        }
        if other.network_ms != default_timeout_ms() {
            self.network_ms = other.network_ms;
        }
        if other.max_ms != default_max_timeout_ms() {
            self.max_ms = other.max_ms;
        }
        self
    }
}
