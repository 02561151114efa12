//! Configuration data models
//!
//! This module defines all configuration structures used throughout the crate.

pub mod logging;
pub mod monitoring;
pub mod timeout;

// Re-export all configuration types
pub use logging::*;
pub use monitoring::*;
pub use timeout::*;

/// Default timeout in milliseconds
pub fn default_timeout_ms() -> u64 {
    30_000
}

/// Default database timeout in milliseconds
pub fn default_database_timeout_ms() -> u64 {
    10_000
}

/// Default file transfer timeout in milliseconds
pub fn default_file_timeout_ms() -> u64 {
    120_000
}

/// Upper bound above which a timeout is considered a misconfiguration
pub fn default_max_timeout_ms() -> u64 {
    300_000 // 5 minutes
}

/// Default log filter
pub fn default_log_level() -> String {
    "info".to_string()
}
