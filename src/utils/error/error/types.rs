//! Error types for the resilience layer

use thiserror::Error;

/// Result type alias for the resilience layer
pub type Result<T> = std::result::Result<T, ResilienceError>;

/// Main error type for the resilience layer
///
/// Recording telemetry never produces one of these; only configuration,
/// timeouts and config-file loading do.
#[derive(Error, Debug)]
pub enum ResilienceError {
    /// Configuration errors, including invalid timeout values
    #[error("Configuration error: {0}")]
    Config(String),

    /// The deadline or cancellation signal fired before the operation settled
    #[error("Timeout error: {0}")]
    Timeout(String),

    /// Monitoring lifecycle errors
    #[error("Monitoring error: {0}")]
    Monitoring(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
