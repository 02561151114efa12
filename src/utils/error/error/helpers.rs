//! Helper functions for creating specific error types

use super::types::ResilienceError;

/// Helper functions for creating specific errors
impl ResilienceError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn timeout<S: Into<String>>(message: S) -> Self {
        Self::Timeout(message.into())
    }

    pub fn monitoring<S: Into<String>>(message: S) -> Self {
        Self::Monitoring(message.into())
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    /// Whether this error came from a fired deadline or cancellation
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }

    /// Whether this error came from invalid configuration
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_) | Self::Validation(_) | Self::Yaml(_))
    }
}
