//! Types for timeout handling

use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Class of operation a default timeout is looked up for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    /// Third-party API call
    Api,
    /// Database query; capped at the general default
    Database,
    /// File upload or download
    File,
    /// Raw network operation
    Network,
}

impl OperationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Api => "api",
            OperationKind::Database => "database",
            OperationKind::File => "file",
            OperationKind::Network => "network",
        }
    }
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OperationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "api" => Ok(OperationKind::Api),
            "database" | "db" => Ok(OperationKind::Database),
            "file" => Ok(OperationKind::File),
            "network" => Ok(OperationKind::Network),
            other => Err(format!("Unknown operation kind: {}", other)),
        }
    }
}

/// Options for [`TimeoutController::with_timeout`]
///
/// [`TimeoutController::with_timeout`]: super::TimeoutController::with_timeout
#[derive(Debug, Clone, Default)]
pub struct TimeoutOptions {
    /// Deadline; the controller's default when `None`
    pub timeout: Option<Duration>,
    /// External cancellation; the deadline token is linked as its child
    pub token: Option<CancellationToken>,
    /// Message carried by the timeout error
    pub timeout_message: Option<String>,
}

impl TimeoutOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_token(mut self, token: CancellationToken) -> Self {
        self.token = Some(token);
        self
    }

    pub fn with_message<S: Into<String>>(mut self, message: S) -> Self {
        self.timeout_message = Some(message.into());
        self
    }
}
