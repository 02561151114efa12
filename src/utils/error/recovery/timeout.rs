//! Deadline tokens and the timeout controller

use super::types::{OperationKind, TimeoutOptions};
use crate::config::{TimeoutConfig, Validate};
use crate::utils::error::{ResilienceError, Result};
use crate::utils::format_duration;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// A cancellation token that cancels itself once its deadline passes.
///
/// The deadline timer stops as soon as the token is cancelled by anyone, and
/// is aborted when the `DeadlineToken` is dropped.
#[derive(Debug)]
pub struct DeadlineToken {
    token: CancellationToken,
    timeout: Duration,
    timer: JoinHandle<()>,
}

impl DeadlineToken {
    /// Arm a deadline on `token`, spawning the timer on the current runtime
    fn arm(token: CancellationToken, timeout: Duration) -> Result<Self> {
        let runtime = tokio::runtime::Handle::try_current().map_err(|e| {
            ResilienceError::monitoring(format!("No tokio runtime to arm a deadline on: {}", e))
        })?;

        let timer_token = token.clone();
        let timer = runtime.spawn(async move {
            tokio::select! {
                _ = timer_token.cancelled() => {}
                _ = tokio::time::sleep(timeout) => {
                    debug!(timeout_ms = timeout.as_millis() as u64, "Deadline reached");
                    timer_token.cancel();
                }
            }
        });

        Ok(Self {
            token,
            timeout,
            timer,
        })
    }

    /// The underlying token, for handing to operations that poll it
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Cancel now, without waiting for the deadline
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Deadline this token was armed with
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Whether the deadline timer task is still alive
    pub fn has_pending_timer(&self) -> bool {
        !self.timer.is_finished()
    }

    /// Completes once the token is cancelled
    pub async fn cancelled(&self) {
        self.token.cancelled().await
    }
}

impl Drop for DeadlineToken {
    fn drop(&mut self) {
        self.timer.abort();
    }
}

/// Races async operations against deadlines and cancellation
#[derive(Debug, Clone)]
pub struct TimeoutController {
    config: Arc<TimeoutConfig>,
}

impl TimeoutController {
    /// Create a controller from validated configuration
    pub fn new(config: &TimeoutConfig) -> Result<Self> {
        config.validate().map_err(ResilienceError::config)?;
        Ok(Self {
            config: Arc::new(config.clone()),
        })
    }

    /// Configuration in use
    pub fn config(&self) -> &TimeoutConfig {
        &self.config
    }

    /// Deadline used when none is supplied
    pub fn default_timeout(&self) -> Duration {
        Duration::from_millis(self.config.default_ms)
    }

    /// Fresh token that cancels itself after `timeout` (or the default).
    ///
    /// Fails outside a tokio runtime, since the deadline timer needs one.
    pub fn create_token(&self, timeout: Option<Duration>) -> Result<DeadlineToken> {
        DeadlineToken::arm(
            CancellationToken::new(),
            timeout.unwrap_or_else(|| self.default_timeout()),
        )
    }

    /// Deadline token that is also cancelled when `parent` is.
    ///
    /// Cancelling the returned token never cancels `parent`.
    pub fn create_linked_token(
        &self,
        parent: &CancellationToken,
        timeout: Option<Duration>,
    ) -> Result<DeadlineToken> {
        DeadlineToken::arm(
            parent.child_token(),
            timeout.unwrap_or_else(|| self.default_timeout()),
        )
    }

    /// Run `operation` until it completes or `token` is cancelled.
    ///
    /// An already-cancelled token fails without polling the operation. On
    /// cancellation the operation future is dropped.
    pub async fn race<F>(
        &self,
        operation: F,
        token: &CancellationToken,
        message: &str,
    ) -> Result<F::Output>
    where
        F: Future,
    {
        if token.is_cancelled() {
            return Err(ResilienceError::timeout(message));
        }

        tokio::select! {
            biased;
            _ = token.cancelled() => Err(ResilienceError::timeout(message)),
            output = operation => Ok(output),
        }
    }

    /// Run `operation` under a deadline, optionally linked to an external token
    pub async fn with_timeout<F>(&self, operation: F, options: TimeoutOptions) -> Result<F::Output>
    where
        F: Future,
    {
        self.with_timeout_fn(|_| operation, options).await
    }

    /// Like [`with_timeout`](Self::with_timeout), but hands the deadline token
    /// to the operation so it can stop work it spawned on its own
    pub async fn with_timeout_fn<F, Fut>(
        &self,
        operation: F,
        options: TimeoutOptions,
    ) -> Result<Fut::Output>
    where
        F: FnOnce(CancellationToken) -> Fut,
        Fut: Future,
    {
        let TimeoutOptions {
            timeout,
            token,
            timeout_message,
        } = options;

        let deadline = match &token {
            Some(parent) => self.create_linked_token(parent, timeout)?,
            None => self.create_token(timeout)?,
        };
        let message = timeout_message.unwrap_or_else(|| timeout_message_for(deadline.timeout()));

        let result = self
            .race(operation(deadline.token().clone()), deadline.token(), &message)
            .await;

        if result.is_err() {
            let external = token.as_ref().is_some_and(|t| t.is_cancelled());
            debug!(
                timeout_ms = deadline.timeout().as_millis() as u64,
                external, "Operation cancelled"
            );
        }

        result
    }

    /// Run `operation` under the default deadline for its kind
    pub async fn with_timeout_for<F>(&self, kind: OperationKind, operation: F) -> Result<F::Output>
    where
        F: Future,
    {
        let timeout = self.get_timeout_for_operation(kind);
        self.with_timeout(
            operation,
            TimeoutOptions::new()
                .with_timeout(timeout)
                .with_message(format!(
                    "{} operation timed out after {}",
                    kind,
                    format_duration(timeout.as_millis() as u64)
                )),
        )
        .await
    }

    /// Check a caller-supplied timeout in milliseconds.
    ///
    /// Zero and negative values are rejected; values above the configured
    /// maximum are accepted with a warning.
    pub fn validate_timeout(&self, ms: i64) -> Result<Duration> {
        if ms <= 0 {
            return Err(ResilienceError::config(format!(
                "Timeout must be positive, got {}ms",
                ms
            )));
        }
        self.validate_duration(Duration::from_millis(ms as u64))
    }

    /// [`validate_timeout`](Self::validate_timeout) for a [`Duration`]
    pub fn validate_duration(&self, timeout: Duration) -> Result<Duration> {
        if timeout.is_zero() {
            return Err(ResilienceError::config("Timeout must be positive, got 0ms"));
        }

        let millis = timeout.as_millis();
        if millis > u128::from(self.config.max_ms) {
            warn!(
                timeout_ms = millis as u64,
                max_ms = self.config.max_ms,
                "Timeout exceeds configured maximum"
            );
        }
        Ok(timeout)
    }

    /// Default deadline for an operation class
    pub fn get_timeout_for_operation(&self, kind: OperationKind) -> Duration {
        let ms = match kind {
            OperationKind::Api => self.config.api_ms,
            OperationKind::Database => self.config.database_ms.min(self.config.default_ms),
            OperationKind::File => self.config.file_ms,
            OperationKind::Network => self.config.network_ms,
        };
        Duration::from_millis(ms)
    }
}

fn timeout_message_for(timeout: Duration) -> String {
    format!(
        "Operation timed out after {}",
        format_duration(timeout.as_millis() as u64)
    )
}
