//! Core MonitoringSystem implementation

use crate::config::{MonitoringConfig, Validate};
use crate::utils::error::{ResilienceError, Result};
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::{CancellationToken, DropGuard};
use tracing::{debug, info, warn};

use super::alerts::{AlertManager, AlertStats};
use super::background::CleanupTask;
use super::health::HealthClassifier;
use super::metrics::MetricsCollector;
use super::types::*;

/// Monitoring for one outbound-call boundary.
///
/// Cloning is cheap and every clone observes the same state. Dropping the
/// last clone stops the background cleanup task.
#[derive(Debug, Clone)]
pub struct MonitoringSystem {
    /// Monitoring configuration
    pub(super) config: Arc<MonitoringConfig>,
    /// Metrics collector
    pub(super) metrics: Arc<MetricsCollector>,
    /// Health classifier
    pub(super) health: Arc<HealthClassifier>,
    /// Alert manager
    pub(super) alerts: Arc<AlertManager>,
    /// Held shared by record+evaluate sequences, exclusively by reset
    gate: Arc<RwLock<()>>,
    /// Cancelled by `destroy` or when the last handle is dropped
    shutdown: CancellationToken,
    _shutdown_guard: Arc<DropGuard>,
    cleanup: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl MonitoringSystem {
    /// Create a new monitoring system
    pub fn new(config: &MonitoringConfig) -> Result<Self> {
        config.validate().map_err(ResilienceError::config)?;

        let config = Arc::new(config.clone());
        let shutdown = CancellationToken::new();

        info!(
            max_response_samples = config.metrics.max_response_samples,
            "Initializing monitoring system"
        );

        Ok(Self {
            metrics: Arc::new(MetricsCollector::new(&config.metrics)),
            health: Arc::new(HealthClassifier::new(&config.health)),
            alerts: Arc::new(AlertManager::new(&config.alerting)),
            gate: Arc::new(RwLock::new(())),
            _shutdown_guard: Arc::new(shutdown.clone().drop_guard()),
            shutdown,
            cleanup: Arc::new(Mutex::new(None)),
            config,
        })
    }

    /// Configuration in use
    pub fn config(&self) -> &MonitoringConfig {
        &self.config
    }

    /// Start the background cleanup task on the current tokio runtime.
    ///
    /// Calling `start` again while the task runs is a no-op.
    pub fn start(&self) -> Result<()> {
        if self.is_destroyed() {
            return Err(ResilienceError::monitoring(
                "Cannot start a destroyed monitoring system",
            ));
        }

        let mut cleanup = self.cleanup.lock();
        if cleanup.is_some() {
            debug!("Monitoring system already started");
            return Ok(());
        }

        let runtime = tokio::runtime::Handle::try_current().map_err(|e| {
            ResilienceError::monitoring(format!("No tokio runtime to start on: {}", e))
        })?;

        *cleanup = Some(self.cleanup_task().spawn(&runtime));

        info!("Monitoring system started");
        Ok(())
    }

    /// Whether the background cleanup task has been started
    pub fn is_started(&self) -> bool {
        self.cleanup.lock().is_some()
    }

    /// Record a successful call
    pub fn record_success(&self, duration: Duration, cache_hit: bool) {
        self.record(|metrics| metrics.record_success(duration, cache_hit));
    }

    /// Record a failed call
    pub fn record_failure(&self, error_code: &str, duration: Duration) {
        self.record(|metrics| metrics.record_failure(error_code, duration));
    }

    /// Record a failed call whose duration is unknown
    pub fn record_error(&self, error_code: &str) {
        self.record_failure(error_code, Duration::ZERO);
    }

    /// Record that a call needed retries
    pub fn record_retry(&self, attempts: u32) {
        self.record(|metrics| metrics.record_retry(attempts));
    }

    /// Record a rate-limit response and how long the caller waited
    pub fn record_rate_limit(&self, wait: Duration) {
        self.record(|metrics| metrics.record_rate_limit(wait));
    }

    /// Record that a stale cache entry was served
    pub fn record_stale_hit(&self) {
        self.record(|metrics| metrics.record_stale_hit());
    }

    fn record(&self, event: impl FnOnce(&MetricsCollector) -> HealthSignals) {
        if self.is_destroyed() {
            warn!("Ignoring metric recorded after destroy");
            return;
        }

        let _gate = self.gate.read();
        let signals = event(&self.metrics);
        self.alerts.evaluate(&signals);
    }

    /// Point-in-time copy of all counters and samples
    pub fn get_metrics(&self) -> MetricsSnapshot {
        self.metrics.get_metrics()
    }

    /// Derived rates and latency percentiles
    pub fn get_performance_metrics(&self) -> PerformanceMetrics {
        self.metrics.get_performance_metrics()
    }

    /// Current health classification
    pub fn get_health_status(&self) -> HealthStatus {
        self.health.classify(&self.metrics.signals())
    }

    /// Evaluate alert rules now, returning the alerts this call raised
    pub fn check_alerts(&self) -> Vec<Alert> {
        let _gate = self.gate.read();
        self.alerts.evaluate(&self.metrics.signals())
    }

    /// Unresolved alerts in creation order
    pub fn get_active_alerts(&self) -> Vec<Alert> {
        self.alerts.get_active_alerts()
    }

    /// Resolve an alert; `false` when the id is unknown or already resolved
    pub fn resolve_alert(&self, id: &str) -> bool {
        self.alerts.resolve_alert(id)
    }

    /// Alert history, newest first
    pub fn get_alert_history(&self, limit: Option<usize>) -> Vec<Alert> {
        self.alerts.get_history(limit)
    }

    /// Alert statistics
    pub fn get_alert_stats(&self) -> AlertStats {
        self.alerts.get_stats()
    }

    /// Clear every counter, sample and alert
    pub fn reset_metrics(&self) {
        let _gate = self.gate.write();
        self.metrics.reset();
        self.alerts.reset();
        info!("Monitoring metrics reset");
    }

    /// Stop background work; the system ignores recordings from now on
    pub fn destroy(&self) {
        if self.shutdown.is_cancelled() {
            return;
        }
        self.shutdown.cancel();
        info!("Monitoring system destroyed");
    }

    /// Destroy and wait for the background task to finish
    pub async fn shutdown(&self) {
        self.destroy();

        let handle = self.cleanup.lock().take();
        if let Some(handle) = handle {
            if let Err(e) = handle.await {
                warn!("Cleanup task ended abnormally: {}", e);
            }
        }
    }

    /// Whether `destroy` has been called
    pub fn is_destroyed(&self) -> bool {
        self.shutdown.is_cancelled()
    }

    pub(super) fn cleanup_task(&self) -> CleanupTask {
        CleanupTask {
            metrics: Arc::clone(&self.metrics),
            alerts: Arc::clone(&self.alerts),
            gate: Arc::clone(&self.gate),
            period: Duration::from_secs(self.config.metrics.cleanup_interval_secs),
            retention: retention(self.config.alerting.resolved_retention_secs),
            shutdown: self.shutdown.child_token(),
        }
    }
}

fn retention(secs: u64) -> chrono::Duration {
    chrono::Duration::from_std(Duration::from_secs(secs)).unwrap_or(chrono::Duration::MAX)
}
