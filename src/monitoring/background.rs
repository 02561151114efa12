//! Background cleanup task for MonitoringSystem

use super::alerts::AlertManager;
use super::metrics::MetricsCollector;
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Periodic housekeeping: re-evaluates alert rules and prunes old resolved alerts.
///
/// Holds the components rather than the [`MonitoringSystem`] handle so that
/// dropping the last handle still cancels the task.
///
/// [`MonitoringSystem`]: super::MonitoringSystem
pub(super) struct CleanupTask {
    pub metrics: Arc<MetricsCollector>,
    pub alerts: Arc<AlertManager>,
    pub gate: Arc<RwLock<()>>,
    pub period: Duration,
    pub retention: chrono::Duration,
    pub shutdown: CancellationToken,
}

impl CleanupTask {
    pub(super) fn spawn(self, runtime: &tokio::runtime::Handle) -> JoinHandle<()> {
        runtime.spawn(self.run())
    }

    async fn run(self) {
        let mut interval =
            tokio::time::interval_at(tokio::time::Instant::now() + self.period, self.period);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        debug!(period_secs = self.period.as_secs(), "Cleanup task started");

        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => break,
                _ = interval.tick() => {
                    self.run_once();
                }
            }
        }

        debug!("Cleanup task stopped");
    }

    /// One housekeeping pass; returns (alerts raised, alerts pruned)
    pub(super) fn run_once(&self) -> (usize, usize) {
        let raised = {
            let _gate = self.gate.read();
            self.alerts.evaluate(&self.metrics.signals()).len()
        };
        let pruned = self.alerts.prune_resolved(self.retention);

        if raised > 0 || pruned > 0 {
            debug!(raised, pruned, "Cleanup pass finished");
        }
        (raised, pruned)
    }
}
