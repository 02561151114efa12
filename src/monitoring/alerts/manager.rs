//! Alert manager implementation

use super::types::{ALERT_RULES, AlertRule, AlertStats, AlertStorage, MAX_RESOLVED_HISTORY};
use crate::config::AlertingConfig;
use crate::monitoring::types::{Alert, AlertSeverity, AlertType, HealthSignals};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Alert manager: evaluates the alert rules and owns the alert lifecycle.
///
/// At most one unresolved alert per [`AlertType`] exists at any time; the
/// check and the insert happen under the same write lock.
#[derive(Debug, Clone)]
pub struct AlertManager {
    /// Configuration
    config: Arc<AlertingConfig>,
    /// Consolidated storage for all alert-related data
    pub(super) storage: Arc<RwLock<AlertStorage>>,
}

impl AlertManager {
    /// Create a new alert manager
    pub fn new(config: &AlertingConfig) -> Self {
        Self {
            config: Arc::new(config.clone()),
            storage: Arc::new(RwLock::new(AlertStorage::default())),
        }
    }

    /// Thresholds in use
    pub fn config(&self) -> &AlertingConfig {
        &self.config
    }

    /// The rule set evaluated by [`AlertManager::evaluate`]
    pub fn rules(&self) -> &'static [AlertRule] {
        &ALERT_RULES
    }

    /// Evaluate every rule against the signals, returning the alerts this call created
    pub fn evaluate(&self, signals: &HealthSignals) -> Vec<Alert> {
        ALERT_RULES
            .iter()
            .filter(|rule| rule.is_triggered(signals, &self.config))
            .filter_map(|rule| {
                let observed = rule.observed(signals);
                let threshold = rule.threshold(&self.config);
                self.ensure_alert(
                    rule.alert_type,
                    rule.severity,
                    rule.describe(signals, &self.config),
                    serde_json::json!({
                        "metric": rule.metric,
                        "current_value": observed,
                        "threshold": threshold,
                        "total_requests": signals.total_requests,
                    }),
                )
            })
            .collect()
    }

    /// Create an alert of `alert_type` unless one is already active.
    ///
    /// Returns the new alert, or `None` when an active one already exists.
    pub fn ensure_alert(
        &self,
        alert_type: AlertType,
        severity: AlertSeverity,
        message: String,
        metadata: serde_json::Value,
    ) -> Option<Alert> {
        let mut storage = self.storage.write();

        if storage.active_of_type(alert_type).is_some() {
            return None;
        }

        let alert = Alert {
            id: uuid::Uuid::new_v4().to_string(),
            alert_type,
            severity,
            message,
            metadata,
            created_at: chrono::Utc::now(),
            resolved: false,
            resolved_at: None,
        };

        storage.stats.total_alerts += 1;
        *storage
            .stats
            .alerts_by_type
            .entry(alert_type.to_string())
            .or_insert(0) += 1;
        *storage
            .stats
            .alerts_by_severity
            .entry(severity.to_string())
            .or_insert(0) += 1;
        storage.stats.last_alert = Some(alert.created_at);
        storage.alerts.push(alert.clone());

        warn!(
            alert_id = %alert.id,
            alert_type = %alert_type,
            severity = %severity,
            "Alert raised: {}",
            alert.message
        );

        Some(alert)
    }

    /// Unresolved alerts in creation order
    pub fn get_active_alerts(&self) -> Vec<Alert> {
        self.storage
            .read()
            .alerts
            .iter()
            .filter(|alert| alert.is_active())
            .cloned()
            .collect()
    }

    /// Whether an unresolved alert of this type exists
    pub fn has_active(&self, alert_type: AlertType) -> bool {
        self.storage.read().active_of_type(alert_type).is_some()
    }

    /// Resolve an alert by id.
    ///
    /// Returns `true` only for the call that actually resolved it; unknown or
    /// already-resolved ids return `false`.
    pub fn resolve_alert(&self, id: &str) -> bool {
        let mut storage = self.storage.write();

        let Some(alert) = storage
            .alerts
            .iter_mut()
            .find(|alert| alert.id == id && alert.is_active())
        else {
            debug!(alert_id = id, "No active alert to resolve");
            return false;
        };

        alert.resolved = true;
        alert.resolved_at = Some(chrono::Utc::now());
        let alert_type = alert.alert_type;
        storage.stats.resolved_alerts += 1;

        let trimmed = storage.trim_resolved(MAX_RESOLVED_HISTORY);
        if trimmed > 0 {
            debug!(trimmed, "Dropped oldest resolved alerts from history");
        }

        info!(alert_id = id, alert_type = %alert_type, "Alert resolved");
        true
    }

    /// Alert history, newest first, resolved alerts included
    pub fn get_history(&self, limit: Option<usize>) -> Vec<Alert> {
        let storage = self.storage.read();
        let limit = limit.unwrap_or(100);

        storage.alerts.iter().rev().take(limit).cloned().collect()
    }

    /// Get alert statistics
    pub fn get_stats(&self) -> AlertStats {
        self.storage.read().stats.clone()
    }

    /// Drop resolved alerts that were resolved more than `retention` ago.
    ///
    /// Returns how many alerts were removed.
    pub fn prune_resolved(&self, retention: chrono::Duration) -> usize {
        let Some(cutoff) = chrono::Utc::now().checked_sub_signed(retention) else {
            return 0;
        };
        let mut storage = self.storage.write();

        let before = storage.alerts.len();
        storage.alerts.retain(|alert| match alert.resolved_at {
            Some(resolved_at) => resolved_at > cutoff,
            None => true,
        });
        let removed = before - storage.alerts.len();

        if removed > 0 {
            debug!(removed, "Pruned resolved alerts");
        }
        removed
    }

    /// Forget every alert and reset statistics
    pub fn reset(&self) {
        debug!("Resetting alerts");
        *self.storage.write() = AlertStorage::default();
    }
}
