//! Alert types and data structures

use crate::config::AlertingConfig;
use crate::monitoring::types::{Alert, AlertSeverity, AlertType, HealthSignals};
use std::collections::HashMap;

/// Resolved alerts kept in history regardless of retention; older ones are
/// dropped as new ones resolve
pub const MAX_RESOLVED_HISTORY: usize = 1000;

/// Consolidated alert storage - single lock for related data
#[derive(Debug, Default)]
pub(super) struct AlertStorage {
    /// Every retained alert, in creation order
    pub alerts: Vec<Alert>,
    /// Alert statistics
    pub stats: AlertStats,
}

impl AlertStorage {
    pub(super) fn active_of_type(&self, alert_type: AlertType) -> Option<&Alert> {
        self.alerts
            .iter()
            .find(|alert| alert.alert_type == alert_type && alert.is_active())
    }

    /// Drop the oldest resolved alerts beyond `cap`, returning how many went
    pub(super) fn trim_resolved(&mut self, cap: usize) -> usize {
        let resolved = self.alerts.iter().filter(|alert| !alert.is_active()).count();
        let mut excess = resolved.saturating_sub(cap);
        if excess == 0 {
            return 0;
        }

        let removed = excess;
        self.alerts.retain(|alert| {
            if excess > 0 && !alert.is_active() {
                excess -= 1;
                false
            } else {
                true
            }
        });
        removed
    }
}

/// Alert statistics
#[derive(Debug, Default, Clone, serde::Serialize)]
pub struct AlertStats {
    /// Total alerts created
    pub total_alerts: u64,
    /// Alerts resolved
    pub resolved_alerts: u64,
    /// Alerts by type
    pub alerts_by_type: HashMap<String, u64>,
    /// Alerts by severity
    pub alerts_by_severity: HashMap<String, u64>,
    /// Last alert timestamp
    pub last_alert: Option<chrono::DateTime<chrono::Utc>>,
}

/// One entry of the alert rule set
#[derive(Debug, Clone, Copy)]
pub struct AlertRule {
    /// Alert raised when the rule fires
    pub alert_type: AlertType,
    /// Severity of the raised alert
    pub severity: AlertSeverity,
    /// Name of the observed signal, used in messages and metadata
    pub metric: &'static str,
    observed: fn(&HealthSignals) -> f64,
    threshold: fn(&AlertingConfig) -> f64,
    inclusive: bool,
}

impl AlertRule {
    /// Observed value of the rule's signal
    #[inline]
    pub fn observed(&self, signals: &HealthSignals) -> f64 {
        (self.observed)(signals)
    }

    /// Configured threshold of the rule
    #[inline]
    pub fn threshold(&self, config: &AlertingConfig) -> f64 {
        (self.threshold)(config)
    }

    /// Whether the rule fires for these signals
    pub fn is_triggered(&self, signals: &HealthSignals, config: &AlertingConfig) -> bool {
        let observed = self.observed(signals);
        let threshold = self.threshold(config);
        if self.inclusive {
            observed >= threshold
        } else {
            observed > threshold
        }
    }

    /// Human-readable description of a firing
    pub fn describe(&self, signals: &HealthSignals, config: &AlertingConfig) -> String {
        format!(
            "{} is {} (threshold {} {})",
            self.metric,
            format_value(self.observed(signals)),
            if self.inclusive { ">=" } else { ">" },
            format_value(self.threshold(config))
        )
    }
}

fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{:.3}", value)
    }
}

/// The alert rule set. Every rule is checked on every evaluation.
pub const ALERT_RULES: [AlertRule; 5] = [
    AlertRule {
        alert_type: AlertType::HighErrorRate,
        severity: AlertSeverity::High,
        metric: "error_rate",
        observed: |s| s.error_rate,
        threshold: |c| c.error_rate,
        inclusive: false,
    },
    AlertRule {
        alert_type: AlertType::ConsecutiveFailures,
        severity: AlertSeverity::High,
        metric: "consecutive_failures",
        observed: |s| s.consecutive_failures as f64,
        threshold: |c| c.consecutive_failures as f64,
        inclusive: true,
    },
    AlertRule {
        alert_type: AlertType::SlowResponse,
        severity: AlertSeverity::Medium,
        metric: "average_response_time_ms",
        observed: |s| s.average_response_time_ms,
        threshold: |c| c.response_time_ms,
        inclusive: false,
    },
    AlertRule {
        alert_type: AlertType::RetryStorm,
        severity: AlertSeverity::Medium,
        metric: "retry_rate",
        observed: |s| s.retry_rate,
        threshold: |c| c.retry_rate,
        inclusive: false,
    },
    AlertRule {
        alert_type: AlertType::RateLimitExceeded,
        severity: AlertSeverity::Low,
        metric: "rate_limit_ratio",
        observed: |s| s.rate_limit_ratio,
        threshold: |c| c.rate_limit_ratio,
        inclusive: false,
    },
];
