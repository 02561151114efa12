//! Monitoring configuration

use serde::{Deserialize, Serialize};

/// Monitoring configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct MonitoringConfig {
    /// Metrics configuration
    #[serde(default)]
    pub metrics: MetricsConfig,
    /// Health classification thresholds
    #[serde(default)]
    pub health: HealthConfig,
    /// Alert rule thresholds
    #[serde(default)]
    pub alerting: AlertingConfig,
}

impl MonitoringConfig {
    /// Merge monitoring configurations
    pub fn merge(mut self, other: Self) -> Self {
        self.metrics = self.metrics.merge(other.metrics);
        if other.health != HealthConfig::default() {
            self.health = other.health;
        }
        if other.alerting != AlertingConfig::default() {
            self.alerting = other.alerting;
        }
        self
    }
}

/// Metrics configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetricsConfig {
    /// Capacity of the response-time sample window used for percentiles
    #[serde(default = "default_max_response_samples")]
    pub max_response_samples: usize,
    /// Interval of the background cleanup task in seconds
    #[serde(default = "default_cleanup_interval_secs")]
    pub cleanup_interval_secs: u64,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            max_response_samples: default_max_response_samples(),
            cleanup_interval_secs: default_cleanup_interval_secs(),
        }
    }
}

impl MetricsConfig {
    /// Merge metrics configurations
    pub fn merge(mut self, other: Self) -> Self {
        if other.max_response_samples != default_max_response_samples() {
            self.max_response_samples = other.max_response_samples;
        }
        if other.cleanup_interval_secs != default_cleanup_interval_secs() {
            self.cleanup_interval_secs = other.cleanup_interval_secs;
        }
        self
    }
}

/// Thresholds for the health classifier.
///
/// Consecutive-failure limits are inclusive (`>=`), latency and error-rate
/// limits are exclusive (`>`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthConfig {
    #[serde(default = "default_unhealthy_consecutive_failures")]
    pub unhealthy_consecutive_failures: u64,
    #[serde(default = "default_degraded_consecutive_failures")]
    pub degraded_consecutive_failures: u64,
    #[serde(default = "default_unhealthy_response_time_ms")]
    pub unhealthy_response_time_ms: f64,
    #[serde(default = "default_degraded_response_time_ms")]
    pub degraded_response_time_ms: f64,
    #[serde(default = "default_unhealthy_error_rate")]
    pub unhealthy_error_rate: f64,
    #[serde(default = "default_degraded_error_rate")]
    pub degraded_error_rate: f64,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            unhealthy_consecutive_failures: default_unhealthy_consecutive_failures(),
            degraded_consecutive_failures: default_degraded_consecutive_failures(),
            unhealthy_response_time_ms: default_unhealthy_response_time_ms(),
            degraded_response_time_ms: default_degraded_response_time_ms(),
            unhealthy_error_rate: default_unhealthy_error_rate(),
            degraded_error_rate: default_degraded_error_rate(),
        }
    }
}

/// Thresholds for the alert rules, plus retention of resolved alerts
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AlertingConfig {
    /// Raise `high_error_rate` when the error rate exceeds this
    #[serde(default = "default_alert_error_rate")]
    pub error_rate: f64,
    /// Raise `consecutive_failures` at or above this streak length
    #[serde(default = "default_alert_consecutive_failures")]
    pub consecutive_failures: u64,
    /// Raise `slow_response` when the average response time exceeds this
    #[serde(default = "default_alert_response_time_ms")]
    pub response_time_ms: f64,
    /// Raise `retry_storm` when the retry rate exceeds this
    #[serde(default = "default_alert_retry_rate")]
    pub retry_rate: f64,
    /// Raise `rate_limit_exceeded` when rate-limit hits per request exceed this
    #[serde(default = "default_alert_rate_limit_ratio")]
    pub rate_limit_ratio: f64,
    /// How long resolved alerts stay in history before cleanup drops them
    #[serde(default = "default_resolved_retention_secs")]
    pub resolved_retention_secs: u64,
}

impl Default for AlertingConfig {
    fn default() -> Self {
        Self {
            error_rate: default_alert_error_rate(),
            consecutive_failures: default_alert_consecutive_failures(),
            response_time_ms: default_alert_response_time_ms(),
            retry_rate: default_alert_retry_rate(),
            rate_limit_ratio: default_alert_rate_limit_ratio(),
            resolved_retention_secs: default_resolved_retention_secs(),
        }
    }
}

fn default_max_response_samples() -> usize {
    1000
}

fn default_cleanup_interval_secs() -> u64 {
    60
}

fn default_unhealthy_consecutive_failures() -> u64 {
    10
}

fn default_degraded_consecutive_failures() -> u64 {
    5
}

fn default_unhealthy_response_time_ms() -> f64 {
    10_000.0
}

fn default_degraded_response_time_ms() -> f64 {
    5_000.0
}

fn default_unhealthy_error_rate() -> f64 {
    0.9
}

fn default_degraded_error_rate() -> f64 {
    0.1
}

fn default_alert_error_rate() -> f64 {
    0.1
}

fn default_alert_consecutive_failures() -> u64 {
    5
}

fn default_alert_response_time_ms() -> f64 {
    5_000.0
}

fn default_alert_retry_rate() -> f64 {
    0.5
}

fn default_alert_rate_limit_ratio() -> f64 {
    0.05
}

fn default_resolved_retention_secs() -> u64 {
    3600 // 1 hour
}
