//! Type definitions for monitoring metrics, health and alerts

use serde::Serialize;
use std::collections::HashMap;

/// Scalar request counters, kept together so they update as one unit
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct RequestCounters {
    /// Total requests (successes + failures)
    pub total_requests: u64,
    /// Successful requests
    pub successful_requests: u64,
    /// Failed requests
    pub failed_requests: u64,
    /// Requests that needed at least one retry
    pub retried_requests: u64,
    /// Successful requests served from cache
    pub cache_hits: u64,
    /// Successful requests that missed the cache
    pub cache_misses: u64,
    /// Stale cache entries served
    pub stale_hits: u64,
    /// Rate-limit responses observed
    pub rate_limit_hits: u64,
    /// Failures recorded since the last success
    pub consecutive_failures: u64,
    /// Sum of every recorded response time in milliseconds
    pub cumulative_response_time_ms: f64,
    /// Running mean of rate-limit wait times in milliseconds
    pub rate_limit_wait_time_average_ms: f64,
}

/// Point-in-time copy of everything the metrics collector holds
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    /// Timestamp of the snapshot
    pub timestamp: chrono::DateTime<chrono::Utc>,
    /// Request counters
    #[serde(flatten)]
    pub counters: RequestCounters,
    /// Average response time in milliseconds
    pub average_response_time_ms: f64,
    /// Failures by error code
    pub errors_by_type: HashMap<String, u64>,
    /// Retained response-time samples, oldest first
    pub response_time_samples: Vec<f64>,
    /// Seconds since the collector was created
    pub uptime_seconds: u64,
}

/// Derived rates and latency percentiles
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PerformanceMetrics {
    /// Failed / total requests
    pub error_rate: f64,
    /// Cache hits / cache lookups
    pub cache_hit_rate: f64,
    /// Retried / total requests
    pub retry_rate: f64,
    /// Average response time in milliseconds
    pub average_response_time_ms: f64,
    /// Median response time
    pub p50_response_time_ms: f64,
    /// 95th percentile response time
    pub p95_response_time_ms: f64,
    /// 99th percentile response time
    pub p99_response_time_ms: f64,
}

/// The handful of derived values health and alert rules look at
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct HealthSignals {
    pub total_requests: u64,
    pub consecutive_failures: u64,
    pub error_rate: f64,
    pub retry_rate: f64,
    pub rate_limit_ratio: f64,
    pub average_response_time_ms: f64,
}

/// Health classification of a monitored boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthState {
    Healthy,
    Degraded,
    Unhealthy,
}

impl HealthState {
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthState::Healthy => "healthy",
            HealthState::Degraded => "degraded",
            HealthState::Unhealthy => "unhealthy",
        }
    }
}

impl std::fmt::Display for HealthState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Health classification together with the inputs that produced it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthStatus {
    pub status: HealthState,
    pub consecutive_failures: u64,
    pub error_rate: f64,
    /// Average response time in milliseconds
    pub response_time: f64,
    /// Name of the rule that decided the status, `None` when healthy
    pub rule: Option<&'static str>,
}

/// Alert severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AlertSeverity::Low => write!(f, "low"),
            AlertSeverity::Medium => write!(f, "medium"),
            AlertSeverity::High => write!(f, "high"),
        }
    }
}

/// Kinds of alert the rule set can raise; at most one of each is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    HighErrorRate,
    ConsecutiveFailures,
    SlowResponse,
    RetryStorm,
    RateLimitExceeded,
}

impl AlertType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertType::HighErrorRate => "high_error_rate",
            AlertType::ConsecutiveFailures => "consecutive_failures",
            AlertType::SlowResponse => "slow_response",
            AlertType::RetryStorm => "retry_storm",
            AlertType::RateLimitExceeded => "rate_limit_exceeded",
        }
    }
}

impl std::fmt::Display for AlertType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Alert information
#[derive(Debug, Clone, Serialize)]
pub struct Alert {
    /// Alert ID
    pub id: String,
    /// Alert type
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    /// Alert severity
    pub severity: AlertSeverity,
    /// Human-readable description
    pub message: String,
    /// Observed value and threshold at creation time
    pub metadata: serde_json::Value,
    /// Creation timestamp
    pub created_at: chrono::DateTime<chrono::Utc>,
    /// Whether the alert is resolved
    pub resolved: bool,
    /// When the alert was resolved
    pub resolved_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Alert {
    /// Whether the alert is still active
    #[inline]
    pub fn is_active(&self) -> bool {
        !self.resolved
    }
}
