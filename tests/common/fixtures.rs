//! Test fixtures and data factories
//!
//! All factories create real objects, not mocks.

use resilience_monitor::MonitoringSystem;
use resilience_monitor::config::{AlertingConfig, MetricsConfig, MonitoringConfig, TimeoutConfig};
use std::time::Duration;

/// Factory for configurations used across the suites
pub struct ConfigFactory;

impl ConfigFactory {
    /// Monitoring with a small sample window
    pub fn small_window(max_response_samples: usize) -> MonitoringConfig {
        MonitoringConfig {
            metrics: MetricsConfig {
                max_response_samples,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Monitoring with custom alert thresholds
    pub fn alerting(alerting: AlertingConfig) -> MonitoringConfig {
        MonitoringConfig {
            alerting,
            ..Default::default()
        }
    }

    /// Timeouts all set to `ms`
    pub fn uniform_timeouts(ms: u64) -> TimeoutConfig {
        TimeoutConfig {
            default_ms: ms,
            api_ms: ms,
            database_ms: ms,
            file_ms: ms,
            network_ms: ms,
            ..Default::default()
        }
    }
}

/// One reported call outcome
#[derive(Debug, Clone)]
pub enum CallOutcome {
    Success { millis: u64, cache_hit: bool },
    Failure { code: &'static str, millis: u64 },
    Retry(u32),
    RateLimit { wait_millis: u64 },
    StaleHit,
}

impl CallOutcome {
    pub fn ok(millis: u64) -> Self {
        CallOutcome::Success {
            millis,
            cache_hit: false,
        }
    }

    pub fn cached(millis: u64) -> Self {
        CallOutcome::Success {
            millis,
            cache_hit: true,
        }
    }

    pub fn fail(code: &'static str, millis: u64) -> Self {
        CallOutcome::Failure { code, millis }
    }
}

/// Report every outcome to the system, in order
pub fn replay(system: &MonitoringSystem, outcomes: &[CallOutcome]) {
    for outcome in outcomes {
        match outcome {
            CallOutcome::Success { millis, cache_hit } => {
                system.record_success(Duration::from_millis(*millis), *cache_hit)
            }
            CallOutcome::Failure { code, millis } => {
                system.record_failure(code, Duration::from_millis(*millis))
            }
            CallOutcome::Retry(attempts) => system.record_retry(*attempts),
            CallOutcome::RateLimit { wait_millis } => {
                system.record_rate_limit(Duration::from_millis(*wait_millis))
            }
            CallOutcome::StaleHit => system.record_stale_hit(),
        }
    }
}
