//! Monitoring configuration validators
//!
//! This module provides validation implementations for monitoring-related
//! configuration structures including MonitoringConfig, MetricsConfig,
//! HealthConfig, and AlertingConfig.

use super::trait_def::Validate;
use crate::config::models::*;
use tracing::{debug, warn};

impl Validate for MonitoringConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating monitoring configuration");

        self.metrics.validate()?;
        self.health.validate()?;
        self.alerting.validate()?;

        // Alerts are early warnings; they should fire no later than the
        // matching degraded classification.
        if self.alerting.error_rate > self.health.degraded_error_rate {
            warn!(
                "Alert error rate threshold {} is less sensitive than degraded health threshold {}",
                self.alerting.error_rate, self.health.degraded_error_rate
            );
        }
        if self.alerting.consecutive_failures > self.health.degraded_consecutive_failures {
            warn!(
                "Alert consecutive failure threshold {} is less sensitive than degraded health threshold {}",
                self.alerting.consecutive_failures, self.health.degraded_consecutive_failures
            );
        }
        if self.alerting.response_time_ms > self.health.degraded_response_time_ms {
            warn!(
                "Alert response time threshold {}ms is less sensitive than degraded health threshold {}ms",
                self.alerting.response_time_ms, self.health.degraded_response_time_ms
            );
        }

        Ok(())
    }
}

impl Validate for MetricsConfig {
    fn validate(&self) -> Result<(), String> {
        if self.max_response_samples == 0 {
            return Err("Response sample window must hold at least one sample".to_string());
        }

        if self.cleanup_interval_secs == 0 {
            return Err("Cleanup interval must be greater than 0".to_string());
        }

        Ok(())
    }
}

impl Validate for HealthConfig {
    fn validate(&self) -> Result<(), String> {
        if self.degraded_consecutive_failures == 0 {
            return Err("Degraded consecutive failure threshold must be greater than 0".to_string());
        }

        if self.unhealthy_consecutive_failures < self.degraded_consecutive_failures {
            return Err(
                "Unhealthy consecutive failure threshold must not be below the degraded threshold"
                    .to_string(),
            );
        }

        if !self.degraded_response_time_ms.is_finite() || self.degraded_response_time_ms < 0.0 {
            return Err("Degraded response time threshold must be a non-negative number".to_string());
        }

        if !self.unhealthy_response_time_ms.is_finite()
            || self.unhealthy_response_time_ms < self.degraded_response_time_ms
        {
            return Err(
                "Unhealthy response time threshold must not be below the degraded threshold"
                    .to_string(),
            );
        }

        validate_rate("Degraded error rate", self.degraded_error_rate)?;
        validate_rate("Unhealthy error rate", self.unhealthy_error_rate)?;

        if self.unhealthy_error_rate < self.degraded_error_rate {
            return Err(
                "Unhealthy error rate threshold must not be below the degraded threshold"
                    .to_string(),
            );
        }

        Ok(())
    }
}

impl Validate for AlertingConfig {
    fn validate(&self) -> Result<(), String> {
        validate_rate("Alert error rate", self.error_rate)?;
        validate_rate("Alert retry rate", self.retry_rate)?;
        validate_rate("Alert rate limit ratio", self.rate_limit_ratio)?;

        if self.consecutive_failures == 0 {
            return Err("Alert consecutive failure threshold must be greater than 0".to_string());
        }

        if !self.response_time_ms.is_finite() || self.response_time_ms < 0.0 {
            return Err("Alert response time threshold must be a non-negative number".to_string());
        }

        Ok(())
    }
}

fn validate_rate(name: &str, value: f64) -> Result<(), String> {
    if !(0.0..=1.0).contains(&value) {
        return Err(format!("{} must be between 0.0 and 1.0, got {}", name, value));
    }
    Ok(())
}
