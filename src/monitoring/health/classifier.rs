//! Ordered health classification rules

use crate::config::HealthConfig;
use crate::monitoring::types::{HealthSignals, HealthState, HealthStatus};

/// One step of the classification chain
#[derive(Debug, Clone, Copy)]
pub struct HealthRule {
    /// Rule name, reported in [`HealthStatus::rule`]
    pub name: &'static str,
    /// Status assigned when the rule matches
    pub status: HealthState,
    predicate: fn(&HealthSignals, &HealthConfig) -> bool,
}

impl HealthRule {
    /// Whether this rule matches the given signals
    #[inline]
    pub fn matches(&self, signals: &HealthSignals, config: &HealthConfig) -> bool {
        (self.predicate)(signals, config)
    }
}

/// Evaluated top to bottom; the first match wins and later rules are skipped.
///
/// The failure-streak rules come before the error-rate rules so that a short
/// streak over a tiny sample reads as degraded even at a 100% error rate.
pub const HEALTH_RULES: [HealthRule; 6] = [
    HealthRule {
        name: "consecutive_failures_unhealthy",
        status: HealthState::Unhealthy,
        predicate: streak_unhealthy,
    },
    HealthRule {
        name: "consecutive_failures_degraded",
        status: HealthState::Degraded,
        predicate: streak_degraded,
    },
    HealthRule {
        name: "response_time_unhealthy",
        status: HealthState::Unhealthy,
        predicate: latency_unhealthy,
    },
    HealthRule {
        name: "response_time_degraded",
        status: HealthState::Degraded,
        predicate: latency_degraded,
    },
    HealthRule {
        name: "error_rate_unhealthy",
        status: HealthState::Unhealthy,
        predicate: error_rate_unhealthy,
    },
    HealthRule {
        name: "error_rate_degraded",
        status: HealthState::Degraded,
        predicate: error_rate_degraded,
    },
];

fn streak_unhealthy(signals: &HealthSignals, config: &HealthConfig) -> bool {
    signals.consecutive_failures >= config.unhealthy_consecutive_failures
}

fn streak_degraded(signals: &HealthSignals, config: &HealthConfig) -> bool {
    signals.consecutive_failures >= config.degraded_consecutive_failures
}

fn latency_unhealthy(signals: &HealthSignals, config: &HealthConfig) -> bool {
    signals.average_response_time_ms > config.unhealthy_response_time_ms
}

fn latency_degraded(signals: &HealthSignals, config: &HealthConfig) -> bool {
    signals.average_response_time_ms > config.degraded_response_time_ms
}

fn error_rate_unhealthy(signals: &HealthSignals, config: &HealthConfig) -> bool {
    signals.error_rate > config.unhealthy_error_rate
}

fn error_rate_degraded(signals: &HealthSignals, config: &HealthConfig) -> bool {
    signals.error_rate > config.degraded_error_rate
}

/// Maps health signals to a [`HealthStatus`]
#[derive(Debug, Clone, Default)]
pub struct HealthClassifier {
    config: HealthConfig,
}

impl HealthClassifier {
    /// Create a classifier with the given thresholds
    pub fn new(config: &HealthConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Thresholds in use
    pub fn config(&self) -> &HealthConfig {
        &self.config
    }

    /// The ordered rule chain
    pub fn rules(&self) -> &'static [HealthRule] {
        &HEALTH_RULES
    }

    /// First rule that matches, if any
    pub fn matching_rule(&self, signals: &HealthSignals) -> Option<&'static HealthRule> {
        HEALTH_RULES
            .iter()
            .find(|rule| rule.matches(signals, &self.config))
    }

    /// Classify the signals, carrying the raw inputs alongside the result
    pub fn classify(&self, signals: &HealthSignals) -> HealthStatus {
        let rule = self.matching_rule(signals);

        HealthStatus {
            status: rule.map_or(HealthState::Healthy, |rule| rule.status),
            consecutive_failures: signals.consecutive_failures,
            error_rate: signals.error_rate,
            response_time: signals.average_response_time_ms,
            rule: rule.map(|rule| rule.name),
        }
    }
}
