//! Metrics collector implementation for recording call outcomes

use super::bounded::BoundedPush;
use super::calculator::calculate_signals;
use super::types::MetricsStorage;
use crate::config::MetricsConfig;
use crate::monitoring::types::HealthSignals;
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// Metrics collector for outbound call outcomes.
///
/// Every `record_*` method applies its whole update under one write lock and
/// returns the signals observed right after it, so callers can evaluate alert
/// rules against exactly the state their event produced. Recording never fails.
#[derive(Debug)]
pub struct MetricsCollector {
    /// Configuration
    pub(super) config: Arc<MetricsConfig>,
    /// All metrics storage consolidated into a single lock
    pub(super) storage: Arc<RwLock<MetricsStorage>>,
    /// Collection start time
    pub(super) start_time: Instant,
}

impl MetricsCollector {
    /// Create a new metrics collector
    pub fn new(config: &MetricsConfig) -> Self {
        Self {
            config: Arc::new(config.clone()),
            storage: Arc::new(RwLock::new(MetricsStorage::with_capacity(
                config.max_response_samples,
            ))),
            start_time: Instant::now(),
        }
    }

    /// Capacity of the response-time sample window
    #[inline]
    pub fn max_response_samples(&self) -> usize {
        self.config.max_response_samples
    }

    /// Time since the collector was created
    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Record a successful call
    pub fn record_success(&self, duration: Duration, cache_hit: bool) -> HealthSignals {
        let millis = duration_millis(duration);
        let mut storage = self.storage.write();

        let counters = &mut storage.counters;
        counters.total_requests += 1;
        counters.successful_requests += 1;
        counters.cumulative_response_time_ms += millis;
        counters.consecutive_failures = 0;
        if cache_hit {
            counters.cache_hits += 1;
        } else {
            counters.cache_misses += 1;
        }

        storage
            .response_times
            .push_bounded(millis, self.config.max_response_samples);

        calculate_signals(&storage.counters)
    }

    /// Record a failed call.
    ///
    /// Failures feed the latency average and the sample window exactly like
    /// successes do.
    pub fn record_failure(&self, error_code: &str, duration: Duration) -> HealthSignals {
        let millis = duration_millis(duration);
        let mut storage = self.storage.write();

        let counters = &mut storage.counters;
        counters.total_requests += 1;
        counters.failed_requests += 1;
        counters.cumulative_response_time_ms += millis;
        counters.consecutive_failures += 1;
        let streak = counters.consecutive_failures;

        *storage
            .errors_by_type
            .entry(error_code.to_string())
            .or_insert(0) += 1;

        storage
            .response_times
            .push_bounded(millis, self.config.max_response_samples);

        debug!(error_code, streak, "Recorded call failure");

        calculate_signals(&storage.counters)
    }

    /// Record that a call needed retries; `attempts` is informational only
    pub fn record_retry(&self, attempts: u32) -> HealthSignals {
        let mut storage = self.storage.write();
        storage.counters.retried_requests += 1;

        debug!(attempts, "Recorded retried call");

        calculate_signals(&storage.counters)
    }

    /// Record a rate-limit response and fold its wait into the running mean
    pub fn record_rate_limit(&self, wait: Duration) -> HealthSignals {
        let millis = duration_millis(wait);
        let mut storage = self.storage.write();

        let counters = &mut storage.counters;
        counters.rate_limit_hits += 1;
        let hits = counters.rate_limit_hits as f64;
        counters.rate_limit_wait_time_average_ms +=
            (millis - counters.rate_limit_wait_time_average_ms) / hits;

        debug!(wait_ms = millis, "Recorded rate limit");

        calculate_signals(&storage.counters)
    }

    /// Record that a stale cache entry was served
    pub fn record_stale_hit(&self) -> HealthSignals {
        let mut storage = self.storage.write();
        storage.counters.stale_hits += 1;
        calculate_signals(&storage.counters)
    }

    /// Replace every counter and the sample window with empty values
    pub fn reset(&self) {
        debug!("Resetting metrics");
        *self.storage.write() = MetricsStorage::with_capacity(self.config.max_response_samples);
    }
}

#[inline]
fn duration_millis(duration: Duration) -> f64 {
    duration.as_nanos() as f64 / 1_000_000.0
}
