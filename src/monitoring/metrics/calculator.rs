//! Pure derivations over collected metrics
//!
//! Everything here is a function of its inputs; nothing touches the
//! collector's lock.

use crate::monitoring::types::{HealthSignals, MetricsSnapshot, PerformanceMetrics, RequestCounters};

/// `numerator / denominator`, or 0 when the denominator is 0
#[inline]
pub fn ratio(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Nearest-rank percentile over ascending-sorted values.
///
/// `percentile` is in `(0, 1]`; the rank is `ceil(p * n) - 1` clamped to the
/// slice. Small windows resolve high percentiles to the maximum sample.
pub fn calculate_percentile(sorted_values: &[f64], percentile: f64) -> f64 {
    if sorted_values.is_empty() {
        return 0.0;
    }

    let n = sorted_values.len();
    // Absorb float noise such as 0.7 * 10 = 7.000000000000001
    let rank = (percentile * n as f64 - 1e-9).ceil();
    let index = if rank.is_nan() || rank < 1.0 {
        0
    } else {
        (rank as usize - 1).min(n - 1)
    };

    sorted_values[index]
}

/// Copy finite samples and sort them ascending
pub fn sorted_samples<'a, I>(samples: I) -> Vec<f64>
where
    I: IntoIterator<Item = &'a f64>,
{
    let mut sorted: Vec<f64> = samples.into_iter().filter(|t| t.is_finite()).copied().collect();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// Average response time from the cumulative sum
#[inline]
pub fn average_response_time(counters: &RequestCounters) -> f64 {
    if counters.total_requests == 0 {
        0.0
    } else {
        counters.cumulative_response_time_ms / counters.total_requests as f64
    }
}

/// Signals consumed by the health classifier and the alert rules
pub fn calculate_signals(counters: &RequestCounters) -> HealthSignals {
    HealthSignals {
        total_requests: counters.total_requests,
        consecutive_failures: counters.consecutive_failures,
        error_rate: ratio(counters.failed_requests, counters.total_requests),
        retry_rate: ratio(counters.retried_requests, counters.total_requests),
        rate_limit_ratio: ratio(counters.rate_limit_hits, counters.total_requests),
        average_response_time_ms: average_response_time(counters),
    }
}

/// Rates and percentiles from counters and an already-sorted sample window
pub fn calculate_performance(counters: &RequestCounters, sorted_times: &[f64]) -> PerformanceMetrics {
    PerformanceMetrics {
        error_rate: ratio(counters.failed_requests, counters.total_requests),
        cache_hit_rate: ratio(counters.cache_hits, counters.cache_hits + counters.cache_misses),
        retry_rate: ratio(counters.retried_requests, counters.total_requests),
        average_response_time_ms: average_response_time(counters),
        p50_response_time_ms: calculate_percentile(sorted_times, 0.50),
        p95_response_time_ms: calculate_percentile(sorted_times, 0.95),
        p99_response_time_ms: calculate_percentile(sorted_times, 0.99),
    }
}

impl MetricsSnapshot {
    /// Performance view of this snapshot
    pub fn performance(&self) -> PerformanceMetrics {
        calculate_performance(&self.counters, &sorted_samples(&self.response_time_samples))
    }

    /// Health/alert signals of this snapshot
    pub fn signals(&self) -> HealthSignals {
        calculate_signals(&self.counters)
    }
}
