//! Getter methods for retrieving aggregated metrics

use super::calculator::{average_response_time, calculate_performance, calculate_signals, sorted_samples};
use super::collector::MetricsCollector;
use crate::monitoring::types::{HealthSignals, MetricsSnapshot, PerformanceMetrics};

impl MetricsCollector {
    /// Full point-in-time copy of the collected metrics
    pub fn get_metrics(&self) -> MetricsSnapshot {
        let storage = self.storage.read();

        MetricsSnapshot {
            timestamp: chrono::Utc::now(),
            counters: storage.counters,
            average_response_time_ms: average_response_time(&storage.counters),
            errors_by_type: storage.errors_by_type.clone(),
            response_time_samples: storage.response_times.iter().copied().collect(),
            uptime_seconds: self.uptime().as_secs(),
        }
    }

    /// Rates and latency percentiles
    pub fn get_performance_metrics(&self) -> PerformanceMetrics {
        // Copy under the lock, sort outside it
        let (counters, samples): (_, Vec<f64>) = {
            let storage = self.storage.read();
            (storage.counters, storage.response_times.iter().copied().collect())
        };

        calculate_performance(&counters, &sorted_samples(&samples))
    }

    /// Current health/alert signals
    pub fn signals(&self) -> HealthSignals {
        calculate_signals(&self.storage.read().counters)
    }

    /// Number of samples currently retained
    pub fn sample_count(&self) -> usize {
        self.storage.read().response_times.len()
    }
}
