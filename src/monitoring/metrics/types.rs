//! Types for metrics storage

use crate::monitoring::types::RequestCounters;
use std::collections::HashMap;
use std::collections::VecDeque;

/// Consolidated metrics storage - single lock for all metrics
#[derive(Debug, Default)]
pub(super) struct MetricsStorage {
    pub(super) counters: RequestCounters,
    pub(super) errors_by_type: HashMap<String, u64>,
    pub(super) response_times: VecDeque<f64>,
}

/// Upper bound on the up-front allocation; larger windows grow on demand
const MAX_PREALLOCATED_SAMPLES: usize = 4096;

impl MetricsStorage {
    pub(super) fn with_capacity(max_samples: usize) -> Self {
        Self {
            response_times: VecDeque::with_capacity(max_samples.min(MAX_PREALLOCATED_SAMPLES)),
            ..Default::default()
        }
    }
}
