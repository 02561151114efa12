//! Bounded collection utilities for metrics

use std::collections::VecDeque;

/// Helper trait for bounded VecDeque operations
pub(super) trait BoundedPush<T> {
    fn push_bounded(&mut self, value: T, max_size: usize);
}

impl<T> BoundedPush<T> for VecDeque<T> {
    /// Push a value while maintaining a maximum size (O(1) amortized)
    #[inline]
    fn push_bounded(&mut self, value: T, max_size: usize) {
        if max_size == 0 {
            return;
        }
        while self.len() >= max_size {
            self.pop_front();
        }
        self.push_back(value);
    }
}
