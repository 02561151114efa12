//! Metrics collection and aggregation
//!
//! Counters, the bounded response-time window and the pure calculations
//! derived from them.

mod bounded;
pub mod calculator;
mod collector;
mod getters;
mod types;


// Re-export the main MetricsCollector struct
pub use collector::MetricsCollector;
