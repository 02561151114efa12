//! Call-outcome monitoring
//!
//! Records per-call telemetry, derives health from it and raises
//! deduplicated alerts. [`MonitoringSystem`] ties the pieces together for one
//! monitored boundary.

pub mod alerts;
pub mod health;
pub mod metrics;

mod background;
mod system;
mod types;

pub use system::MonitoringSystem;
pub use types::{
    Alert, AlertSeverity, AlertType, HealthSignals, HealthState, HealthStatus, MetricsSnapshot,
    PerformanceMetrics, RequestCounters,
};
