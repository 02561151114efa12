//! Alert management
//!
//! Alerts are raised by a fixed rule set evaluated against [`HealthSignals`]
//! and stay active until resolved explicitly.
//!
//! [`HealthSignals`]: crate::monitoring::types::HealthSignals

mod manager;
mod types;

pub use manager::AlertManager;
pub use types::{ALERT_RULES, AlertRule, AlertStats, MAX_RESOLVED_HISTORY};
