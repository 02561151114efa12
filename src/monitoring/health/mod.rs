//! Health classification
//!
//! Turns the collector's signals into healthy / degraded / unhealthy.

mod classifier;


pub use classifier::{HEALTH_RULES, HealthClassifier, HealthRule};
