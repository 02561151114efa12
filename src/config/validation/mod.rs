//! Configuration validation
//!
//! This module provides validation logic for all configuration structures.
//!
//! The validation is organized into several submodules:
//! - `trait_def`: Core Validate trait definition
//! - `config_validators`: Top-level Config and logging validators
//! - `monitoring_validators`: Metrics, health and alerting validators
//! - `timeout_validators`: Timeout controller validators
//! - `tests`: Test suite for all validators

mod config_validators;
mod monitoring_validators;
mod timeout_validators;
mod trait_def;

// Re-export the Validate trait for backward compatibility
pub use trait_def::Validate;
