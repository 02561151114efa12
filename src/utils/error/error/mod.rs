//! Error handling for the resilience layer
//!
//! This module defines all error types used throughout the crate.

mod helpers;
mod types;

pub use types::{ResilienceError, Result};
