//! Error Handling utilities
//!
//! This module provides the crate error type and the timeout recovery primitives.

pub mod error;
pub mod recovery;

// Re-export commonly used types and functions
pub use error::*;
pub use recovery::*;
