//! Unified error types for apxl.
//!
//! This module provides a single error type that encompasses stream,
//! container, XML and version failures, presenting a consistent API.

// Submodule declarations
pub mod conversions;
pub mod types;

// Re-exports
pub use types::{Error, Result};
