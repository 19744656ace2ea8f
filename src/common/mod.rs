//! Common types, traits, and utilities shared across the decoder.
//!
//! This module provides the error type, session configuration, the
//! diagnostics collaborator and small value types used by every stage of
//! the pipeline.

// Submodule declarations
pub mod color;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod id;
pub mod number;

// Re-exports for convenience
pub use color::Color;
pub use config::{Deadline, ParseOptions};
pub use diagnostics::{DiagnosticKind, DiagnosticSummary, Diagnostics};
pub use error::{Error, Result};
pub use id::Id;
