//! Configuration types for a parse session.
//!
//! This module defines the options that bound the resources a single
//! document may consume.

use std::time::{Duration, Instant};

use crate::common::{Error, Result};

/// Default upper bound on any decoded stream (256 MiB).
pub const DEFAULT_MAX_STREAM_SIZE: usize = 256 << 20;

/// Configuration options for a parse session.
///
/// This struct bounds the resources a single document may consume and
/// controls what the SVG generator does with the output of a failed parse.
///
/// # Examples
///
/// ```rust
/// use apxl::ParseOptions;
/// use std::time::Duration;
///
/// // Create with defaults
/// let options = ParseOptions::default();
///
/// // Or customize
/// let options = ParseOptions::new()
///     .with_deadline(Duration::from_secs(5))
///     .with_max_stream_size(64 << 20);
/// ```
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Wall-clock budget for the whole parse, checked at each theme,
    /// master slide and slide entry
    pub deadline: Option<Duration>,
    /// Upper bound on the size of an inflated or extracted stream
    pub max_stream_size: usize,
    /// Keep the pages produced before a fatal error in vector output
    pub emit_partial_output: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            deadline: None,
            max_stream_size: DEFAULT_MAX_STREAM_SIZE,
            emit_partial_output: false,
        }
    }
}

impl ParseOptions {
    /// Create a new `ParseOptions` with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the wall-clock budget of a parse.
    ///
    /// The budget covers detection and both collector passes. It is checked
    /// between top-level document entries only, so a single huge slide can
    /// overrun it.
    #[inline]
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Set the upper bound on decoded stream size, in bytes.
    #[inline]
    pub fn with_max_stream_size(mut self, size: usize) -> Self {
        self.max_stream_size = size;
        self
    }

    /// Keep pages emitted before a fatal error in SVG output.
    #[inline]
    pub fn with_partial_output(mut self, emit: bool) -> Self {
        self.emit_partial_output = emit;
        self
    }

    /// Start the clock for one parse session.
    pub(crate) fn start_clock(&self) -> Deadline {
        Deadline {
            at: self.deadline.map(|d| Instant::now() + d),
        }
    }
}

/// A started deadline.
#[derive(Debug, Clone, Copy, Default)]
pub struct Deadline {
    at: Option<Instant>,
}

impl Deadline {
    /// A deadline that never expires.
    pub const fn none() -> Self {
        Self { at: None }
    }

    /// Fail with [`Error::DeadlineExceeded`] once the budget is spent.
    #[inline]
    pub fn check(&self) -> Result<()> {
        match self.at {
            Some(at) if Instant::now() >= at => Err(Error::DeadlineExceeded),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_options_default() {
        let options = ParseOptions::default();
        assert!(options.deadline.is_none());
        assert_eq!(options.max_stream_size, DEFAULT_MAX_STREAM_SIZE);
        assert!(!options.emit_partial_output);
    }

    #[test]
    fn test_parse_options_builder() {
        let options = ParseOptions::new()
            .with_deadline(Duration::from_millis(10))
            .with_max_stream_size(1024)
            .with_partial_output(true);
        assert_eq!(options.deadline, Some(Duration::from_millis(10)));
        assert_eq!(options.max_stream_size, 1024);
        assert!(options.emit_partial_output);
    }

    #[test]
    fn test_deadline_expires() {
        let expired = ParseOptions::new().with_deadline(Duration::ZERO).start_clock();
        assert!(matches!(expired.check(), Err(Error::DeadlineExceeded)));
        assert!(Deadline::none().check().is_ok());
    }
}
