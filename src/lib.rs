//! apxl - A Rust library for decoding Apple Keynote XML presentations
//!
//! This library reads the XML presentation format of Keynote, in every
//! version from the original APXL dialect to the unified `keynote2` format,
//! and replays each slide as a sequence of drawing calls on a [`Painter`].
//!
//! # Features
//!
//! - **Container detection**: bare XML, gzip/zlib compressed XML, zip
//!   packages and OLE compound documents
//! - **Version detection**: the format version is read from the root element
//! - **Two-pass decoding**: master layers and theme styles are gathered first,
//!   then every slide is drawn on top of its master
//! - **Diagnostics**: unknown and unhandled constructs are counted per kind
//!   and logged through `tracing`
//! - **SVG output**: [`SvgPainter`] turns every slide into a standalone SVG
//!   document
//!
//! # Example - Converting to SVG
//!
//! ```no_run
//! use apxl::{MemoryStream, generate_svg};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let bytes = std::fs::read("presentation.key")?;
//! let pages = generate_svg(&mut MemoryStream::new(bytes)).ok_or("not a presentation")?;
//! for (number, page) in pages.iter().enumerate() {
//!     std::fs::write(format!("slide-{}.svg", number + 1), page)?;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Detection and diagnostics
//!
//! ```no_run
//! use std::time::Duration;
//! use apxl::{MemoryStream, ParseOptions, SvgPainter, is_supported, parse_with};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut stream = MemoryStream::new(std::fs::read("presentation.key")?);
//! let (supported, detection) = is_supported(&mut stream);
//! println!("supported: {} ({:?})", supported, detection);
//!
//! let options = ParseOptions::new().with_deadline(Duration::from_secs(5));
//! let mut painter = SvgPainter::new();
//! let report = parse_with(&mut stream, &mut painter, &options);
//! println!(
//!     "{} pages, {} unknown and {} unhandled constructs",
//!     report.pages,
//!     report.diagnostics.unknown(),
//!     report.diagnostics.unhandled()
//! );
//! # Ok(())
//! # }
//! ```

/// Errors, configuration, diagnostics and small shared value types
pub mod common;

/// Byte sources: memory buffers, inflated streams and package containers
pub mod stream;

/// Compile-time token vocabularies of both dialects
pub mod token;

/// Pull-style XML cursor over tokenized names
pub mod xml;

/// Container and version detection
pub mod detection;

/// Grammar walkers turning XML into collector calls
pub mod parser;

/// The two collector passes
pub mod collector;

/// Document model: styles, geometry, paths, text, objects and layers
pub mod model;

/// Drawing protocol and the SVG backend
pub mod output;

/// Entry points
pub mod document;

// Re-export commonly used types for convenience
pub use common::{DiagnosticKind, DiagnosticSummary, Error, ParseOptions, Result};
pub use detection::{ContainerKind, Detection, Version};
pub use document::{ParseReport, generate_svg, generate_svg_with, is_supported, parse, parse_file, parse_with};
pub use output::{Painter, PropertyList, PropertyValue, SvgPainter};
pub use stream::{InputStream, MemoryStream};
