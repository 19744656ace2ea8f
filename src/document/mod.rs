//! Document entry points.
//!
//! A parse session detects the container and version, then walks the XML
//! document twice with the grammar of that version:
//!
//! 1. the theme pass, where a [`ThemeCollector`] records master layers and
//!    theme styles into a fresh dictionary;
//! 2. the content pass, where a [`ContentCollector`] takes over that
//!    dictionary and draws every slide on the painter, master layers first.
//!
//! None of the entry points return errors: failures are logged and turned
//! into `false` or `None`.
//!
//! # Example
//!
//! ```rust,no_run
//! use apxl::{MemoryStream, SvgPainter, parse};
//!
//! let bytes = std::fs::read("talk.key")?;
//! let mut stream = MemoryStream::new(bytes);
//! let mut painter = SvgPainter::new();
//! if parse(&mut stream, &mut painter) {
//!     for page in painter.pages() {
//!         println!("{}", page);
//!     }
//! }
//! # Ok::<(), std::io::Error>(())
//! ```


use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::rc::Rc;

use crate::collector::{ContentCollector, ThemeCollector};
use crate::common::{DiagnosticSummary, Diagnostics, ParseOptions, Result};
use crate::detection::{self, Detection};
use crate::model::{Dictionary, defaults};
use crate::output::{Painter, PropertyList, SvgPainter};
use crate::parser::{self, ParseContext};
use crate::stream::{InputStream, MemoryStream};

/// Outcome of [`parse_with`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseReport {
    /// Whether both passes ran to the end
    pub success: bool,
    /// What the input was detected as; `None` when detection failed
    pub detection: Option<Detection>,
    pub diagnostics: DiagnosticSummary,
    /// Pages drawn on the painter
    pub pages: usize,
}

/// Whether `stream` holds a presentation this crate can read, and what it
/// was detected as. The stream is left at its start.
pub fn is_supported(stream: &mut dyn InputStream) -> (bool, Option<Detection>) {
    match detection::detect(stream, &ParseOptions::default()) {
        Ok(detection) => (true, Some(detection)),
        Err(e) => {
            tracing::debug!(error = %e, "unsupported input");
            (false, None)
        },
    }
}

/// Parse the presentation in `stream` and draw it on `painter`.
///
/// A fatal error in the middle of the document returns `false`, but the
/// calls made so far are not taken back: the painter may have seen part of
/// the document. A panic raised while decoding, including one from the
/// painter, is caught and also reported as `false`.
pub fn parse(stream: &mut dyn InputStream, painter: &mut dyn Painter) -> bool {
    parse_with(stream, painter, &ParseOptions::default()).success
}

/// [`parse`] with explicit options, reporting what was found.
pub fn parse_with(stream: &mut dyn InputStream, painter: &mut dyn Painter, options: &ParseOptions) -> ParseReport {
    let diagnostics = Rc::new(Diagnostics::new());
    let mut report = ParseReport::default();

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        run(stream, painter, options, &diagnostics, &mut report)
    }));
    match outcome {
        Ok(Ok(())) => report.success = true,
        Ok(Err(e)) => tracing::warn!(error = %e, pages = report.pages, "parse failed"),
        Err(_) => tracing::error!(pages = report.pages, "parse aborted by an internal error"),
    }
    report.diagnostics = diagnostics.summary();
    tracing::debug!(
        success = report.success,
        pages = report.pages,
        unknown = report.diagnostics.unknown(),
        unhandled = report.diagnostics.unhandled(),
        "parse finished"
    );
    report
}

fn run(
    stream: &mut dyn InputStream,
    painter: &mut dyn Painter,
    options: &ParseOptions,
    diagnostics: &Rc<Diagnostics>,
    report: &mut ParseReport,
) -> Result<()> {
    let deadline = options.start_clock();
    let mut opened = detection::open(stream, options)?;
    let version = opened.detection.version;
    report.detection = Some(opened.detection.clone());
    let defaults = defaults::for_version(version);

    let container = opened
        .container
        .as_deref_mut()
        .map(|c| c as &mut dyn InputStream);
    let mut context = ParseContext::new(diagnostics, deadline, options.max_stream_size).with_container(container);

    // The content pass reports what both passes see
    context.set_quiet(true);
    let mut themes = ThemeCollector::new(Dictionary::new(), defaults, Rc::clone(diagnostics));
    parser::walk(version, opened.xml.rewound(), &mut themes, &mut context)?;
    let dictionary = themes.into_dictionary();
    tracing::debug!(master_layers = dictionary.master_layer_count(), "theme pass finished");

    context.set_quiet(false);
    painter.start_document(&PropertyList::new());
    let mut content = ContentCollector::new(dictionary, defaults, Rc::clone(diagnostics), &mut *painter);
    let walked = parser::walk(version, opened.xml.rewound(), &mut content, &mut context);
    report.pages = content.pages();
    drop(content);
    walked?;
    painter.end_document();
    Ok(())
}

/// Render every slide of `stream` as a standalone SVG document.
pub fn generate_svg(stream: &mut dyn InputStream) -> Option<Vec<String>> {
    generate_svg_with(stream, &ParseOptions::default())
}

/// [`generate_svg`] with explicit options. With
/// [`ParseOptions::emit_partial_output`], a failed parse of a supported
/// document returns the pages finished before the error instead of `None`.
pub fn generate_svg_with(stream: &mut dyn InputStream, options: &ParseOptions) -> Option<Vec<String>> {
    let mut painter = SvgPainter::new();
    let report = parse_with(stream, &mut painter, options);
    if report.success || (options.emit_partial_output && report.detection.is_some()) {
        Some(painter.into_pages())
    } else {
        None
    }
}

/// [`parse`] the file at `path`.
pub fn parse_file(path: impl AsRef<Path>, painter: &mut dyn Painter) -> bool {
    let path = path.as_ref();
    match std::fs::read(path) {
        Ok(bytes) => parse(&mut MemoryStream::new(bytes), painter),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "cannot read file");
            false
        },
    }
}
