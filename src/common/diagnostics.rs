//! Parse-session diagnostics.
//!
//! The grammars are reverse-engineered and incomplete by nature, so most
//! document surprises are logged and skipped rather than failing the parse.
//! [`Diagnostics`] is the collaborator both the grammar walker and the
//! collectors of one session report to. It forwards every report to
//! `tracing` under a per-kind target and keeps a counter per kind, so
//! genuine format surprises (`apxl::unknown`) stay distinguishable from
//! constructs we know about but do not handle yet (`apxl::unhandled`).

use std::cell::Cell;
use std::fmt;

/// Category of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// Element the grammar does not know at all
    UnknownElement,
    /// Attribute the grammar does not know at all
    UnknownAttribute,
    /// Element the grammar recognizes but does not handle yet
    UnhandledElement,
    /// Attribute the grammar recognizes but does not handle yet
    UnhandledAttribute,
    /// Dangling reference to a style, layer, geometry or object
    MissingReference,
    /// Non-fatal collector misuse by the grammar
    ProtocolMisuse,
    /// Bad value or other recovered document-data problem
    Recovered,
}

impl DiagnosticKind {
    /// All kinds, in counter order.
    pub const ALL: [DiagnosticKind; 7] = [
        DiagnosticKind::UnknownElement,
        DiagnosticKind::UnknownAttribute,
        DiagnosticKind::UnhandledElement,
        DiagnosticKind::UnhandledAttribute,
        DiagnosticKind::MissingReference,
        DiagnosticKind::ProtocolMisuse,
        DiagnosticKind::Recovered,
    ];

    #[inline]
    fn index(self) -> usize {
        self as usize
    }

    /// Short name, as used in log output.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::UnknownElement => "unknown-element",
            Self::UnknownAttribute => "unknown-attribute",
            Self::UnhandledElement => "unhandled-element",
            Self::UnhandledAttribute => "unhandled-attribute",
            Self::MissingReference => "missing-reference",
            Self::ProtocolMisuse => "protocol-misuse",
            Self::Recovered => "recovered",
        }
    }

    /// Whether this kind marks a genuine format surprise rather than a known gap.
    pub fn is_unknown(self) -> bool {
        matches!(self, Self::UnknownElement | Self::UnknownAttribute)
    }

    /// Whether this kind marks an acknowledged, not yet implemented construct.
    pub fn is_unhandled(self) -> bool {
        matches!(self, Self::UnhandledElement | Self::UnhandledAttribute)
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Counters and log forwarding for one parse session.
///
/// Single-threaded by construction: one session owns one instance and
/// lends it to the parser and the collector.
#[derive(Debug, Default)]
pub struct Diagnostics {
    counts: [Cell<usize>; 7],
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic and forward it to `tracing`.
    pub fn report(&self, kind: DiagnosticKind, detail: impl fmt::Display) {
        let counter = &self.counts[kind.index()];
        counter.set(counter.get() + 1);

        match kind {
            DiagnosticKind::UnknownElement | DiagnosticKind::UnknownAttribute => {
                tracing::warn!(target: "apxl::unknown", kind = kind.as_str(), "{}", detail);
            },
            DiagnosticKind::UnhandledElement | DiagnosticKind::UnhandledAttribute => {
                tracing::debug!(target: "apxl::unhandled", kind = kind.as_str(), "{}", detail);
            },
            DiagnosticKind::MissingReference => {
                tracing::warn!(target: "apxl::reference", "{}", detail);
            },
            DiagnosticKind::ProtocolMisuse => {
                tracing::error!(target: "apxl::collector", "{}", detail);
            },
            DiagnosticKind::Recovered => {
                tracing::debug!(target: "apxl::recovered", "{}", detail);
            },
        }
    }

    #[inline]
    pub fn unknown_element(&self, name: impl fmt::Display) {
        self.report(DiagnosticKind::UnknownElement, format_args!("unknown element {}", name));
    }

    #[inline]
    pub fn unknown_attribute(&self, name: impl fmt::Display) {
        self.report(DiagnosticKind::UnknownAttribute, format_args!("unknown attribute {}", name));
    }

    #[inline]
    pub fn unhandled_element(&self, name: impl fmt::Display) {
        self.report(DiagnosticKind::UnhandledElement, format_args!("element {} not handled", name));
    }

    #[inline]
    pub fn unhandled_attribute(&self, name: impl fmt::Display) {
        self.report(
            DiagnosticKind::UnhandledAttribute,
            format_args!("attribute {} not handled", name),
        );
    }

    #[inline]
    pub fn missing_reference(&self, what: &str, id: impl fmt::Display) {
        self.report(
            DiagnosticKind::MissingReference,
            format_args!("{} '{}' not found", what, id),
        );
    }

    /// Number of diagnostics of `kind` reported so far.
    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.counts[kind.index()].get()
    }

    /// Snapshot of all counters.
    pub fn summary(&self) -> DiagnosticSummary {
        let mut counts = [0; 7];
        for kind in DiagnosticKind::ALL {
            counts[kind.index()] = self.count(kind);
        }
        DiagnosticSummary { counts }
    }
}

/// Immutable copy of the counters of a finished session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiagnosticSummary {
    counts: [usize; 7],
}

impl DiagnosticSummary {
    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.counts[kind.index()]
    }

    /// Total of `UnknownElement` and `UnknownAttribute`.
    pub fn unknown(&self) -> usize {
        DiagnosticKind::ALL
            .iter()
            .filter(|k| k.is_unknown())
            .map(|k| self.count(*k))
            .sum()
    }

    /// Total of `UnhandledElement` and `UnhandledAttribute`.
    pub fn unhandled(&self) -> usize {
        DiagnosticKind::ALL
            .iter()
            .filter(|k| k.is_unhandled())
            .map(|k| self.count(*k))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_are_kept_per_kind() {
        let diag = Diagnostics::new();
        diag.unknown_element("sf:frobnicator");
        diag.unknown_attribute("sf:wobble");
        diag.unhandled_element("key:notes");
        diag.missing_reference("layer", "SFDLayerInfo-3");

        assert_eq!(diag.count(DiagnosticKind::UnknownElement), 1);
        assert_eq!(diag.count(DiagnosticKind::UnhandledElement), 1);
        assert_eq!(diag.count(DiagnosticKind::MissingReference), 1);
        assert_eq!(diag.count(DiagnosticKind::ProtocolMisuse), 0);

        let summary = diag.summary();
        assert_eq!(summary.unknown(), 2);
        assert_eq!(summary.unhandled(), 1);
    }

    #[test]
    fn test_unknown_and_unhandled_are_disjoint() {
        for kind in DiagnosticKind::ALL {
            assert!(!(kind.is_unknown() && kind.is_unhandled()), "{}", kind);
        }
    }
}
