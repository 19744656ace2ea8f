//! Version-specific grammar walkers.
//!
//! A walker reads one XML document through the cursor protocol and turns
//! the constructs it recognizes into [`Collector`] calls, in protocol
//! order. It never decides what is kept: the same walk feeds both passes
//! and the collector's phase gates the captures.
//!
//! Constructs outside the vocabulary are reported as unknown; constructs the
//! vocabulary names but the walker does not interpret are reported as
//! unhandled. Both have their subtree skipped.

pub mod key1;
pub mod key2;

#[cfg(test)]
pub(crate) mod fixtures;
#[cfg(test)]
mod tests;

use std::collections::HashMap;
use std::rc::Rc;

use crate::collector::Collector;
use crate::common::{Deadline, DiagnosticKind, Diagnostics, Result};
use crate::detection::Version;
use crate::model::{Position, Size};
use crate::stream::{InflateStream, InputStream, MemoryStream};
use crate::token::Token;
use crate::xml::{Element, XmlReader};

/// State shared by the walks of one parse session.
pub struct ParseContext<'a> {
    diagnostics: &'a Diagnostics,
    /// Sink used while quiet
    muted: Diagnostics,
    quiet: bool,
    deadline: Deadline,
    container: Option<&'a mut dyn InputStream>,
    max_stream_size: usize,
    /// Members read so far; `None` marks a member the container lacks
    members: HashMap<String, Option<Rc<[u8]>>>,
}

impl std::fmt::Debug for ParseContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParseContext")
            .field("quiet", &self.quiet)
            .field("deadline", &self.deadline)
            .field("container", &self.container.is_some())
            .field("members", &self.members.len())
            .finish_non_exhaustive()
    }
}

impl<'a> ParseContext<'a> {
    pub fn new(diagnostics: &'a Diagnostics, deadline: Deadline, max_stream_size: usize) -> Self {
        Self {
            diagnostics,
            muted: Diagnostics::new(),
            quiet: false,
            deadline,
            container: None,
            max_stream_size,
            members: HashMap::new(),
        }
    }

    /// Resolve embedded data through `container`.
    pub fn with_container(mut self, container: Option<&'a mut dyn InputStream>) -> Self {
        self.container = container;
        self
    }

    /// While quiet, walker reports are dropped. The theme pass walks the
    /// whole document as well, so only the content pass reports.
    pub fn set_quiet(&mut self, quiet: bool) {
        self.quiet = quiet;
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        if self.quiet { &self.muted } else { self.diagnostics }
    }

    /// Checked on entry to every theme, master slide and slide.
    #[inline]
    pub fn check_deadline(&self) -> Result<()> {
        self.deadline.check()
    }

    /// Bytes of the container member `name`, read at most once per session.
    /// A member that cannot be read leaves the data as a reference only.
    pub fn load_member(&mut self, name: &str) -> Option<Rc<[u8]>> {
        let bytes = match self.members.get(name) {
            Some(cached) => cached.clone(),
            None => {
                let container = self.container.as_deref_mut()?;
                let bytes = match container.open_member(name) {
                    Ok(Some(member)) => decode_member(name, member, self.max_stream_size),
                    Ok(None) => None,
                    Err(e) => {
                        tracing::debug!(member = name, error = %e, "member unreadable");
                        None
                    },
                };
                self.members.insert(name.to_string(), bytes.clone());
                bytes
            },
        };
        if bytes.is_none() {
            self.diagnostics()
                .report(DiagnosticKind::Recovered, format_args!("data '{}' not in the package", name));
        }
        bytes
    }

    /// Report `element` as unknown or unhandled and skip it.
    pub fn skip_element(&self, element: &mut Element<'_>) -> Result<()> {
        if element.is_known() {
            self.diagnostics().unhandled_element(&*element);
        } else {
            self.diagnostics().unknown_element(&*element);
        }
        element.skip()
    }

    /// Report `element` as an acknowledged gap and skip it.
    pub fn skip_unhandled(&self, element: &mut Element<'_>) -> Result<()> {
        self.diagnostics().unhandled_element(&*element);
        element.skip()
    }

    /// Report the attributes of `element` that are not in `handled`.
    pub fn check_attributes(&self, element: &Element<'_>, handled: &[(Token, Token)]) {
        for attribute in element.attributes() {
            if !attribute.is_known() {
                self.diagnostics().unknown_attribute(attribute);
            } else if !handled.contains(&attribute.token()) {
                self.diagnostics().unhandled_attribute(attribute);
            }
        }
    }
}

fn decode_member(name: &str, member: MemoryStream, limit: usize) -> Option<Rc<[u8]>> {
    if !name.ends_with(".gz") {
        return Some(member.shared());
    }
    match InflateStream::new(member.bytes(), limit) {
        Ok(inflated) => Some(inflated.into_inner().shared()),
        Err(e) => {
            tracing::debug!(member = name, error = %e, "member does not inflate");
            None
        },
    }
}

/// Walk the document in `xml` with the grammar of `version`.
pub fn walk(
    version: Version,
    xml: MemoryStream,
    collector: &mut dyn Collector,
    context: &mut ParseContext<'_>,
) -> Result<()> {
    let mut reader = XmlReader::new(xml, version.tokens());
    let root = reader.root()?;
    if version.is_legacy() {
        key1::walk(root, collector, context)
    } else {
        key2::walk(root, version, collector, context)
    }
}

/// Parse a number attribute, reporting values that do not parse.
pub(crate) fn number(context: &ParseContext<'_>, element: &Element<'_>, token: (Token, Token)) -> Option<f64> {
    let raw = element.attribute(token)?;
    let value = crate::common::number::parse_double(raw);
    if value.is_none() {
        context
            .diagnostics()
            .report(DiagnosticKind::Recovered, format_args!("bad number '{}' on {}", raw, element));
    }
    value
}

pub(crate) fn boolean(element: &Element<'_>, token: (Token, Token)) -> Option<bool> {
    element.attribute(token).and_then(crate::common::number::parse_bool)
}

pub(crate) fn owned(element: &Element<'_>, token: (Token, Token)) -> Option<String> {
    element.attribute(token).map(str::to_string)
}

/// A size or point read from a pair of number attributes.
pub(crate) fn pair(
    context: &ParseContext<'_>,
    element: &Element<'_>,
    first: (Token, Token),
    second: (Token, Token),
) -> Option<(f64, f64)> {
    Some((number(context, element, first)?, number(context, element, second)?))
}

pub(crate) fn size_of(pair: Option<(f64, f64)>) -> Option<Size> {
    pair.map(|(w, h)| Size::new(w, h))
}

pub(crate) fn position_of(pair: Option<(f64, f64)>) -> Option<Position> {
    pair.map(|(x, y)| Position::new(x, y))
}
