use std::fmt;

use quick_xml::events::{BytesStart, Event};

use crate::common::{Error, Result};
use crate::stream::MemoryStream;
use crate::token::{INVALID_TOKEN, Token, TokenResolver};

use super::element::Element;

const XML_NS: &str = "http://www.w3.org/XML/1998/namespace";

/// An attribute of an opened element.
#[derive(Debug, Clone)]
pub struct Attribute {
    qname: Box<str>,
    local: Box<str>,
    namespace: Option<Box<str>>,
    value: String,
    ns_token: Token,
    name_token: Token,
}

impl Attribute {
    /// Name as written, including the prefix.
    pub fn qualified_name(&self) -> &str {
        &self.qname
    }

    pub fn local_name(&self) -> &str {
        &self.local
    }

    /// Namespace URI; unprefixed attributes have none.
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Value with entity and character references resolved.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// `(namespace, name)` token pair.
    #[inline]
    pub fn token(&self) -> (Token, Token) {
        (self.ns_token, self.name_token)
    }

    /// Whether both halves of the name are in the vocabulary.
    pub fn is_known(&self) -> bool {
        self.ns_token != INVALID_TOKEN && self.name_token != INVALID_TOKEN
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.qname)
    }
}

/// Name and attributes of an element, captured when it opens.
#[derive(Debug, Clone)]
pub(crate) struct ElementInfo {
    pub(crate) qname: Box<str>,
    pub(crate) local: Box<str>,
    pub(crate) namespace: Option<Box<str>>,
    pub(crate) ns_token: Token,
    pub(crate) name_token: Token,
    pub(crate) attributes: Vec<Attribute>,
}

struct Binding {
    prefix: Box<str>,
    uri: Box<str>,
    depth: usize,
}

/// Owner of the pull parser of one document.
pub struct XmlReader {
    reader: quick_xml::Reader<MemoryStream>,
    buf: Vec<u8>,
    resolver: &'static dyn TokenResolver,
    bindings: Vec<Binding>,
    /// Number of currently open elements
    depth: usize,
    /// Event read ahead while merging text
    peeked: Option<Event<'static>>,
}

impl fmt::Debug for XmlReader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("XmlReader")
            .field("depth", &self.depth)
            .field("position", &self.reader.buffer_position())
            .finish()
    }
}

impl XmlReader {
    pub fn new(stream: MemoryStream, resolver: &'static dyn TokenResolver) -> Self {
        Self {
            reader: quick_xml::Reader::from_reader(stream),
            buf: Vec::new(),
            resolver,
            bindings: Vec::new(),
            depth: 0,
            peeked: None,
        }
    }

    pub fn resolver(&self) -> &'static dyn TokenResolver {
        self.resolver
    }

    /// Advance to the document element and open it.
    pub fn root(&mut self) -> Result<Element<'_>> {
        loop {
            match self.next_event()? {
                Event::Start(start) => {
                    let info = self.open(&start, false)?;
                    let depth = self.depth;
                    return Ok(Element::new(self, info, depth, false));
                },
                Event::Empty(start) => {
                    let info = self.open(&start, true)?;
                    let depth = self.depth + 1;
                    return Ok(Element::new(self, info, depth, true));
                },
                Event::Eof => return Err(Error::XmlError("document has no root element".to_string())),
                Event::End(_) => return Err(Error::XmlError("unbalanced end tag".to_string())),
                _ => {},
            }
        }
    }

    pub(crate) fn depth(&self) -> usize {
        self.depth
    }

    pub(crate) fn next_event(&mut self) -> Result<Event<'static>> {
        if let Some(event) = self.peeked.take() {
            return Ok(event);
        }
        self.buf.clear();
        let event = self.reader.read_event_into(&mut self.buf)?.into_owned();
        Ok(event)
    }

    pub(crate) fn push_back(&mut self, event: Event<'static>) {
        debug_assert!(self.peeked.is_none());
        self.peeked = Some(event);
    }

    /// Record an element start. `Start` events raise the depth; namespace
    /// bindings of empty elements only live while their names are resolved.
    pub(crate) fn open(&mut self, start: &BytesStart<'_>, empty: bool) -> Result<ElementInfo> {
        let element_depth = self.depth + 1;
        let mut raw = Vec::new();
        for attr in start.attributes() {
            let attr = attr?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = unescape_value(&attr.value)?;
            if key == "xmlns" {
                self.bindings.push(Binding {
                    prefix: "".into(),
                    uri: value.into(),
                    depth: element_depth,
                });
            } else if let Some(prefix) = key.strip_prefix("xmlns:") {
                self.bindings.push(Binding {
                    prefix: prefix.into(),
                    uri: value.into(),
                    depth: element_depth,
                });
            } else {
                raw.push((key, value));
            }
        }

        let qname = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        let (prefix, local) = split_qname(&qname);
        let namespace = self.lookup(prefix.unwrap_or("")).map(Box::from);
        let ns_token = self.resolver.resolve_namespace(namespace.as_deref());
        let name_token = self.resolver.name(local);
        let local: Box<str> = local.into();

        let attributes = raw
            .into_iter()
            .map(|(key, value)| {
                let (prefix, local) = split_qname(&key);
                // Unprefixed attributes are in no namespace
                let namespace = prefix.and_then(|p| self.lookup(p)).map(Box::from);
                Attribute {
                    ns_token: self.resolver.resolve_namespace(namespace.as_deref()),
                    name_token: self.resolver.name(local),
                    local: local.into(),
                    namespace,
                    value,
                    qname: key.as_str().into(),
                }
            })
            .collect();

        if empty {
            self.unbind(element_depth);
        } else {
            self.depth = element_depth;
        }

        Ok(ElementInfo {
            qname: qname.as_str().into(),
            local,
            namespace,
            ns_token,
            name_token,
            attributes,
        })
    }

    /// Record an element end.
    pub(crate) fn close(&mut self) {
        self.unbind(self.depth);
        self.depth = self.depth.saturating_sub(1);
    }

    fn unbind(&mut self, depth: usize) {
        while self.bindings.last().is_some_and(|b| b.depth >= depth) {
            self.bindings.pop();
        }
    }

    fn lookup(&self, prefix: &str) -> Option<&str> {
        if prefix == "xml" {
            return Some(XML_NS);
        }
        self.bindings
            .iter()
            .rev()
            .find(|b| &*b.prefix == prefix)
            .map(|b| &*b.uri)
            .filter(|uri| !uri.is_empty())
    }
}

fn split_qname(qname: &str) -> (Option<&str>, &str) {
    match qname.split_once(':') {
        Some((prefix, local)) => (Some(prefix), local),
        None => (None, qname),
    }
}

fn unescape_value(raw: &[u8]) -> Result<String> {
    let text = String::from_utf8_lossy(raw);
    Ok(quick_xml::escape::unescape(&text)?.into_owned())
}

/// Resolve the name of a general entity reference (`&name;`).
pub(crate) fn resolve_reference(name: &[u8]) -> Result<String> {
    let name = String::from_utf8_lossy(name);
    let resolved = match &*name {
        "lt" => Some('<'),
        "gt" => Some('>'),
        "amp" => Some('&'),
        "apos" => Some('\''),
        "quot" => Some('"'),
        other => other.strip_prefix('#').and_then(|num| {
            let code = match num.strip_prefix('x').or_else(|| num.strip_prefix('X')) {
                Some(hex) => u32::from_str_radix(hex, 16).ok(),
                None => num.parse::<u32>().ok(),
            };
            code.and_then(char::from_u32)
        }),
    };
    resolved
        .map(String::from)
        .ok_or_else(|| Error::XmlError(format!("unknown entity &{};", name)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_reference() {
        assert_eq!(resolve_reference(b"amp").unwrap(), "&");
        assert_eq!(resolve_reference(b"#65").unwrap(), "A");
        assert_eq!(resolve_reference(b"#x263A").unwrap(), "\u{263A}");
        assert!(resolve_reference(b"nbsp").is_err());
    }

    #[test]
    fn test_split_qname() {
        assert_eq!(split_qname("sf:p"), (Some("sf"), "p"));
        assert_eq!(split_qname("p"), (None, "p"));
    }

    #[test]
    fn test_unescape_value() {
        assert_eq!(unescape_value(b"a &amp; b").unwrap(), "a & b");
        assert_eq!(unescape_value(b"&#x41;").unwrap(), "A");
    }
}
