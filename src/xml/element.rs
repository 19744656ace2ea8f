use std::fmt;

use quick_xml::events::Event;

use crate::common::{Error, Result};
use crate::token::{INVALID_TOKEN, Token};

use super::reader::{Attribute, ElementInfo, XmlReader, resolve_reference};

/// Content item surfaced by mixed iteration.
#[derive(Debug)]
pub enum Node<'a> {
    Element(Element<'a>),
    /// Adjacent text, character data and references, merged
    Text(String),
}

/// Cursor positioned on an opened element.
///
/// Lifecycle: opened with its attributes captured, then children and text
/// are consumed in document order until the matching end tag closes it.
pub struct Element<'a> {
    reader: &'a mut XmlReader,
    info: ElementInfo,
    /// Reader depth while this element is open
    depth: usize,
    closed: bool,
}

impl fmt::Debug for Element<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("name", &self.info.qname)
            .field("depth", &self.depth)
            .field("closed", &self.closed)
            .finish()
    }
}

impl fmt::Display for Element<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.info.qname)
    }
}

enum Step {
    Child(ElementInfo, bool),
    Text(String),
    Skip,
    Closed,
}

impl<'a> Element<'a> {
    pub(crate) fn new(reader: &'a mut XmlReader, info: ElementInfo, depth: usize, closed: bool) -> Self {
        Self {
            reader,
            info,
            depth,
            closed,
        }
    }

    /// Name as written, including the prefix.
    pub fn qualified_name(&self) -> &str {
        &self.info.qname
    }

    pub fn local_name(&self) -> &str {
        &self.info.local
    }

    pub fn namespace(&self) -> Option<&str> {
        self.info.namespace.as_deref()
    }

    /// `(namespace, name)` token pair.
    #[inline]
    pub fn token(&self) -> (Token, Token) {
        (self.info.ns_token, self.info.name_token)
    }

    /// Whether both halves of the name are in the vocabulary.
    pub fn is_known(&self) -> bool {
        self.info.ns_token != INVALID_TOKEN && self.info.name_token != INVALID_TOKEN
    }

    /// Attributes of this element only, namespace declarations excluded.
    pub fn attributes(&self) -> std::slice::Iter<'_, Attribute> {
        self.info.attributes.iter()
    }

    /// Value of the attribute with the given token pair.
    pub fn attribute(&self, token: (Token, Token)) -> Option<&str> {
        self.info
            .attributes
            .iter()
            .find(|a| a.token() == token)
            .map(Attribute::value)
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Next direct child element, skipping text, comments and the rest of
    /// any earlier child's subtree. Returns `None` once this element closes.
    pub fn next_child(&mut self) -> Result<Option<Element<'_>>> {
        loop {
            match self.step(false)? {
                Step::Child(info, empty) => return Ok(Some(self.child(info, empty))),
                Step::Closed => return Ok(None),
                Step::Text(_) | Step::Skip => {},
            }
        }
    }

    /// Next direct child element or run of text, in document order.
    pub fn next_node(&mut self) -> Result<Option<Node<'_>>> {
        loop {
            match self.step(true)? {
                Step::Child(info, empty) => return Ok(Some(Node::Element(self.child(info, empty)))),
                Step::Text(text) => return Ok(Some(Node::Text(text))),
                Step::Closed => return Ok(None),
                Step::Skip => {},
            }
        }
    }

    /// Concatenated direct text content; child elements are skipped.
    pub fn read_text(&mut self) -> Result<String> {
        let mut text = String::new();
        while let Some(node) = self.next_node()? {
            if let Node::Text(t) = node {
                text.push_str(&t);
            }
        }
        Ok(text)
    }

    /// Consume the rest of this element.
    pub fn skip(&mut self) -> Result<()> {
        while self.next_child()?.is_some() {}
        Ok(())
    }

    fn child(&mut self, info: ElementInfo, empty: bool) -> Element<'_> {
        let depth = if empty { self.depth + 1 } else { self.reader.depth() };
        Element::new(&mut *self.reader, info, depth, empty)
    }

    fn step(&mut self, with_text: bool) -> Result<Step> {
        if self.closed {
            return Ok(Step::Closed);
        }
        let at_level = self.reader.depth() == self.depth;
        match self.reader.next_event()? {
            Event::Start(start) => {
                let info = self.reader.open(&start, false)?;
                Ok(if at_level { Step::Child(info, false) } else { Step::Skip })
            },
            Event::Empty(start) => {
                let info = self.reader.open(&start, true)?;
                Ok(if at_level { Step::Child(info, true) } else { Step::Skip })
            },
            Event::End(_) => {
                self.reader.close();
                if at_level {
                    self.closed = true;
                    Ok(Step::Closed)
                } else {
                    Ok(Step::Skip)
                }
            },
            Event::Eof => Err(Error::XmlError(format!(
                "unexpected end of document inside <{}>",
                self.info.qname
            ))),
            event if with_text && at_level => match text_of(&event)? {
                Some(mut text) => {
                    self.merge_text(&mut text)?;
                    Ok(Step::Text(text))
                },
                None => Ok(Step::Skip),
            },
            _ => Ok(Step::Skip),
        }
    }

    /// Append following text pieces; the first non-text event is pushed back.
    fn merge_text(&mut self, text: &mut String) -> Result<()> {
        loop {
            let event = self.reader.next_event()?;
            match text_of(&event)? {
                Some(more) => text.push_str(&more),
                None => {
                    if !matches!(event, Event::Comment(_) | Event::PI(_)) {
                        self.reader.push_back(event);
                        return Ok(());
                    }
                },
            }
        }
    }
}

fn text_of(event: &Event<'_>) -> Result<Option<String>> {
    Ok(match event {
        Event::Text(text) => Some(String::from_utf8_lossy(text).into_owned()),
        Event::CData(data) => Some(String::from_utf8_lossy(data).into_owned()),
        Event::GeneralRef(reference) => Some(resolve_reference(reference)?),
        _ => None,
    })
}
