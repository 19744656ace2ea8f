//! Styles, their properties and parent resolution.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::common::{Color, Id};

use super::stylesheet::Stylesheet;

/// Names of the properties the grammars fill in.
pub mod names {
    pub const FILL: &str = "fill";
    pub const STROKE: &str = "stroke";
    pub const OPACITY: &str = "opacity";
    pub const FONT_SIZE: &str = "fontSize";
    pub const FONT_NAME: &str = "fontName";
    pub const FONT_COLOR: &str = "fontColor";
    pub const BOLD: &str = "bold";
    pub const ITALIC: &str = "italic";
    pub const UNDERLINE: &str = "underline";
    pub const ALIGNMENT: &str = "alignment";
    pub const FIRST_LINE_INDENT: &str = "firstLineIndent";
}

/// Longest parent chain followed during lookup.
const MAX_CHAIN: usize = 64;

/// The kinds of style a stylesheet holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StyleKind {
    Character,
    Graphic,
    Layout,
    Paragraph,
    Cell,
    Connection,
    List,
    Placeholder,
    Slide,
    Tabular,
    Vector,
}

impl StyleKind {
    pub const COUNT: usize = 11;

    pub const ALL: [StyleKind; Self::COUNT] = [
        StyleKind::Character,
        StyleKind::Graphic,
        StyleKind::Layout,
        StyleKind::Paragraph,
        StyleKind::Cell,
        StyleKind::Connection,
        StyleKind::List,
        StyleKind::Placeholder,
        StyleKind::Slide,
        StyleKind::Tabular,
        StyleKind::Vector,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Character => "character",
            Self::Graphic => "graphic",
            Self::Layout => "layout",
            Self::Paragraph => "paragraph",
            Self::Cell => "cell",
            Self::Connection => "connection",
            Self::List => "list",
            Self::Placeholder => "placeholder",
            Self::Slide => "slide",
            Self::Tabular => "tabular",
            Self::Vector => "vector",
        }
    }
}

impl fmt::Display for StyleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Line appearance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub width: f64,
    pub color: Color,
}

impl Default for Stroke {
    fn default() -> Self {
        Self {
            width: 1.0,
            color: Color::BLACK,
        }
    }
}

/// Value of a style property.
#[derive(Debug, Clone, PartialEq)]
pub enum Property {
    Number(f64),
    Bool(bool),
    Str(String),
    Color(Color),
    Stroke(Stroke),
    /// Explicitly cleared; shadows inherited values
    None,
}

impl Property {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            Self::Number(n) => Some(*n != 0.0),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<Color> {
        match self {
            Self::Color(c) => Some(*c),
            _ => None,
        }
    }
}

impl From<f64> for Property {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for Property {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<bool> for Property {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for Property {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<Color> for Property {
    fn from(value: Color) -> Self {
        Self::Color(value)
    }
}

impl From<Stroke> for Property {
    fn from(value: Stroke) -> Self {
        Self::Stroke(value)
    }
}

/// Property name to value map of one style.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyMap {
    entries: HashMap<Box<str>, Property>,
}

impl PropertyMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: &str, value: impl Into<Property>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Property> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Property)> {
        self.entries.iter().map(|(k, v)| (&**k, v))
    }
}

/// A named, optionally parented property bag.
///
/// A style naming a parent (by stylesheet identifier or by reference) but
/// without a linked parent is "unlinked"; lookups on it behave as if it had
/// no parent. Linking walks the stylesheet chain, see [`Style::link`].
#[derive(Debug)]
pub struct Style {
    kind: StyleKind,
    id: Option<Id>,
    ident: Option<Box<str>>,
    parent_ident: Option<Box<str>>,
    parent_ref: Option<Id>,
    props: PropertyMap,
    parent: RefCell<Option<Rc<Style>>>,
}

impl Style {
    pub fn new(kind: StyleKind, props: PropertyMap) -> Self {
        Self {
            kind,
            id: None,
            ident: None,
            parent_ident: None,
            parent_ref: None,
            props,
            parent: RefCell::new(None),
        }
    }

    pub fn with_id(mut self, id: Option<&str>) -> Self {
        self.id = id.map(Id::from);
        self
    }

    /// Set the stylesheet-level names of this style.
    pub fn with_idents(mut self, ident: Option<&str>, parent_ident: Option<&str>) -> Self {
        self.ident = ident.map(Box::from);
        self.parent_ident = parent_ident.map(Box::from);
        self
    }

    /// Name the parent by its document identifier instead.
    pub fn with_parent_ref(mut self, parent: Option<&str>) -> Self {
        self.parent_ref = parent.map(Id::from);
        self
    }

    pub fn kind(&self) -> StyleKind {
        self.kind
    }

    pub fn id(&self) -> Option<&Id> {
        self.id.as_ref()
    }

    pub fn ident(&self) -> Option<&str> {
        self.ident.as_deref()
    }

    pub fn parent_ident(&self) -> Option<&str> {
        self.parent_ident.as_deref()
    }

    pub fn parent_ref(&self) -> Option<&Id> {
        self.parent_ref.as_ref()
    }

    pub fn properties(&self) -> &PropertyMap {
        &self.props
    }

    pub fn parent(&self) -> Option<Rc<Style>> {
        self.parent.borrow().clone()
    }

    /// Link `parent` directly, replacing any earlier link.
    pub fn set_parent(&self, parent: Option<Rc<Style>>) {
        *self.parent.borrow_mut() = parent;
    }

    /// Whether the parent this style names has been found.
    pub fn is_linked(&self) -> bool {
        (self.parent_ident.is_none() && self.parent_ref.is_none()) || self.parent.borrow().is_some()
    }

    /// Find and cache the parent by walking up from `stylesheet`.
    ///
    /// A style whose own name equals the name of its parent refers to the
    /// style of that name in an enclosing stylesheet, so the walk starts at
    /// the parent stylesheet. Returns whether the style is linked afterwards;
    /// a missing parent is not an error.
    pub fn link(&self, stylesheet: &Stylesheet) -> bool {
        if self.is_linked() {
            return true;
        }

        let found = if let Some(parent_ref) = &self.parent_ref {
            if self.id.as_ref() == Some(parent_ref) {
                stylesheet.parent().and_then(|p| p.find_id(self.kind, parent_ref.as_str()))
            } else {
                stylesheet.find_id(self.kind, parent_ref.as_str())
            }
        } else {
            let Some(parent_ident) = self.parent_ident.as_deref() else {
                return true;
            };
            if self.ident.as_deref() == Some(parent_ident) {
                stylesheet.parent().and_then(|p| p.find(self.kind, parent_ident))
            } else {
                stylesheet.find(self.kind, parent_ident)
            }
        };

        match found {
            Some(parent) if !std::ptr::eq(Rc::as_ptr(&parent), self) => {
                self.set_parent(Some(parent));
                true
            },
            _ => false,
        }
    }

    /// Look up a property, optionally falling back to the parent chain.
    pub fn property(&self, key: &str, look_in_parent: bool) -> Option<Property> {
        if let Some(value) = self.props.get(key) {
            return Some(value.clone());
        }
        if !look_in_parent {
            return None;
        }
        let mut current = self.parent();
        for _ in 0..MAX_CHAIN {
            let style = current?;
            if let Some(value) = style.props.get(key) {
                return Some(value.clone());
            }
            current = style.parent();
        }
        None
    }
}

/// Stack of styles in effect while drawing; the innermost one wins.
#[derive(Debug, Clone, Default)]
pub struct StyleContext {
    stack: Vec<Rc<Style>>,
}

impl StyleContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, style: Rc<Style>) {
        self.stack.push(style);
    }

    pub fn pop(&mut self) -> Option<Rc<Style>> {
        self.stack.pop()
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Look up `key` from the innermost style outwards.
    pub fn find(&self, key: &str, look_in_parent: bool) -> Option<Property> {
        self.stack
            .iter()
            .rev()
            .find_map(|style| style.property(key, look_in_parent))
    }
}
