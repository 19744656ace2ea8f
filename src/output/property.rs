//! Ordered property lists passed to painters.

use std::fmt;
use std::rc::Rc;

use smallvec::SmallVec;

use crate::common::number::write_num;

/// Property names used by the decoder.
pub mod keys {
    pub const WIDTH: &str = "svg:width";
    pub const HEIGHT: &str = "svg:height";
    pub const X: &str = "svg:x";
    pub const Y: &str = "svg:y";
    pub const TRANSFORM: &str = "draw:transform";
    pub const ID: &str = "draw:id";
    pub const LAYER: &str = "draw:layer";

    pub const FILL: &str = "draw:fill";
    pub const FILL_COLOR: &str = "draw:fill-color";
    pub const STROKE: &str = "draw:stroke";
    pub const STROKE_COLOR: &str = "svg:stroke-color";
    pub const STROKE_WIDTH: &str = "svg:stroke-width";
    pub const OPACITY: &str = "draw:opacity";

    pub const FONT_SIZE: &str = "fo:font-size";
    pub const FONT_NAME: &str = "style:font-name";
    pub const FONT_WEIGHT: &str = "fo:font-weight";
    pub const FONT_STYLE: &str = "fo:font-style";
    pub const UNDERLINE: &str = "style:text-underline-type";
    pub const COLOR: &str = "fo:color";
    pub const TEXT_ALIGN: &str = "fo:text-align";
    pub const TEXT_INDENT: &str = "fo:text-indent";

    pub const MIME_TYPE: &str = "librevenge:mime-type";
    pub const BINARY_DATA: &str = "office:binary-data";
    pub const DISPLAY_NAME: &str = "draw:name";
    pub const MEMBER: &str = "xlink:href";
}

/// Value of a painter property.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Str(String),
    Number(f64),
    Bool(bool),
    Binary(Rc<[u8]>),
}

impl PropertyValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_binary(&self) -> Option<&[u8]> {
        match self {
            Self::Binary(data) => Some(data),
            _ => None,
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Number(n) => {
                let mut buf = String::new();
                write_num(&mut buf, *n);
                f.write_str(&buf)
            },
            Self::Bool(b) => write!(f, "{}", b),
            Self::Binary(data) => write!(f, "<{} bytes>", data.len()),
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Rc<[u8]>> for PropertyValue {
    fn from(value: Rc<[u8]>) -> Self {
        Self::Binary(value)
    }
}

/// Insertion-ordered map from property name to value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyList {
    entries: SmallVec<[(&'static str, PropertyValue); 8]>,
}

impl PropertyList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key`, replacing an earlier value in place.
    pub fn insert(&mut self, key: &'static str, value: impl Into<PropertyValue>) {
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn with(mut self, key: &'static str, value: impl Into<PropertyValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.entries.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(PropertyValue::as_str)
    }

    pub fn get_number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(PropertyValue::as_number)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &PropertyValue)> {
        self.entries.iter().map(|(k, v)| (*k, v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for PropertyList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}={}", key, value)?;
        }
        Ok(())
    }
}
