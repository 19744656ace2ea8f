//! Document entity identifiers.

use std::borrow::Borrow;
use std::fmt;

/// Opaque identifier naming an XML-addressable entity (`sfa:ID` / `sfa:IDREF`).
///
/// Uniqueness is assumed but not enforced: the last entity captured under a
/// given identifier wins in the [`Dictionary`](crate::model::Dictionary).
/// `Id` borrows as `str`, so maps keyed by it can be queried with `&str`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id(Box<str>);

impl Id {
    #[inline]
    pub fn new(id: impl Into<Box<str>>) -> Self {
        Self(id.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Id {
    fn from(value: &str) -> Self {
        Self(value.into())
    }
}

impl From<String> for Id {
    fn from(value: String) -> Self {
        Self(value.into_boxed_str())
    }
}

impl Borrow<str> for Id {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Id {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
