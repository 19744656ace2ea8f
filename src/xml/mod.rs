//! Forward-only, scoped XML cursor.
//!
//! One [`XmlReader`] owns the pull parser of a document. Traversal happens
//! through [`Element`] handles that borrow the reader mutably, so only one
//! cursor moves at a time and nested cursors share the parent's position:
//!
//! ```rust
//! use apxl::token::key2::{self, KEY2_TOKENS};
//! use apxl::xml::XmlReader;
//! use apxl::stream::MemoryStream;
//!
//! let xml = r#"<a><b><c/></b><d/></a>"#;
//! let mut reader = XmlReader::new(MemoryStream::from_slice(xml.as_bytes()), &KEY2_TOKENS);
//! let mut root = reader.root()?;
//! let mut names = Vec::new();
//! while let Some(child) = root.next_child()? {
//!     names.push(child.local_name().to_string());
//! }
//! assert_eq!(names, ["b", "d"]);
//! # Ok::<(), apxl::common::Error>(())
//! ```
//!
//! A child that is not iterated is skipped as a whole by the parent's next
//! step. Attribute lists are captured when an element opens; namespace
//! declarations are consumed by the cursor and never surfaced.

mod element;
mod reader;

pub use element::{Element, Node};
pub use reader::{Attribute, XmlReader};
