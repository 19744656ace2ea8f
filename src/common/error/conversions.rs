//! Error conversion implementations.
//!
//! This module contains From trait implementations to convert from backend
//! error types to the unified Error type.

use super::types::Error;

#[cfg(feature = "ole")]
impl From<crate::stream::ole::OleError> for Error {
    fn from(err: crate::stream::ole::OleError) -> Self {
        match err {
            crate::stream::ole::OleError::Io(e) => Error::Io(e),
            crate::stream::ole::OleError::StreamNotFound => {
                Error::ComponentNotFound("OLE stream not found".to_string())
            },
            other => Error::OleError(other.to_string()),
        }
    }
}

#[cfg(feature = "zip")]
impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(e) => Error::Io(e),
            zip::result::ZipError::FileNotFound => {
                Error::ComponentNotFound("ZIP member not found".to_string())
            },
            other => Error::ZipError(other.to_string()),
        }
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::XmlError(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Error::XmlError(err.to_string())
    }
}

impl From<quick_xml::escape::EscapeError> for Error {
    fn from(err: quick_xml::escape::EscapeError) -> Self {
        Error::XmlError(err.to_string())
    }
}
