//! Unified error types for apxl.
//!
//! Every structural failure of a parse session (unreadable stream, malformed
//! XML, unrecognized version) is one of these variants. Document-data
//! imperfections are never errors; they are reported through
//! [`Diagnostics`](crate::common::Diagnostics) and parsing continues.
use thiserror::Error;

/// Main error type for apxl operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A read that demanded an exact byte count hit the end of the stream
    #[error("Unexpected end of stream: wanted {wanted} bytes, got {got}")]
    UnexpectedEof { wanted: usize, got: usize },

    /// XML parsing error (malformed or unbalanced document)
    #[error("XML error: {0}")]
    XmlError(String),

    /// Invalid document structure
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// The document is recognized but its version stamp is not
    #[error("Unsupported version: {0}")]
    UnsupportedVersion(String),

    /// No recognized container/version combination
    #[error("Not a supported presentation")]
    NotSupported,

    /// Container member not found
    #[error("Component not found: {0}")]
    ComponentNotFound(String),

    /// OLE compound document error
    #[error("OLE error: {0}")]
    OleError(String),

    /// ZIP archive error
    #[error("ZIP error: {0}")]
    ZipError(String),

    /// gzip/zlib decompression error
    #[error("Decompression error: {0}")]
    InflateError(String),

    /// A decoded stream is larger than the configured limit
    #[error("Stream exceeds the size limit of {0} bytes")]
    StreamTooLarge(usize),

    /// The parse deadline passed
    #[error("Parse deadline exceeded")]
    DeadlineExceeded,

    /// Generic error
    #[error("{0}")]
    Other(String),
}

/// Result type for apxl operations.
pub type Result<T> = std::result::Result<T, Error>;
