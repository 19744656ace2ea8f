//! Seekable byte-stream abstraction with pluggable backends.
//!
//! Everything above this layer reads through [`InputStream`]. Backends:
//!
//! - [`MemoryStream`]: owned bytes with full random seek
//! - [`InflateStream`]: gzip or zlib framed data, decoded into memory up front
//! - [`ZipStream`]: zip archive exposing its entries as members (`zip` feature)
//! - [`OleStream`]: OLE compound document exposing its streams as members
//!   (`ole` feature)
//!
//! Plain reads past the end truncate silently, as `Read` does. Callers that
//! need an exact count use [`InputStream::read_exact_count`], which fails with
//! [`Error::UnexpectedEof`].

pub mod inflate;
pub mod memory;
#[cfg(feature = "ole")]
pub mod ole;
#[cfg(feature = "zip")]
pub mod zip;

use std::io::{Read, Seek};

use crate::common::{Error, Result};

pub use inflate::InflateStream;
pub use memory::MemoryStream;
#[cfg(feature = "ole")]
pub use ole::OleStream;
#[cfg(feature = "zip")]
pub use zip::ZipStream;

/// Byte stream read by the decoder.
pub trait InputStream: Read + Seek {
    /// Current position from the start of the stream.
    fn tell(&mut self) -> Result<u64> {
        Ok(self.stream_position()?)
    }

    /// Whether the position is at or past the end of the data.
    fn at_end(&mut self) -> bool;

    /// Whether this stream is an archive exposing named members.
    fn is_container(&self) -> bool {
        false
    }

    /// Open a named member of a container stream.
    ///
    /// Returns `Ok(None)` when the stream is not a container or has no such
    /// member. The member is decoded into memory and owned by the caller.
    fn open_member(&mut self, _name: &str) -> Result<Option<MemoryStream>> {
        Ok(None)
    }

    /// Read exactly `count` bytes or fail with [`Error::UnexpectedEof`].
    fn read_exact_count(&mut self, count: usize) -> Result<Vec<u8>> {
        let mut buffer = Vec::with_capacity(count);
        Read::take(&mut *self, count as u64).read_to_end(&mut buffer)?;
        if buffer.len() < count {
            return Err(Error::UnexpectedEof {
                wanted: count,
                got: buffer.len(),
            });
        }
        Ok(buffer)
    }

    /// Read the rest of the stream, failing if it is larger than `limit` bytes.
    fn read_to_vec(&mut self, limit: usize) -> Result<Vec<u8>> {
        read_bounded(&mut *self, limit)
    }
}

/// Drain `reader` into a buffer, failing with [`Error::StreamTooLarge`] past `limit`.
pub(crate) fn read_bounded(reader: impl Read, limit: usize) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    reader
        .take((limit as u64).saturating_add(1))
        .read_to_end(&mut buffer)?;
    if buffer.len() > limit {
        return Err(Error::StreamTooLarge(limit));
    }
    Ok(buffer)
}
