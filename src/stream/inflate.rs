//! gzip / zlib inflate backend.
//!
//! The whole payload is decoded on construction; reads then come from memory.

use std::io::{self, BufRead, Read, Seek, SeekFrom};

use flate2::read::{MultiGzDecoder, ZlibDecoder};

use super::{InputStream, MemoryStream, read_bounded};
use crate::common::{Error, Result};

/// Framing of a compressed payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    Gzip,
    Zlib,
}

impl Compression {
    /// Identify the framing from the leading bytes.
    pub fn sniff(data: &[u8]) -> Option<Self> {
        match data {
            [0x1F, 0x8B, ..] => Some(Self::Gzip),
            // CMF must name deflate and the header checksum must hold
            [cmf, flg, ..] if cmf & 0x0F == 8 && (u16::from(*cmf) << 8 | u16::from(*flg)) % 31 == 0 => {
                Some(Self::Zlib)
            },
            _ => None,
        }
    }
}

/// Decoded view of a gzip- or zlib-framed stream.
#[derive(Debug, Clone)]
pub struct InflateStream {
    decoded: MemoryStream,
}

impl InflateStream {
    /// Decode `data`, failing if it is not compressed or decodes past `limit` bytes.
    pub fn new(data: &[u8], limit: usize) -> Result<Self> {
        let compression = Compression::sniff(data)
            .ok_or_else(|| Error::InflateError("not a gzip or zlib stream".to_string()))?;

        let decoded = match compression {
            Compression::Gzip => read_bounded(MultiGzDecoder::new(data), limit),
            Compression::Zlib => read_bounded(ZlibDecoder::new(data), limit),
        }
        .map_err(|e| match e {
            Error::Io(io) => Error::InflateError(io.to_string()),
            other => other,
        })?;

        tracing::trace!(?compression, encoded = data.len(), decoded = decoded.len(), "inflated stream");

        Ok(Self {
            decoded: MemoryStream::new(decoded),
        })
    }

    pub fn into_inner(self) -> MemoryStream {
        self.decoded
    }
}

impl Read for InflateStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.decoded.read(buf)
    }
}

impl BufRead for InflateStream {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        self.decoded.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.decoded.consume(amt)
    }
}

impl Seek for InflateStream {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.decoded.seek(pos)
    }
}

impl InputStream for InflateStream {
    fn at_end(&mut self) -> bool {
        self.decoded.at_end()
    }
}

#[cfg(test)]
pub(crate) fn gzip(data: &[u8]) -> Vec<u8> {
    use flate2::write::GzEncoder;
    use std::io::Write;

    let mut encoder = GzEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}
