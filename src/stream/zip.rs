//! Zip package backend.

use std::io::{self, BufRead, Cursor, Read, Seek, SeekFrom};
use std::rc::Rc;

use zip::ZipArchive;

use super::{InputStream, MemoryStream, read_bounded};
use crate::common::{Error, Result};

/// Zip signature of a local file header.
pub const ZIP_MAGIC: &[u8; 4] = b"PK\x03\x04";

/// Zip archive exposing its entries as members.
///
/// Reading the stream itself yields the raw archive bytes.
pub struct ZipStream {
    raw: MemoryStream,
    archive: ZipArchive<Cursor<Rc<[u8]>>>,
    limit: usize,
}

impl ZipStream {
    /// Open the archive held by `raw`. Members larger than `limit` bytes are refused.
    pub fn new(raw: MemoryStream, limit: usize) -> Result<Self> {
        let archive = ZipArchive::new(Cursor::new(raw.shared()))?;
        tracing::trace!(entries = archive.len(), "opened zip package");
        Ok(Self {
            raw: raw.rewound(),
            archive,
            limit,
        })
    }

    /// Quick signature check, without parsing the central directory.
    pub fn looks_like_zip(data: &[u8]) -> bool {
        data.starts_with(ZIP_MAGIC)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.archive.index_for_name(name).is_some()
    }

    /// Entry names, in archive order.
    pub fn member_names(&self) -> impl Iterator<Item = &str> {
        self.archive.file_names()
    }
}

impl std::fmt::Debug for ZipStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZipStream")
            .field("len", &self.raw.len())
            .field("entries", &self.archive.len())
            .finish()
    }
}

impl Read for ZipStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.raw.read(buf)
    }
}

impl BufRead for ZipStream {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        self.raw.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.raw.consume(amt)
    }
}

impl Seek for ZipStream {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.raw.seek(pos)
    }
}

impl InputStream for ZipStream {
    fn at_end(&mut self) -> bool {
        self.raw.at_end()
    }

    fn is_container(&self) -> bool {
        true
    }

    fn open_member(&mut self, name: &str) -> Result<Option<MemoryStream>> {
        let entry = match self.archive.by_name(name) {
            Ok(entry) => entry,
            Err(zip::result::ZipError::FileNotFound) => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        if entry.size() > self.limit as u64 {
            return Err(Error::StreamTooLarge(self.limit));
        }
        let data = read_bounded(entry, self.limit)?;
        Ok(Some(MemoryStream::new(data)))
    }
}

#[cfg(test)]
pub(crate) fn build_zip(entries: &[(&str, &[u8])]) -> Vec<u8> {
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
    for (name, data) in entries {
        writer.start_file(*name, options).unwrap();
        writer.write_all(data).unwrap();
    }
    writer.finish().unwrap().into_inner()
}
