//! OLE compound document backend.
//!
//! Older Keynote releases saved presentations as OLE packages holding the
//! XML document (possibly gzip compressed) as a named stream.

pub mod consts;
pub mod file;

#[cfg(test)]
pub(crate) mod fixture;

use std::io::{self, BufRead, Read, Seek, SeekFrom};

pub use file::{DirectoryEntry, OleError, OleFile, is_ole_file};

use super::{InputStream, MemoryStream};
use crate::common::{Error, Result};

/// OLE compound document exposing its streams as members.
///
/// Member names are paths with components separated by `/`; component
/// matching is case-insensitive. Reading the stream itself yields the raw
/// compound file bytes.
#[derive(Debug)]
pub struct OleStream {
    raw: MemoryStream,
    file: OleFile<MemoryStream>,
    limit: usize,
}

impl OleStream {
    /// Open the compound file held by `raw`. Members larger than `limit` bytes are refused.
    pub fn new(raw: MemoryStream, limit: usize) -> Result<Self> {
        let file = OleFile::open(raw.rewound())?;
        Ok(Self {
            raw: raw.rewound(),
            file,
            limit,
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.file.exists(&split_path(name))
    }

    /// Paths of all streams, `/` separated.
    pub fn member_names(&self) -> Vec<String> {
        self.file
            .list_streams()
            .into_iter()
            .map(|path| path.join("/"))
            .collect()
    }
}

fn split_path(name: &str) -> Vec<&str> {
    name.split('/').filter(|c| !c.is_empty()).collect()
}

impl Read for OleStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.raw.read(buf)
    }
}

impl BufRead for OleStream {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        self.raw.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.raw.consume(amt)
    }
}

impl Seek for OleStream {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.raw.seek(pos)
    }
}

impl InputStream for OleStream {
    fn at_end(&mut self) -> bool {
        self.raw.at_end()
    }

    fn is_container(&self) -> bool {
        true
    }

    fn open_member(&mut self, name: &str) -> Result<Option<MemoryStream>> {
        let path = split_path(name);
        let Some(entry) = self.file.find(&path) else {
            return Ok(None);
        };
        if entry.size > self.limit as u64 {
            return Err(Error::StreamTooLarge(self.limit));
        }
        match self.file.open_stream(&path) {
            Ok(data) => Ok(Some(MemoryStream::new(data))),
            Err(OleError::StreamNotFound) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
