use std::io::{self, BufRead, Cursor, Read, Seek, SeekFrom};
use std::rc::Rc;

use super::InputStream;

/// In-memory stream over shared, immutable bytes.
///
/// Cloning is cheap and yields an independent cursor over the same data,
/// which is how the second parse pass re-reads the document from the start.
#[derive(Debug, Clone)]
pub struct MemoryStream {
    cursor: Cursor<Rc<[u8]>>,
}

impl MemoryStream {
    /// Wrap owned bytes.
    pub fn new(data: impl Into<Rc<[u8]>>) -> Self {
        Self {
            cursor: Cursor::new(data.into()),
        }
    }

    /// Copy a byte range into a new stream.
    pub fn from_slice(data: &[u8]) -> Self {
        Self::new(data)
    }

    pub fn len(&self) -> usize {
        self.cursor.get_ref().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All bytes, regardless of the position.
    pub fn bytes(&self) -> &[u8] {
        self.cursor.get_ref()
    }

    /// Shared handle to the underlying bytes.
    pub fn shared(&self) -> Rc<[u8]> {
        Rc::clone(self.cursor.get_ref())
    }

    /// A new cursor over the same bytes, positioned at the start.
    pub fn rewound(&self) -> Self {
        Self::new(self.shared())
    }
}

impl Read for MemoryStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.cursor.read(buf)
    }
}

impl BufRead for MemoryStream {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        self.cursor.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.cursor.consume(amt)
    }
}

impl Seek for MemoryStream {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.cursor.seek(pos)
    }
}

impl InputStream for MemoryStream {
    fn at_end(&mut self) -> bool {
        self.cursor.position() >= self.len() as u64
    }
}
