//! OLE compound document reader.
//!
//! Only what package detection needs: header and FAT parsing, the directory
//! tree, and reading a stream by path through either the FAT or the mini FAT.

use std::io::{self, Read, Seek, SeekFrom};

use zerocopy::{FromBytes, LE, U16, U32, U64};
use zerocopy_derive::FromBytes as DeriveFromBytes;

use super::consts::*;

/// On-disk directory entry (128 bytes).
#[derive(Debug, Clone, DeriveFromBytes)]
#[repr(C)]
#[allow(dead_code)]
struct RawDirectoryEntry {
    name: [u8; 64],
    name_len: U16<LE>,
    entry_type: u8,
    node_color: u8,
    sid_left: U32<LE>,
    sid_right: U32<LE>,
    sid_child: U32<LE>,
    clsid: [u8; 16],
    state_bits: U32<LE>,
    creation_time: U64<LE>,
    modified_time: U64<LE>,
    start_sector: U32<LE>,
    stream_size: U64<LE>,
}

/// A stream or storage of the compound file.
#[derive(Debug, Clone)]
pub struct DirectoryEntry {
    pub sid: u32,
    pub name: String,
    pub entry_type: u8,
    pub sid_left: u32,
    pub sid_right: u32,
    pub sid_child: u32,
    pub start_sector: u32,
    pub size: u64,
    /// Stored in the mini stream rather than in regular sectors
    pub is_minifat: bool,
}

impl DirectoryEntry {
    pub fn is_stream(&self) -> bool {
        self.entry_type == STGTY_STREAM
    }

    pub fn is_storage(&self) -> bool {
        self.entry_type == STGTY_STORAGE || self.entry_type == STGTY_ROOT
    }
}

/// Error types for OLE file parsing
#[derive(Debug, thiserror::Error)]
pub enum OleError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
    #[error("Not an OLE file")]
    NotOleFile,
    #[error("Corrupted file: {0}")]
    CorruptedFile(String),
    #[error("Stream not found")]
    StreamNotFound,
}

#[inline]
fn le_u16(data: &[u8], offset: usize) -> u16 {
    U16::<LE>::read_from_bytes(&data[offset..offset + 2])
        .map(|v| v.get())
        .unwrap_or(0)
}

#[inline]
fn le_u32(data: &[u8], offset: usize) -> u32 {
    U32::<LE>::read_from_bytes(&data[offset..offset + 4])
        .map(|v| v.get())
        .unwrap_or(0)
}

/// Parsed OLE compound file.
#[derive(Debug)]
pub struct OleFile<R: Read + Seek> {
    reader: R,
    sector_size: usize,
    mini_sector_size: usize,
    mini_stream_cutoff: u32,
    fat: Vec<u32>,
    minifat: Vec<u32>,
    entries: Vec<Option<DirectoryEntry>>,
    ministream: Option<Vec<u8>>,
}

impl<R: Read + Seek> OleFile<R> {
    /// Parse the header, FAT, directory and mini FAT.
    pub fn open(mut reader: R) -> Result<Self, OleError> {
        let file_size = reader.seek(SeekFrom::End(0))?;
        reader.seek(SeekFrom::Start(0))?;
        if file_size < MINIMAL_OLEFILE_SIZE as u64 {
            return Err(OleError::NotOleFile);
        }

        let mut header = [0u8; HEADER_SIZE];
        reader.read_exact(&mut header)?;
        if &header[0..8] != MAGIC {
            return Err(OleError::NotOleFile);
        }

        let major_version = le_u16(&header, 0x1A);
        if le_u16(&header, 0x1C) != BYTE_ORDER_LE {
            return Err(OleError::InvalidFormat("invalid byte order".to_string()));
        }
        let sector_shift = le_u16(&header, 0x1E);
        let mini_sector_shift = le_u16(&header, 0x20);
        if !(7..=16).contains(&sector_shift) || mini_sector_shift >= sector_shift {
            return Err(OleError::InvalidFormat("invalid sector shift".to_string()));
        }
        let sector_size = 1usize << sector_shift;
        if (major_version == 3 && sector_size != 512) || (major_version == 4 && sector_size != 4096) {
            return Err(OleError::InvalidFormat("sector size mismatch".to_string()));
        }

        let mut ole = OleFile {
            reader,
            sector_size,
            mini_sector_size: 1usize << mini_sector_shift,
            mini_stream_cutoff: le_u32(&header, 0x38),
            fat: Vec::new(),
            minifat: Vec::new(),
            entries: Vec::new(),
            ministream: None,
        };

        ole.load_fat(&header)?;
        ole.load_directory(le_u32(&header, 0x30))?;
        if le_u32(&header, 0x40) > 0 {
            let minifat = ole.read_chain(le_u32(&header, 0x3C))?;
            ole.minifat = minifat.chunks_exact(4).map(|c| le_u32(c, 0)).collect();
        }

        Ok(ole)
    }

    /// Collect the FAT sector list from the header and the DIFAT chain, then read the FAT.
    fn load_fat(&mut self, header: &[u8; HEADER_SIZE]) -> Result<(), OleError> {
        let mut fat_sectors: Vec<u32> = (0..HEADER_DIFAT_ENTRIES)
            .map(|i| le_u32(header, 0x4C + i * 4))
            .take_while(|&s| s != FREESECT && s != ENDOFCHAIN)
            .collect();

        let per_sector = self.sector_size / 4 - 1;
        let mut difat = le_u32(header, 0x44);
        for _ in 0..le_u32(header, 0x48) {
            if difat == ENDOFCHAIN || difat == FREESECT {
                break;
            }
            let data = self.read_sector(difat)?;
            fat_sectors.extend(
                (0..per_sector)
                    .map(|i| le_u32(&data, i * 4))
                    .take_while(|&s| s != FREESECT && s != ENDOFCHAIN),
            );
            difat = le_u32(&data, per_sector * 4);
        }

        self.fat.reserve(fat_sectors.len() * self.sector_size / 4);
        for sector in fat_sectors {
            let data = self.read_sector(sector)?;
            self.fat.extend(data.chunks_exact(4).map(|c| le_u32(c, 0)));
        }
        Ok(())
    }

    fn load_directory(&mut self, first_sector: u32) -> Result<(), OleError> {
        let data = self.read_chain(first_sector)?;
        let count = data.len() / DIRENTRY_SIZE;
        if count == 0 {
            return Err(OleError::CorruptedFile("empty directory".to_string()));
        }
        self.entries = vec![None; count];

        // Walk the tree from the root instead of trusting every slot
        let mut pending = vec![0u32];
        while let Some(sid) = pending.pop() {
            if sid == NOSTREAM {
                continue;
            }
            let index = sid as usize;
            if index >= count {
                return Err(OleError::CorruptedFile(format!("directory entry {} out of range", sid)));
            }
            if self.entries[index].is_some() {
                continue;
            }
            let offset = index * DIRENTRY_SIZE;
            let entry = self.parse_entry(&data[offset..offset + DIRENTRY_SIZE], sid)?;
            pending.extend([entry.sid_left, entry.sid_right, entry.sid_child]);
            self.entries[index] = Some(entry);
        }
        Ok(())
    }

    fn parse_entry(&self, data: &[u8], sid: u32) -> Result<DirectoryEntry, OleError> {
        let raw = RawDirectoryEntry::read_from_bytes(data)
            .map_err(|_| OleError::InvalidFormat("short directory entry".to_string()))?;

        let name_len = (raw.name_len.get() as usize).saturating_sub(2).min(64);
        let units: Vec<u16> = raw.name[..name_len]
            .chunks_exact(2)
            .map(|c| le_u16(c, 0))
            .collect();
        let name = String::from_utf16_lossy(&units)
            .trim_end_matches('\0')
            .to_string();

        // Version 3 files only use the low 32 bits of the size
        let size = if self.sector_size == 512 {
            raw.stream_size.get() & 0xFFFF_FFFF
        } else {
            raw.stream_size.get()
        };

        Ok(DirectoryEntry {
            sid,
            name,
            entry_type: raw.entry_type,
            sid_left: raw.sid_left.get(),
            sid_right: raw.sid_right.get(),
            sid_child: raw.sid_child.get(),
            start_sector: raw.start_sector.get(),
            size,
            is_minifat: raw.entry_type == STGTY_STREAM && size < u64::from(self.mini_stream_cutoff),
        })
    }

    fn read_sector(&mut self, sector: u32) -> Result<Vec<u8>, OleError> {
        let position = (u64::from(sector) + 1) * self.sector_size as u64;
        self.reader.seek(SeekFrom::Start(position))?;
        let mut buffer = vec![0u8; self.sector_size];
        self.reader.read_exact(&mut buffer)?;
        Ok(buffer)
    }

    /// Read a regular sector chain. Chains longer than the FAT are cyclic.
    fn read_chain(&mut self, start: u32) -> Result<Vec<u8>, OleError> {
        let mut data = Vec::new();
        let mut sector = start;
        let mut steps = 0usize;
        while sector != ENDOFCHAIN {
            if sector as usize >= self.fat.len() || steps > self.fat.len() {
                return Err(OleError::CorruptedFile(format!("bad sector {} in FAT chain", sector)));
            }
            data.extend_from_slice(&self.read_sector(sector)?);
            sector = self.fat[sector as usize];
            steps += 1;
        }
        Ok(data)
    }

    fn read_mini_chain(&mut self, start: u32, size: u64) -> Result<Vec<u8>, OleError> {
        if self.ministream.is_none() {
            let root_start = self
                .root()
                .map(|r| r.start_sector)
                .ok_or_else(|| OleError::CorruptedFile("no root entry".to_string()))?;
            self.ministream = Some(self.read_chain(root_start)?);
        }
        let ministream = self.ministream.as_deref().unwrap_or_default();

        let mut data = Vec::with_capacity(size as usize);
        let mut sector = start;
        let mut steps = 0usize;
        while sector != ENDOFCHAIN && (data.len() as u64) < size {
            let position = sector as usize * self.mini_sector_size;
            if sector as usize >= self.minifat.len()
                || steps > self.minifat.len()
                || position + self.mini_sector_size > ministream.len()
            {
                return Err(OleError::CorruptedFile(format!("bad mini sector {}", sector)));
            }
            data.extend_from_slice(&ministream[position..position + self.mini_sector_size]);
            sector = self.minifat[sector as usize];
            steps += 1;
        }
        data.truncate(size as usize);
        Ok(data)
    }

    pub fn root(&self) -> Option<&DirectoryEntry> {
        self.entries.first().and_then(Option::as_ref)
    }

    fn entry(&self, sid: u32) -> Option<&DirectoryEntry> {
        self.entries.get(sid as usize).and_then(Option::as_ref)
    }

    /// Search the sibling tree rooted at `sid` for `name`, ignoring case.
    fn find_sibling(&self, sid: u32, name: &str) -> Option<&DirectoryEntry> {
        let mut pending = vec![sid];
        let mut budget = self.entries.len();
        while let Some(sid) = pending.pop() {
            let Some(entry) = self.entry(sid) else {
                continue;
            };
            if budget == 0 {
                break;
            }
            budget -= 1;
            if entry.name.eq_ignore_ascii_case(name) {
                return Some(entry);
            }
            pending.push(entry.sid_left);
            pending.push(entry.sid_right);
        }
        None
    }

    /// Find an entry by path components below the root.
    pub fn find(&self, path: &[&str]) -> Option<&DirectoryEntry> {
        let mut current = self.root()?;
        for name in path {
            current = self.find_sibling(current.sid_child, name)?;
        }
        Some(current)
    }

    pub fn exists(&self, path: &[&str]) -> bool {
        self.find(path).is_some()
    }

    /// Read the contents of the stream at `path`.
    pub fn open_stream(&mut self, path: &[&str]) -> Result<Vec<u8>, OleError> {
        let entry = self.find(path).ok_or(OleError::StreamNotFound)?;
        if !entry.is_stream() {
            return Err(OleError::InvalidFormat(format!("{} is not a stream", entry.name)));
        }
        let (start, size, mini) = (entry.start_sector, entry.size, entry.is_minifat);
        if mini {
            self.read_mini_chain(start, size)
        } else {
            let mut data = self.read_chain(start)?;
            data.truncate(size as usize);
            Ok(data)
        }
    }

    /// Paths of all streams, depth first.
    pub fn list_streams(&self) -> Vec<Vec<String>> {
        let mut streams = Vec::new();
        if let Some(root) = self.root() {
            self.collect_streams(root.sid_child, &mut Vec::new(), &mut streams);
        }
        streams
    }

    fn collect_streams(&self, sid: u32, path: &mut Vec<String>, out: &mut Vec<Vec<String>>) {
        let Some(entry) = self.entry(sid) else {
            return;
        };
        self.collect_streams(entry.sid_left, path, out);
        path.push(entry.name.clone());
        if entry.is_stream() {
            out.push(path.clone());
        } else if entry.is_storage() {
            self.collect_streams(entry.sid_child, path, out);
        }
        path.pop();
        self.collect_streams(entry.sid_right, path, out);
    }
}

/// Check the magic bytes and minimal size of a compound file.
pub fn is_ole_file(data: &[u8]) -> bool {
    data.len() >= MINIMAL_OLEFILE_SIZE && data.starts_with(MAGIC)
}
