//! In-memory builder for minimal compound files used by tests.
//!
//! Produces a version 3 file (512-byte sectors) whose streams all live in the
//! mini stream. Sector layout: FAT, directory, mini FAT, mini stream data.

use super::consts::*;

const SECTOR: usize = 512;
const MINI_SECTOR: usize = 64;

#[derive(Default)]
pub(crate) struct OleBuilder {
    streams: Vec<(String, Vec<u8>)>,
}

impl OleBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn stream(mut self, name: &str, data: &[u8]) -> Self {
        assert!(data.len() < 4096, "fixture streams must fit the mini stream");
        self.streams.push((name.to_string(), data.to_vec()));
        self
    }

    pub(crate) fn build(self) -> Vec<u8> {
        // Mini stream content and mini FAT chains
        let mut ministream = Vec::new();
        let mut minifat: Vec<u32> = Vec::new();
        let mut starts = Vec::new();
        for (_, data) in &self.streams {
            let first = minifat.len() as u32;
            let count = data.len().div_ceil(MINI_SECTOR).max(1);
            for i in 0..count {
                let next = if i + 1 == count { ENDOFCHAIN } else { first + i as u32 + 1 };
                minifat.push(next);
            }
            starts.push(first);
            ministream.extend_from_slice(data);
            ministream.resize(minifat.len() * MINI_SECTOR, 0);
        }
        assert!(minifat.len() <= SECTOR / 4, "fixture mini FAT must fit one sector");

        let dir_sectors = (self.streams.len() + 1).div_ceil(SECTOR / DIRENTRY_SIZE);
        let first_dir = 1u32;
        let minifat_sector = first_dir + dir_sectors as u32;
        let first_mini_data = minifat_sector + 1;
        let mini_data_sectors = ministream.len().div_ceil(SECTOR);

        // FAT
        let mut fat = vec![FREESECT; SECTOR / 4];
        fat[0] = FATSECT;
        chain(&mut fat, first_dir, dir_sectors);
        chain(&mut fat, minifat_sector, 1);
        chain(&mut fat, first_mini_data, mini_data_sectors);

        // Directory: root plus one entry per stream, siblings linked rightwards
        let mut directory = vec![0u8; dir_sectors * SECTOR];
        let root_start = if mini_data_sectors == 0 { ENDOFCHAIN } else { first_mini_data };
        let root_child = if self.streams.is_empty() { NOSTREAM } else { 1 };
        write_entry(
            &mut directory[..DIRENTRY_SIZE],
            "Root Entry",
            STGTY_ROOT,
            NOSTREAM,
            root_child,
            root_start,
            ministream.len() as u64,
        );
        for (i, ((name, data), start)) in self.streams.iter().zip(&starts).enumerate() {
            let sid = i + 1;
            let right = if sid < self.streams.len() { sid as u32 + 1 } else { NOSTREAM };
            let offset = sid * DIRENTRY_SIZE;
            write_entry(
                &mut directory[offset..offset + DIRENTRY_SIZE],
                name,
                STGTY_STREAM,
                right,
                NOSTREAM,
                *start,
                data.len() as u64,
            );
        }

        // Header
        let mut out = vec![0u8; SECTOR];
        out[0..8].copy_from_slice(MAGIC);
        put_u16(&mut out, 0x18, 0x003E);
        put_u16(&mut out, 0x1A, 3);
        put_u16(&mut out, 0x1C, BYTE_ORDER_LE);
        put_u16(&mut out, 0x1E, 9);
        put_u16(&mut out, 0x20, 6);
        put_u32(&mut out, 0x2C, 1);
        put_u32(&mut out, 0x30, first_dir);
        put_u32(&mut out, 0x38, 4096);
        put_u32(&mut out, 0x3C, minifat_sector);
        put_u32(&mut out, 0x40, 1);
        put_u32(&mut out, 0x44, ENDOFCHAIN);
        put_u32(&mut out, 0x48, 0);
        put_u32(&mut out, 0x4C, 0);
        for i in 1..HEADER_DIFAT_ENTRIES {
            put_u32(&mut out, 0x4C + i * 4, FREESECT);
        }

        for entry in fat {
            out.extend_from_slice(&entry.to_le_bytes());
        }
        out.extend_from_slice(&directory);

        let mut minifat_sector_data = vec![0xFFu8; SECTOR];
        for (i, entry) in minifat.iter().enumerate() {
            minifat_sector_data[i * 4..i * 4 + 4].copy_from_slice(&entry.to_le_bytes());
        }
        out.extend_from_slice(&minifat_sector_data);

        ministream.resize(mini_data_sectors * SECTOR, 0);
        out.extend_from_slice(&ministream);
        out
    }
}

fn chain(fat: &mut [u32], first: u32, count: usize) {
    for i in 0..count {
        let sector = first as usize + i;
        fat[sector] = if i + 1 == count { ENDOFCHAIN } else { sector as u32 + 1 };
    }
}

fn put_u16(buf: &mut [u8], offset: usize, value: u16) {
    buf[offset..offset + 2].copy_from_slice(&value.to_le_bytes());
}

fn put_u32(buf: &mut [u8], offset: usize, value: u32) {
    buf[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
}

fn write_entry(
    buf: &mut [u8],
    name: &str,
    entry_type: u8,
    right: u32,
    child: u32,
    start: u32,
    size: u64,
) {
    let units: Vec<u16> = name.encode_utf16().collect();
    assert!(units.len() < 32, "directory names are limited to 31 characters");
    for (i, unit) in units.iter().enumerate() {
        put_u16(buf, i * 2, *unit);
    }
    put_u16(buf, 64, (units.len() as u16 + 1) * 2);
    buf[66] = entry_type;
    buf[67] = 1;
    put_u32(buf, 68, NOSTREAM);
    put_u32(buf, 72, right);
    put_u32(buf, 76, child);
    put_u32(buf, 116, start);
    buf[120..128].copy_from_slice(&size.to_le_bytes());
}
