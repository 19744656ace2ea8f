/// Magic bytes at the beginning of every OLE compound file
pub const MAGIC: &[u8; 8] = b"\xD0\xCF\x11\xE0\xA1\xB1\x1A\xE1";

/// Minimal size of an OLE file with 512-byte sectors: header, one FAT sector, one directory sector
pub const MINIMAL_OLEFILE_SIZE: usize = 1536;

/// Size of the header in bytes
pub const HEADER_SIZE: usize = 512;

/// Size of a directory entry in bytes
pub const DIRENTRY_SIZE: usize = 128;

/// Number of FAT sector indexes stored in the header
pub const HEADER_DIFAT_ENTRIES: usize = 109;

/// Byte order mark stored in the header (little-endian)
pub const BYTE_ORDER_LE: u16 = 0xFFFE;

/// End of a sector chain
pub const ENDOFCHAIN: u32 = 0xFFFFFFFE;
/// Unallocated sector
pub const FREESECT: u32 = 0xFFFFFFFF;
/// Sector holding FAT entries
pub const FATSECT: u32 = 0xFFFFFFFD;

/// Absent directory sibling or child
pub const NOSTREAM: u32 = 0xFFFFFFFF;

/// Storage directory entry
pub const STGTY_STORAGE: u8 = 1;
/// Stream directory entry
pub const STGTY_STREAM: u8 = 2;
/// Root storage directory entry
pub const STGTY_ROOT: u8 = 5;
