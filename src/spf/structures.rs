use byteorder::{LittleEndian, ReadBytesExt};
use std::io::Cursor;

use super::error::{Error, Result};

/// Width of one directory record on disk.
pub const RECORD_SIZE: usize = 140;

/// Width of the null-terminated path field inside a record.
pub const PATH_FIELD_SIZE: usize = 128;

/// Raw on-disk directory record - 140 bytes
///
/// A record whose `offset` and `length` are both zero is the sentinel
/// terminating the directory; its path and index contents are ignored.
pub struct DirectoryRecord {
    /// Null-terminated relative path, forward-slash separated
    pub path: [u8; PATH_FIELD_SIZE],
    /// Absolute byte offset of this entry's data within the archive
    pub offset: i32,
    /// Byte length of this entry's data
    pub length: i32,
    /// External ordinal, opaque to this crate
    pub index: i32,
}

impl DirectoryRecord {
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < RECORD_SIZE {
            return Err(Error::MalformedArchive {
                reason: format!("directory record needs {RECORD_SIZE} bytes, got {}", data.len()),
            });
        }

        let mut path = [0u8; PATH_FIELD_SIZE];
        path.copy_from_slice(&data[..PATH_FIELD_SIZE]);

        let mut cursor = Cursor::new(&data[PATH_FIELD_SIZE..]);

        Ok(Self {
            path,
            offset: cursor.read_i32::<LittleEndian>()?,
            length: cursor.read_i32::<LittleEndian>()?,
            index: cursor.read_i32::<LittleEndian>()?,
        })
    }

    /// Whether this record is the directory-terminating sentinel.
    pub fn is_sentinel(&self) -> bool {
        self.offset == 0 && self.length == 0
    }

    /// Path bytes up to the first null, or `None` when the field has no
    /// null terminator at all.
    pub fn path_bytes(&self) -> Option<&[u8]> {
        self.path
            .iter()
            .position(|&b| b == 0)
            .map(|end| &self.path[..end])
    }
}

/// Validated SPF entry information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpfEntry {
    /// Relative path embedded in the archive, forward-slash separated
    pub path: String,
    /// Absolute byte offset of the blob within the archive
    pub offset: u64,
    /// Byte length of the blob
    pub length: u64,
    /// Auxiliary ordinal carried through from the record, never
    /// interpreted by this crate
    pub index: i32,
}
