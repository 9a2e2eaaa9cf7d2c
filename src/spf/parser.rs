//! Low-level SPF archive parser.
//!
//! This module handles the binary parsing of SPF directory structures,
//! reading from any source that implements the [`ReadAt`] trait.
//!
//! ## Parsing Strategy
//!
//! SPF files carry no header; they are read from the end:
//! 1. Read the second-to-last 140-byte record slot — the last slot is
//!    always the sentinel, so the one before it is the last real entry.
//! 2. That entry's `offset + length` is where its blob ends, and the
//!    directory region begins immediately after the last blob.
//! 3. Scan 140-byte records forward from there until the sentinel.
//!
//! There is no stored directory offset anywhere in the file; the trailing
//! record is the sole way to find the directory.

use std::sync::Arc;

use crate::io::ReadAt;

use super::error::{Error, Result};
use super::structures::{DirectoryRecord, RECORD_SIZE, SpfEntry};

/// Low-level SPF directory parser.
///
/// Locates and scans the trailing directory of an SPF archive. Generic
/// over the reader type so the same logic serves real files and
/// in-memory sources.
///
/// Typically used through [`SpfArchive`](super::SpfArchive) rather than
/// directly.
pub struct SpfParser<R: ReadAt> {
    /// The underlying data source
    reader: Arc<R>,
    /// Total size of the archive in bytes
    size: u64,
}

impl<R: ReadAt> SpfParser<R> {
    /// Create a new parser for the given reader.
    pub fn new(reader: Arc<R>) -> Self {
        let size = reader.size();
        Self { reader, size }
    }

    /// Compute the byte offset where the directory region begins.
    ///
    /// Reads the record at `size - 280` (the last real entry; the final
    /// 140 bytes are the sentinel) and returns its `offset + length`.
    /// In a conforming archive the last blob ends exactly where the
    /// directory starts.
    ///
    /// A zero-entry archive has an all-zero record in that slot, which
    /// computes to a start the scanner immediately recognizes as the
    /// sentinel — callers get an empty entry list, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedArchive`] if the file is too short to
    /// hold one record plus the sentinel, or if the trailing record
    /// points outside the file.
    pub fn find_directory_start(&self) -> Result<u64> {
        let min_size = 2 * RECORD_SIZE as u64;
        if self.size < min_size {
            return Err(Error::MalformedArchive {
                reason: format!(
                    "file is {} bytes, need at least {min_size} for one record plus the sentinel",
                    self.size
                ),
            });
        }

        let record = self.read_record(self.size - min_size)?;

        let start = record.offset as i64 + record.length as i64;
        if start < 0 || start as u64 > self.size - RECORD_SIZE as u64 {
            return Err(Error::MalformedArchive {
                reason: format!("trailing record points at directory start {start}"),
            });
        }

        Ok(start as u64)
    }

    /// Scan the directory region starting at `start`.
    ///
    /// Reads 140-byte records until the sentinel (offset and length both
    /// zero; path and index contents are ignored when detecting it). The
    /// sentinel itself is excluded from the result. Entries come back in
    /// on-disk order.
    ///
    /// Every read is bounded against the file size, so a corrupt archive
    /// with no sentinel terminates with an error instead of running off
    /// the end of the file.
    ///
    /// # Errors
    ///
    /// * [`Error::TruncatedDirectory`] — end of file reached before a
    ///   sentinel.
    /// * [`Error::InvalidEntryPath`] — a record's path field has no null
    ///   terminator.
    /// * [`Error::InvalidEntryRange`] — a record declares a negative or
    ///   out-of-file byte range.
    ///
    /// Any invalid record aborts the whole scan; a partially-valid
    /// directory is never returned.
    pub fn scan(&self, start: u64) -> Result<Vec<SpfEntry>> {
        let mut entries = Vec::new();
        let mut pos = start;

        loop {
            if pos + RECORD_SIZE as u64 > self.size {
                return Err(Error::TruncatedDirectory { offset: pos });
            }

            let record = self.read_record(pos)?;
            if record.is_sentinel() {
                break;
            }

            entries.push(self.validate_record(record, pos)?);
            pos += RECORD_SIZE as u64;
        }

        Ok(entries)
    }

    /// List all entries in the archive: locate the directory, then scan it.
    pub fn list_entries(&self) -> Result<Vec<SpfEntry>> {
        let start = self.find_directory_start()?;
        self.scan(start)
    }

    /// Get a reference to the underlying reader.
    pub fn reader(&self) -> &Arc<R> {
        &self.reader
    }

    /// Total size of the archive in bytes.
    pub fn size(&self) -> u64 {
        self.size
    }

    fn read_record(&self, offset: u64) -> Result<DirectoryRecord> {
        let mut buf = [0u8; RECORD_SIZE];
        let n = self.reader.read_at(offset, &mut buf)?;
        if n < RECORD_SIZE {
            // The file shrank between the size check and the read.
            return Err(Error::TruncatedDirectory { offset });
        }
        DirectoryRecord::from_bytes(&buf)
    }

    /// Turn a raw record into a validated entry.
    fn validate_record(&self, record: DirectoryRecord, pos: u64) -> Result<SpfEntry> {
        let Some(path_bytes) = record.path_bytes() else {
            return Err(Error::InvalidEntryPath { offset: pos });
        };
        let path = String::from_utf8_lossy(path_bytes).to_string();

        let offset = record.offset as i64;
        let length = record.length as i64;
        if offset < 0 || length < 0 || (offset + length) as u64 > self.size {
            return Err(Error::InvalidEntryRange {
                path,
                offset,
                length,
            });
        }

        Ok(SpfEntry {
            path,
            offset: offset as u64,
            length: length as u64,
            index: record.index,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spf::structures::PATH_FIELD_SIZE;
    use byteorder::{LittleEndian, WriteBytesExt};

    /// In-memory archive source for exercising the parser without disk.
    struct MemReader(Vec<u8>);

    impl ReadAt for MemReader {
        fn read_at(&self, offset: u64, buf: &mut [u8]) -> std::io::Result<usize> {
            let start = (offset as usize).min(self.0.len());
            let end = (start + buf.len()).min(self.0.len());
            buf[..end - start].copy_from_slice(&self.0[start..end]);
            Ok(end - start)
        }

        fn size(&self) -> u64 {
            self.0.len() as u64
        }
    }

    fn parser(bytes: Vec<u8>) -> SpfParser<MemReader> {
        SpfParser::new(Arc::new(MemReader(bytes)))
    }

    fn record(path: &[u8], offset: i32, length: i32, index: i32) -> Vec<u8> {
        let mut buf = vec![0u8; RECORD_SIZE];
        buf[..path.len()].copy_from_slice(path);
        let mut tail = &mut buf[PATH_FIELD_SIZE..];
        tail.write_i32::<LittleEndian>(offset).unwrap();
        tail.write_i32::<LittleEndian>(length).unwrap();
        tail.write_i32::<LittleEndian>(index).unwrap();
        buf
    }

    /// Build a conforming archive: blobs, matching records, sentinel.
    fn build_archive(entries: &[(&str, &[u8], i32)]) -> Vec<u8> {
        let mut blobs = Vec::new();
        let mut records = Vec::new();
        for (path, blob, index) in entries {
            records.push(record(
                path.as_bytes(),
                blobs.len() as i32,
                blob.len() as i32,
                *index,
            ));
            blobs.extend_from_slice(blob);
        }

        let mut archive = blobs;
        for r in records {
            archive.extend_from_slice(&r);
        }
        archive.extend_from_slice(&[0u8; RECORD_SIZE]); // sentinel
        archive
    }

    #[test]
    fn round_trip_preserves_entries() {
        let p = parser(build_archive(&[
            ("tex/a.png", b"aaaa", 0),
            ("tex/b.png", b"bb", 7),
            ("c.png", b"", -1),
        ]));

        let entries = p.list_entries().unwrap();
        assert_eq!(entries.len(), 3);

        assert_eq!(entries[0].path, "tex/a.png");
        assert_eq!((entries[0].offset, entries[0].length), (0, 4));
        assert_eq!(entries[0].index, 0);

        assert_eq!(entries[1].path, "tex/b.png");
        assert_eq!((entries[1].offset, entries[1].length), (4, 2));
        assert_eq!(entries[1].index, 7);

        assert_eq!(entries[2].path, "c.png");
        assert_eq!((entries[2].offset, entries[2].length), (6, 0));
        assert_eq!(entries[2].index, -1);
    }

    #[test]
    fn directory_start_matches_first_record() {
        let entries: &[(&str, &[u8], i32)] =
            &[("a", b"12345", 1), ("b", b"", 2), ("c", b"678", 3)];
        let p = parser(build_archive(entries));

        // The directory begins right after the concatenated blobs.
        let blob_total: u64 = entries.iter().map(|(_, b, _)| b.len() as u64).sum();
        assert_eq!(p.find_directory_start().unwrap(), blob_total);
    }

    #[test]
    fn empty_archive_lists_no_entries() {
        // Zero real entries: an all-zero record slot followed by the
        // sentinel. The locator computes start 0, where the scanner
        // immediately sees a sentinel.
        let p = parser(vec![0u8; 2 * RECORD_SIZE]);
        assert_eq!(p.list_entries().unwrap(), vec![]);
    }

    #[test]
    fn too_short_file_is_malformed() {
        let p = parser(vec![0u8; RECORD_SIZE]);
        assert!(matches!(
            p.list_entries(),
            Err(Error::MalformedArchive { .. })
        ));
    }

    #[test]
    fn missing_sentinel_is_truncated_directory() {
        let mut bytes = build_archive(&[("a", b"123", 0), ("b", b"", 0)]);
        bytes.truncate(bytes.len() - RECORD_SIZE); // drop the sentinel

        let p = parser(bytes);
        assert!(matches!(
            p.list_entries(),
            Err(Error::TruncatedDirectory { .. })
        ));
    }

    #[test]
    fn path_without_null_terminator_is_rejected() {
        let mut bytes = b"x".to_vec();
        bytes.extend_from_slice(&record(&[b'x'; PATH_FIELD_SIZE], 0, 1, 0));
        bytes.extend_from_slice(&[0u8; RECORD_SIZE]);

        let p = parser(bytes);
        assert!(matches!(
            p.list_entries(),
            Err(Error::InvalidEntryPath { offset: 1 })
        ));
    }

    #[test]
    fn range_past_end_of_file_is_rejected() {
        // A bad record in a non-trailing slot, so the locator still
        // finds the directory via the valid last entry.
        let mut bytes = b"hi".to_vec();
        bytes.extend_from_slice(&record(b"bad", 0, 100_000, 0));
        bytes.extend_from_slice(&record(b"ok", 0, 2, 0));
        bytes.extend_from_slice(&[0u8; RECORD_SIZE]);

        let p = parser(bytes);
        match p.list_entries() {
            Err(Error::InvalidEntryRange { path, length, .. }) => {
                assert_eq!(path, "bad");
                assert_eq!(length, 100_000);
            }
            other => panic!("expected InvalidEntryRange, got {other:?}"),
        }
    }

    #[test]
    fn negative_length_is_rejected() {
        let mut bytes = b"hi".to_vec();
        bytes.extend_from_slice(&record(b"bad", 1, -1, 0));
        bytes.extend_from_slice(&record(b"ok", 0, 2, 0));
        bytes.extend_from_slice(&[0u8; RECORD_SIZE]);

        let p = parser(bytes);
        assert!(matches!(
            p.list_entries(),
            Err(Error::InvalidEntryRange { .. })
        ));
    }

    #[test]
    fn sentinel_detection_ignores_path_and_index() {
        let mut bytes = build_archive(&[("a", b"123", 0)]);
        bytes.truncate(bytes.len() - RECORD_SIZE);
        // Sentinel with junk in the path and index fields.
        bytes.extend_from_slice(&record(b"junk", 0, 0, 42));

        let p = parser(bytes);
        let entries = p.list_entries().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].path, "a");
    }
}
