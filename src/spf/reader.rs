use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::io::LocalFileReader;

use super::error::{Error, Result};
use super::extractor::SpfExtractor;
use super::structures::SpfEntry;

/// An opened SPF archive with its scanned entry list.
///
/// `SpfArchive` owns the entry list for exactly one archive path; opening
/// another path means constructing another value, so multiple archives
/// can coexist and nothing is shared behind the caller's back. Opening
/// is side-effect free and idempotent — re-opening the same path simply
/// re-reads the directory.
///
/// Any failure during open yields an error and no archive value at all;
/// a partially populated listing is never observable. Per-entry
/// operations ([`read_entry`](Self::read_entry),
/// [`extract`](Self::extract)) fail on their own without invalidating
/// the cached listing.
///
/// The value is immutable after open and safe to share for concurrent
/// reads, as long as no other process rewrites the archive file
/// underneath it (in which case a later [`Error::ShortRead`] is the
/// expected outcome, not a bug).
pub struct SpfArchive {
    path: PathBuf,
    extractor: SpfExtractor<LocalFileReader>,
    entries: Vec<SpfEntry>,
}

impl SpfArchive {
    /// Open an SPF archive and scan its directory.
    ///
    /// Validates the path before touching the contents: it must exist
    /// ([`Error::NotFound`]), be a regular file
    /// ([`Error::NotARegularFile`]) and carry a case-insensitive `.spf`
    /// extension ([`Error::WrongExtension`]). Directory errors from the
    /// scan propagate as-is.
    ///
    /// A zero-entry archive opens successfully with an empty entry list.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(Error::NotFound {
                path: path.to_path_buf(),
            });
        }
        // On Linux, File::open happily opens directories; the metadata
        // check is a must.
        if !fs::metadata(path)?.is_file() {
            return Err(Error::NotARegularFile {
                path: path.to_path_buf(),
            });
        }
        let is_spf = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("spf"));
        if !is_spf {
            return Err(Error::WrongExtension {
                path: path.to_path_buf(),
            });
        }

        let reader = Arc::new(LocalFileReader::new(path)?);
        let extractor = SpfExtractor::new(reader);
        let entries = extractor.list_entries()?;

        Ok(Self {
            path: path.to_path_buf(),
            extractor,
            entries,
        })
    }

    /// The archive path this value was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Entries in on-disk (declaration) order.
    pub fn entries(&self) -> &[SpfEntry] {
        &self.entries
    }

    /// Number of entries in the archive.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the archive holds zero entries — a valid, distinguished
    /// state, not an error.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Read one entry's blob into memory.
    pub fn read_entry(&self, entry: &SpfEntry) -> Result<Vec<u8>> {
        self.extractor.read_to_memory(entry)
    }

    /// Extract one entry to disk under `dest_root`.
    pub fn extract(&self, entry: &SpfEntry, dest_root: &Path) -> Result<()> {
        self.extractor.extract_to_file(entry, dest_root)
    }

    /// Write one entry's raw bytes to stdout.
    pub fn extract_to_stdout(&self, entry: &SpfEntry) -> Result<()> {
        self.extractor.extract_to_stdout(entry)
    }
}
