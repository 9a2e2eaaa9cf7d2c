use std::fs;
use std::io::Write;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use crate::io::ReadAt;

use super::error::{Error, Result};
use super::parser::SpfParser;
use super::structures::SpfEntry;

/// Join an entry's embedded relative path under a destination root.
///
/// Every path component must be a normal segment; parent-traversal
/// segments, current-dir segments, root dirs and prefixes are rejected so
/// a hostile archive cannot write outside the destination tree.
///
/// # Errors
///
/// Returns [`Error::UnsafeEntryPath`] for an empty path or one containing
/// a non-normal component.
pub fn safe_output_path(entry: &SpfEntry, dest_root: &Path) -> Result<PathBuf> {
    let relative = Path::new(&entry.path);

    if relative.as_os_str().is_empty() {
        return Err(Error::UnsafeEntryPath {
            path: entry.path.clone(),
        });
    }
    if relative
        .components()
        .any(|c| !matches!(c, Component::Normal(_)))
    {
        return Err(Error::UnsafeEntryPath {
            path: entry.path.clone(),
        });
    }

    Ok(dest_root.join(relative))
}

/// SPF blob reader and entry extractor
pub struct SpfExtractor<R: ReadAt> {
    parser: SpfParser<R>,
}

impl<R: ReadAt> SpfExtractor<R> {
    pub fn new(reader: Arc<R>) -> Self {
        Self {
            parser: SpfParser::new(reader),
        }
    }

    /// List all entries in the archive
    pub fn list_entries(&self) -> Result<Vec<SpfEntry>> {
        self.parser.list_entries()
    }

    /// Read an entry's blob into memory.
    ///
    /// Reads exactly `entry.length` bytes at `entry.offset`. The archive
    /// is not assumed immutable between scan and read: if it was
    /// truncated or rewritten in the meantime and fewer bytes are
    /// available, this fails with [`Error::ShortRead`] instead of
    /// returning a silently padded buffer.
    pub fn read_to_memory(&self, entry: &SpfEntry) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; entry.length as usize];
        let n = self.parser.reader().read_at(entry.offset, &mut buf)? as u64;
        if n < entry.length {
            return Err(Error::ShortRead {
                path: entry.path.clone(),
                expected: entry.length,
                actual: n,
            });
        }

        Ok(buf)
    }

    /// Extract an entry to disk under `dest_root`.
    ///
    /// The output location is the entry's embedded relative path joined
    /// under the root (see [`safe_output_path`]). Parent directories are
    /// created as needed; an existing file at the output path is fully
    /// overwritten. Not transactional: a failure mid-write may leave a
    /// partial destination file behind.
    pub fn extract_to_file(&self, entry: &SpfEntry, dest_root: &Path) -> Result<()> {
        let output_path = safe_output_path(entry, dest_root)?;

        // Create parent directories if needed
        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let data = self.read_to_memory(entry)?;

        let mut file = fs::File::create(&output_path)?;
        file.write_all(&data)?;

        Ok(())
    }

    /// Extract an entry's raw bytes to stdout
    pub fn extract_to_stdout(&self, entry: &SpfEntry) -> Result<()> {
        let data = self.read_to_memory(entry)?;

        let mut stdout = std::io::stdout();
        stdout.write_all(&data)?;

        Ok(())
    }
}
