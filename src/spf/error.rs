//! Error types for SPF archive operations.

use std::path::PathBuf;
use thiserror::Error;

/// Error type for opening, scanning and extracting SPF archives.
///
/// Directory errors (`MalformedArchive` through `InvalidEntryRange`) abort
/// the whole open; per-entry errors (`ShortRead`, `UnsafeEntryPath`) are
/// scoped to the one requested entry and leave an already-built listing
/// intact.
#[derive(Debug, Error)]
pub enum Error {
    /// The archive path does not exist.
    #[error("archive not found: {path}")]
    NotFound { path: PathBuf },

    /// The archive path exists but is a directory or special file.
    #[error("not a regular file: {path}")]
    NotARegularFile { path: PathBuf },

    /// The archive path does not carry a `.spf` extension.
    #[error("not an .spf archive: {path}")]
    WrongExtension { path: PathBuf },

    /// The file is too short to hold even one entry plus the sentinel,
    /// or its trailing record points nowhere sensible.
    #[error("malformed archive: {reason}")]
    MalformedArchive { reason: String },

    /// The directory scan ran past end-of-file without seeing a sentinel.
    #[error("directory truncated: no sentinel before end of file (scan reached offset {offset})")]
    TruncatedDirectory { offset: u64 },

    /// A directory record's path field has no null terminator.
    #[error("entry path at directory offset {offset} has no null terminator")]
    InvalidEntryPath { offset: u64 },

    /// A directory record declares a byte range outside the file.
    #[error("entry {path:?} declares invalid data range (offset {offset}, length {length})")]
    InvalidEntryRange {
        path: String,
        offset: i64,
        length: i64,
    },

    /// Fewer blob bytes were available than the directory declared.
    #[error("short read for entry {path:?}: wanted {expected} bytes, got {actual}")]
    ShortRead {
        path: String,
        expected: u64,
        actual: u64,
    },

    /// An entry's embedded path would escape the extraction root.
    #[error("entry path {path:?} escapes the extraction root")]
    UnsafeEntryPath { path: String },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using the SPF error type.
pub type Result<T> = std::result::Result<T, Error>;
