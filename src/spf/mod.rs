//! SPF archive parsing and extraction.
//!
//! This module provides functionality for reading and extracting SPF
//! flat-container archives.
//!
//! ## Architecture
//!
//! The module is organized into four main components:
//!
//! - [`structures`]: the on-disk record format and the validated entry type
//! - [`parser`]: directory discovery and scanning from raw bytes
//! - [`extractor`]: blob reads and safe single-entry extraction
//! - [`reader`]: the [`SpfArchive`] facade for end users
//!
//! ## SPF Format Overview
//!
//! An SPF file has no header. It consists of:
//! 1. The data region: every entry's blob bytes, concatenated in
//!    directory order
//! 2. The directory region: one 140-byte record per entry, in the same
//!    order
//! 3. A sentinel record (offset and length both zero) as the file's
//!    final 140 bytes
//!
//! Each record holds a 128-byte null-terminated relative path followed by
//! three little-endian `i32` fields: data offset, data length, and an
//! auxiliary index that this crate carries through without interpreting.
//!
//! The directory's start is not stored anywhere. It is derived from the
//! second-to-last record (the last real entry): that entry's
//! `offset + length` is where the last blob ends and the directory
//! begins.
//!
//! ## Limitations
//!
//! - Read-only: this crate never creates or modifies archives
//! - Blobs are stored raw; there is no compression to undo
//! - No interpretation of blob contents (image decoding is the caller's
//!   concern)

mod error;
mod extractor;
mod parser;
mod reader;
mod structures;

pub use error::{Error, Result};
pub use extractor::{SpfExtractor, safe_output_path};
pub use parser::SpfParser;
pub use reader::SpfArchive;
pub use structures::{DirectoryRecord, PATH_FIELD_SIZE, RECORD_SIZE, SpfEntry};
