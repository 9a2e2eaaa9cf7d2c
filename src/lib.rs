//! # unspf
//!
//! A Rust listing and extraction utility for SPF flat-container archives.
//!
//! SPF archives pack a sequence of binary blobs (typically images)
//! followed by a trailing, self-describing directory table and a
//! terminating sentinel record — there is no header anywhere in the
//! file. This library locates the directory from the file's own trailing
//! bytes, scans it into an ordered entry list, and reads or extracts
//! individual entries.
//!
//! ## Features
//!
//! - Directory discovery with no stored directory offset
//! - Hardened scanning: bounded against file size, per-record validation
//! - Single-entry extraction with path-traversal protection
//! - In-memory blob reads for feeding a decoder or pipe
//!
//! ## Example
//!
//! ```no_run
//! use unspf::SpfArchive;
//!
//! fn main() -> anyhow::Result<()> {
//!     let archive = SpfArchive::open("textures.spf")?;
//!
//!     for entry in archive.entries() {
//!         println!("{}", entry.path);
//!     }
//!
//!     if let Some(entry) = archive.entries().first() {
//!         let bytes = archive.read_entry(entry)?;
//!         // hand `bytes` to an image decoder, pipe, ...
//!         let _ = bytes;
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod io;
pub mod spf;

pub use cli::Cli;
pub use io::{LocalFileReader, ReadAt};
pub use spf::{Error, Result, SpfArchive, SpfEntry, SpfExtractor, SpfParser, safe_output_path};
