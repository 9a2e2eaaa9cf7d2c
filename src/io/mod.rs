mod local;

pub use local::LocalFileReader;

use std::io::Result;

/// Trait for random access reading from an archive source
pub trait ReadAt {
    /// Read data at the specified offset into the buffer.
    ///
    /// Fills as much of the buffer as the source allows; a count shorter
    /// than the buffer means the end of the source was reached.
    fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<usize>;

    /// Get the total size of the data source
    fn size(&self) -> u64;
}
