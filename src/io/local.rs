use super::ReadAt;
use std::io::Result;
use std::path::Path;

/// Local file reader with random access support
pub struct LocalFileReader {
    file: std::fs::File,
    size: u64,
}

impl LocalFileReader {
    pub fn new(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let size = file.metadata()?.len();
        Ok(Self { file, size })
    }
}

impl ReadAt for LocalFileReader {
    fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<usize> {
        #[cfg(unix)]
        {
            use std::os::unix::fs::FileExt;

            // pread may return short counts; keep reading until the
            // buffer is full or the file runs out.
            let mut total = 0;
            while total < buf.len() {
                let n = self.file.read_at(&mut buf[total..], offset + total as u64)?;
                if n == 0 {
                    break;
                }
                total += n;
            }
            Ok(total)
        }

        #[cfg(not(unix))]
        {
            use std::io::{Read, Seek, SeekFrom};

            let mut file = &self.file;
            file.seek(SeekFrom::Start(offset))?;

            let mut total = 0;
            while total < buf.len() {
                let n = file.read(&mut buf[total..])?;
                if n == 0 {
                    break;
                }
                total += n;
            }
            Ok(total)
        }
    }

    fn size(&self) -> u64 {
        self.size
    }
}
