//! Filesystem access used by the pipeline.
//!
//! The [`Filesystem`] trait is the only way the walker, encoder, and pipeline
//! touch storage: list a directory, stat an entry, read a file, write a file.
//! [`StdFilesystem`] is the production implementation on top of `std::fs`;
//! tests substitute an in-memory mock to exercise ordering and failure paths
//! that are awkward to reproduce on a real disk.

use std::io;
use std::path::Path;

/// What a stat call reports about an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryStat {
    pub is_dir: bool,
}

pub trait Filesystem {
    /// Names of the immediate children of `path`, in listing order.
    fn read_dir(&self, path: &Path) -> io::Result<Vec<String>>;

    /// Stat an entry, following symlinks.
    fn stat(&self, path: &Path) -> io::Result<EntryStat>;

    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>>;

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        let bytes = self.read_file(path)?;
        String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    fn write_file(&self, path: &Path, contents: &str) -> io::Result<()>;
}

/// `std::fs`-backed filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdFilesystem;

impl Filesystem for StdFilesystem {
    fn read_dir(&self, path: &Path) -> io::Result<Vec<String>> {
        // Entries that fail mid-listing are dropped, not fatal.
        Ok(std::fs::read_dir(path)?
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect())
    }

    fn stat(&self, path: &Path) -> io::Result<EntryStat> {
        let meta = std::fs::metadata(path)?;
        Ok(EntryStat {
            is_dir: meta.is_dir(),
        })
    }

    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }

    fn write_file(&self, path: &Path, contents: &str) -> io::Result<()> {
        std::fs::write(path, contents)
    }
}
