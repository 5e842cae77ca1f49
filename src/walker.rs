//! One-level directory listing, split into files and subdirectories.
//!
//! The walker never recurses; [`crate::compiler`] drives recursion. Listing
//! order from the filesystem is kept as-is within each group.
//!
//! ## Hidden entries
//!
//! Any entry whose name starts with `.` is dropped before it is even
//! stat'ed: `.DS_Store`, `.git/`, editor swap files and the like never reach
//! the asset tree.
//!
//! ## Naming
//!
//! - Files: name with the extension removed (`icon.png` → `icon`,
//!   `archive.tar.gz` → `archive.tar`, `README` → `README`)
//! - Directories: the bare directory name (`sprites.v2` stays `sprites.v2`)

use crate::fs::Filesystem;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WalkError {
    #[error("cannot read directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// An immediate child of a listed directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub path: PathBuf,
    pub name: String,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DirectoryListing {
    pub files: Vec<DirectoryEntry>,
    pub directories: Vec<DirectoryEntry>,
}

pub fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

/// Strip the extension from a file name: everything from the last `.`,
/// unless that dot is the first character.
pub fn file_key(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(0) | None => file_name,
        Some(pos) => &file_name[..pos],
    }
}

/// List the visible children of `dir`.
///
/// Fails only when `dir` itself cannot be listed. Entries that fail to stat
/// are skipped.
pub fn list(fs: &impl Filesystem, dir: &Path) -> Result<DirectoryListing, WalkError> {
    let names = fs.read_dir(dir).map_err(|source| WalkError::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut listing = DirectoryListing::default();
    for name in names {
        if is_hidden(&name) {
            continue;
        }
        let path = dir.join(&name);
        let Ok(stat) = fs.stat(&path) else {
            continue;
        };
        if stat.is_dir {
            listing.directories.push(DirectoryEntry { path, name });
        } else {
            let key = file_key(&name).to_string();
            listing.files.push(DirectoryEntry { path, name: key });
        }
    }
    Ok(listing)
}
