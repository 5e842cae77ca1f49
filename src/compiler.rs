//! Recursive directory → asset tree compilation.
//!
//! A directory becomes an [`AssetMap`]: each visible file becomes a
//! [`AssetNode::Leaf`] keyed by its extension-less name, each visible
//! subdirectory a nested [`AssetNode::Branch`].
//!
//! ```text
//! assets/game/                 {
//! ├── logo.png                   'logo' : 'data:image/png;base64,...',
//! ├── notes.xyz        ──►       'sounds' : {
//! └── sounds/                        'beep' : 'data:audio/wav;base64,...'
//!     └── beep.wav                 }
//!                              }
//! ```
//!
//! ## Best-effort policy
//!
//! Only the top-level directory has to be readable. Below that, anything
//! that cannot be produced is left out of the tree and recorded as a
//! [`SkippedEntry`] instead:
//!
//! - a file with an unregistered extension (data-URI mode), like `notes.xyz` above
//! - a file that cannot be read
//! - a subdirectory that cannot be listed
//!
//! ## Ordering
//!
//! Files are inserted before subdirectories, each group in listing order.
//! Everything is strictly sequential: one entry is fully handled before the
//! next is touched, so the same filesystem state always yields the same key
//! order.

use crate::encoder;
use crate::fs::Filesystem;
use crate::registry::ExtensionRegistry;
use crate::walker::{self, DirectoryEntry, WalkError};
use indexmap::IndexMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetNode {
    Leaf(String),
    Branch(AssetMap),
}

/// Insertion-ordered map of asset names to nodes.
///
/// Re-inserting an existing key replaces its value in place, keeping the
/// key's original position. Equality compares contents and ignores order;
/// compare [`AssetMap::keys`] when order matters.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AssetMap {
    entries: IndexMap<String, AssetNode>,
}

impl AssetMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, node: AssetNode) {
        self.entries.insert(key.into(), node);
    }

    pub fn get(&self, key: &str) -> Option<&AssetNode> {
        self.entries.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AssetNode)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every leaf in the tree, depth-first, keyed by its dotted path
    /// (`sounds.beep`).
    pub fn leaves(&self) -> Vec<(String, &str)> {
        let mut out = Vec::new();
        collect_leaves(self, "", &mut out);
        out
    }
}

fn collect_leaves<'a>(map: &'a AssetMap, prefix: &str, out: &mut Vec<(String, &'a str)>) {
    for (key, node) in map.iter() {
        let path = if prefix.is_empty() {
            key.to_string()
        } else {
            format!("{prefix}.{key}")
        };
        match node {
            AssetNode::Leaf(value) => out.push((path, value.as_str())),
            AssetNode::Branch(sub) => collect_leaves(sub, &path, out),
        }
    }
}

/// An entry left out of the tree, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    pub path: PathBuf,
    pub reason: String,
}

/// Compiles directories against one filesystem and one extension registry,
/// remembering everything it had to skip along the way.
pub struct TreeCompiler<'a, F: Filesystem> {
    fs: &'a F,
    registry: &'a ExtensionRegistry,
    skipped: Vec<SkippedEntry>,
}

impl<'a, F: Filesystem> TreeCompiler<'a, F> {
    pub fn new(fs: &'a F, registry: &'a ExtensionRegistry) -> Self {
        Self {
            fs,
            registry,
            skipped: Vec::new(),
        }
    }

    /// Compile `dir` into an asset tree.
    ///
    /// Fails only if `dir` itself cannot be listed. A subdirectory that lists
    /// fine but yields nothing is still kept, as an empty branch (`{}`).
    pub fn compile(&mut self, dir: &Path, as_data_uri: bool) -> Result<AssetMap, WalkError> {
        let listing = walker::list(self.fs, dir)?;
        let mut map = AssetMap::new();

        for file in &listing.files {
            if let Some(value) = self.encode_file(file, as_data_uri) {
                map.insert(file.name.clone(), AssetNode::Leaf(value));
            }
        }

        for subdir in &listing.directories {
            if let Some(branch) = self.compile_subdirectory(subdir, as_data_uri) {
                map.insert(subdir.name.clone(), AssetNode::Branch(branch));
            }
        }

        Ok(map)
    }

    fn encode_file(&mut self, file: &DirectoryEntry, as_data_uri: bool) -> Option<String> {
        match encoder::encode(self.fs, self.registry, &file.path, as_data_uri) {
            Ok(value) => Some(value),
            Err(err) => {
                self.skip(&file.path, err.to_string());
                None
            }
        }
    }

    fn compile_subdirectory(
        &mut self,
        subdir: &DirectoryEntry,
        as_data_uri: bool,
    ) -> Option<AssetMap> {
        match self.compile(&subdir.path, as_data_uri) {
            Ok(branch) => Some(branch),
            Err(err) => {
                self.skip(&subdir.path, err.to_string());
                None
            }
        }
    }

    fn skip(&mut self, path: &Path, reason: String) {
        self.skipped.push(SkippedEntry {
            path: path.to_path_buf(),
            reason,
        });
    }

    pub fn into_skipped(self) -> Vec<SkippedEntry> {
        self.skipped
    }
}

/// Compile `dir` without keeping the skip log.
pub fn compile(
    fs: &impl Filesystem,
    registry: &ExtensionRegistry,
    dir: &Path,
    as_data_uri: bool,
) -> Result<AssetMap, WalkError> {
    TreeCompiler::new(fs, registry).compile(dir, as_data_uri)
}
