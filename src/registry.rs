//! File extension → MIME type table used for data-URI encoding.
//!
//! Extensions are stored with their leading dot (`.png`) and matched exactly,
//! so `.PNG` and `.png` are different entries. The stock table covers the
//! common web image and audio formats:
//!
//! | Extension | MIME type |
//! |-----------|-----------|
//! | `.png` | `image/png` |
//! | `.jpg` | `image/jpeg` |
//! | `.wav` | `audio/wav` |
//! | `.mp3` | `audio/mpeg3` |
//!
//! Callers extend or override the table before running the pipeline, either
//! programmatically ([`ExtensionRegistry::insert`]) or through `dropify.toml`
//! and `--mime` (see [`crate::config`]). The registry is an ordinary value
//! handed to the compiler; every encode in a run sees the same table.

use std::collections::BTreeMap;

const STOCK_MIME_TYPES: &[(&str, &str)] = &[
    (".png", "image/png"),
    (".jpg", "image/jpeg"),
    (".wav", "audio/wav"),
    (".mp3", "audio/mpeg3"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionRegistry {
    types: BTreeMap<String, String>,
}

impl ExtensionRegistry {
    /// A registry with no entries. Every data-URI encode fails against it.
    pub fn empty() -> Self {
        Self {
            types: BTreeMap::new(),
        }
    }

    /// Look up the MIME type for an extension, e.g. `".png"`.
    pub fn mime_type(&self, extension: &str) -> Option<&str> {
        self.types.get(extension).map(String::as_str)
    }

    /// Add or replace an entry. Returns the previous MIME type, if any.
    pub fn insert(
        &mut self,
        extension: impl Into<String>,
        mime_type: impl Into<String>,
    ) -> Option<String> {
        self.types.insert(extension.into(), mime_type.into())
    }

    pub fn remove(&mut self, extension: &str) -> Option<String> {
        self.types.remove(extension)
    }

    /// Apply every entry of `overrides` on top of this registry.
    pub fn extend<I, K, V>(&mut self, overrides: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (ext, mime) in overrides {
            self.insert(ext, mime);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.types.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl Default for ExtensionRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.extend(STOCK_MIME_TYPES.iter().copied());
        registry
    }
}

/// Parse a `.EXT=TYPE` command-line override.
pub fn parse_override(s: &str) -> Result<(String, String), String> {
    let (ext, mime) = s
        .split_once('=')
        .ok_or_else(|| format!("expected .EXT=TYPE, got '{s}'"))?;
    let (ext, mime) = (ext.trim(), mime.trim());
    if !ext.starts_with('.') || ext.len() < 2 {
        return Err(format!("extension must start with '.': '{ext}'"));
    }
    if !mime.contains('/') {
        return Err(format!("not a MIME type: '{mime}'"));
    }
    Ok((ext.to_string(), mime.to_string()))
}
