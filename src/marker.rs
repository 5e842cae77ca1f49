//! Placeholder markers in the host HTML.
//!
//! A marker is an HTML comment naming a directory under the assets root:
//!
//! ```text
//! <!--Dropify:sprites-->    base64 payloads
//! <!--Dropify:sprites#-->   data: URIs
//! ```
//!
//! The name doubles as the JavaScript variable the generated script declares,
//! so it must be a plain identifier: `[a-zA-Z_$][0-9a-zA-Z_$]*`.
//!
//! ## Repeated names
//!
//! Tags are keyed by name. A name seen more than once yields one tag, placed
//! at its first occurrence, carrying the `#` flag of its *last* occurrence.
//! Substitution then only matches markers written with that flag, so with
//! mixed spellings (`<!--Dropify:x-->` … `<!--Dropify:x#-->`) the other
//! spelling stays in the output untouched.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

static MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<!--Dropify:([a-zA-Z_$][0-9a-zA-Z_$]*)(#?)-->").expect("marker pattern is valid")
});

/// A tag found in the source, before it is tied to a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedTag {
    pub name: String,
    pub as_data_uri: bool,
}

/// A tag resolved against the assets root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropifyTag {
    pub name: String,
    pub as_data_uri: bool,
    pub directory: PathBuf,
}

/// Find every distinct tag in `source`, in order of first appearance.
pub fn scan(source: &str) -> Vec<ScannedTag> {
    let mut tags: Vec<ScannedTag> = Vec::new();
    for caps in MARKER.captures_iter(source) {
        let name = &caps[1];
        let as_data_uri = !caps[2].is_empty();
        match tags.iter_mut().find(|t| t.name == name) {
            Some(existing) => existing.as_data_uri = as_data_uri,
            None => tags.push(ScannedTag {
                name: name.to_string(),
                as_data_uri,
            }),
        }
    }
    tags
}

/// Attach each tag to `root/<name>`.
pub fn resolve(root: &Path, tags: Vec<ScannedTag>) -> Vec<DropifyTag> {
    tags.into_iter()
        .map(|t| DropifyTag {
            directory: root.join(&t.name),
            name: t.name,
            as_data_uri: t.as_data_uri,
        })
        .collect()
}

/// `scan` then `resolve`.
pub fn tags_for_root(root: &Path, source: &str) -> Vec<DropifyTag> {
    resolve(root, scan(source))
}

/// The exact marker text for a tag.
pub fn marker_text(name: &str, as_data_uri: bool) -> String {
    let flag = if as_data_uri { "#" } else { "" };
    format!("<!--Dropify:{name}{flag}-->")
}

/// Replace the first occurrence of the tag's marker with `replacement`.
///
/// Matching is literal; `replacement` is inserted as-is.
pub fn substitute(source: &str, name: &str, as_data_uri: bool, replacement: &str) -> String {
    source.replacen(&marker_text(name, as_data_uri), replacement, 1)
}
