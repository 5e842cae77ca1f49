//! Shared test utilities for the dropify test suite.
//!
//! Builds throwaway asset trees on disk, digs into compiled [`AssetMap`]s,
//! and parses generated object literals back into a tree so tests can check
//! what a browser would see.
//!
//! ```text
//! use crate::test_helpers::*;
//!
//! let tmp = asset_tree(&[("logo/.DS_Store", "junk")]);
//! write_asset(tmp.path(), "logo/icon.png", PNG_BYTES);
//!
//! let map = compile(&StdFilesystem, &registry, &tmp.path().join("logo"), true)?;
//! assert!(leaf(&map, "icon").starts_with("data:image/png;base64,"));
//! ```

use std::iter::Peekable;
use std::path::Path;
use std::str::Chars;
use tempfile::TempDir;

use crate::compiler::{AssetMap, AssetNode};

/// PNG-shaped bytes: signature, IHDR, IDAT, IEND for a 1x1 image.
pub const PNG_BYTES: &[u8] = &[
    0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0x00, 0x00, 0x0d, 0x49, 0x48, 0x44, 0x52,
    0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1f, 0x15, 0xc4,
    0x89, 0x00, 0x00, 0x00, 0x0d, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9c, 0x63, 0x00, 0x01, 0x00, 0x00,
    0x05, 0x00, 0x01, 0x0d, 0x0a, 0x2d, 0xb4, 0x00, 0x00, 0x00, 0x00, 0x49, 0x45, 0x4e, 0x44, 0xae,
    0x42, 0x60, 0x82,
];

// =========================================================================
// Fixture setup
// =========================================================================

/// Create a temp directory holding the given `(relative path, contents)`
/// files. Parent directories are created as needed.
pub fn asset_tree(files: &[(&str, &str)]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    for (rel, contents) in files {
        write_asset(tmp.path(), rel, contents.as_bytes());
    }
    tmp
}

pub fn write_asset(root: &Path, rel: &str, contents: &[u8]) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, contents).unwrap();
}

// =========================================================================
// Tree lookups (panic with a clear message on miss)
// =========================================================================

fn available(map: &AssetMap) -> Vec<&str> {
    map.keys().collect()
}

/// The payload of a leaf. Panics if missing or a branch.
pub fn leaf<'a>(map: &'a AssetMap, key: &str) -> &'a str {
    match map.get(key) {
        Some(AssetNode::Leaf(value)) => value.as_str(),
        Some(AssetNode::Branch(_)) => panic!("'{key}' is a branch, expected a leaf"),
        None => panic!("leaf '{key}' not found. Available: {:?}", available(map)),
    }
}

/// A nested branch. Panics if missing or a leaf.
pub fn branch<'a>(map: &'a AssetMap, key: &str) -> &'a AssetMap {
    match map.get(key) {
        Some(AssetNode::Branch(sub)) => sub,
        Some(AssetNode::Leaf(_)) => panic!("'{key}' is a leaf, expected a branch"),
        None => panic!("branch '{key}' not found. Available: {:?}", available(map)),
    }
}

// =========================================================================
// Literal parsing
// =========================================================================

/// Parse a generated object literal back into a tree.
///
/// Accepts exactly the shape the serializer emits (single-quoted keys and
/// strings, `' : '` and `, ` separators) and panics on anything else.
pub fn parse_literal(src: &str) -> AssetMap {
    let mut chars = src.chars().peekable();
    let map = parse_object(&mut chars);
    assert_eq!(chars.next(), None, "trailing input after literal");
    map
}

fn expect(chars: &mut Peekable<Chars<'_>>, expected: &str) {
    for c in expected.chars() {
        assert_eq!(chars.next(), Some(c), "expected {expected:?}");
    }
}

fn parse_object(chars: &mut Peekable<Chars<'_>>) -> AssetMap {
    expect(chars, "{");
    let mut map = AssetMap::new();
    if chars.peek() == Some(&'}') {
        chars.next();
        return map;
    }
    loop {
        let key = parse_string(chars);
        expect(chars, " : ");
        let node = if chars.peek() == Some(&'{') {
            AssetNode::Branch(parse_object(chars))
        } else {
            AssetNode::Leaf(parse_string(chars))
        };
        map.insert(key, node);
        match chars.next() {
            Some(',') => expect(chars, " "),
            Some('}') => return map,
            other => panic!("unexpected {other:?} in object literal"),
        }
    }
}

fn parse_string(chars: &mut Peekable<Chars<'_>>) -> String {
    expect(chars, "'");
    let mut out = String::new();
    loop {
        match chars.next() {
            Some('\\') => out.extend(chars.next()),
            Some('\'') => return out,
            Some(c) => out.push(c),
            None => panic!("unterminated string literal"),
        }
    }
}
