//! CLI output formatting.
//!
//! Every tag is shown as a header line followed by indented context: where
//! its assets came from, the tree of keys it produced, and anything that was
//! left out.
//!
//! ```text
//! 001 logo (2 assets, data URI)
//!     Source: assets/logo
//!     icon 1.2 KB
//!     sounds/
//!         beep 340 B
//!     Skipped: assets/logo/notes.xyz (Unknown file extension '.xyz')
//!
//! Inlined 2 assets from 1 tag, 1 skipped
//! ```
//!
//! `format_*` functions are pure and return lines; `print_*` wrappers write
//! them to stdout.

use crate::compiler::{AssetMap, AssetNode};
use crate::pipeline::{DropifyReport, TagReport};
use crate::registry::ExtensionRegistry;
use serde::Serialize;
use std::path::Path;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

/// Human-readable byte size.
fn format_size(bytes: usize) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

/// Split a leaf payload into its MIME type (data URIs only) and the base64
/// part.
fn split_payload(value: &str) -> (Option<&str>, &str) {
    value
        .strip_prefix("data:")
        .and_then(|rest| rest.split_once(";base64,"))
        .map(|(mime, b64)| (Some(mime), b64))
        .unwrap_or((None, value))
}

/// Decoded size of a base64 payload, computed from its length and padding.
fn payload_bytes(value: &str) -> usize {
    let (_, b64) = split_payload(value);
    let padding = b64.bytes().rev().take_while(|&b| b == b'=').count();
    (b64.len() / 4 * 3).saturating_sub(padding)
}

fn tag_header(index: usize, tag: &TagReport) -> String {
    let mode = if tag.tag.as_data_uri {
        ", data URI"
    } else {
        ""
    };
    format!(
        "{} {} ({}{})",
        format_index(index),
        tag.tag.name,
        plural(tag.assets.leaves().len(), "asset"),
        mode
    )
}

fn tree_lines(map: &AssetMap, depth: usize, lines: &mut Vec<String>) {
    for (key, node) in map.iter() {
        match node {
            AssetNode::Leaf(value) => lines.push(format!(
                "{}{} {}",
                indent(depth),
                key,
                format_size(payload_bytes(value))
            )),
            AssetNode::Branch(sub) => {
                lines.push(format!("{}{}/", indent(depth), key));
                tree_lines(sub, depth + 1, lines);
            }
        }
    }
}

// ============================================================================
// Build / check output
// ============================================================================

/// Format the per-tag report of a run.
pub fn format_report(report: &DropifyReport) -> Vec<String> {
    let mut lines = Vec::new();

    if report.tags.is_empty() {
        lines.push("No Dropify markers found".to_string());
        return lines;
    }

    for (i, tag) in report.tags.iter().enumerate() {
        lines.push(tag_header(i + 1, tag));
        lines.push(format!(
            "{}Source: {}",
            indent(1),
            tag.tag.directory.display()
        ));
        tree_lines(&tag.assets, 1, &mut lines);
        for skipped in &tag.skipped {
            lines.push(format!(
                "{}Skipped: {} ({})",
                indent(1),
                skipped.path.display(),
                skipped.reason
            ));
        }
    }

    lines.push(String::new());
    let mut summary = format!(
        "Inlined {} from {}",
        plural(report.asset_count(), "asset"),
        plural(report.tags.len(), "tag")
    );
    if report.skipped_count() > 0 {
        summary.push_str(&format!(", {} skipped", report.skipped_count()));
    }
    lines.push(summary);
    lines
}

pub fn print_report(report: &DropifyReport) {
    for line in format_report(report) {
        println!("{}", line);
    }
}

// ============================================================================
// JSON manifest
// ============================================================================

#[derive(Debug, Serialize)]
struct TagManifest<'a> {
    name: &'a str,
    as_data_uri: bool,
    directory: &'a Path,
    assets: Vec<AssetRecord<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    skipped: Vec<SkippedRecord<'a>>,
}

#[derive(Debug, Serialize)]
struct AssetRecord<'a> {
    key: String,
    bytes: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    mime_type: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct SkippedRecord<'a> {
    path: &'a Path,
    reason: &'a str,
}

/// Machine-readable view of a report: per tag, every asset key with its
/// decoded size. Payloads themselves are not included.
pub fn format_report_json(report: &DropifyReport) -> serde_json::Result<String> {
    let tags: Vec<TagManifest> = report
        .tags
        .iter()
        .map(|t| TagManifest {
            name: &t.tag.name,
            as_data_uri: t.tag.as_data_uri,
            directory: &t.tag.directory,
            assets: t
                .assets
                .leaves()
                .into_iter()
                .map(|(key, value)| AssetRecord {
                    key,
                    bytes: payload_bytes(value),
                    mime_type: split_payload(value).0,
                })
                .collect(),
            skipped: t
                .skipped
                .iter()
                .map(|s| SkippedRecord {
                    path: &s.path,
                    reason: &s.reason,
                })
                .collect(),
        })
        .collect();
    serde_json::to_string_pretty(&tags)
}

/// Format the extension table in effect for a run, under a counted header.
pub fn format_registry(registry: &ExtensionRegistry) -> Vec<String> {
    let mut lines = vec![format!("Extensions ({})", registry.len())];
    if registry.is_empty() {
        lines.push(format!("{}none: data-URI markers will skip every file", indent(1)));
        return lines;
    }
    lines.extend(
        registry
            .iter()
            .map(|(ext, mime)| format!("{}{} → {}", indent(1), ext, mime)),
    );
    lines
}

// ============================================================================
// Tests
// ============================================================================
