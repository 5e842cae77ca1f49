//! The end-to-end `dropify` operation.
//!
//! ```text
//! input.html ──scan/resolve──► tags ──compile──► AssetMap ──serialize──► <script>
//!                                                                           │
//! output.html ◄───────────────────── substitute into accumulated HTML ◄─────┘
//! ```
//!
//! Tags are handled one at a time in discovery order. If any tag's directory
//! cannot be listed the whole run fails and nothing is written; the output
//! file is only touched after every tag has been rendered.

use crate::compiler::{AssetMap, SkippedEntry, TreeCompiler};
use crate::fs::{Filesystem, StdFilesystem};
use crate::literal;
use crate::marker::{self, DropifyTag};
use crate::registry::ExtensionRegistry;
use crate::walker::WalkError;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DropifyError {
    #[error("cannot read {path}: {source}")]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot write {path}: {source}")]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Dropify tag '{tag}': {source}")]
    Compile {
        tag: String,
        #[source]
        source: WalkError,
    },
}

/// What one tag produced.
#[derive(Debug, Clone)]
pub struct TagReport {
    pub tag: DropifyTag,
    pub assets: AssetMap,
    pub skipped: Vec<SkippedEntry>,
}

#[derive(Debug, Clone, Default)]
pub struct DropifyReport {
    pub tags: Vec<TagReport>,
}

impl DropifyReport {
    pub fn asset_count(&self) -> usize {
        self.tags.iter().map(|t| t.assets.leaves().len()).sum()
    }

    pub fn skipped_count(&self) -> usize {
        self.tags.iter().map(|t| t.skipped.len()).sum()
    }
}

/// Substitute every tag in `source`, returning the new HTML and a report.
///
/// Pure apart from reading the asset directories through `fs`.
pub fn render(
    fs: &impl Filesystem,
    registry: &ExtensionRegistry,
    assets_root: &Path,
    source: &str,
) -> Result<(String, DropifyReport), DropifyError> {
    let mut html = source.to_string();
    let mut report = DropifyReport::default();

    for tag in marker::tags_for_root(assets_root, source) {
        let mut compiler = TreeCompiler::new(fs, registry);
        let assets = compiler
            .compile(&tag.directory, tag.as_data_uri)
            .map_err(|err| DropifyError::Compile {
                tag: tag.name.clone(),
                source: err,
            })?;

        let script = literal::script_tag(&tag.name, &literal::serialize(&assets));
        html = marker::substitute(&html, &tag.name, tag.as_data_uri, &script);

        report.tags.push(TagReport {
            tag,
            assets,
            skipped: compiler.into_skipped(),
        });
    }

    Ok((html, report))
}

/// Read the host HTML, naming `input` in the error if that fails.
pub fn read_input(fs: &impl Filesystem, input: &Path) -> Result<String, DropifyError> {
    fs.read_to_string(input)
        .map_err(|source| DropifyError::ReadInput {
            path: input.to_path_buf(),
            source,
        })
}

/// Read `input`, inline every tag's assets from `assets_root`, write `output`.
pub fn dropify_with_fs(
    fs: &impl Filesystem,
    registry: &ExtensionRegistry,
    assets_root: &Path,
    input: &Path,
    output: &Path,
) -> Result<DropifyReport, DropifyError> {
    let source = read_input(fs, input)?;

    let (html, report) = render(fs, registry, assets_root, &source)?;

    fs.write_file(output, &html)
        .map_err(|source| DropifyError::WriteOutput {
            path: output.to_path_buf(),
            source,
        })?;

    Ok(report)
}

/// [`dropify_with_fs`] on the real filesystem.
pub fn dropify(
    registry: &ExtensionRegistry,
    assets_root: &Path,
    input: &Path,
    output: &Path,
) -> Result<DropifyReport, DropifyError> {
    dropify_with_fs(&StdFilesystem, registry, assets_root, input, output)
}
