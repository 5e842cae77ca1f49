//! # Dropify
//!
//! Inline a directory of assets into an HTML page. Each placeholder comment
//! in the page names a directory under an assets root; dropify replaces it
//! with one `<script>` element declaring a JavaScript object whose shape
//! mirrors the directory tree and whose leaves are the files' contents,
//! base64-encoded.
//!
//! ```text
//! assets/                                 index.html
//! └── logo/                               <div><!--Dropify:logo#--></div>
//!     ├── icon.png                                      │
//!     └── sounds/                                       ▼
//!         └── beep.wav      <div><script type='text/javascript'> var logo =
//!                             {'icon' : 'data:image/png;base64,iVBO...',
//!                              'sounds' : {'beep' : 'data:audio/wav;base64,UklG...'}};
//!                           </script></div>
//! ```
//!
//! A trailing `#` in the marker asks for `data:` URIs (usable directly as an
//! `src`); without it leaves are bare base64.
//!
//! # Pipeline
//!
//! ```text
//! 1. Scan      HTML text   →  tags           (marker comments → names + flags)
//! 2. Compile   tag dir     →  AssetMap       (recursive walk + encode)
//! 3. Render    AssetMap    →  <script>       (object literal)
//! 4. Replace   script      →  HTML text      (first matching marker)
//! ```
//!
//! Tags are processed one after another in the order they first appear, and
//! each directory is walked entry by entry. Nothing runs in parallel: the
//! same input tree always produces byte-identical output.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`registry`] | Extension → MIME type table for data URIs |
//! | [`fs`] | Filesystem trait and its `std::fs` implementation |
//! | [`walker`] | One-level directory listing, hidden entries dropped |
//! | [`encoder`] | File → base64 / data URI |
//! | [`compiler`] | Directory → [`compiler::AssetMap`] tree |
//! | [`literal`] | Asset tree → JavaScript object literal and script tag |
//! | [`marker`] | Marker scanning and substitution in HTML text |
//! | [`pipeline`] | The end-to-end [`pipeline::dropify`] operation |
//! | [`config`] | `dropify.toml` loading, merging, and validation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Best Effort Below the Tag Directory
//!
//! A tag whose directory is missing fails the whole run, and no output is
//! written. Anything deeper that cannot be encoded (an unreadable file, an
//! extension with no MIME type in data-URI mode, an unreadable
//! subdirectory) is simply left out of the object and listed as skipped in
//! the CLI report. One bad file never blanks a whole tree.
//!
//! ## Explicit Extension Registry
//!
//! The extension table is a value ([`registry::ExtensionRegistry`]) passed
//! into the compiler, not process-wide state. The CLI builds it from the
//! stock defaults, then `dropify.toml`, then `--mime` flags.
//!
//! ## Filesystem Behind a Trait
//!
//! All storage access goes through [`fs::Filesystem`]. Production uses
//! [`fs::StdFilesystem`]; tests use an in-memory mock that records every
//! call, which is how listing order and failure handling are pinned down.

pub mod compiler;
pub mod config;
pub mod encoder;
pub mod fs;
pub mod literal;
pub mod marker;
pub mod output;
pub mod pipeline;
pub mod registry;
pub mod walker;

pub use compiler::{AssetMap, AssetNode};
pub use pipeline::{DropifyError, DropifyReport, dropify};
pub use registry::ExtensionRegistry;

#[cfg(test)]
pub(crate) mod test_helpers;
