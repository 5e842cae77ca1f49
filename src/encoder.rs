//! Turn one file into a base64 payload or a `data:` URI.
//!
//! ```text
//! raw:       iVBORw0KGgoAAAANSUhEUgAA...
//! data URI:  data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAA...
//! ```
//!
//! Base64 uses the standard alphabet with padding and no line wrapping, so
//! the payload never contains a quote character and can be dropped straight
//! into a single-quoted JavaScript string.

use crate::fs::Filesystem;
use crate::registry::ExtensionRegistry;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EncodeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Unknown file extension '{0}'")]
    UnsupportedExtension(String),
}

/// The extension of a file name including its leading dot, taken from the
/// last `.`. A name whose only dot is its first character has none.
pub fn extension_of(file_name: &str) -> Option<&str> {
    match file_name.rfind('.') {
        Some(0) | None => None,
        Some(pos) => Some(&file_name[pos..]),
    }
}

pub fn data_uri(mime_type: &str, base64: &str) -> String {
    format!("data:{mime_type};base64,{base64}")
}

/// Read `path` and encode it.
///
/// With `as_data_uri`, the file's extension must be in `registry`;
/// otherwise [`EncodeError::UnsupportedExtension`] names the extension
/// (empty when the file has none). The file is read before the extension is
/// checked, so a missing file reports as IO.
pub fn encode(
    fs: &impl Filesystem,
    registry: &ExtensionRegistry,
    path: &Path,
    as_data_uri: bool,
) -> Result<String, EncodeError> {
    let bytes = fs.read_file(path)?;
    let base64 = STANDARD.encode(bytes);

    if !as_data_uri {
        return Ok(base64);
    }

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();
    let extension = extension_of(&file_name).unwrap_or_default();
    let mime_type = registry
        .mime_type(extension)
        .ok_or_else(|| EncodeError::UnsupportedExtension(extension.to_string()))?;
    Ok(data_uri(mime_type, &base64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::StdFilesystem;
    use crate::fs::tests::MockFilesystem;
    use tempfile::TempDir;

    const PNG_HEADER: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

    #[test]
    fn raw_base64_round_trips() {
        let samples: [&[u8]; 5] = [b"", b"a", b"ab", b"abc", PNG_HEADER];
        let registry = ExtensionRegistry::default();
        for bytes in samples {
            let fs = MockFilesystem::new().file("/a/blob.bin", bytes);
            let encoded = encode(&fs, &registry, Path::new("/a/blob.bin"), false).unwrap();
            assert_eq!(STANDARD.decode(&encoded).unwrap(), bytes);
        }
    }

    #[test]
    fn raw_mode_ignores_registry() {
        let fs = MockFilesystem::new().file("/a/notes.xyz", "hello");
        let encoded =
            encode(&fs, &ExtensionRegistry::empty(), Path::new("/a/notes.xyz"), false).unwrap();
        assert_eq!(encoded, "aGVsbG8=");
    }

    #[test]
    fn no_line_wrapping_for_large_payloads() {
        let fs = MockFilesystem::new().file("/a/big.bin", vec![7u8; 10_000]);
        let encoded =
            encode(&fs, &ExtensionRegistry::default(), Path::new("/a/big.bin"), false).unwrap();
        assert!(!encoded.contains('\n'));
        assert!(!encoded.contains('\r'));
    }

    #[test]
    fn data_uri_for_registered_extension() {
        let fs = MockFilesystem::new().file("/a/icon.png", PNG_HEADER);
        let encoded =
            encode(&fs, &ExtensionRegistry::default(), Path::new("/a/icon.png"), true).unwrap();
        assert!(encoded.starts_with("data:image/png;base64,"));
        let payload = encoded.trim_start_matches("data:image/png;base64,");
        assert_eq!(STANDARD.decode(payload).unwrap(), PNG_HEADER);
    }

    #[test]
    fn data_uri_for_each_stock_extension() {
        let registry = ExtensionRegistry::default();
        for (name, mime) in [
            ("a.png", "image/png"),
            ("a.jpg", "image/jpeg"),
            ("a.wav", "audio/wav"),
            ("a.mp3", "audio/mpeg3"),
        ] {
            let path = Path::new("/a").join(name);
            let fs = MockFilesystem::new().file(path.clone(), "x");
            let encoded = encode(&fs, &registry, &path, true).unwrap();
            assert!(encoded.starts_with(&format!("data:{mime};base64,")));
        }
    }

    #[test]
    fn unregistered_extension_is_rejected() {
        let fs = MockFilesystem::new().file("/a/model.xyz", "x");
        let result = encode(&fs, &ExtensionRegistry::default(), Path::new("/a/model.xyz"), true);
        assert!(matches!(result, Err(EncodeError::UnsupportedExtension(ext)) if ext == ".xyz"));
    }

    #[test]
    fn missing_extension_is_rejected() {
        let fs = MockFilesystem::new().file("/a/LICENSE", "x");
        let result = encode(&fs, &ExtensionRegistry::default(), Path::new("/a/LICENSE"), true);
        assert!(matches!(result, Err(EncodeError::UnsupportedExtension(ext)) if ext.is_empty()));
    }

    #[test]
    fn custom_registry_entry_is_used() {
        let mut registry = ExtensionRegistry::default();
        registry.insert(".svg", "image/svg+xml");
        let fs = MockFilesystem::new().file("/a/logo.svg", "<svg/>");
        let encoded = encode(&fs, &registry, Path::new("/a/logo.svg"), true).unwrap();
        assert!(encoded.starts_with("data:image/svg+xml;base64,"));
    }

    #[test]
    fn unreadable_file_is_io_error() {
        let fs = MockFilesystem::new()
            .file("/a/icon.png", "x")
            .unreadable("/a/icon.png");
        let result = encode(&fs, &ExtensionRegistry::default(), Path::new("/a/icon.png"), true);
        assert!(matches!(result, Err(EncodeError::Io(_))));
    }

    #[test]
    fn encodes_real_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("beep.wav");
        std::fs::write(&path, b"RIFF").unwrap();

        let encoded = encode(&StdFilesystem, &ExtensionRegistry::default(), &path, true).unwrap();
        assert_eq!(encoded, "data:audio/wav;base64,UklGRg==");
    }

    #[test]
    fn extension_of_follows_last_dot() {
        assert_eq!(extension_of("icon.png"), Some(".png"));
        assert_eq!(extension_of("archive.tar.gz"), Some(".gz"));
        assert_eq!(extension_of("README"), None);
        assert_eq!(extension_of(".profile"), None);
        assert_eq!(extension_of("trailing."), Some("."));
    }
}
