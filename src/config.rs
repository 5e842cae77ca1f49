//! `dropify.toml` loading, merging, and validation.
//!
//! The config file is optional. By default it is looked up in the assets
//! root; `--config <FILE>` points somewhere else.
//!
//! ```toml
//! # All options are optional.
//!
//! [mime_types]
//! ".png" = "image/png"      # Stock entries, always present unless overridden
//! ".jpg" = "image/jpeg"
//! ".wav" = "audio/wav"
//! ".mp3" = "audio/mpeg3"
//! ".webp" = "image/webp"    # Extra entries extend the table
//! ```
//!
//! User values are merged on top of the stock defaults, so a file only needs
//! the entries it adds or changes. Unknown keys are rejected to catch typos
//! early.

use crate::registry::ExtensionRegistry;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

pub const CONFIG_FILE_NAME: &str = "dropify.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DropifyConfig {
    /// Extension (with leading dot) → MIME type, used for `#` markers.
    pub mime_types: BTreeMap<String, String>,
}

impl Default for DropifyConfig {
    fn default() -> Self {
        Self {
            mime_types: ExtensionRegistry::default()
                .iter()
                .map(|(ext, mime)| (ext.to_string(), mime.to_string()))
                .collect(),
        }
    }
}

impl DropifyConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (ext, mime) in &self.mime_types {
            if !ext.starts_with('.') || ext.len() < 2 {
                return Err(ConfigError::Validation(format!(
                    "mime_types key '{ext}' must be an extension starting with '.'"
                )));
            }
            if mime.trim().is_empty() || !mime.contains('/') {
                return Err(ConfigError::Validation(format!(
                    "mime_types.\"{ext}\" = '{mime}' is not a MIME type"
                )));
            }
        }
        Ok(())
    }

    pub fn registry(&self) -> ExtensionRegistry {
        let mut registry = ExtensionRegistry::empty();
        registry.extend(self.mime_types.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        registry
    }
}

/// The stock config as a TOML table, the base layer for merging.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(DropifyConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// Tables merge key-by-key; any other overlay value replaces the base value.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Read a config file as raw TOML. `Ok(None)` if the file does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<DropifyConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: DropifyConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load `path` over the stock defaults. A missing file yields the defaults.
pub fn load_config_file(path: &Path) -> Result<DropifyConfig, ConfigError> {
    resolve_config(stock_defaults_value(), load_raw_config(path)?)
}

/// Load `dropify.toml` from `dir`, if present.
pub fn load_config(dir: &Path) -> Result<DropifyConfig, ConfigError> {
    load_config_file(&dir.join(CONFIG_FILE_NAME))
}

/// A fully commented stock `dropify.toml`, printed by `gen-config`.
pub fn stock_config_toml() -> &'static str {
    r#"# Dropify Configuration
# =====================
# All settings are optional. Values shown below are the defaults.
#
# Place this file in the assets root as dropify.toml, or pass
# --config <FILE>. Unknown keys cause an error.

# ---------------------------------------------------------------------------
# MIME types for data-URI markers (<!--Dropify:name#-->)
# ---------------------------------------------------------------------------
# Extension (with leading dot, matched case-sensitively) -> MIME type.
# Files whose extension is not listed are left out of data-URI trees.
# Entries here are added to (or replace) the defaults.
[mime_types]
".png" = "image/png"
".jpg" = "image/jpeg"
".wav" = "audio/wav"
".mp3" = "audio/mpeg3"
# ".webp" = "image/webp"
# ".svg" = "image/svg+xml"
"#
}
