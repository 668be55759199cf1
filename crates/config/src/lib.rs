//! Codec configuration for the braille toolchain.
//!
//! A [`CodecConfig`] selects which symbol table variant the codec uses and
//! which placeholder the encoder writes for characters it cannot encode.
//! Configs are plain JSON documents; every field is optional and unknown
//! fields are rejected.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Placeholder written for characters with no cell.
pub const DEFAULT_PLACEHOLDER: &str = "[?]";

/// The two characters a cell stream is made of (raised dot, flat dot).
const CELL_SYMBOLS: [char; 2] = ['O', '.'];

/// Errors that can occur when loading or validating a codec config.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// JSON deserialization failed.
    #[error("invalid config JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// The config file could not be read.
    #[error("failed to read config file '{path}': {source}")]
    Io {
        /// Path that was attempted.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A field value violates its constraints.
    #[error("invalid {field}: {reason}")]
    InvalidField {
        /// The name of the field that failed validation.
        field: String,
        /// A human-readable explanation of why the value is invalid.
        reason: String,
    },
}

/// Which punctuation assignments the symbol table uses.
///
/// Letters, digits, space, and the two mode markers are identical in both
/// variants; only the punctuation subtable differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableVariant {
    /// Punctuation exactly as the reference data lists it, shared cells
    /// included. Decoding a shared cell yields the first-listed mark.
    #[default]
    Faithful,
    /// Every punctuation mark has its own cell, distinct from all letters,
    /// digits, space, and markers.
    Repaired,
}

impl TableVariant {
    /// Lowercase name as used in config files and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            TableVariant::Faithful => "faithful",
            TableVariant::Repaired => "repaired",
        }
    }
}

impl std::fmt::Display for TableVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Codec settings.
///
/// # Example
/// ```
/// use braille_toolchain_config::{CodecConfig, TableVariant, load_config_from_str};
///
/// let cfg = load_config_from_str(r#"{ "table": "repaired" }"#).unwrap();
/// assert_eq!(cfg.table, TableVariant::Repaired);
/// assert_eq!(cfg.placeholder, "[?]");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CodecConfig {
    /// Symbol table variant.
    pub table: TableVariant,
    /// Text emitted in place of an unencodable character.
    pub placeholder: String,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            table: TableVariant::default(),
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
        }
    }
}

impl CodecConfig {
    /// Check field constraints.
    ///
    /// The placeholder must be non-empty and contain at least one character
    /// outside the cell alphabet, so encoded output carrying a placeholder
    /// is never mistaken for a cell stream.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.placeholder.is_empty() {
            return Err(ConfigError::InvalidField {
                field: "placeholder".into(),
                reason: "must not be empty".into(),
            });
        }
        if self.placeholder.chars().all(|c| CELL_SYMBOLS.contains(&c)) {
            return Err(ConfigError::InvalidField {
                field: "placeholder".into(),
                reason: format!(
                    "'{}' consists only of cell symbols 'O' and '.'",
                    self.placeholder
                ),
            });
        }
        Ok(())
    }
}

/// Deserialize and validate a config from a JSON string.
pub fn load_config_from_str(json: &str) -> Result<CodecConfig, ConfigError> {
    let config: CodecConfig = serde_json::from_str(json)?;
    config.validate()?;
    Ok(config)
}

/// Read, deserialize, and validate a config file.
pub fn load_config_from_path(path: impl AsRef<Path>) -> Result<CodecConfig, ConfigError> {
    let path = path.as_ref();
    let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_config_from_str(&json)
}
