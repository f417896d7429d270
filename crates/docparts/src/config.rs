//! Configuration loading and management.
//!
//! [`ProcessingConfig`] is an immutable snapshot constructed once (at startup
//! or per request) and passed explicitly into the batch processor and the
//! extraction adapter. Nothing reads ambient global state during processing.
//!
//! Configuration can be loaded from TOML or JSON files, discovered in the
//! directory hierarchy (`docparts.toml`), or created programmatically.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::strategy::{ResolvedStrategy, Strategy};
use crate::{DocpartsError, Result};

/// Default maximum upload size: 10 MiB.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Processing options for one batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingConfig {
    /// Extraction strategy policy (`auto` resolves per MIME type).
    #[serde(default)]
    pub strategy: Strategy,

    /// Infer table structure during extraction. Only meaningful under
    /// `hi_res`; silently ignored for other resolved strategies.
    #[serde(default)]
    pub infer_table_structure: bool,

    /// OCR language codes, in priority order.
    #[serde(default = "default_ocr_languages")]
    pub ocr_languages: Vec<String>,

    /// Maximum accepted file size in bytes. Oversized files fail before
    /// extraction is attempted.
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,

    /// Element chunking configuration (None = chunking disabled).
    #[serde(default)]
    pub chunking: Option<ChunkingConfig>,

    /// Per-MIME overrides for `auto` strategy resolution.
    ///
    /// The tie-break between "has tables" and "is scanned" signals is policy,
    /// so it lives in configuration rather than hard-coded precedence.
    #[serde(default)]
    pub auto_strategies: IndexMap<String, ResolvedStrategy>,
}

/// Chunking configuration for oversized elements.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Maximum characters per element before it is split into sub-elements.
    #[serde(default = "default_chunk_size")]
    pub max_chars: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            max_chars: default_chunk_size(),
        }
    }
}

fn default_ocr_languages() -> Vec<String> {
    vec!["eng".to_string()]
}

fn default_max_file_size() -> u64 {
    DEFAULT_MAX_FILE_SIZE
}

fn default_chunk_size() -> usize {
    1000
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::Auto,
            infer_table_structure: false,
            ocr_languages: default_ocr_languages(),
            max_file_size: default_max_file_size(),
            chunking: None,
            auto_strategies: IndexMap::new(),
        }
    }
}

impl ProcessingConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `DocpartsError::Validation` if the file cannot be read or is
    /// invalid TOML.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            DocpartsError::validation(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        toml::from_str(&content).map_err(|e| {
            DocpartsError::validation(format!("Invalid TOML in {}: {}", path.as_ref().display(), e))
        })
    }

    /// Load configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            DocpartsError::validation(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        serde_json::from_str(&content).map_err(|e| {
            DocpartsError::validation(format!("Invalid JSON in {}: {}", path.as_ref().display(), e))
        })
    }

    /// Discover configuration in parent directories.
    ///
    /// Searches for `docparts.toml` starting at the current directory and
    /// walking upward. Returns `None` when no config file is found.
    pub fn discover() -> Result<Option<Self>> {
        let mut current = std::env::current_dir().map_err(DocpartsError::Io)?;

        loop {
            let candidate = current.join("docparts.toml");
            if candidate.exists() {
                return Ok(Some(Self::from_toml_file(candidate)?));
            }

            if let Some(parent) = current.parent() {
                current = parent.to_path_buf();
            } else {
                break;
            }
        }

        Ok(None)
    }
}
