//! Extraction strategy policy and resolution.
//!
//! A configured [`Strategy`] is either already concrete (`fast`, `hi_res`,
//! `ocr_only`) or the `auto` policy, which must be resolved against the
//! detected MIME type before extraction. Resolution is deterministic and
//! total: every supported MIME type maps to exactly one
//! [`ResolvedStrategy`], so no unresolved `auto` ever reaches the extraction
//! adapter.

use serde::{Deserialize, Serialize};

use crate::config::ProcessingConfig;
use crate::detect::PDF_MIME_TYPE;

/// Named extraction policy, as configured per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Fast,
    HiRes,
    #[default]
    Auto,
    OcrOnly,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Fast => "fast",
            Strategy::HiRes => "hi_res",
            Strategy::Auto => "auto",
            Strategy::OcrOnly => "ocr_only",
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Concrete strategy handed to the extraction backend. Never `auto`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolvedStrategy {
    Fast,
    HiRes,
    OcrOnly,
}

impl ResolvedStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolvedStrategy::Fast => "fast",
            ResolvedStrategy::HiRes => "hi_res",
            ResolvedStrategy::OcrOnly => "ocr_only",
        }
    }
}

impl std::fmt::Display for ResolvedStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolve the configured strategy policy against a detected MIME type.
///
/// Concrete policies pass through unchanged. The `auto` policy resolves by:
///
/// 1. Per-MIME overrides from `config.auto_strategies`, checked first. The
///    exact precedence between layout signals is deliberately configuration,
///    not hard-coded heuristics.
/// 2. Image payloads (scanned/image-only documents) run `ocr_only`.
/// 3. PDFs run `hi_res` when table structure inference is requested, since
///    only the layout-aware path can honor it; otherwise `fast`.
/// 4. Everything else is text-native and runs `fast`.
pub fn resolve(mime_type: &str, config: &ProcessingConfig) -> ResolvedStrategy {
    match config.strategy {
        Strategy::Fast => ResolvedStrategy::Fast,
        Strategy::HiRes => ResolvedStrategy::HiRes,
        Strategy::OcrOnly => ResolvedStrategy::OcrOnly,
        Strategy::Auto => resolve_auto(mime_type, config),
    }
}

fn resolve_auto(mime_type: &str, config: &ProcessingConfig) -> ResolvedStrategy {
    if let Some(strategy) = config.auto_strategies.get(mime_type) {
        return *strategy;
    }

    if mime_type.starts_with("image/") {
        return ResolvedStrategy::OcrOnly;
    }

    if mime_type == PDF_MIME_TYPE {
        if config.infer_table_structure {
            return ResolvedStrategy::HiRes;
        }
        return ResolvedStrategy::Fast;
    }

    ResolvedStrategy::Fast
}
