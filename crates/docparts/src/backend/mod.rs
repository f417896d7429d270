//! Extraction backend seam.
//!
//! The actual parsing/OCR capability is an external collaborator: given bytes
//! and a concrete strategy, it produces a sequence of loosely-typed
//! [`RawElement`]s or fails. Everything behind this trait is opaque to the
//! pipeline; the extraction adapter normalizes whatever comes out of it.

mod text;

pub use text::TextPartitioner;

use async_trait::async_trait;
use std::sync::Arc;

use crate::Result;
use crate::strategy::ResolvedStrategy;
use crate::types::RawElement;

/// Options forwarded to the backend for one extraction call.
///
/// Derived from the request's `ProcessingConfig` by the adapter;
/// `infer_table_structure` is already masked to `false` unless the resolved
/// strategy is `hi_res`.
#[derive(Debug, Clone)]
pub struct BackendOptions {
    pub ocr_languages: Vec<String>,
    pub infer_table_structure: bool,
}

/// The external extraction capability.
///
/// Implementations must be `Send + Sync`; one backend instance serves all
/// requests concurrently. Failures are reported as
/// `DocpartsError::Extraction` with a human-readable cause; the backend never
/// retries internally (retries, if any, are batch-level policy).
#[async_trait]
pub trait ExtractionBackend: Send + Sync {
    /// Backend identifier for logs.
    fn name(&self) -> &str;

    /// Extract typed content elements from raw bytes.
    ///
    /// The strategy is always concrete; `auto` is resolved before the
    /// backend is reached. Long-running for `hi_res`/`ocr_only` inputs;
    /// callers may abandon the future on cancellation, and implementations
    /// must release any scoped resources when dropped mid-extraction.
    async fn extract(
        &self,
        content: &[u8],
        strategy: ResolvedStrategy,
        options: &BackendOptions,
    ) -> Result<Vec<RawElement>>;
}

/// The backend used when none is supplied explicitly.
pub fn default_backend() -> Arc<dyn ExtractionBackend> {
    Arc::new(TextPartitioner::new())
}
