//! Extraction adapter: the boundary between the pipeline and the backend.
//!
//! The adapter enforces the size limit before extraction is attempted,
//! invokes the backend with a concrete strategy, and normalizes the
//! loosely-typed [`RawElement`]s into the closed [`ContentElement`] schema.
//! Downstream components never see backend-specific shapes.

use std::sync::Arc;

use crate::backend::{BackendOptions, ExtractionBackend};
use crate::chunking;
use crate::config::ProcessingConfig;
use crate::strategy::ResolvedStrategy;
use crate::types::{ContentElement, ElementType, RawElement, UploadedFile};
use crate::{DocpartsError, Result};

/// Adapter wrapping one extraction backend.
#[derive(Clone)]
pub struct ExtractionAdapter {
    backend: Arc<dyn ExtractionBackend>,
}

impl ExtractionAdapter {
    pub fn new(backend: Arc<dyn ExtractionBackend>) -> Self {
        Self { backend }
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Run extraction for one file and normalize the output.
    ///
    /// # Errors
    ///
    /// - `DocpartsError::FileTooLarge` when the payload exceeds
    ///   `config.max_file_size`; the backend is never invoked.
    /// - `DocpartsError::Extraction` when the backend fails; the cause is
    ///   carried as a human-readable message. No internal retries.
    pub async fn extract(
        &self,
        file: &UploadedFile,
        strategy: ResolvedStrategy,
        config: &ProcessingConfig,
    ) -> Result<Vec<ContentElement>> {
        if file.size() > config.max_file_size {
            return Err(DocpartsError::FileTooLarge {
                size: file.size(),
                limit: config.max_file_size,
            });
        }

        // Table inference is only meaningful under hi_res; elsewhere the flag
        // is a no-op rather than an error.
        let options = BackendOptions {
            ocr_languages: config.ocr_languages.clone(),
            infer_table_structure: config.infer_table_structure
                && strategy == ResolvedStrategy::HiRes,
        };

        let raw_elements = self
            .backend
            .extract(&file.content, strategy, &options)
            .await
            .map_err(|e| match e {
                err @ DocpartsError::Extraction { .. } => err,
                other => DocpartsError::extraction(format!(
                    "{} backend failed: {}",
                    self.backend.name(),
                    other
                )),
            })?;

        let mut elements: Vec<ContentElement> = raw_elements
            .into_iter()
            .map(|raw| normalize_element(raw, &file.filename))
            .collect();

        if let Some(chunking_config) = &config.chunking {
            elements = chunking::chunk_elements(elements, chunking_config);
        }

        Ok(elements)
    }
}

/// Normalize one backend element into the uniform schema.
///
/// The category tag is mapped into the closed [`ElementType`] set (unknown
/// tags become `Uncategorized`, never dropped), metadata keys are renamed to
/// the canonical vocabulary, the page number is lifted into its own field,
/// and the source filename is stamped in.
fn normalize_element(raw: RawElement, filename: &str) -> ContentElement {
    let element_type = ElementType::from_source(&raw.category);

    let mut metadata = std::collections::HashMap::new();
    let mut page_number = None;

    for (key, value) in raw.metadata {
        match normalize_metadata_key(&key) {
            "page_number" => {
                page_number = value.as_u64().and_then(|n| u32::try_from(n).ok());
                metadata.insert("page_number".to_string(), value);
            }
            canonical => {
                metadata.insert(canonical.to_string(), value);
            }
        }
    }

    metadata.insert("filename".to_string(), serde_json::json!(filename));

    ContentElement {
        element_type,
        text: raw.text,
        metadata,
        page_number,
    }
}

/// Map backend metadata keys onto the canonical vocabulary.
fn normalize_metadata_key(key: &str) -> &str {
    match key {
        "page" | "page_num" | "page_number" => "page_number",
        "file_name" | "filename" => "filename",
        "coords" | "coordinates" => "coordinates",
        other => other,
    }
}
