//! Batch orchestration with per-file fault isolation.
//!
//! Files are processed sequentially in input order: detect type, resolve
//! strategy, extract, record the outcome. A failure on one file never aborts
//! the rest of the batch; it becomes a `status: "error"` outcome with zero
//! elements. Only system errors (IO) are batch-fatal. Each file's working
//! buffers are dropped before the next file begins, so peak memory stays at
//! roughly one file's working set plus accumulated results.

use std::sync::Arc;

use crate::adapter::ExtractionAdapter;
use crate::aggregate;
use crate::backend::ExtractionBackend;
use crate::config::ProcessingConfig;
use crate::types::{BatchResult, ContentElement, ProcessingOutcome, UploadedFile};
use crate::{Result, detect, strategy};

/// Processes batches of uploaded files against one immutable configuration.
#[derive(Clone)]
pub struct BatchProcessor {
    adapter: ExtractionAdapter,
    config: ProcessingConfig,
}

impl BatchProcessor {
    pub fn new(backend: Arc<dyn ExtractionBackend>, config: ProcessingConfig) -> Self {
        Self {
            adapter: ExtractionAdapter::new(backend),
            config,
        }
    }

    pub fn config(&self) -> &ProcessingConfig {
        &self.config
    }

    /// Process a batch of files into a [`BatchResult`].
    ///
    /// Output ordering: `processing_info` matches input order exactly;
    /// `elements` preserves (file order, then element order within file).
    /// An empty batch yields an empty result, not an error.
    ///
    /// # Errors
    ///
    /// Only batch-fatal errors (IO) propagate; per-file failures are
    /// recorded in the corresponding outcome.
    pub async fn process(&self, files: &[UploadedFile]) -> Result<BatchResult> {
        tracing::info!(file_count = files.len(), "processing batch");

        let mut elements: Vec<ContentElement> = Vec::new();
        let mut outcomes: Vec<ProcessingOutcome> = Vec::with_capacity(files.len());

        for file in files {
            let outcome = self.process_file(file, &mut elements).await?;
            outcomes.push(outcome);
        }

        let summary = aggregate::summarize(&outcomes, &elements, &self.config);
        tracing::info!(
            total_elements = summary.total_elements,
            total_text_length = summary.total_text_length,
            "batch complete"
        );

        Ok(BatchResult {
            elements,
            processing_info: outcomes,
            summary,
        })
    }

    /// Process one file, appending its elements on success.
    ///
    /// Returns the finalized outcome; per-file errors are folded into an
    /// error outcome here, batch-fatal errors propagate.
    async fn process_file(
        &self,
        file: &UploadedFile,
        elements: &mut Vec<ContentElement>,
    ) -> Result<ProcessingOutcome> {
        tracing::info!(filename = %file.filename, size = file.size(), "processing file");

        let mime_type = match detect::detect_mime_type(&file.content, Some(&file.filename)) {
            Ok(mime) => mime,
            Err(e) if !e.is_batch_fatal() => {
                tracing::warn!(filename = %file.filename, error = %e, "type detection failed");
                return Ok(ProcessingOutcome::failure(&file.filename, "unknown", e.to_string()));
            }
            Err(e) => return Err(e),
        };

        let resolved = strategy::resolve(&mime_type, &self.config);
        tracing::info!(
            filename = %file.filename,
            mime_type = %mime_type,
            strategy = %resolved,
            "detected file type"
        );

        match self.adapter.extract(file, resolved, &self.config).await {
            Ok(file_elements) => {
                let outcome = ProcessingOutcome::success(&file.filename, &mime_type, &file_elements);
                tracing::info!(
                    filename = %file.filename,
                    element_count = outcome.element_count,
                    "extraction succeeded"
                );
                elements.extend(file_elements);
                Ok(outcome)
            }
            Err(e) if !e.is_batch_fatal() => {
                tracing::warn!(filename = %file.filename, error = %e, "extraction failed");
                Ok(ProcessingOutcome::failure(&file.filename, &mime_type, e.to_string()))
            }
            Err(e) => Err(e),
        }
    }
}
