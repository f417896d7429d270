//! End-to-end pipeline tests over the batch processor.
//!
//! Exercises the full detect/resolve/extract/aggregate path with the built-in
//! text backend and with scripted backends, covering ordering, conservation
//! of element counts, and fault isolation.

use std::sync::Arc;

use async_trait::async_trait;
use docparts::backend::{BackendOptions, ExtractionBackend, default_backend};
use docparts::{
    BatchProcessor, ChunkingConfig, DocpartsError, OutcomeStatus, ProcessingConfig, RawElement,
    ResolvedStrategy, Result, Strategy, UploadedFile,
};

/// Backend that fails for any content containing a marker byte sequence and
/// otherwise emits one element per line.
struct MarkerBackend;

#[async_trait]
impl ExtractionBackend for MarkerBackend {
    fn name(&self) -> &str {
        "marker"
    }

    async fn extract(
        &self,
        content: &[u8],
        _strategy: ResolvedStrategy,
        _options: &BackendOptions,
    ) -> Result<Vec<RawElement>> {
        let text = std::str::from_utf8(content)
            .map_err(|e| DocpartsError::extraction_with_source("not text", e))?;

        if text.contains("CORRUPT") {
            return Err(DocpartsError::extraction("simulated parse failure"));
        }

        Ok(text
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(|line| RawElement::new("NarrativeText", line))
            .collect())
    }
}

fn text_file(name: &str, content: &str) -> UploadedFile {
    UploadedFile::new(name, content.as_bytes().to_vec())
}

#[tokio::test]
async fn test_mixed_batch_preserves_order_and_counts() {
    let processor = BatchProcessor::new(Arc::new(MarkerBackend), ProcessingConfig::default());

    let files = vec![
        text_file("a.txt", "line one\nline two"),
        text_file("b.txt", "CORRUPT data inside"),
        text_file("c.txt", "single line"),
        UploadedFile::new("d.bin", vec![0x00, 0xFF, 0x80, 0x99]),
        text_file("e.txt", "one\ntwo\nthree"),
    ];

    let result = processor.process(&files).await.unwrap();

    // One outcome per input, in input order.
    let names: Vec<&str> = result
        .processing_info
        .iter()
        .map(|o| o.filename.as_str())
        .collect();
    assert_eq!(names, vec!["a.txt", "b.txt", "c.txt", "d.bin", "e.txt"]);

    // a: success(2), b: extraction error, c: success(1), d: detection error, e: success(3)
    assert_eq!(result.processing_info[0].status, OutcomeStatus::Success);
    assert_eq!(result.processing_info[1].status, OutcomeStatus::Error);
    assert_eq!(result.processing_info[2].status, OutcomeStatus::Success);
    assert_eq!(result.processing_info[3].status, OutcomeStatus::Error);
    assert_eq!(result.processing_info[4].status, OutcomeStatus::Success);

    assert_eq!(result.elements.len(), 6);

    let successful_total: usize = result
        .processing_info
        .iter()
        .filter(|o| o.status == OutcomeStatus::Success)
        .map(|o| o.element_count)
        .sum();
    assert_eq!(successful_total, result.elements.len());

    // Elements arrive in (file order, element order within file).
    assert_eq!(result.elements[0].metadata["filename"], "a.txt");
    assert_eq!(result.elements[1].metadata["filename"], "a.txt");
    assert_eq!(result.elements[2].metadata["filename"], "c.txt");
    assert_eq!(result.elements[5].metadata["filename"], "e.txt");
}

#[tokio::test]
async fn test_failed_file_error_messages_are_distinct() {
    let processor = BatchProcessor::new(Arc::new(MarkerBackend), ProcessingConfig::default());

    let files = vec![
        text_file("corrupt.txt", "CORRUPT"),
        UploadedFile::new("binary.xyz", vec![0xDE, 0xAD, 0x80, 0xFF]),
    ];

    let result = processor.process(&files).await.unwrap();

    let extraction_error = result.processing_info[0].error.as_ref().unwrap();
    assert!(extraction_error.contains("simulated parse failure"));
    // Extraction failed after detection, so the detected type is kept.
    assert_eq!(result.processing_info[0].file_type, "text/plain");

    let detection_error = result.processing_info[1].error.as_ref().unwrap();
    assert!(detection_error.contains("Unsupported file type"));
    assert_eq!(result.processing_info[1].file_type, "unknown");
}

#[tokio::test]
async fn test_summary_reflects_aggregated_elements() {
    let processor = BatchProcessor::new(default_backend(), ProcessingConfig::default());

    let files = vec![
        text_file("report.txt", "Quarterly Report\n\nRevenue grew this quarter, exceeding forecasts."),
        text_file("list.txt", "- alpha\n- beta"),
    ];

    let result = processor.process(&files).await.unwrap();
    let summary = &result.summary;

    assert_eq!(summary.files_processed, 2);
    assert_eq!(summary.total_elements, result.elements.len());
    assert_eq!(summary.element_types["Title"], 1);
    assert_eq!(summary.element_types["NarrativeText"], 1);
    assert_eq!(summary.element_types["ListItem"], 2);
    assert_eq!(summary.strategy, Strategy::Auto);

    let expected_text_length: usize = result.elements.iter().map(|e| e.text.chars().count()).sum();
    assert_eq!(summary.total_text_length, expected_text_length);
}

#[tokio::test]
async fn test_chunking_end_to_end_reconstruction() {
    let mut config = ProcessingConfig::default();
    config.chunking = Some(ChunkingConfig { max_chars: 50 });
    let processor = BatchProcessor::new(Arc::new(MarkerBackend), config);

    let long_line = "every word in this line counts toward the limit and forces a split ".repeat(5);
    let files = vec![text_file("long.txt", &long_line)];

    let result = processor.process(&files).await.unwrap();

    assert!(result.elements.len() > 1);
    let reassembled: String = result.elements.iter().map(|e| e.text.as_str()).collect();
    assert_eq!(reassembled, long_line);

    // Outcome counts the post-chunking elements, keeping conservation intact.
    assert_eq!(result.processing_info[0].element_count, result.elements.len());

    let total = result.elements.len();
    for (i, element) in result.elements.iter().enumerate() {
        assert_eq!(element.metadata["chunk_index"], serde_json::json!(i));
        assert_eq!(element.metadata["total_chunks"], serde_json::json!(total));
    }
}

#[tokio::test]
async fn test_all_files_failing_still_returns_result() {
    let processor = BatchProcessor::new(Arc::new(MarkerBackend), ProcessingConfig::default());

    let files = vec![
        text_file("x.txt", "CORRUPT one"),
        text_file("y.txt", "CORRUPT two"),
    ];

    let result = processor.process(&files).await.unwrap();

    assert!(result.elements.is_empty());
    assert_eq!(result.processing_info.len(), 2);
    assert!(
        result
            .processing_info
            .iter()
            .all(|o| o.status == OutcomeStatus::Error)
    );
    assert_eq!(result.summary.files_processed, 2);
    assert_eq!(result.summary.total_elements, 0);
}

#[tokio::test]
async fn test_per_request_size_limit() {
    let mut config = ProcessingConfig::default();
    config.max_file_size = 32;
    let processor = BatchProcessor::new(Arc::new(MarkerBackend), config);

    let files = vec![
        text_file("small.txt", "fits fine"),
        text_file("large.txt", &"x".repeat(100)),
    ];

    let result = processor.process(&files).await.unwrap();

    assert_eq!(result.processing_info[0].status, OutcomeStatus::Success);
    assert_eq!(result.processing_info[1].status, OutcomeStatus::Error);
    let error = result.processing_info[1].error.as_ref().unwrap();
    assert!(error.contains("100"));
    assert!(error.contains("32"));
}

#[tokio::test]
async fn test_result_serializes_with_expected_shape() {
    let processor = BatchProcessor::new(default_backend(), ProcessingConfig::default());
    let files = vec![text_file("doc.txt", "Title Line\n\nBody paragraph follows here.")];

    let result = processor.process(&files).await.unwrap();
    let value = serde_json::to_value(&result).unwrap();

    assert!(value["elements"].is_array());
    assert!(value["processing_info"].is_array());
    assert_eq!(value["elements"][0]["type"], "Title");
    assert_eq!(value["processing_info"][0]["status"], "success");
    // Successful outcomes omit the error field entirely.
    assert!(value["processing_info"][0].get("error").is_none());
    assert_eq!(value["summary"]["files_processed"], 1);
    assert_eq!(value["summary"]["strategy"], "auto");
}
