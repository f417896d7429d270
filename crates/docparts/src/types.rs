//! Core data model for the batch processing pipeline.
//!
//! The types here form the boundary between the loosely-typed output of an
//! extraction backend ([`RawElement`]) and the closed, uniform schema exposed
//! to callers ([`ContentElement`] and friends). Downstream code never branches
//! on backend-specific shapes; normalization happens once, at the extraction
//! adapter.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::strategy::Strategy;

/// Closed set of content element categories.
///
/// Whatever vocabulary the extraction backend emits is normalized into this
/// enum; unknown source categories map to [`ElementType::Uncategorized`]
/// rather than being dropped, so no content is silently lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementType {
    Title,
    NarrativeText,
    Table,
    Header,
    Footer,
    ListItem,
    Image,
    Formula,
    Address,
    PageBreak,
    Uncategorized,
}

impl ElementType {
    /// Normalize a backend category string into the closed element set.
    ///
    /// Matching is case-insensitive and ignores separators, so `"list_item"`,
    /// `"ListItem"` and `"list-item"` all resolve to the same variant.
    pub fn from_source(category: &str) -> Self {
        let key: String = category
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .collect::<String>()
            .to_lowercase();

        match key.as_str() {
            "title" | "headline" | "heading" => ElementType::Title,
            "narrativetext" | "text" | "paragraph" => ElementType::NarrativeText,
            "table" => ElementType::Table,
            "header" | "pageheader" => ElementType::Header,
            "footer" | "pagefooter" => ElementType::Footer,
            "listitem" | "bulletedtext" => ElementType::ListItem,
            "image" | "figure" | "picture" | "figurecaption" => ElementType::Image,
            "formula" | "equation" => ElementType::Formula,
            "address" | "emailaddress" => ElementType::Address,
            "pagebreak" => ElementType::PageBreak,
            _ => ElementType::Uncategorized,
        }
    }

    /// Serialized name of the variant, used as the per-type counter key.
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementType::Title => "Title",
            ElementType::NarrativeText => "NarrativeText",
            ElementType::Table => "Table",
            ElementType::Header => "Header",
            ElementType::Footer => "Footer",
            ElementType::ListItem => "ListItem",
            ElementType::Image => "Image",
            ElementType::Formula => "Formula",
            ElementType::Address => "Address",
            ElementType::PageBreak => "PageBreak",
            ElementType::Uncategorized => "Uncategorized",
        }
    }
}

/// One classified unit of extracted content.
///
/// Immutable after creation; ownership passes from the extraction adapter to
/// the result aggregator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentElement {
    #[serde(rename = "type")]
    pub element_type: ElementType,

    /// Extracted text, may be empty (e.g. for images).
    pub text: String,

    /// Open metadata map: `filename`, `coordinates`, chunk bookkeeping, etc.
    /// Keys are optional and variable per element type.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_number: Option<u32>,
}

/// Loosely-typed element record as emitted by an extraction backend.
///
/// Carries a free-form category tag, text, and a metadata mapping. Converted
/// into [`ContentElement`] at the adapter boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawElement {
    pub category: String,
    pub text: String,
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl RawElement {
    pub fn new(category: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            text: text.into(),
            metadata: HashMap::new(),
        }
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }
}

/// A single uploaded file: raw bytes plus the declared filename.
///
/// Immutable once received and owned exclusively by one processing attempt.
/// The MIME type is detected from content, never trusted from the name.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub content: Vec<u8>,
}

impl UploadedFile {
    pub fn new(filename: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            content,
        }
    }

    pub fn size(&self) -> u64 {
        self.content.len() as u64
    }
}

/// Terminal status of a per-file processing attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeStatus {
    Success,
    Error,
}

/// Per-file processing record, finalized exactly once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingOutcome {
    pub filename: String,

    /// Detected MIME type, or `"unknown"` when detection itself failed.
    pub file_type: String,

    pub status: OutcomeStatus,
    pub element_count: usize,
    pub total_text_length: usize,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProcessingOutcome {
    /// Record a successful attempt.
    pub fn success(
        filename: impl Into<String>,
        file_type: impl Into<String>,
        elements: &[ContentElement],
    ) -> Self {
        Self {
            filename: filename.into(),
            file_type: file_type.into(),
            status: OutcomeStatus::Success,
            element_count: elements.len(),
            total_text_length: elements.iter().map(|e| e.text.chars().count()).sum(),
            error: None,
        }
    }

    /// Record a failed attempt. Failed files contribute zero elements.
    pub fn failure(
        filename: impl Into<String>,
        file_type: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            filename: filename.into(),
            file_type: file_type.into(),
            status: OutcomeStatus::Error,
            element_count: 0,
            total_text_length: 0,
            error: Some(message.into()),
        }
    }
}

/// Aggregate statistics over one batch, computed by pure reduction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total_elements: usize,
    pub total_text_length: usize,

    /// Counts grouped by element type, in first-seen insertion order.
    pub element_types: IndexMap<String, usize>,

    /// Count of outcomes regardless of status.
    pub files_processed: usize,

    /// The strategy policy the batch was configured with.
    pub strategy: Strategy,
    pub infer_table_structure: bool,
}

/// Complete result of one batch: all elements in (file order, element order),
/// one outcome per input file in input order, and the summary.
///
/// Invariant: the element counts of successful outcomes sum to
/// `elements.len()`; failed files contribute nothing to `elements`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResult {
    pub elements: Vec<ContentElement>,
    pub processing_info: Vec<ProcessingOutcome>,
    pub summary: BatchSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_type_from_source_known() {
        assert_eq!(ElementType::from_source("Title"), ElementType::Title);
        assert_eq!(
            ElementType::from_source("NarrativeText"),
            ElementType::NarrativeText
        );
        assert_eq!(
            ElementType::from_source("narrative_text"),
            ElementType::NarrativeText
        );
        assert_eq!(ElementType::from_source("list-item"), ElementType::ListItem);
        assert_eq!(ElementType::from_source("PAGE_BREAK"), ElementType::PageBreak);
    }

    #[test]
    fn test_element_type_from_source_unknown_is_catch_all() {
        assert_eq!(
            ElementType::from_source("CompositeElement"),
            ElementType::Uncategorized
        );
        assert_eq!(ElementType::from_source(""), ElementType::Uncategorized);
    }

    #[test]
    fn test_element_type_serializes_as_pascal_case() {
        let json = serde_json::to_string(&ElementType::NarrativeText).unwrap();
        assert_eq!(json, "\"NarrativeText\"");
    }

    #[test]
    fn test_content_element_serialization_shape() {
        let element = ContentElement {
            element_type: ElementType::Title,
            text: "Hello".to_string(),
            metadata: HashMap::new(),
            page_number: Some(1),
        };
        let value = serde_json::to_value(&element).unwrap();
        assert_eq!(value["type"], "Title");
        assert_eq!(value["text"], "Hello");
        assert_eq!(value["page_number"], 1);
        // Empty metadata is omitted entirely.
        assert!(value.get("metadata").is_none());
    }

    #[test]
    fn test_outcome_success_counts() {
        let elements = vec![
            ContentElement {
                element_type: ElementType::Title,
                text: "abc".to_string(),
                metadata: HashMap::new(),
                page_number: None,
            },
            ContentElement {
                element_type: ElementType::NarrativeText,
                text: "defgh".to_string(),
                metadata: HashMap::new(),
                page_number: None,
            },
        ];
        let outcome = ProcessingOutcome::success("a.txt", "text/plain", &elements);
        assert_eq!(outcome.status, OutcomeStatus::Success);
        assert_eq!(outcome.element_count, 2);
        assert_eq!(outcome.total_text_length, 8);
        assert!(outcome.error.is_none());
    }

    #[test]
    fn test_outcome_failure_is_zeroed() {
        let outcome = ProcessingOutcome::failure("bad.bin", "unknown", "no signature match");
        assert_eq!(outcome.status, OutcomeStatus::Error);
        assert_eq!(outcome.element_count, 0);
        assert_eq!(outcome.total_text_length, 0);
        assert_eq!(outcome.error.as_deref(), Some("no signature match"));
    }

    #[test]
    fn test_outcome_status_serializes_lowercase() {
        let json = serde_json::to_string(&OutcomeStatus::Error).unwrap();
        assert_eq!(json, "\"error\"");
    }
}
