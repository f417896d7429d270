//! Batch summary computation.
//!
//! A pure reduction over finalized outcomes and elements; nothing here
//! mutates the inputs or performs IO, so summarizing the same batch twice
//! yields identical output.

use indexmap::IndexMap;

use crate::config::ProcessingConfig;
use crate::types::{BatchSummary, ContentElement, ProcessingOutcome};

/// Reduce a batch's outcomes and elements into a [`BatchSummary`].
///
/// `total_elements` counts all aggregated elements, `total_text_length`
/// counts characters (not bytes), and `element_types` groups counts by type
/// name in first-seen order. `files_processed` counts every outcome, failed
/// ones included.
pub fn summarize(
    outcomes: &[ProcessingOutcome],
    elements: &[ContentElement],
    config: &ProcessingConfig,
) -> BatchSummary {
    let mut element_types: IndexMap<String, usize> = IndexMap::new();
    let mut total_text_length = 0usize;

    for element in elements {
        *element_types
            .entry(element.element_type.as_str().to_string())
            .or_insert(0) += 1;
        total_text_length += element.text.chars().count();
    }

    BatchSummary {
        total_elements: elements.len(),
        total_text_length,
        element_types,
        files_processed: outcomes.len(),
        strategy: config.strategy,
        infer_table_structure: config.infer_table_structure,
    }
}
