//! Splitting oversized elements into ordered sub-elements.
//!
//! Uses `text-splitter` with zero overlap and trimming disabled, so the
//! concatenation of the chunk texts reconstructs the parent text exactly.
//! Sub-elements inherit the parent's element type, page number, and metadata,
//! plus `chunk_index`/`total_chunks` bookkeeping keys.

use text_splitter::{ChunkCapacity, ChunkConfig, TextSplitter};

use crate::config::ChunkingConfig;
use crate::types::ContentElement;

/// Split one element into sub-elements if its text exceeds the threshold.
///
/// Elements at or under `max_chars` pass through untouched.
pub fn chunk_element(element: ContentElement, config: &ChunkingConfig) -> Vec<ContentElement> {
    if element.text.chars().count() <= config.max_chars {
        return vec![element];
    }

    // Trimming would drop boundary whitespace and break the reconstruction
    // invariant, so it stays off.
    let chunk_config = ChunkConfig::new(ChunkCapacity::new(config.max_chars)).with_trim(false);
    let splitter = TextSplitter::new(chunk_config);
    let pieces: Vec<&str> = splitter.chunks(&element.text).collect();
    let total_chunks = pieces.len();

    pieces
        .into_iter()
        .enumerate()
        .map(|(index, piece)| {
            let mut metadata = element.metadata.clone();
            metadata.insert("chunk_index".to_string(), serde_json::json!(index));
            metadata.insert("total_chunks".to_string(), serde_json::json!(total_chunks));

            ContentElement {
                element_type: element.element_type,
                text: piece.to_string(),
                metadata,
                page_number: element.page_number,
            }
        })
        .collect()
}

/// Apply chunking across a whole element sequence, preserving order.
pub fn chunk_elements(
    elements: Vec<ContentElement>,
    config: &ChunkingConfig,
) -> Vec<ContentElement> {
    elements
        .into_iter()
        .flat_map(|element| chunk_element(element, config))
        .collect()
}
