//! Built-in plain-text partitioning backend.
//!
//! Handles text-native payloads without any external tooling: the content is
//! split on blank lines into blocks, and each block is classified with cheap
//! structural heuristics (short unpunctuated line reads as a title, bullet or
//! numbered prefix as a list item, everything else as narrative text). This
//! keeps the service functional for `fast` extractions; image and layout
//! strategies need a real OCR/layout backend.

use async_trait::async_trait;

use super::{BackendOptions, ExtractionBackend};
use crate::strategy::ResolvedStrategy;
use crate::types::RawElement;
use crate::{DocpartsError, Result};

/// Longest line still considered a possible title.
const MAX_TITLE_LEN: usize = 80;

#[derive(Debug, Default)]
pub struct TextPartitioner;

impl TextPartitioner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ExtractionBackend for TextPartitioner {
    fn name(&self) -> &str {
        "text-partitioner"
    }

    async fn extract(
        &self,
        content: &[u8],
        strategy: ResolvedStrategy,
        _options: &BackendOptions,
    ) -> Result<Vec<RawElement>> {
        if strategy != ResolvedStrategy::Fast {
            return Err(DocpartsError::extraction(format!(
                "text-partitioner supports only the fast strategy, not {}",
                strategy
            )));
        }

        let text = std::str::from_utf8(content)
            .map_err(|e| DocpartsError::extraction_with_source("content is not valid UTF-8 text", e))?;

        Ok(partition_text(text))
    }
}

/// Split text into blocks on blank lines and classify each block.
fn partition_text(text: &str) -> Vec<RawElement> {
    let mut elements = Vec::new();
    let mut block: Vec<&str> = Vec::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            flush_block(&mut block, &mut elements);
        } else {
            block.push(line);
        }
    }
    flush_block(&mut block, &mut elements);

    elements
}

fn flush_block(block: &mut Vec<&str>, elements: &mut Vec<RawElement>) {
    if block.is_empty() {
        return;
    }

    let lines = std::mem::take(block);

    // A run of bullet lines becomes one list item per line, matching how
    // partitioning libraries emit lists.
    if lines.iter().all(|l| is_list_line(l)) {
        for line in lines {
            elements.push(RawElement::new("ListItem", strip_bullet(line)));
        }
        return;
    }

    let joined = lines.join("\n");
    let category = classify_block(&lines, &joined);
    elements.push(RawElement::new(category, joined));
}

fn classify_block(lines: &[&str], joined: &str) -> &'static str {
    if lines.len() == 1 && is_possible_title(lines[0]) {
        return "Title";
    }
    if joined.trim().is_empty() {
        return "Uncategorized";
    }
    "NarrativeText"
}

/// Heuristic title check: a single short line with alphabetic content that
/// does not end in sentence punctuation, or a Markdown-style heading.
fn is_possible_title(line: &str) -> bool {
    let trimmed = line.trim();
    if trimmed.starts_with('#') {
        return true;
    }
    if trimmed.chars().count() > MAX_TITLE_LEN {
        return false;
    }
    if !trimmed.chars().any(|c| c.is_alphabetic()) {
        return false;
    }
    !trimmed.ends_with(['.', ',', ':', ';', '!', '?'])
}

fn is_list_line(line: &str) -> bool {
    let trimmed = line.trim_start();
    if let Some(rest) = trimmed
        .strip_prefix("- ")
        .or_else(|| trimmed.strip_prefix("* "))
        .or_else(|| trimmed.strip_prefix("• "))
    {
        return !rest.trim().is_empty();
    }

    // Numbered list: digits followed by '.' or ')'.
    let digits: String = trimmed.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return false;
    }
    let rest = &trimmed[digits.len()..];
    rest.starts_with(". ") || rest.starts_with(") ")
}

fn strip_bullet(line: &str) -> String {
    let trimmed = line.trim_start();
    for prefix in ["- ", "* ", "• "] {
        if let Some(rest) = trimmed.strip_prefix(prefix) {
            return rest.trim().to_string();
        }
    }

    let digits: String = trimmed.chars().take_while(|c| c.is_ascii_digit()).collect();
    let rest = &trimmed[digits.len()..];
    for prefix in [". ", ") "] {
        if let Some(rest) = rest.strip_prefix(prefix) {
            return rest.trim().to_string();
        }
    }

    trimmed.to_string()
}
