//! File type detection from content.
//!
//! Uploaded bytes are classified by byte signature first (`infer`), so
//! mislabeled or extensionless uploads are still detected correctly. The
//! declared filename is only a hint, consulted to pick between plain-text
//! flavors once the content has already been established as text. A file
//! whose signature matches no supported format fails with
//! `DocpartsError::UnsupportedType`, which the batch orchestrator treats as a
//! per-file error.

use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};
use std::path::Path;

use crate::{DocpartsError, Result};

pub const PDF_MIME_TYPE: &str = "application/pdf";
pub const PLAIN_TEXT_MIME_TYPE: &str = "text/plain";
pub const MARKDOWN_MIME_TYPE: &str = "text/markdown";
pub const HTML_MIME_TYPE: &str = "text/html";
pub const CSV_MIME_TYPE: &str = "text/csv";
pub const JSON_MIME_TYPE: &str = "application/json";
pub const XML_MIME_TYPE: &str = "application/xml";
pub const DOCX_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const XLSX_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const PPTX_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation";
pub const ODT_MIME_TYPE: &str = "application/vnd.oasis.opendocument.text";
pub const RTF_MIME_TYPE: &str = "application/rtf";
pub const EPUB_MIME_TYPE: &str = "application/epub+zip";

/// Extension to MIME type mapping for text-native formats.
///
/// Only consulted after the content has been established as valid UTF-8 text;
/// binary formats are always classified by signature.
static TEXT_EXT_TO_MIME: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut m = HashMap::new();

    m.insert("txt", PLAIN_TEXT_MIME_TYPE);
    m.insert("text", PLAIN_TEXT_MIME_TYPE);
    m.insert("md", MARKDOWN_MIME_TYPE);
    m.insert("markdown", MARKDOWN_MIME_TYPE);
    m.insert("html", HTML_MIME_TYPE);
    m.insert("htm", HTML_MIME_TYPE);
    m.insert("csv", CSV_MIME_TYPE);
    m.insert("tsv", "text/tab-separated-values");
    m.insert("json", JSON_MIME_TYPE);
    m.insert("xml", XML_MIME_TYPE);
    m.insert("rst", "text/x-rst");
    m.insert("org", "text/x-org");

    m
});

/// Binary formats the pipeline accepts by byte signature.
static SUPPORTED_MIME_TYPES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    let mut set = HashSet::new();

    set.insert(PDF_MIME_TYPE);
    set.insert(DOCX_MIME_TYPE);
    set.insert(XLSX_MIME_TYPE);
    set.insert(PPTX_MIME_TYPE);
    set.insert(ODT_MIME_TYPE);
    set.insert(RTF_MIME_TYPE);
    set.insert(EPUB_MIME_TYPE);

    set
});

/// Detect the MIME type of uploaded bytes.
///
/// Detection order:
///
/// 1. Byte signature via `infer`. A recognized binary signature wins
///    unconditionally; recognized-but-unsupported formats (video, archives,
///    executables) are rejected.
/// 2. Valid UTF-8 content is classified as a text flavor, using the filename
///    hint's extension to pick between `text/plain`, `text/markdown`,
///    `text/csv`, etc.
/// 3. Anything else has no matching signature and is rejected.
///
/// # Errors
///
/// Returns `DocpartsError::UnsupportedType` when the bytes cannot be
/// classified as a supported format.
pub fn detect_mime_type(content: &[u8], filename_hint: Option<&str>) -> Result<String> {
    if content.is_empty() {
        return Err(DocpartsError::UnsupportedType(
            "empty file has no byte signature".to_string(),
        ));
    }

    if let Some(kind) = infer::get(content) {
        let mime = kind.mime_type();
        if SUPPORTED_MIME_TYPES.contains(mime) || mime.starts_with("image/") {
            return Ok(mime.to_string());
        }
        return Err(DocpartsError::UnsupportedType(format!(
            "detected {} which is not a supported document format",
            mime
        )));
    }

    // No binary signature matched. Text-native formats (plain text, Markdown,
    // CSV, HTML) carry none, so fall back to a UTF-8 check.
    if std::str::from_utf8(content).is_ok() {
        return Ok(text_mime_from_hint(filename_hint));
    }

    Err(DocpartsError::UnsupportedType(
        "byte signature matches no supported format".to_string(),
    ))
}

/// Pick a text MIME type from the filename hint, defaulting to `text/plain`.
fn text_mime_from_hint(filename_hint: Option<&str>) -> String {
    let Some(name) = filename_hint else {
        return PLAIN_TEXT_MIME_TYPE.to_string();
    };

    let extension = Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|s| s.to_lowercase());

    if let Some(ext) = &extension {
        if let Some(mime) = TEXT_EXT_TO_MIME.get(ext.as_str()) {
            return (*mime).to_string();
        }
        // Trust mime_guess only for text flavors; the content is already
        // known to be text, so a binary guess means the name is misleading.
        if let Some(guess) = mime_guess::from_path(name).first() {
            if guess.type_() == mime_guess::mime::TEXT {
                return guess.to_string();
            }
        }
    }

    PLAIN_TEXT_MIME_TYPE.to_string()
}
