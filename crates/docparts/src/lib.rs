//! Docparts - Batch Document Content Extraction
//!
//! Docparts turns heterogeneous uploaded documents into a uniform stream of
//! typed content elements. Files are classified by byte signature, routed to
//! an extraction strategy, and processed with per-file fault isolation: one
//! corrupt file in a batch costs that file, never the batch.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use docparts::{BatchProcessor, ProcessingConfig, UploadedFile, backend::default_backend};
//!
//! # #[tokio::main]
//! # async fn main() -> docparts::Result<()> {
//! let processor = BatchProcessor::new(default_backend(), ProcessingConfig::default());
//! let files = vec![UploadedFile::new("notes.txt", std::fs::read("notes.txt")?)];
//! let result = processor.process(&files).await?;
//! println!("Extracted {} elements", result.summary.total_elements);
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - **Detection** (`detect`): content-first MIME classification
//! - **Strategy** (`strategy`): resolving the `auto` policy per file type
//! - **Backend** (`backend`): the pluggable extraction capability
//! - **Adapter** (`adapter`): size limits, normalization, chunking
//! - **Batch** (`batch`): sequential orchestration with fault isolation
//! - **API** (`api`, feature-gated): Axum HTTP server over the pipeline

#![deny(unsafe_code)]

pub mod adapter;
pub mod aggregate;
pub mod backend;
pub mod batch;
pub mod chunking;
pub mod config;
pub mod detect;
pub mod error;
pub mod strategy;
pub mod types;

#[cfg(feature = "api")]
pub mod api;

pub use error::{DocpartsError, Result};
pub use types::*;

pub use batch::BatchProcessor;
pub use config::{ChunkingConfig, DEFAULT_MAX_FILE_SIZE, ProcessingConfig};
pub use strategy::{ResolvedStrategy, Strategy};

pub use detect::{
    CSV_MIME_TYPE, DOCX_MIME_TYPE, HTML_MIME_TYPE, JSON_MIME_TYPE, MARKDOWN_MIME_TYPE,
    PDF_MIME_TYPE, PLAIN_TEXT_MIME_TYPE, XML_MIME_TYPE, detect_mime_type,
};
