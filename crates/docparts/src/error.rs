//! Error types for docparts.
//!
//! All fallible operations return [`Result`] with [`DocpartsError`]. The enum
//! follows a strict split between per-file and batch-fatal errors:
//!
//! - **Per-file errors** are recovered by the batch orchestrator and recorded
//!   as `status: "error"` outcomes: `UnsupportedType`, `FileTooLarge`,
//!   `Extraction`.
//! - **System errors MUST always bubble up unchanged:** `Io` (from
//!   `std::io::Error`) indicates a real system problem and fails the batch so
//!   users can report it, never a silent per-file outcome.
//!
//! Application errors carry a message plus an optional boxed `#[source]` so
//! error chains are preserved.
use thiserror::Error;

/// Result type alias using `DocpartsError`.
pub type Result<T> = std::result::Result<T, DocpartsError>;

/// Main error type for all docparts operations.
#[derive(Debug, Error)]
pub enum DocpartsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The file's byte signature matches no supported format.
    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),

    /// The file exceeds the configured size limit. Extraction is never
    /// attempted on oversized input.
    #[error("File size {size} exceeds limit of {limit} bytes")]
    FileTooLarge { size: u64, limit: u64 },

    /// The extraction backend failed to parse or OCR the content.
    #[error("Extraction error: {message}")]
    Extraction {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl From<serde_json::Error> for DocpartsError {
    fn from(err: serde_json::Error) -> Self {
        DocpartsError::Serialization {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

impl DocpartsError {
    /// Create an Extraction error.
    pub fn extraction<S: Into<String>>(message: S) -> Self {
        Self::Extraction {
            message: message.into(),
            source: None,
        }
    }

    /// Create an Extraction error with source.
    pub fn extraction_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Extraction {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a Validation error.
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
            source: None,
        }
    }

    /// Create a Serialization error.
    pub fn serialization<S: Into<String>>(message: S) -> Self {
        Self::Serialization {
            message: message.into(),
            source: None,
        }
    }

    /// Whether this error fails the whole batch instead of a single file.
    ///
    /// Per-file errors (`UnsupportedType`, `FileTooLarge`, `Extraction`) are
    /// converted into error outcomes by the orchestrator; everything else
    /// aborts the batch.
    pub fn is_batch_fatal(&self) -> bool {
        !matches!(
            self,
            DocpartsError::UnsupportedType(_)
                | DocpartsError::FileTooLarge { .. }
                | DocpartsError::Extraction { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: DocpartsError = io_err.into();
        assert!(matches!(err, DocpartsError::Io(_)));
        assert!(err.to_string().contains("IO error"));
    }

    #[test]
    fn test_unsupported_type_error() {
        let err = DocpartsError::UnsupportedType("video/mp4".to_string());
        assert_eq!(err.to_string(), "Unsupported file type: video/mp4");
        assert!(!err.is_batch_fatal());
    }

    #[test]
    fn test_file_too_large_error() {
        let err = DocpartsError::FileTooLarge {
            size: 11,
            limit: 10,
        };
        assert_eq!(err.to_string(), "File size 11 exceeds limit of 10 bytes");
        assert!(!err.is_batch_fatal());
    }

    #[test]
    fn test_extraction_error() {
        let err = DocpartsError::extraction("corrupt page tree");
        assert_eq!(err.to_string(), "Extraction error: corrupt page tree");
        assert!(!err.is_batch_fatal());
    }

    #[test]
    fn test_extraction_error_with_source() {
        let source = std::io::Error::new(std::io::ErrorKind::InvalidData, "bad data");
        let err = DocpartsError::extraction_with_source("decode failed", source);
        assert_eq!(err.to_string(), "Extraction error: decode failed");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_validation_error() {
        let err = DocpartsError::validation("invalid input");
        assert_eq!(err.to_string(), "Validation error: invalid input");
        assert!(err.is_batch_fatal());
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: DocpartsError = json_err.into();
        assert!(matches!(err, DocpartsError::Serialization { .. }));
    }

    #[test]
    fn test_io_error_is_batch_fatal() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: DocpartsError = io_err.into();
        assert!(err.is_batch_fatal());
    }
}
