//! API request and response types.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::backend::ExtractionBackend;
use crate::config::ProcessingConfig;

/// API server size limit configuration.
///
/// These limits protect the HTTP layer (whole request body and individual
/// multipart fields); the per-file `max_file_size` in [`ProcessingConfig`]
/// is enforced separately by the pipeline and produces a per-file error
/// outcome rather than rejecting the request.
///
/// Configurable via environment variables:
///
/// ```bash
/// # In bytes:
/// export DOCPARTS_MAX_REQUEST_BODY_BYTES=104857600     # 100 MB
/// export DOCPARTS_MAX_MULTIPART_FIELD_BYTES=104857600  # 100 MB
///
/// # In MB (applies to both limits):
/// export DOCPARTS_MAX_UPLOAD_SIZE_MB=100
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ApiSizeLimits {
    /// Maximum size of the entire request body in bytes.
    ///
    /// Applies to the total of all uploaded files and form data in a single
    /// request. Default: 100 MB.
    pub max_request_body_bytes: usize,

    /// Maximum size of a single multipart field in bytes. Default: 100 MB.
    pub max_multipart_field_bytes: usize,
}

impl Default for ApiSizeLimits {
    fn default() -> Self {
        Self {
            max_request_body_bytes: 100 * 1024 * 1024,
            max_multipart_field_bytes: 100 * 1024 * 1024,
        }
    }
}

impl ApiSizeLimits {
    pub fn new(max_request_body_bytes: usize, max_multipart_field_bytes: usize) -> Self {
        Self {
            max_request_body_bytes,
            max_multipart_field_bytes,
        }
    }

    /// Create size limits from MB values (convenience method).
    pub fn from_mb(max_request_body_mb: usize, max_multipart_field_mb: usize) -> Self {
        Self {
            max_request_body_bytes: max_request_body_mb * 1024 * 1024,
            max_multipart_field_bytes: max_multipart_field_mb * 1024 * 1024,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Health status
    pub status: String,
    /// Service name
    pub service: String,
    /// API version
    pub version: String,
}

/// Server information response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InfoResponse {
    /// API version
    pub version: String,
    /// Name of the active extraction backend
    pub backend: String,
}

/// Error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error type name
    pub error_type: String,
    /// Error message
    pub message: String,
    /// HTTP status code
    pub status_code: u16,
}

/// API server state.
///
/// Holds the default processing configuration loaded from config file
/// (via discovery or explicit path) and the extraction backend. Per-request
/// configs override the defaults; the backend is fixed per server.
#[derive(Clone)]
pub struct ApiState {
    /// Default processing configuration
    pub default_config: Arc<ProcessingConfig>,
    /// Extraction backend serving all requests
    pub backend: Arc<dyn ExtractionBackend>,
}
