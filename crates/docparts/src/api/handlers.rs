//! API request handlers.

use axum::{
    Json,
    extract::{Multipart, State},
};

use crate::batch::BatchProcessor;
use crate::types::{BatchResult, UploadedFile};

use super::{
    error::ApiError,
    types::{ApiState, HealthResponse, InfoResponse},
};

/// Batch processing endpoint handler.
///
/// POST /process
///
/// Accepts multipart form data with:
/// - `files`: One or more files to process
/// - `config` (optional): JSON processing configuration (overrides server defaults)
///
/// Returns one [`BatchResult`] covering the whole batch: all extracted
/// elements, one per-file outcome in upload order, and a summary.
///
/// Request body size limits are enforced at the router layer via
/// `DefaultBodyLimit` and `RequestBodyLimitLayer`; requests over the limit
/// are rejected with HTTP 413. The per-file `max_file_size` from the
/// processing config is enforced inside the pipeline and shows up as an
/// error outcome for that file, not as a request failure.
pub async fn process_handler(
    State(state): State<ApiState>,
    mut multipart: Multipart,
) -> Result<Json<BatchResult>, ApiError> {
    let mut files = Vec::new();
    let mut config = (*state.default_config).clone();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::validation(crate::DocpartsError::validation(e.to_string())))?
    {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "files" => {
                let file_name = field
                    .file_name()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "unnamed".to_string());
                let data = field.bytes().await.map_err(|e| {
                    ApiError::validation(crate::DocpartsError::validation(e.to_string()))
                })?;

                files.push(UploadedFile::new(file_name, data.to_vec()));
            }
            "config" => {
                let config_str = field.text().await.map_err(|e| {
                    ApiError::validation(crate::DocpartsError::validation(e.to_string()))
                })?;

                config = serde_json::from_str(&config_str).map_err(|e| {
                    ApiError::validation(crate::DocpartsError::validation(format!(
                        "Invalid processing configuration: {}",
                        e
                    )))
                })?;
            }
            _ => {}
        }
    }

    if files.is_empty() {
        return Err(ApiError::validation(crate::DocpartsError::validation(
            "No files provided for processing",
        )));
    }

    let processor = BatchProcessor::new(state.backend.clone(), config);
    let result = processor.process(&files).await?;
    Ok(Json(result))
}

/// Health check endpoint handler.
///
/// GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Server info endpoint handler.
///
/// GET /info
pub async fn info_handler(State(state): State<ApiState>) -> Json<InfoResponse> {
    Json(InfoResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
        backend: state.backend.name().to_string(),
    })
}
