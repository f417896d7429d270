//! HTTP error mapping.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::DocpartsError;

use super::types::ErrorResponse;

/// Error wrapper that maps pipeline errors onto HTTP responses.
///
/// Validation problems (bad multipart payload, invalid config JSON, empty
/// batch) become 400; everything else that escapes the per-file isolation
/// becomes 500.
#[derive(Debug)]
pub enum ApiError {
    Validation(DocpartsError),
    Internal(DocpartsError),
}

impl ApiError {
    pub fn validation(error: DocpartsError) -> Self {
        ApiError::Validation(error)
    }

    pub fn internal(error: DocpartsError) -> Self {
        ApiError::Internal(error)
    }
}

impl From<DocpartsError> for ApiError {
    fn from(error: DocpartsError) -> Self {
        match error {
            err @ DocpartsError::Validation { .. } => ApiError::Validation(err),
            err => ApiError::Internal(err),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            ApiError::Validation(err) => (StatusCode::BAD_REQUEST, err),
            ApiError::Internal(err) => (StatusCode::INTERNAL_SERVER_ERROR, err),
        };

        if status.is_server_error() {
            tracing::error!(error = %error, "request failed");
        } else {
            tracing::warn!(error = %error, "request rejected");
        }

        let body = ErrorResponse {
            error_type: error_type_name(&error).to_string(),
            message: error.to_string(),
            status_code: status.as_u16(),
        };

        (status, Json(body)).into_response()
    }
}

fn error_type_name(error: &DocpartsError) -> &'static str {
    match error {
        DocpartsError::Io(_) => "Io",
        DocpartsError::UnsupportedType(_) => "UnsupportedType",
        DocpartsError::FileTooLarge { .. } => "FileTooLarge",
        DocpartsError::Extraction { .. } => "Extraction",
        DocpartsError::Validation { .. } => "Validation",
        DocpartsError::Serialization { .. } => "Serialization",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_400() {
        let error = ApiError::validation(DocpartsError::validation("no files"));
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_internal_maps_to_500() {
        let error = ApiError::internal(DocpartsError::extraction("backend exploded"));
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_from_classifies_validation() {
        let api_error: ApiError = DocpartsError::validation("bad config").into();
        assert!(matches!(api_error, ApiError::Validation(_)));

        let api_error: ApiError = DocpartsError::extraction("failed").into();
        assert!(matches!(api_error, ApiError::Internal(_)));
    }
}
