//! API server setup and configuration.

use std::{
    net::{IpAddr, SocketAddr},
    sync::Arc,
};

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};

use crate::backend::{ExtractionBackend, default_backend};
use crate::{ProcessingConfig, Result};

use super::{
    handlers::{health_handler, info_handler, process_handler},
    types::{ApiSizeLimits, ApiState},
};

/// Parse size limits from environment variables.
///
/// Reads, in order of preference:
/// 1. `DOCPARTS_MAX_REQUEST_BODY_BYTES` - Maximum total request body size (bytes)
/// 2. `DOCPARTS_MAX_MULTIPART_FIELD_BYTES` - Maximum individual multipart field size (bytes)
/// 3. `DOCPARTS_MAX_UPLOAD_SIZE_MB` - Maximum upload size in MB (applies to both limits)
///
/// Falls back to the default (100 MB) if not set or invalid.
fn parse_size_limits_from_env() -> ApiSizeLimits {
    const DEFAULT_MB: usize = 100;

    if let Ok(value) = std::env::var("DOCPARTS_MAX_REQUEST_BODY_BYTES") {
        if let Ok(bytes) = value.parse::<usize>() {
            if bytes > 0 {
                let multipart_bytes = std::env::var("DOCPARTS_MAX_MULTIPART_FIELD_BYTES")
                    .ok()
                    .and_then(|v| v.parse::<usize>().ok())
                    .unwrap_or(bytes);

                tracing::info!(
                    "Upload size limits configured from environment: request_body={} bytes, multipart_field={} bytes",
                    bytes,
                    multipart_bytes
                );

                return ApiSizeLimits::new(bytes, multipart_bytes);
            }
        } else {
            tracing::warn!(
                "Failed to parse DOCPARTS_MAX_REQUEST_BODY_BYTES='{}', must be a valid usize",
                value
            );
        }
    }

    if let Ok(value) = std::env::var("DOCPARTS_MAX_UPLOAD_SIZE_MB") {
        if let Ok(mb) = value.parse::<usize>() {
            if mb > 0 {
                tracing::info!(
                    "Upload size limit configured from environment: {} MB ({} bytes)",
                    mb,
                    mb * 1024 * 1024
                );
                return ApiSizeLimits::from_mb(mb, mb);
            } else {
                tracing::warn!("Invalid DOCPARTS_MAX_UPLOAD_SIZE_MB value (must be > 0)");
            }
        } else {
            tracing::warn!(
                "Failed to parse DOCPARTS_MAX_UPLOAD_SIZE_MB='{}', must be a valid usize",
                value
            );
        }
    }

    let limits = ApiSizeLimits::from_mb(DEFAULT_MB, DEFAULT_MB);
    tracing::info!(
        "Upload size limit: 100 MB (default, {} bytes) - Configure with DOCPARTS_MAX_REQUEST_BODY_BYTES or DOCPARTS_MAX_UPLOAD_SIZE_MB",
        limits.max_request_body_bytes
    );
    limits
}

/// Create the API router with all routes configured.
///
/// Public to allow users to embed the router in their own applications.
/// Per-request configs override the defaults given here.
pub fn create_router(config: ProcessingConfig) -> Router {
    create_router_with_limits(config, ApiSizeLimits::default())
}

/// Create the API router with custom size limits.
pub fn create_router_with_limits(config: ProcessingConfig, limits: ApiSizeLimits) -> Router {
    create_router_with_backend(config, limits, default_backend())
}

/// Create the API router with an explicit extraction backend.
pub fn create_router_with_backend(
    config: ProcessingConfig,
    limits: ApiSizeLimits,
    backend: Arc<dyn ExtractionBackend>,
) -> Router {
    let state = ApiState {
        default_config: Arc::new(config),
        backend,
    };

    // SECURITY WARNING: the default allows all origins for development convenience.
    let cors_layer = if let Ok(origins_str) = std::env::var("DOCPARTS_CORS_ORIGINS") {
        let origins: Vec<_> = origins_str
            .split(',')
            .filter(|s| !s.trim().is_empty())
            .filter_map(|s| s.trim().parse::<axum::http::HeaderValue>().ok())
            .collect();

        if !origins.is_empty() {
            tracing::info!("CORS configured with {} explicit allowed origin(s)", origins.len());
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            tracing::warn!(
                "DOCPARTS_CORS_ORIGINS set but empty/invalid - falling back to permissive CORS. \
                 Set explicit origins for production."
            );
            CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
        }
    } else {
        tracing::warn!(
            "CORS configured to allow all origins (default). For production, set the \
             DOCPARTS_CORS_ORIGINS environment variable to a comma-separated list of allowed \
             origins (e.g., 'https://app.example.com,https://api.example.com')"
        );
        CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
    };

    Router::new()
        .route("/process", post(process_handler))
        .route("/health", get(health_handler))
        .route("/info", get(info_handler))
        .layer(DefaultBodyLimit::max(limits.max_request_body_bytes))
        .layer(RequestBodyLimitLayer::new(limits.max_request_body_bytes))
        .layer(cors_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the API server with config file discovery.
///
/// Searches for docparts.toml in current and parent directories. If no
/// config file is found, uses the default configuration.
pub async fn serve(host: impl AsRef<str>, port: u16) -> Result<()> {
    let config = match ProcessingConfig::discover()? {
        Some(config) => {
            tracing::info!("Loaded processing config from discovered file");
            config
        }
        None => {
            tracing::info!("No config file found, using default configuration");
            ProcessingConfig::default()
        }
    };

    let limits = parse_size_limits_from_env();

    serve_with_config_and_limits(host, port, config, limits).await
}

/// Start the API server with explicit config and default size limits.
pub async fn serve_with_config(host: impl AsRef<str>, port: u16, config: ProcessingConfig) -> Result<()> {
    let limits = ApiSizeLimits::default();
    tracing::info!(
        "Upload size limit: 100 MB (default, {} bytes)",
        limits.max_request_body_bytes
    );
    serve_with_config_and_limits(host, port, config, limits).await
}

/// Start the API server with explicit config and size limits.
pub async fn serve_with_config_and_limits(
    host: impl AsRef<str>,
    port: u16,
    config: ProcessingConfig,
    limits: ApiSizeLimits,
) -> Result<()> {
    let ip: IpAddr = host
        .as_ref()
        .parse()
        .map_err(|e| crate::DocpartsError::validation(format!("Invalid host address: {}", e)))?;

    let addr = SocketAddr::new(ip, port);
    let app = create_router_with_limits(config, limits);

    tracing::info!("Starting docparts API server on http://{}:{}", ip, port);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(crate::DocpartsError::Io)?;

    axum::serve(listener, app)
        .await
        .map_err(crate::DocpartsError::Io)?;

    Ok(())
}

/// Start the API server with default host and port.
///
/// Defaults: host = "127.0.0.1", port = 8000. Uses config file discovery.
pub async fn serve_default() -> Result<()> {
    serve("127.0.0.1", 8000).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_router() {
        let config = ProcessingConfig::default();
        let _router = create_router(config);
    }

    #[test]
    fn test_router_with_custom_limits() {
        let config = ProcessingConfig::default();
        let limits = ApiSizeLimits::from_mb(50, 50);
        let _router = create_router_with_limits(config, limits);
    }

    #[test]
    fn test_size_limits_from_mb() {
        let limits = ApiSizeLimits::from_mb(50, 25);
        assert_eq!(limits.max_request_body_bytes, 50 * 1024 * 1024);
        assert_eq!(limits.max_multipart_field_bytes, 25 * 1024 * 1024);
    }

    #[test]
    fn test_default_size_limits() {
        let limits = ApiSizeLimits::default();
        assert_eq!(limits.max_request_body_bytes, 100 * 1024 * 1024);
        assert_eq!(limits.max_multipart_field_bytes, 100 * 1024 * 1024);
    }
}
