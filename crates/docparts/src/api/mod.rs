//! REST API server for batch document processing.
//!
//! Axum-based HTTP server exposing the batch pipeline over multipart upload.
//!
//! # Endpoints
//!
//! - `POST /process` - Process uploaded files into content elements (multipart form data)
//! - `GET /health` - Health check endpoint
//! - `GET /info` - Server information
//!
//! # Examples
//!
//! ## Starting the server
//!
//! ```no_run
//! use docparts::api::serve;
//!
//! #[tokio::main]
//! async fn main() -> docparts::Result<()> {
//!     serve("127.0.0.1", 8000).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Embedding the router in your app
//!
//! ```no_run
//! use docparts::{ProcessingConfig, api::create_router};
//! use axum::Router;
//!
//! #[tokio::main]
//! async fn main() -> docparts::Result<()> {
//!     let config = ProcessingConfig::default();
//!     let docparts_router = create_router(config);
//!
//!     let app = Router::new().nest("/api", docparts_router);
//!     // ...
//!     Ok(())
//! }
//! ```
//!
//! # cURL Examples
//!
//! ```bash
//! # Batch processing
//! curl -F "files=@report.pdf" -F "files=@notes.txt" http://localhost:8000/process
//!
//! # With a per-request config override
//! curl -F "files=@scan.png" \
//!      -F 'config={"strategy":"ocr_only","ocr_languages":["deu"]}' \
//!      http://localhost:8000/process
//!
//! # Health check
//! curl http://localhost:8000/health
//! ```

mod error;
mod handlers;
mod server;
mod types;

pub use error::ApiError;
pub use server::{
    create_router, create_router_with_backend, create_router_with_limits, serve, serve_default,
    serve_with_config, serve_with_config_and_limits,
};
pub use types::{ApiSizeLimits, ApiState, ErrorResponse, HealthResponse, InfoResponse};
