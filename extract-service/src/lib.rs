//! # extract-service
//!
//! HTTP service that forwards an uploaded PDF to a document-understanding
//! model with a fixed extraction prompt, keeps the raw response in a bounded
//! result store, and renders it on demand as a downloadable paginated text
//! report.
//!
//! Routes:
//! - `GET /`: minimal upload form
//! - `POST /extract`: multipart PDF upload, returns `{ report_id, result, warning? }`
//! - `GET /download/{report_id}`: text report attachment
//! - `GET /health`: liveness probe

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

pub mod error;
pub mod handlers;
pub mod state;

pub use error::ApiError;
pub use state::AppState;

/// PDF uploads can be several MB; raise the default extractor cap.
/// 32 MiB covers typical documents without being unbounded.
const PDF_UPLOAD_LIMIT_BYTES: usize = 32 * 1024 * 1024;

/// Builds the service router over the given state.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route(
            "/extract",
            post(handlers::extract).layer(DefaultBodyLimit::max(PDF_UPLOAD_LIMIT_BYTES)),
        )
        .route("/download/{report_id}", get(handlers::download))
        .route("/health", get(handlers::health))
        .with_state(state)
}
