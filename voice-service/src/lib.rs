//! # voice-service
//!
//! HTTP service answering transcribed questions with uploaded context.
//!
//! Context snippets accumulate until an explicit reset; each audio upload is
//! transcribed, appended to a short rolling history, and answered by a chat
//! model over a prompt combining both. Only the final answer is returned; the
//! raw transcript stays internal.
//!
//! Routes:
//! - `POST /upload_context`: multipart text file with background knowledge
//! - `POST /process_audio`: multipart audio blob, returns `{ answer }`
//! - `POST /reset_context`: clears context and conversation history
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

/// Multipart audio uploads can be several MB; raise the default extractor cap.
/// 64 MiB supports typical recordings without being unbounded.
const AUDIO_UPLOAD_LIMIT_BYTES: usize = 64 * 1024 * 1024;

/// Builds the service router over the given state.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/upload_context", post(handlers::upload_context))
        .route(
            "/process_audio",
            post(handlers::process_audio).layer(DefaultBodyLimit::max(AUDIO_UPLOAD_LIMIT_BYTES)),
        )
        .route("/reset_context", post(handlers::reset_context))
        .route("/health", get(handlers::health))
        .with_state(state)
}
