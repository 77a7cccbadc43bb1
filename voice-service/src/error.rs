//! HTTP adapter for the shared error taxonomy.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use docunder_core::ServiceError;
use serde_json::json;

/// Newtype so the shared [`ServiceError`] taxonomy can carry an axum response
/// mapping. Failures are scoped to the single request; context and history
/// are never rolled back.
#[derive(Debug)]
pub struct ApiError(pub ServiceError);

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        Self(e)
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        Self(ServiceError::Internal(format!("{e:#}")))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            ServiceError::InvalidUpload(_) => StatusCode::BAD_REQUEST,
            ServiceError::ReportNotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ServiceError::Config(_) | ServiceError::Io(_) | ServiceError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        } else {
            tracing::warn!(error = %self.0, "request rejected");
        }
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}
