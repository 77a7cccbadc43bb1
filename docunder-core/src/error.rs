use thiserror::Error;

/// Request-scoped failures shared by both services.
///
/// Every variant maps to a failure of a single request; nothing here is fatal
/// to the process. Store state is never rolled back when one of these occurs.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Rejected before any state mutation: missing file, wrong type, empty upload.
    #[error("Invalid upload: {0}")]
    InvalidUpload(String),

    /// An upstream model API call failed. No retry is attempted.
    #[error("Upstream API error: {0}")]
    Upstream(String),

    /// The requested extraction result is unknown or has been evicted.
    #[error("Report not found: {0}")]
    ReportNotFound(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, ServiceError>;
