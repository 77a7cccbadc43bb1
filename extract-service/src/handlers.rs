//! Request handlers for the extraction service.

use axum::extract::{Multipart, Path, State};
use axum::http::header;
use axum::response::{Html, IntoResponse, Json, Response};
use docunder_core::ServiceError;
use report::{best_effort_parse, render_report, DocumentReport};
use serde::Serialize;
use serde_json::json;
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// Instruction prompt sent alongside every uploaded document.
pub const EXTRACTION_PROMPT: &str = r#"
Please perform a comprehensive extraction and structural analysis of all major sections and data components from the provided PDF document.

EXTRACTION REQUIREMENTS:

1. DOCUMENT ANALYSIS:
   - Identify the document type and format
   - Detect the overall document structure and organization pattern
   - Recognize section headers, subsections, and hierarchical relationships
   - Identify any tables, lists, or structured data elements

2. SECTION IDENTIFICATION AND EXTRACTION:
   - Extract ALL major sections with their exact original titles/headers
   - Identify and extract subsections maintaining their hierarchical structure
   - Capture section metadata (numbering, formatting, position in document)
   - Extract any standalone elements that don't fit into major sections

3. CONTENT PRESERVATION STANDARDS:
   - Maintain EXACT original text without any modifications
   - Preserve all formatting elements
   - Retain original punctuation, capitalization, and spacing
   - Keep numerical data, dates, and measurements in their original format

OUTPUT FORMAT:
Return results as a JSON object with this structure:

{
  "document_metadata": {
    "document_type": "PDF",
    "total_sections": "Number of major sections identified",
    "extraction_timestamp": "Current timestamp"
  },
  "extracted_sections": {
    "section_1": {
      "title": "Exact original section title/header",
      "section_type": "header/paragraph/list/table/mixed",
      "hierarchy_level": 1,
      "content": {
        "raw_text": "Complete unmodified text content",
        "word_count": "Number of words in section"
      }
    }
  }
}

Please process the PDF document and return the structured JSON extraction.
"#;

const INDEX_PAGE: &str = r#"<!doctype html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>DocUnder PDF Section Extractor</title>
</head>
<body>
    <h1>DocUnder PDF Section Extractor</h1>
    <p>Upload a PDF document to extract all sections and structured data.</p>
    <form method="post" action="/extract" enctype="multipart/form-data">
        <input type="file" name="file" accept=".pdf" required>
        <input type="submit" value="Upload &amp; Extract">
    </form>
</body>
</html>
"#;

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub report_id: Uuid,
    pub result: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

pub async fn index() -> Html<&'static str> {
    Html(INDEX_PAGE)
}

pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// Accepts a multipart PDF upload, forwards it to the document model, stores
/// the raw response, and reports a non-fatal warning when the response was
/// not valid JSON. Validation failures reject the request before any state
/// mutation or upstream call.
pub async fn extract(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ExtractResponse>, ApiError> {
    let mut upload: Option<(String, Vec<u8>)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ServiceError::InvalidUpload(e.to_string()))?
    {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or_default().to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| ServiceError::InvalidUpload(e.to_string()))?;
            upload = Some((filename, data.to_vec()));
        }
    }

    let Some((filename, data)) = upload else {
        return Err(ServiceError::InvalidUpload("No file selected".to_string()).into());
    };
    if filename.is_empty() {
        return Err(ServiceError::InvalidUpload("No file selected".to_string()).into());
    }
    if !filename.to_ascii_lowercase().ends_with(".pdf") {
        return Err(ServiceError::InvalidUpload("Please upload a PDF file".to_string()).into());
    }
    if data.is_empty() {
        return Err(ServiceError::InvalidUpload("Uploaded file is empty".to_string()).into());
    }

    tracing::info!(filename = %filename, bytes = data.len(), "extracting document");

    let result = state
        .document_model
        .extract(data, "application/pdf", EXTRACTION_PROMPT)
        .await
        .map_err(|e| {
            ServiceError::Upstream(format!("Error processing with the document model: {e:#}"))
        })?;

    // Retain regardless, flag if malformed.
    let warning = best_effort_parse(&result).warning();
    let report_id = state.results.put(result.clone()).await?;

    Ok(Json(ExtractResponse {
        report_id,
        result,
        warning,
    }))
}

/// Renders a stored extraction result as a paginated text report served as an
/// attachment. The blob is re-parsed defensively on every download.
pub async fn download(
    State(state): State<AppState>,
    Path(report_id): Path<Uuid>,
) -> Result<Response, ApiError> {
    let record = state
        .results
        .get(report_id)
        .await?
        .ok_or_else(|| ServiceError::ReportNotFound(report_id.to_string()))?;

    let outcome = best_effort_parse(&record.raw);
    let rendered = render_report(&DocumentReport::from_outcome(&outcome));

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"extracted_sections.txt\"",
            ),
        ],
        rendered,
    )
        .into_response())
}
