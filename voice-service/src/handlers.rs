//! Request handlers for the voice service.

use axum::extract::{Multipart, State};
use axum::response::Json;
use docunder_core::ServiceError;
use prompt::ChatMessage;
use serde::Serialize;
use serde_json::json;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct AnswerResponse {
    pub answer: String,
}

pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// Uploads a text file with background knowledge for future answers.
///
/// The payload is lossily decoded as UTF-8 and trimmed; whitespace-only
/// uploads are ignored rather than stored as empty snippets.
pub async fn upload_context(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<serde_json::Value>, ApiError> {
    let (_, data) = read_file_field(&mut multipart).await?;
    let text = String::from_utf8_lossy(&data).trim().to_string();
    if !text.is_empty() {
        state.context.append(text).await?;
    }
    let context_items = state.context.len().await;
    Ok(Json(json!({
        "status": "uploaded",
        "context_items": context_items,
    })))
}

/// Transcribes uploaded audio and answers from context plus recent
/// conversation. Only the answer is returned; the transcript stays internal.
pub async fn process_audio(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnswerResponse>, ApiError> {
    let (filename, data) = read_file_field(&mut multipart).await?;
    if data.is_empty() {
        return Err(ServiceError::InvalidUpload("Uploaded audio is empty".to_string()).into());
    }

    // Scoped acquisition: the temp file is removed on every exit path once
    // the guard drops, success or failure.
    let temp = tempfile::Builder::new()
        .prefix("voice-upload-")
        .suffix(&audio_suffix(&filename))
        .tempfile()
        .map_err(ServiceError::Io)?;
    tokio::fs::write(temp.path(), &data)
        .await
        .map_err(ServiceError::Io)?;

    let transcript = state
        .transcriber
        .transcribe(temp.path())
        .await
        .map_err(|e| ServiceError::Upstream(format!("Transcription failed: {e:#}")))?;
    drop(temp);

    tracing::info!(chars = transcript.len(), "transcript appended to history");

    // Appended and counted toward the cap even when empty (silence or a
    // transcription that produced nothing).
    {
        let mut history = state.history.write().await;
        history.push(transcript);
    }

    let context = state.context.snapshot().await?;
    let transcripts = state.history.read().await.snapshot();
    let user_prompt = prompt::assemble_prompt(&context, &transcripts);

    let answer = state
        .chat
        .reply(vec![ChatMessage::user(user_prompt)])
        .await
        .map_err(|e| ServiceError::Upstream(format!("Answer generation failed: {e:#}")))?;

    Ok(Json(AnswerResponse { answer }))
}

/// Clears stored context and the rolling conversation history.
pub async fn reset_context(State(state): State<AppState>) -> Json<serde_json::Value> {
    state.context.clear().await;
    state.history.write().await.clear();
    Json(json!({ "status": "reset" }))
}

/// Reads the `file` field of a multipart upload.
async fn read_file_field(multipart: &mut Multipart) -> Result<(String, Vec<u8>), ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError(ServiceError::InvalidUpload(e.to_string())))?
    {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or_default().to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| ApiError(ServiceError::InvalidUpload(e.to_string())))?;
            return Ok((filename, data.to_vec()));
        }
    }
    Err(ServiceError::InvalidUpload("No file selected".to_string()).into())
}

/// Temp-file suffix from the uploaded filename; transcription backends sniff
/// the format from the extension. Defaults to `.webm`, the browser recorder
/// format.
fn audio_suffix(filename: &str) -> String {
    match filename.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => format!(".{ext}"),
        _ => ".webm".to_string(),
    }
}
