//! # Gemini API client
//!
//! Thin wrapper around the Gemini REST API for document understanding:
//! raw media upload, `generateContent` with a file part plus text prompt,
//! and best-effort deletion of the uploaded file afterwards.
//!
//! The model is an opaque black box: any failure is surfaced as an error for
//! the current request, with no retry. The API key is sent via the
//! `x-goog-api-key` header and only ever logged masked.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::instrument;

mod config;

pub use config::EnvGeminiConfig;

/// Document-understanding interface: file bytes plus an instruction prompt in,
/// the model's textual response out.
#[async_trait]
pub trait DocumentModel: Send + Sync {
    async fn extract(&self, file_bytes: Vec<u8>, mime_type: &str, prompt: &str) -> Result<String>;
}

/// Masks an API key for safe logging: first 7 chars + "***" + last 4 chars.
/// Keys of 11 chars or fewer return "***" to avoid leaking any part.
pub fn mask_token(token: &str) -> String {
    let len = token.len();
    if len <= 11 {
        "***".to_string()
    } else {
        format!("{}***{}", &token[..7], &token[len - 4..])
    }
}

/// Handle to a file uploaded to the Gemini file store.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiFile {
    /// Resource name, e.g. `files/abc-123`; used for deletion.
    pub name: String,
    /// URI referenced from `generateContent` requests.
    pub uri: String,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    file: GeminiFile,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<RequestContent>,
}

#[derive(Serialize)]
struct RequestContent {
    parts: Vec<RequestPart>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RequestPart {
    #[serde(skip_serializing_if = "Option::is_none")]
    file_data: Option<FileData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FileData {
    mime_type: String,
    file_uri: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// Gemini REST client.
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_MODEL: &str = "gemini-1.5-flash";

impl GeminiClient {
    /// Builds a client using the given API key and the public API base URL.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Overrides the base URL (proxies, compatible endpoints, tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Builds the client from env configuration.
    pub fn from_config(config: &EnvGeminiConfig) -> Self {
        Self::new(&config.gemini_api_key)
            .with_base_url(&config.gemini_base_url)
            .with_model(&config.gemini_model)
    }

    /// Uploads raw file bytes to the Gemini file store.
    #[instrument(skip(self, bytes), fields(bytes = bytes.len()))]
    pub async fn upload_file(&self, bytes: Vec<u8>, mime_type: &str) -> Result<GeminiFile> {
        tracing::info!(
            mime_type,
            api_key = %mask_token(&self.api_key),
            "uploading file to Gemini"
        );
        let response = self
            .http
            .post(format!("{}/upload/v1beta/files", self.base_url))
            .header("x-goog-api-key", &self.api_key)
            .header("X-Goog-Upload-Protocol", "raw")
            .header(reqwest::header::CONTENT_TYPE, mime_type)
            .body(bytes)
            .send()
            .await
            .context("file upload request failed")?;
        let upload: UploadResponse = read_json(response, "file upload").await?;
        Ok(upload.file)
    }

    /// Asks the model about the uploaded file with the given prompt and
    /// returns the concatenated text of the first candidate.
    #[instrument(skip(self, prompt))]
    pub async fn generate_with_file(
        &self,
        file: &GeminiFile,
        mime_type: &str,
        prompt: &str,
    ) -> Result<String> {
        let request = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![
                    RequestPart {
                        file_data: Some(FileData {
                            mime_type: mime_type.to_string(),
                            file_uri: file.uri.clone(),
                        }),
                        text: None,
                    },
                    RequestPart {
                        file_data: None,
                        text: Some(prompt.to_string()),
                    },
                ],
            }],
        };

        let response = self
            .http
            .post(format!(
                "{}/v1beta/models/{}:generateContent",
                self.base_url, self.model
            ))
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .context("generateContent request failed")?;
        let generated: GenerateResponse = read_json(response, "generateContent").await?;

        let candidate = generated
            .candidates
            .into_iter()
            .next()
            .context("No candidates in model response")?;
        let text: String = candidate
            .content
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect()
            })
            .unwrap_or_default();
        if text.is_empty() {
            anyhow::bail!("Model response contained no text");
        }
        Ok(text)
    }

    /// Deletes an uploaded file from the Gemini file store.
    #[instrument(skip(self))]
    pub async fn delete_file(&self, name: &str) -> Result<()> {
        let response = self
            .http
            .delete(format!("{}/v1beta/{}", self.base_url, name))
            .header("x-goog-api-key", &self.api_key)
            .send()
            .await
            .context("file delete request failed")?;
        if !response.status().is_success() {
            anyhow::bail!("file delete returned {}", response.status());
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentModel for GeminiClient {
    /// Upload, generate, then best-effort delete. The file may already be gone
    /// on the remote side, so a delete failure only logs a warning.
    async fn extract(&self, file_bytes: Vec<u8>, mime_type: &str, prompt: &str) -> Result<String> {
        let file = self.upload_file(file_bytes, mime_type).await?;
        let result = self.generate_with_file(&file, mime_type, prompt).await;
        if let Err(e) = self.delete_file(&file.name).await {
            tracing::warn!(file = %file.name, error = %e, "failed to delete uploaded file");
        }
        result
    }
}

/// Decodes a JSON response body, turning non-2xx statuses into errors that
/// carry the status and a truncated body.
async fn read_json<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
    what: &str,
) -> Result<T> {
    let status = response.status();
    let body = response
        .text()
        .await
        .with_context(|| format!("{what}: failed to read response body"))?;
    if !status.is_success() {
        let snippet: String = body.chars().take(200).collect();
        anyhow::bail!("{what} returned {status}: {snippet}");
    }
    serde_json::from_str(&body).with_context(|| format!("{what}: unexpected response shape"))
}
