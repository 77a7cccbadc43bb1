//! Gemini configuration loaded from environment variables.

use anyhow::{Context, Result};
use std::env;

/// Configuration for the Gemini document-understanding client.
#[derive(Debug, Clone)]
pub struct EnvGeminiConfig {
    pub gemini_api_key: String,
    pub gemini_base_url: String,
    pub gemini_model: String,
}

impl EnvGeminiConfig {
    /// Load from environment variables.
    ///
    /// `GEMINI_API_KEY` is required; `GEMINI_BASE_URL` and `GEMINI_MODEL`
    /// default to the public endpoint and `gemini-1.5-flash`.
    pub fn from_env() -> Result<Self> {
        let gemini_api_key = env::var("GEMINI_API_KEY").context("GEMINI_API_KEY not set")?;
        let gemini_base_url = env::var("GEMINI_BASE_URL")
            .unwrap_or_else(|_| "https://generativelanguage.googleapis.com".to_string());
        let gemini_model =
            env::var("GEMINI_MODEL").unwrap_or_else(|_| "gemini-1.5-flash".to_string());
        Ok(Self {
            gemini_api_key,
            gemini_base_url,
            gemini_model,
        })
    }
}
