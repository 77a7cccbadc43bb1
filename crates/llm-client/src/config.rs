//! LLM configuration loaded from environment variables.

use anyhow::{Context, Result};
use std::env;

/// Configuration for the OpenAI-backed chat and transcription clients.
#[derive(Debug, Clone)]
pub struct EnvLlmConfig {
    pub openai_api_key: String,
    pub openai_base_url: Option<String>,
    pub chat_model: String,
    pub transcribe_model: String,
    pub system_prompt: Option<String>,
}

impl EnvLlmConfig {
    /// Load from environment variables.
    ///
    /// `OPENAI_API_KEY` is required; `OPENAI_BASE_URL`, `CHAT_MODEL`,
    /// `TRANSCRIBE_MODEL` and `SYSTEM_PROMPT` are optional with defaults.
    pub fn from_env() -> Result<Self> {
        let openai_api_key = env::var("OPENAI_API_KEY").context("OPENAI_API_KEY not set")?;
        let openai_base_url = env::var("OPENAI_BASE_URL")
            .ok()
            .filter(|s| !s.trim().is_empty());
        let chat_model = env::var("CHAT_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string());
        let transcribe_model =
            env::var("TRANSCRIBE_MODEL").unwrap_or_else(|_| "whisper-1".to_string());
        let system_prompt = env::var("SYSTEM_PROMPT")
            .ok()
            .filter(|s| !s.trim().is_empty());
        Ok(Self {
            openai_api_key,
            openai_base_url,
            chat_model,
            transcribe_model,
            system_prompt,
        })
    }
}
