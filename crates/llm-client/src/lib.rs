//! # LLM client abstraction
//!
//! Defines the [`ChatModel`] and [`SpeechToText`] traits and their OpenAI
//! implementations over [async-openai]. The traits are the seams the voice
//! service is tested through; both are object-safe (dyn compatible).
//!
//! Upstream failures are surfaced as errors and never retried; the caller
//! treats them as unrecoverable for the current request.

use std::path::Path;

use anyhow::Result;
use async_trait::async_trait;
use prompt::{ChatMessage, MessageRole};

use async_openai::types::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
};

mod config;
mod openai;

pub use config::EnvLlmConfig;
pub use openai::{OpenAiChat, WhisperTranscriber};

/// Chat-completion interface: a list of messages in, the assistant reply out.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Returns the model reply text for the given messages. Implementations
    /// may prepend their own system instruction.
    async fn reply(&self, messages: Vec<ChatMessage>) -> Result<String>;
}

/// Speech-transcription interface: an audio file in, the transcript out.
#[async_trait]
pub trait SpeechToText: Send + Sync {
    /// Transcribes the audio file at `audio_path`.
    async fn transcribe(&self, audio_path: &Path) -> Result<String>;
}

/// Masks an API key for safe logging: first 7 chars + "***" + last 4 chars.
/// Keys of 11 chars or fewer return "***" to avoid leaking any part.
pub fn mask_token(token: &str) -> String {
    let len = token.len();
    if len <= 11 {
        "***".to_string()
    } else {
        let head = &token[..7];
        let tail = &token[len - 4..];
        format!("{}***{}", head, tail)
    }
}

/// Converts a single [`ChatMessage`] into OpenAI API message format.
fn chat_message_to_openai(msg: &ChatMessage) -> Result<ChatCompletionRequestMessage> {
    let content = msg.content.clone();
    let openai_msg: ChatCompletionRequestMessage = match msg.role {
        MessageRole::System => ChatCompletionRequestSystemMessageArgs::default()
            .content(content)
            .build()?
            .into(),
        MessageRole::User => ChatCompletionRequestUserMessageArgs::default()
            .content(content)
            .build()?
            .into(),
        MessageRole::Assistant => ChatCompletionRequestAssistantMessageArgs::default()
            .content(content)
            .build()?
            .into(),
    };
    Ok(openai_msg)
}
