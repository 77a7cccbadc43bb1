//! OpenAI implementations: chat completion and Whisper transcription.

use std::path::Path;

use anyhow::Result;
use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        CreateChatCompletionRequestArgs, CreateTranscriptionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use prompt::ChatMessage;
use tracing::instrument;

use crate::config::EnvLlmConfig;
use crate::{chat_message_to_openai, mask_token, ChatModel, SpeechToText};

fn build_client(api_key: &str, base_url: Option<&str>) -> Client<OpenAIConfig> {
    let mut config = OpenAIConfig::new().with_api_key(api_key);
    if let Some(base_url) = base_url {
        config = config.with_api_base(base_url);
    }
    Client::with_config(config)
}

/// Chat-completion client over async-openai. Prepends its system instruction
/// to every request.
#[derive(Clone)]
pub struct OpenAiChat {
    client: Client<OpenAIConfig>,
    model: String,
    system_prompt: String,
    // API key kept only for masked logging.
    api_key_for_logging: String,
}

impl OpenAiChat {
    pub fn new(api_key: impl Into<String>) -> Self {
        let api_key = api_key.into();
        Self {
            client: build_client(&api_key, None),
            model: "gpt-4o-mini".to_string(),
            system_prompt: prompt::DEFAULT_SYSTEM_MESSAGE.to_string(),
            api_key_for_logging: api_key,
        }
    }

    /// Builds a client with a custom base URL (proxies, compatible endpoints).
    pub fn with_base_url(api_key: impl Into<String>, base_url: &str) -> Self {
        let api_key = api_key.into();
        Self {
            client: build_client(&api_key, Some(base_url)),
            model: "gpt-4o-mini".to_string(),
            system_prompt: prompt::DEFAULT_SYSTEM_MESSAGE.to_string(),
            api_key_for_logging: api_key,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = system_prompt.into();
        self
    }

    /// Builds the chat client from env configuration.
    pub fn from_config(config: &EnvLlmConfig) -> Self {
        let chat = match config.openai_base_url.as_deref() {
            Some(base_url) => Self::with_base_url(&config.openai_api_key, base_url),
            None => Self::new(&config.openai_api_key),
        };
        let chat = chat.with_model(&config.chat_model);
        match &config.system_prompt {
            Some(system_prompt) => chat.with_system_prompt(system_prompt),
            None => chat,
        }
    }
}

#[async_trait]
impl ChatModel for OpenAiChat {
    #[instrument(skip(self, messages))]
    async fn reply(&self, messages: Vec<ChatMessage>) -> Result<String> {
        let mut openai_messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(self.system_prompt.clone())
                .build()?
                .into(),
        ];
        for msg in &messages {
            openai_messages.push(chat_message_to_openai(msg)?);
        }

        tracing::info!(
            model = %self.model,
            message_count = openai_messages.len(),
            api_key = %mask_token(&self.api_key_for_logging),
            "chat completion request"
        );

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(openai_messages)
            .build()?;

        let response = self.client.chat().create(request).await?;

        if let Some(u) = &response.usage {
            tracing::info!(
                prompt_tokens = u.prompt_tokens,
                completion_tokens = u.completion_tokens,
                total_tokens = u.total_tokens,
                "chat completion usage"
            );
        }

        match response.choices.first() {
            Some(choice) => Ok(choice.message.content.clone().unwrap_or_default()),
            None => anyhow::bail!("No response from chat model"),
        }
    }
}

/// Whisper transcription client over async-openai.
#[derive(Clone)]
pub struct WhisperTranscriber {
    client: Client<OpenAIConfig>,
    model: String,
}

impl WhisperTranscriber {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: build_client(&api_key.into(), None),
            model: "whisper-1".to_string(),
        }
    }

    pub fn with_base_url(api_key: impl Into<String>, base_url: &str) -> Self {
        Self {
            client: build_client(&api_key.into(), Some(base_url)),
            model: "whisper-1".to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Builds the transcriber from env configuration.
    pub fn from_config(config: &EnvLlmConfig) -> Self {
        let transcriber = match config.openai_base_url.as_deref() {
            Some(base_url) => Self::with_base_url(&config.openai_api_key, base_url),
            None => Self::new(&config.openai_api_key),
        };
        transcriber.with_model(&config.transcribe_model)
    }
}

#[async_trait]
impl SpeechToText for WhisperTranscriber {
    #[instrument(skip(self))]
    async fn transcribe(&self, audio_path: &Path) -> Result<String> {
        let request = CreateTranscriptionRequestArgs::default()
            .file(audio_path)
            .model(&self.model)
            .build()?;

        let response = self.client.audio().transcribe(request).await?;
        tracing::info!(chars = response.text.len(), "transcription received");
        Ok(response.text)
    }
}
