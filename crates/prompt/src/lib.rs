//! # Prompt
//!
//! Formats uploaded context and the rolling conversation history into a single
//! prompt string for AI models.
//!
//! ## Format
//!
//! - Fixed instruction preamble
//! - **Context information**: newline-joined context snippets, oldest first,
//!   or a placeholder sentinel when no context has been uploaded
//! - **Recent conversation transcripts**: newline-joined transcripts, oldest
//!   first
//!
//! ## Usage
//!
//! Used by voice-service when answering a transcribed question. Pure
//! formatting; callers snapshot their stores and pass the entries in. An empty
//! transcript string still occupies a line in the conversation section (it was
//! appended to the history and counted toward its cap).
//!
//! ## External interactions
//!
//! - **AI models**: Output is sent as the user message of a chat completion.

/// Role of a message, one-to-one with OpenAI Chat Completions API `role` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    /// System instruction (API `role: "system"`).
    System,
    /// User message (API `role: "user"`).
    User,
    /// Assistant message (API `role: "assistant"`).
    Assistant,
}

/// A single chat message, one-to-one with one element of OpenAI `messages` array.
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// Default system instruction for the voice answer call.
pub const DEFAULT_SYSTEM_MESSAGE: &str =
    "You analyze live audio and provide helpful answers instantly.";

/// Instruction preamble placed before the labeled sections.
pub const PROMPT_PREAMBLE: &str = "You are assisting in a live conversation. Use the uploaded \
     context to ground your answers, but reply concisely and directly to the latest question.";

/// Section title for uploaded context snippets.
pub const SECTION_CONTEXT: &str = "Context information:";

/// Section title for the rolling conversation history.
pub const SECTION_CONVERSATION: &str = "Recent conversation transcripts:";

/// Sentinel emitted in place of an empty context section.
pub const EMPTY_CONTEXT_PLACEHOLDER: &str = "(no additional context provided)";

/// Assembles the user prompt from context snippets and recent transcripts.
///
/// Both sections are newline-joined in the order given (oldest to newest).
/// A context that joins to whitespace only is replaced by
/// [`EMPTY_CONTEXT_PLACEHOLDER`] rather than an empty section. Transcripts are
/// joined as-is, so an empty transcript shows up as a blank line.
///
/// # Returns
///
/// A single string suitable as the user message of a chat completion.
pub fn assemble_prompt<C, T, CI, TI>(context: C, transcripts: T) -> String
where
    C: IntoIterator<Item = CI>,
    CI: AsRef<str>,
    T: IntoIterator<Item = TI>,
    TI: AsRef<str>,
{
    let context_blob = join_lines(context);
    let context_blob = context_blob.trim();
    let context_blob = if context_blob.is_empty() {
        EMPTY_CONTEXT_PLACEHOLDER
    } else {
        context_blob
    };
    let conversation_blob = join_lines(transcripts);

    format!(
        "{PROMPT_PREAMBLE}\n\n{SECTION_CONTEXT}\n{context_blob}\n\n{SECTION_CONVERSATION}\n{conversation_blob}"
    )
}

fn join_lines<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(item.as_ref());
    }
    out
}
