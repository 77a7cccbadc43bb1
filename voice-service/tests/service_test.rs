//! Router-level tests for voice-service with scripted transcription and chat
//! mocks.
//!
//! External interactions: none; requests go through `tower::ServiceExt::oneshot`
//! and both models are in-process mocks. The chat mock records every prompt it
//! receives so tests can assert on the assembled prompt.

use std::collections::VecDeque;
use std::path::Path;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use llm_client::{ChatModel, SpeechToText};
use memory::{InMemoryContextStore, TranscriptHistory};
use prompt::{ChatMessage, EMPTY_CONTEXT_PLACEHOLDER, SECTION_CONTEXT, SECTION_CONVERSATION};
use tower::ServiceExt;
use voice_service::{router, AppState};

/// Returns scripted transcripts in order; errors once the script runs out.
struct ScriptedTranscriber {
    transcripts: Mutex<VecDeque<Result<String, String>>>,
}

impl ScriptedTranscriber {
    fn returning(transcripts: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            transcripts: Mutex::new(
                transcripts.iter().map(|t| Ok(t.to_string())).collect(),
            ),
        })
    }

    fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            transcripts: Mutex::new(VecDeque::from([Err(message.to_string())])),
        })
    }
}

#[async_trait]
impl SpeechToText for ScriptedTranscriber {
    async fn transcribe(&self, _audio_path: &Path) -> Result<String> {
        match self.transcripts.lock().unwrap().pop_front() {
            Some(Ok(text)) => Ok(text),
            Some(Err(message)) => anyhow::bail!("{message}"),
            None => anyhow::bail!("no scripted transcript left"),
        }
    }
}

/// Answers with a fixed string and records every prompt it was asked.
struct RecordingChat {
    prompts: Mutex<Vec<String>>,
}

impl RecordingChat {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            prompts: Mutex::new(Vec::new()),
        })
    }

    fn last_prompt(&self) -> String {
        self.prompts.lock().unwrap().last().cloned().unwrap_or_default()
    }
}

#[async_trait]
impl ChatModel for RecordingChat {
    async fn reply(&self, messages: Vec<ChatMessage>) -> Result<String> {
        let prompt = messages
            .last()
            .map(|m| m.content.clone())
            .unwrap_or_default();
        self.prompts.lock().unwrap().push(prompt);
        Ok("mock answer".to_string())
    }
}

fn app_with(
    transcriber: Arc<ScriptedTranscriber>,
    chat: Arc<RecordingChat>,
) -> axum::Router {
    router(AppState::new(
        Arc::new(InMemoryContextStore::new()),
        TranscriptHistory::default(),
        transcriber,
        chat,
    ))
}

const BOUNDARY: &str = "----voice-test-boundary";

fn multipart_request(uri: &str, filename: &str, data: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn upload_context(app: &axum::Router, text: &str) -> serde_json::Value {
    let response = app
        .clone()
        .oneshot(multipart_request("/upload_context", "notes.txt", text.as_bytes()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

async fn process_audio(app: &axum::Router) -> axum::response::Response {
    app.clone()
        .oneshot(multipart_request("/process_audio", "clip.webm", b"fake-audio-bytes"))
        .await
        .unwrap()
}

/// **Test: uploaded context and the transcribed question both appear in the
/// prompt, in their labeled sections, in that order.**
#[tokio::test]
async fn context_and_question_appear_in_order() {
    let chat = RecordingChat::new();
    let app = app_with(
        ScriptedTranscriber::returning(&["What should I watch for?"]),
        chat.clone(),
    );

    let body = upload_context(&app, "Patient is diabetic.").await;
    assert_eq!(body["status"], "uploaded");
    assert_eq!(body["context_items"], 1);

    let response = process_audio(&app).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["answer"], "mock answer");

    let prompt = chat.last_prompt();
    let context_at = prompt.find("Patient is diabetic.").unwrap();
    let question_at = prompt.find("What should I watch for?").unwrap();
    assert!(context_at < question_at);
    assert!(prompt.find(SECTION_CONTEXT).unwrap() < prompt.find(SECTION_CONVERSATION).unwrap());
}

/// **Test: the rolling history keeps only the last five transcripts, oldest
/// evicted first, order preserved.**
#[tokio::test]
async fn history_is_capped_at_five_turns() {
    let chat = RecordingChat::new();
    let app = app_with(
        ScriptedTranscriber::returning(&["t1", "t2", "t3", "t4", "t5", "t6", "t7"]),
        chat.clone(),
    );

    for _ in 0..7 {
        let response = process_audio(&app).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let prompt = chat.last_prompt();
    let conversation = prompt.split(SECTION_CONVERSATION).nth(1).unwrap();
    assert!(!conversation.contains("t1"));
    assert!(!conversation.contains("t2"));
    for kept in ["t3", "t4", "t5", "t6", "t7"] {
        assert!(conversation.contains(kept), "missing {kept}");
    }
    let order: Vec<usize> = ["t3", "t4", "t5", "t6", "t7"]
        .iter()
        .map(|t| conversation.find(t).unwrap())
        .collect();
    assert!(order.windows(2).all(|w| w[0] < w[1]));
}

/// **Test: with no uploaded context the prompt carries the placeholder
/// sentinel.**
#[tokio::test]
async fn empty_context_uses_placeholder() {
    let chat = RecordingChat::new();
    let app = app_with(ScriptedTranscriber::returning(&["hello"]), chat.clone());

    let response = process_audio(&app).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(chat.last_prompt().contains(EMPTY_CONTEXT_PLACEHOLDER));
}

/// **Test: an empty transcript is still appended and shows up as a blank line
/// in the conversation section.**
#[tokio::test]
async fn empty_transcript_counts_toward_history() {
    let chat = RecordingChat::new();
    let app = app_with(ScriptedTranscriber::returning(&["", "next"]), chat.clone());

    process_audio(&app).await;
    process_audio(&app).await;

    let prompt = chat.last_prompt();
    assert!(prompt.contains(&format!("{SECTION_CONVERSATION}\n\nnext")));
}

/// **Test: reset clears both stores; a later prompt uses only the placeholder
/// and the new transcript.**
#[tokio::test]
async fn reset_clears_context_and_history() {
    let chat = RecordingChat::new();
    let app = app_with(
        ScriptedTranscriber::returning(&["before reset", "after reset"]),
        chat.clone(),
    );

    upload_context(&app, "old knowledge").await;
    process_audio(&app).await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/reset_context")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "reset");

    process_audio(&app).await;
    let prompt = chat.last_prompt();
    assert!(prompt.contains(EMPTY_CONTEXT_PLACEHOLDER));
    assert!(!prompt.contains("old knowledge"));
    assert!(!prompt.contains("before reset"));
    assert!(prompt.contains("after reset"));
}

/// **Test: a whitespace-only context upload is ignored.**
#[tokio::test]
async fn whitespace_context_is_ignored() {
    let chat = RecordingChat::new();
    let app = app_with(ScriptedTranscriber::returning(&[]), chat);

    let body = upload_context(&app, "   \n  ").await;
    assert_eq!(body["context_items"], 0);
}

/// **Test: an empty audio upload is rejected with 400 and nothing reaches the
/// models.**
#[tokio::test]
async fn empty_audio_is_rejected() {
    let chat = RecordingChat::new();
    let app = app_with(ScriptedTranscriber::returning(&["unused"]), chat.clone());

    let response = app
        .clone()
        .oneshot(multipart_request("/process_audio", "clip.webm", b""))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(chat.prompts.lock().unwrap().is_empty());
}

/// **Test: a transcription failure surfaces as 502 and the chat model is not
/// called.**
#[tokio::test]
async fn transcription_failure_is_bad_gateway() {
    let chat = RecordingChat::new();
    let app = app_with(ScriptedTranscriber::failing("audio service down"), chat.clone());

    let response = process_audio(&app).await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("audio service down"));
    assert!(chat.prompts.lock().unwrap().is_empty());
}
