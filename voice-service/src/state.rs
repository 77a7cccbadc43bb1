//! Shared request-handler state.
//!
//! The original kept these buffers in process globals; here they are injected
//! explicitly so the locking discipline and testability are visible. The
//! service remains single-tenant: all callers share one context store and one
//! rolling history.

use std::sync::Arc;

use llm_client::{ChatModel, SpeechToText};
use memory::{ContextStore, TranscriptHistory};
use tokio::sync::RwLock;

#[derive(Clone)]
pub struct AppState {
    pub context: Arc<dyn ContextStore>,
    pub history: Arc<RwLock<TranscriptHistory>>,
    pub transcriber: Arc<dyn SpeechToText>,
    pub chat: Arc<dyn ChatModel>,
}

impl AppState {
    pub fn new(
        context: Arc<dyn ContextStore>,
        history: TranscriptHistory,
        transcriber: Arc<dyn SpeechToText>,
        chat: Arc<dyn ChatModel>,
    ) -> Self {
        Self {
            context,
            history: Arc::new(RwLock::new(history)),
            transcriber,
            chat,
        }
    }
}
