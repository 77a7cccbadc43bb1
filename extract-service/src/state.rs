//! Shared request-handler state.
//!
//! Both collaborators are injected as trait objects so tests can swap in
//! mocks; the binary wires the Gemini client and an in-memory result store.

use std::sync::Arc;

use gemini_client::DocumentModel;
use memory::ResultStore;

#[derive(Clone)]
pub struct AppState {
    pub document_model: Arc<dyn DocumentModel>,
    pub results: Arc<dyn ResultStore>,
}

impl AppState {
    pub fn new(document_model: Arc<dyn DocumentModel>, results: Arc<dyn ResultStore>) -> Self {
        Self {
            document_model,
            results,
        }
    }
}
