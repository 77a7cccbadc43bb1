//! Append-only store for uploaded context snippets.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

/// Storage interface for uploaded background context.
///
/// Entries are ordered (oldest first), append-only, and cleared only by
/// explicit reset. Implementations must be safe to share across request
/// handlers.
#[async_trait]
pub trait ContextStore: Send + Sync {
    /// Appends a context snippet to the end of the store.
    async fn append(&self, text: String) -> Result<(), anyhow::Error>;

    /// Owned copy of all entries in insertion order.
    async fn snapshot(&self) -> Result<Vec<String>, anyhow::Error>;

    /// Number of stored snippets.
    async fn len(&self) -> usize;

    /// Removes all stored snippets.
    async fn clear(&self);
}

/// In-memory [`ContextStore`] used by the services and their tests.
///
/// Uses `Arc<RwLock<Vec<String>>>` so clones share state and concurrent
/// requests cannot corrupt the buffer. Data is lost on restart.
#[derive(Debug, Clone, Default)]
pub struct InMemoryContextStore {
    entries: Arc<RwLock<Vec<String>>>,
}

impl InMemoryContextStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl ContextStore for InMemoryContextStore {
    async fn append(&self, text: String) -> Result<(), anyhow::Error> {
        let mut entries = self.entries.write().await;
        entries.push(text);
        Ok(())
    }

    async fn snapshot(&self) -> Result<Vec<String>, anyhow::Error> {
        let entries = self.entries.read().await;
        Ok(entries.clone())
    }

    async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    async fn clear(&self) {
        let mut entries = self.entries.write().await;
        entries.clear();
    }
}
