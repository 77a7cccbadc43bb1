//! Key-value store for raw extraction results.
//!
//! Replaces an implicit per-session result slot with an explicit store: the
//! extract endpoint `put`s the raw model output and hands the generated id to
//! the caller; the download endpoint `get`s it back. Retention is bounded, the
//! oldest result is evicted first once the cap is reached.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Number of extraction results retained by default.
pub const DEFAULT_RESULT_CAPACITY: usize = 64;

/// A stored extraction result: the raw model output, as received.
///
/// The blob is expected but not guaranteed to be JSON; consumers re-parse it
/// defensively on every read.
#[derive(Debug, Clone)]
pub struct ExtractionRecord {
    pub raw: String,
    pub created_at: DateTime<Utc>,
}

/// Storage interface for extraction results.
#[async_trait]
pub trait ResultStore: Send + Sync {
    /// Stores a raw extraction result and returns its generated id.
    async fn put(&self, raw: String) -> Result<Uuid, anyhow::Error>;

    /// Retrieves a stored result. `None` when the id is unknown or the record
    /// has been evicted.
    async fn get(&self, id: Uuid) -> Result<Option<ExtractionRecord>, anyhow::Error>;

    /// Number of retained results.
    async fn len(&self) -> usize;
}

#[derive(Debug, Default)]
struct ResultStoreInner {
    records: HashMap<Uuid, ExtractionRecord>,
    // Insertion order, oldest first; drives eviction.
    order: VecDeque<Uuid>,
}

/// In-memory [`ResultStore`] with capacity-bounded FIFO eviction.
#[derive(Debug, Clone)]
pub struct InMemoryResultStore {
    inner: Arc<RwLock<ResultStoreInner>>,
    capacity: usize,
}

impl InMemoryResultStore {
    /// Creates a store retaining at most `capacity` results.
    /// A capacity of zero is treated as one.
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(ResultStoreInner::default())),
            capacity: capacity.max(1),
        }
    }
}

impl Default for InMemoryResultStore {
    fn default() -> Self {
        Self::new(DEFAULT_RESULT_CAPACITY)
    }
}

#[async_trait]
impl ResultStore for InMemoryResultStore {
    async fn put(&self, raw: String) -> Result<Uuid, anyhow::Error> {
        let id = Uuid::new_v4();
        let record = ExtractionRecord {
            raw,
            created_at: Utc::now(),
        };
        let mut inner = self.inner.write().await;
        inner.records.insert(id, record);
        inner.order.push_back(id);
        while inner.order.len() > self.capacity {
            if let Some(evicted) = inner.order.pop_front() {
                inner.records.remove(&evicted);
                tracing::debug!(%evicted, "evicted oldest extraction result");
            }
        }
        Ok(id)
    }

    async fn get(&self, id: Uuid) -> Result<Option<ExtractionRecord>, anyhow::Error> {
        let inner = self.inner.read().await;
        Ok(inner.records.get(&id).cloned())
    }

    async fn len(&self) -> usize {
        self.inner.read().await.records.len()
    }
}
