//! # Memory
//!
//! Injectable in-process state for the docunder services.
//!
//! Three pieces live here:
//!
//! - [`ContextStore`]: append-only uploaded context snippets, cleared only by
//!   explicit reset. No dedup and no size cap; unbounded growth is a known
//!   limitation.
//! - [`TranscriptHistory`]: bounded FIFO of the most recent transcripts.
//!   Insertion appends then truncates to the newest N entries.
//! - [`ResultStore`]: extraction results keyed by generated id, with
//!   capacity-bounded oldest-first eviction.
//!
//! ## Thread safety
//!
//! The in-memory implementations use `Arc<RwLock<...>>` for thread-safe
//! concurrent access. `TranscriptHistory` itself is a plain value; services
//! wrap it in a lock of their own so the locking discipline stays visible at
//! the call site.
//!
//! Nothing here persists beyond process memory.

pub mod context_store;
pub mod history;
pub mod result_store;

pub use context_store::{ContextStore, InMemoryContextStore};
pub use history::{TranscriptHistory, DEFAULT_TRANSCRIPT_CAPACITY};
pub use result_store::{
    ExtractionRecord, InMemoryResultStore, ResultStore, DEFAULT_RESULT_CAPACITY,
};
