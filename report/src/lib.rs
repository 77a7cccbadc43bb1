//! # Report
//!
//! Best-effort handling of document-model output and the downloadable report
//! renderer.
//!
//! The document model is asked for JSON but may return anything: fenced JSON,
//! JSON of an unexpected shape, or prose. [`best_effort_parse`] tags the
//! outcome instead of discarding malformed payloads, and
//! [`DocumentReport::from_outcome`] degrades gracefully so the renderer always
//! has something to show. `serde_json` is built with `preserve_order` so
//! sections render in the order the model produced them.

pub mod parse;
pub mod render;
pub mod sections;

pub use parse::{best_effort_parse, strip_code_fences, ExtractionOutcome};
pub use render::{render_report, LINES_PER_PAGE, WRAP_COLUMNS};
pub use sections::{DocumentReport, MetadataBlock, SectionBlock};
