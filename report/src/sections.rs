//! Defensive construction of the report structure from a parse outcome.
//!
//! Expected schema (what the extraction prompt asks for):
//!
//! ```json
//! {
//!   "document_metadata": {
//!     "document_type": "PDF",
//!     "total_sections": "3",
//!     "extraction_timestamp": "..."
//!   },
//!   "extracted_sections": {
//!     "section_1": {
//!       "title": "...",
//!       "section_type": "header/paragraph/list/table/mixed",
//!       "hierarchy_level": 1,
//!       "content": { "raw_text": "...", "word_count": "42" }
//!     }
//!   }
//! }
//! ```
//!
//! Anything else degrades to a single synthetic section so the download never
//! fails on account of the model's output shape.

use serde_json::Value;

use crate::parse::ExtractionOutcome;

/// Title used for the synthetic section when the payload had no usable shape.
pub const SYNTHETIC_SECTION_TITLE: &str = "Extracted Content";

/// Document-level metadata block, rendered before the sections when present.
#[derive(Debug, Clone)]
pub struct MetadataBlock {
    pub document_type: String,
    pub total_sections: String,
    pub extraction_timestamp: String,
}

/// One extracted section in reading order.
#[derive(Debug, Clone)]
pub struct SectionBlock {
    pub title: String,
    pub section_type: String,
    pub hierarchy_level: String,
    pub body: String,
    pub word_count: Option<String>,
}

/// The report structure handed to the renderer.
#[derive(Debug, Clone)]
pub struct DocumentReport {
    pub metadata: Option<MetadataBlock>,
    pub sections: Vec<SectionBlock>,
}

impl DocumentReport {
    /// Builds a report from a parse outcome, covering all four shapes the
    /// model is known to produce: expected-schema JSON, other-shaped JSON,
    /// fenced JSON (already unfenced by the parser), and plain text.
    pub fn from_outcome(outcome: &ExtractionOutcome) -> Self {
        match outcome {
            ExtractionOutcome::Parsed(value) => Self::from_value(value),
            ExtractionOutcome::Raw { text, .. } => Self::synthetic(text.clone()),
        }
    }

    fn from_value(value: &Value) -> Self {
        let metadata = value.get("document_metadata").map(|m| MetadataBlock {
            document_type: field_text(m, "document_type"),
            total_sections: field_text(m, "total_sections"),
            extraction_timestamp: field_text(m, "extraction_timestamp"),
        });

        let sections = match value.get("extracted_sections").and_then(Value::as_object) {
            Some(map) if !map.is_empty() => map
                .iter()
                .map(|(key, section)| section_block(key, section))
                .collect(),
            // Valid JSON of a different shape: show the whole payload as one
            // section rather than an empty report.
            _ => {
                let body = serde_json::to_string_pretty(value)
                    .unwrap_or_else(|_| value.to_string());
                return Self::synthetic(body).with_metadata(metadata);
            }
        };

        Self { metadata, sections }
    }

    fn synthetic(body: String) -> Self {
        Self {
            metadata: None,
            sections: vec![SectionBlock {
                title: SYNTHETIC_SECTION_TITLE.to_string(),
                section_type: "text".to_string(),
                hierarchy_level: "1".to_string(),
                body,
                word_count: None,
            }],
        }
    }

    fn with_metadata(mut self, metadata: Option<MetadataBlock>) -> Self {
        self.metadata = metadata;
        self
    }
}

fn section_block(key: &str, section: &Value) -> SectionBlock {
    let Some(obj) = section.as_object() else {
        // A scalar or array where an object was expected; keep its content.
        return SectionBlock {
            title: key.to_string(),
            section_type: "unknown".to_string(),
            hierarchy_level: String::new(),
            body: value_text(section),
            word_count: None,
        };
    };

    let title = obj
        .get("title")
        .and_then(Value::as_str)
        .unwrap_or(key)
        .to_string();
    let section_type = obj
        .get("section_type")
        .and_then(Value::as_str)
        .unwrap_or("unknown")
        .to_string();
    let hierarchy_level = obj.get("hierarchy_level").map(value_text).unwrap_or_default();

    let (body, word_count) = match obj.get("content") {
        Some(Value::Object(content)) => {
            let body = content
                .get("raw_text")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            let word_count = content.get("word_count").map(value_text);
            (body, word_count)
        }
        Some(other) => (value_text(other), None),
        None => (String::new(), None),
    };

    SectionBlock {
        title,
        section_type,
        hierarchy_level,
        body,
        word_count,
    }
}

/// Field of `value` rendered as display text; "Unknown" when missing.
fn field_text(value: &Value, field: &str) -> String {
    value
        .get(field)
        .map(value_text)
        .unwrap_or_else(|| "Unknown".to_string())
}

/// A JSON value as display text: strings unquoted, everything else compact.
fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
