//! Best-effort parsing of model output.
//!
//! Policy: retain regardless, flag if malformed. A failed parse is a
//! non-fatal degradation, never an error that drops the payload.

use serde_json::Value;

/// Result of attempting to parse model output as JSON.
///
/// Downstream consumers must branch explicitly rather than relying on a
/// caught exception somewhere below them.
#[derive(Debug, Clone)]
pub enum ExtractionOutcome {
    /// The payload was valid JSON (after fence stripping).
    Parsed(Value),
    /// The payload was not valid JSON; kept verbatim with the parse error.
    Raw { text: String, reason: String },
}

impl ExtractionOutcome {
    pub fn is_parsed(&self) -> bool {
        matches!(self, Self::Parsed(_))
    }

    /// Non-fatal warning for the caller when the payload was malformed.
    pub fn warning(&self) -> Option<String> {
        match self {
            Self::Parsed(_) => None,
            Self::Raw { .. } => Some(
                "Note: the extracted content may not be in perfect JSON format.".to_string(),
            ),
        }
    }
}

/// Strips Markdown code-fence markers from a model response.
///
/// Handles a leading ```` ```json ```` or bare ```` ``` ```` and a trailing
/// ```` ``` ````, with surrounding whitespace. Content without fences is
/// returned trimmed.
pub fn strip_code_fences(raw: &str) -> &str {
    let mut text = raw.trim();
    if let Some(rest) = text.strip_prefix("```json") {
        text = rest;
    } else if let Some(rest) = text.strip_prefix("```") {
        text = rest;
    }
    if let Some(rest) = text.strip_suffix("```") {
        text = rest;
    }
    text.trim()
}

/// Attempts a strict JSON parse of `raw` after fence stripping.
///
/// On success the parsed value is retained; on failure the raw text is
/// retained as-is together with the parser's reason. No correction is
/// attempted.
pub fn best_effort_parse(raw: &str) -> ExtractionOutcome {
    let cleaned = strip_code_fences(raw);
    match serde_json::from_str::<Value>(cleaned) {
        Ok(value) => ExtractionOutcome::Parsed(value),
        Err(e) => ExtractionOutcome::Raw {
            text: raw.to_string(),
            reason: e.to_string(),
        },
    }
}
