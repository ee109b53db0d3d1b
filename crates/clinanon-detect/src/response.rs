//! Detector payload parsing.
//!
//! The LLM detector answers with a JSON object, often wrapped in a Markdown
//! code fence. The pattern recognizer pipeline emits a flat JSON array of
//! hits. Both are turned into [`Candidate`]s here; a payload with any bad
//! entity is rejected as a whole.

use serde::Deserialize;
use tracing::debug;

use clinanon_core::models::entity_type::EntityType;

use crate::candidates::{self, Candidate};
use crate::error::IngestError;

/// The LLM detector's answer.
#[derive(Debug, Clone, Deserialize)]
pub struct DetectionResponse {
    #[serde(default)]
    pub anonymized_text: String,
    #[serde(default)]
    pub entities: Vec<RawEntity>,
}

/// One entity as the LLM reports it. Fields default to empty so that a
/// missing field is reported as such rather than as a JSON error.
#[derive(Debug, Clone, Deserialize)]
pub struct RawEntity {
    #[serde(default)]
    pub original: String,
    #[serde(default)]
    pub replacement: String,
    #[serde(rename = "type", default)]
    pub entity_type: String,
    #[serde(default)]
    pub positions: Vec<(usize, usize)>,
    #[serde(default)]
    pub confidence: Option<f64>,
}

/// One hit from the pattern recognizer pipeline.
#[derive(Debug, Clone, Deserialize)]
pub struct RecognizerHit {
    pub text: String,
    #[serde(rename = "type")]
    pub entity_type: String,
    pub start: usize,
    pub end: usize,
    #[serde(default)]
    pub confidence: Option<f64>,
}

impl DetectionResponse {
    /// Convert every entity to a candidate, failing on the first entity
    /// with a missing field or an unknown type.
    pub fn into_candidates(self) -> Result<Vec<Candidate>, IngestError> {
        self.entities
            .into_iter()
            .enumerate()
            .map(|(index, raw)| raw.into_candidate(index))
            .collect()
    }
}

impl RawEntity {
    fn into_candidate(self, index: usize) -> Result<Candidate, IngestError> {
        let missing = |field| IngestError::MissingRequiredField { index, field };
        if self.original.trim().is_empty() {
            return Err(missing("original"));
        }
        if self.replacement.trim().is_empty() {
            return Err(missing("replacement"));
        }
        if self.positions.is_empty() {
            return Err(missing("positions"));
        }
        if self.entity_type.trim().is_empty() {
            return Err(missing("type"));
        }

        Ok(Candidate {
            text: self.original,
            entity_type: EntityType::from_label(&self.entity_type)?,
            positions: self.positions,
            confidence: self.confidence,
        })
    }
}

/// Remove a Markdown code fence around a payload, if there is one.
///
/// Text before the opening fence and after the closing fence is dropped
/// along with the fence lines themselves.
pub fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(open) = trimmed.find("```") else {
        return trimmed;
    };
    let after_open = &trimmed[open + 3..];
    // Skip the info string (`json`) on the opening fence line.
    let body_start = match after_open.find('\n') {
        Some(i) if after_open[..i].trim().chars().all(|c| c.is_ascii_alphanumeric()) => i + 1,
        _ => 0,
    };
    let body = &after_open[body_start..];
    match body.rfind("```") {
        Some(close) => body[..close].trim(),
        None => body.trim(),
    }
}

/// Parse the LLM detector's answer.
pub fn parse_response(raw: &str) -> Result<DetectionResponse, IngestError> {
    let payload = strip_code_fences(raw);
    let response: DetectionResponse = serde_json::from_str(payload)
        .map_err(|e| IngestError::MalformedInput(e.to_string()))?;
    debug!(entities = response.entities.len(), "detector response parsed");
    Ok(response)
}

/// Parse the LLM detector's answer from raw bytes.
pub fn parse_response_bytes(raw: &[u8]) -> Result<DetectionResponse, IngestError> {
    let text = std::str::from_utf8(raw)
        .map_err(|e| IngestError::MalformedInput(format!("payload is not UTF-8: {e}")))?;
    parse_response(text)
}

/// Parse recognizer hits, collapse overlaps and duplicates, and fold
/// repeated mentions into multi-position candidates.
pub fn parse_recognizer_hits(raw: &str) -> Result<Vec<Candidate>, IngestError> {
    let hits: Vec<RecognizerHit> = serde_json::from_str(strip_code_fences(raw))
        .map_err(|e| IngestError::MalformedInput(e.to_string()))?;

    let parsed = hits
        .into_iter()
        .enumerate()
        .map(|(index, hit)| {
            if hit.text.trim().is_empty() {
                return Err(IngestError::MissingRequiredField {
                    index,
                    field: "text",
                });
            }
            Ok(Candidate {
                text: hit.text,
                entity_type: EntityType::from_label(&hit.entity_type)?,
                positions: vec![(hit.start, hit.end)],
                confidence: hit.confidence,
            })
        })
        .collect::<Result<Vec<_>, IngestError>>()?;

    let total = parsed.len();
    let cleaned = candidates::group_by_text(candidates::dedupe(candidates::resolve_overlaps(parsed)));
    debug!(hits = total, candidates = cleaned.len(), "recognizer hits cleaned");
    Ok(cleaned)
}
