use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::entity_type::EntityType;
use super::name_variant::NameVariant;

/// A detected PII mention together with the placeholder assigned to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Entity {
    pub id: Uuid,
    pub original_text: String,
    pub replacement_code: String,
    pub entity_type: EntityType,
    /// Half-open character ranges `(start, end)` in the original text.
    pub positions: Vec<(usize, usize)>,
    pub confidence: Option<f64>,
    pub name_variant: Option<NameVariant>,
}

impl Entity {
    pub fn new(
        original_text: impl Into<String>,
        replacement_code: impl Into<String>,
        entity_type: EntityType,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            original_text: original_text.into(),
            replacement_code: replacement_code.into(),
            entity_type,
            positions: Vec::new(),
            confidence: None,
            name_variant: None,
        }
    }

    pub fn with_positions(mut self, positions: Vec<(usize, usize)>) -> Self {
        self.positions = positions;
        self
    }

    pub fn with_confidence(mut self, confidence: Option<f64>) -> Self {
        self.confidence = confidence;
        self
    }

    pub fn with_variant(mut self, variant: Option<NameVariant>) -> Self {
        self.name_variant = variant;
        self
    }
}

/// One `(original, replacement)` row of a session export. Also the import
/// shape, so an exported session can be replayed into a fresh one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MappingPair {
    pub original: String,
    pub replacement: String,
}

impl MappingPair {
    pub fn new(original: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            replacement: replacement.into(),
        }
    }
}
