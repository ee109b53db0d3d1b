use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// What is wrong with an entity's positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum IssueKind {
    /// `start == end`.
    EmptyRange,
    /// `start > end`.
    NonMonotonic,
    /// `end` is past the end of the original text.
    OutOfBounds,
    /// The text at the range does not match the entity's original text.
    TextMismatch,
    /// The range overlaps a range of another entity.
    Overlap,
}

/// A soft problem found while checking detector output against the
/// original text. Issues are surfaced to the user, never thrown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ValidationIssue {
    pub kind: IssueKind,
    /// Index of the offending entity in the batch.
    pub entity_index: usize,
    /// The other entity involved, for overlaps.
    pub other_index: Option<usize>,
    pub range: (usize, usize),
    pub message: String,
}
