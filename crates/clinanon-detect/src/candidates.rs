//! Candidate mentions as emitted by the detectors, and clean-up of the
//! pattern recognizers' overlapping hits.

use serde::{Deserialize, Serialize};

use clinanon_core::models::entity_type::EntityType;

/// A detected mention before a placeholder is assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub text: String,
    pub entity_type: EntityType,
    /// Half-open character ranges; detectors only approximate these.
    pub positions: Vec<(usize, usize)>,
    pub confidence: Option<f64>,
}

impl Candidate {
    pub fn new(text: impl Into<String>, entity_type: EntityType) -> Self {
        Self {
            text: text.into(),
            entity_type,
            positions: Vec::new(),
            confidence: None,
        }
    }

    pub fn at(mut self, start: usize, end: usize) -> Self {
        self.positions.push((start, end));
        self
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence);
        self
    }

    /// Earliest start across all positions.
    pub fn start(&self) -> usize {
        self.positions.iter().map(|p| p.0).min().unwrap_or(0)
    }

    /// Latest end across all positions.
    pub fn end(&self) -> usize {
        self.positions.iter().map(|p| p.1).max().unwrap_or(0)
    }

    pub fn overlaps(&self, other: &Candidate) -> bool {
        self.positions
            .iter()
            .any(|a| other.positions.iter().any(|b| ranges_overlap(*a, *b)))
    }
}

pub fn ranges_overlap(a: (usize, usize), b: (usize, usize)) -> bool {
    a.0 < b.1 && b.0 < a.1
}

/// Collapse overlapping recognizer hits, keeping the higher confidence and
/// then the longer text. The survivors come back ordered by start.
pub fn resolve_overlaps(mut candidates: Vec<Candidate>) -> Vec<Candidate> {
    candidates.sort_by(|a, b| a.start().cmp(&b.start()).then(b.end().cmp(&a.end())));

    let mut kept: Vec<Candidate> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        match kept.iter().position(|k| k.overlaps(&candidate)) {
            Some(slot) => {
                if beats(&candidate, &kept[slot]) {
                    kept[slot] = candidate;
                }
            }
            None => kept.push(candidate),
        }
    }
    kept
}

fn beats(challenger: &Candidate, holder: &Candidate) -> bool {
    let c = challenger.confidence.unwrap_or(0.0);
    let h = holder.confidence.unwrap_or(0.0);
    c > h || (c == h && challenger.text.chars().count() > holder.text.chars().count())
}

/// Drop candidates repeating an earlier one's lowercased text and
/// positions.
pub fn dedupe(candidates: Vec<Candidate>) -> Vec<Candidate> {
    let mut seen = std::collections::HashSet::new();
    candidates
        .into_iter()
        .filter(|c| seen.insert((c.text.to_lowercase(), c.positions.clone())))
        .collect()
}

/// Fold candidates with the same lowercased text and type into one
/// candidate carrying every position, keeping the best confidence.
pub fn group_by_text(candidates: Vec<Candidate>) -> Vec<Candidate> {
    let mut grouped: Vec<Candidate> = Vec::new();
    for candidate in candidates {
        let key = candidate.text.to_lowercase();
        match grouped
            .iter_mut()
            .find(|g| g.entity_type == candidate.entity_type && g.text.to_lowercase() == key)
        {
            Some(group) => {
                group.positions.extend(candidate.positions);
                group.confidence = match (group.confidence, candidate.confidence) {
                    (Some(a), Some(b)) => Some(a.max(b)),
                    (a, b) => a.or(b),
                };
            }
            None => grouped.push(candidate),
        }
    }
    grouped
}
