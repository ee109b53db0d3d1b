//! Soft checks of detector positions against the original text.
//!
//! Nothing here fails: the anonymized text may already exist and partial
//! results are still useful, so every problem is returned as a
//! [`ValidationIssue`] for the UI to show.

use clinanon_core::models::entity::Entity;
use clinanon_core::models::validation::{IssueKind, ValidationIssue};

use crate::candidates::{Candidate, ranges_overlap};

pub fn validate_candidates(original_text: &str, candidates: &[Candidate]) -> Vec<ValidationIssue> {
    let spans: Vec<(&str, &[(usize, usize)])> = candidates
        .iter()
        .map(|c| (c.text.as_str(), c.positions.as_slice()))
        .collect();
    validate_spans(original_text, &spans)
}

pub fn validate_entities(original_text: &str, entities: &[Entity]) -> Vec<ValidationIssue> {
    let spans: Vec<(&str, &[(usize, usize)])> = entities
        .iter()
        .map(|e| (e.original_text.as_str(), e.positions.as_slice()))
        .collect();
    validate_spans(original_text, &spans)
}

fn validate_spans(original_text: &str, spans: &[(&str, &[(usize, usize)])]) -> Vec<ValidationIssue> {
    let chars: Vec<char> = original_text.chars().collect();
    let mut issues = Vec::new();

    for (index, (text, positions)) in spans.iter().enumerate() {
        for &(start, end) in positions.iter() {
            let issue = |kind, message: String| ValidationIssue {
                kind,
                entity_index: index,
                other_index: None,
                range: (start, end),
                message,
            };

            if start == end {
                issues.push(issue(IssueKind::EmptyRange, format!("empty range at {start}")));
                continue;
            }
            if start > end {
                issues.push(issue(
                    IssueKind::NonMonotonic,
                    format!("range starts at {start} after it ends at {end}"),
                ));
                continue;
            }
            if end > chars.len() {
                issues.push(issue(
                    IssueKind::OutOfBounds,
                    format!("range ends at {end}, text has {} characters", chars.len()),
                ));
                continue;
            }

            let found: String = chars[start..end].iter().collect();
            if found.to_lowercase() != text.to_lowercase() {
                issues.push(issue(
                    IssueKind::TextMismatch,
                    format!("range {start}..{end} does not hold the detected text"),
                ));
            }
        }
    }

    let in_bounds = |r: &(usize, usize)| r.0 < r.1 && r.1 <= chars.len();
    for (index, (_, positions)) in spans.iter().enumerate() {
        for (other, (_, other_positions)) in spans.iter().enumerate().take(index) {
            let clash = positions.iter().filter(|r| in_bounds(r)).find(|&&a| {
                other_positions
                    .iter()
                    .filter(|r| in_bounds(r))
                    .any(|&b| ranges_overlap(a, b))
            });
            if let Some(&range) = clash {
                issues.push(ValidationIssue {
                    kind: IssueKind::Overlap,
                    entity_index: index,
                    other_index: Some(other),
                    range,
                    message: format!("entity {index} overlaps entity {other}"),
                });
            }
        }
    }

    issues
}
