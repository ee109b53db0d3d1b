//! Feeding candidate mentions through the mapping engine.

use serde::Serialize;
use tracing::info;

use clinanon_core::models::entity::{Entity, MappingPair};
use clinanon_core::models::validation::ValidationIssue;
use clinanon_mapping::MappingTable;

use crate::candidates::{Candidate, ranges_overlap};
use crate::error::IngestError;
use crate::text::{apply_replacements, find_occurrences};
use crate::validate::validate_candidates;

/// The anonymized rendering of one document.
#[derive(Debug, Clone, Serialize)]
pub struct AnonymizedDocument {
    pub anonymized_text: String,
    pub entities: Vec<Entity>,
    pub mappings: Vec<MappingPair>,
    pub issues: Vec<ValidationIssue>,
}

/// Assign a placeholder to every candidate, in order.
///
/// The batch is checked before the first write: a candidate with empty
/// text rejects the whole batch and leaves the table unchanged.
pub fn assign_batch(
    table: &mut MappingTable,
    candidates: &[Candidate],
) -> Result<Vec<Entity>, IngestError> {
    if let Some(index) = candidates.iter().position(|c| c.text.trim().is_empty()) {
        return Err(IngestError::MissingRequiredField {
            index,
            field: "original",
        });
    }

    let entities = candidates
        .iter()
        .map(|candidate| {
            let (code, variant) =
                table.get_or_create_variant_code(&candidate.text, candidate.entity_type, None);
            Entity::new(candidate.text.trim(), code, candidate.entity_type)
                .with_positions(candidate.positions.clone())
                .with_confidence(candidate.confidence)
                .with_variant(variant)
        })
        .collect();

    Ok(entities)
}

/// Anonymize `original_text` with one batch of candidates.
///
/// Detector positions are only approximate, so each entity's positions are
/// replaced by every word-bounded occurrence of its text; when the text is
/// not found the detector's positions are kept. A range inside a longer
/// entity's range belongs to the longer entity ("Jane" within "Jane Smith").
pub fn anonymize_document(
    table: &mut MappingTable,
    original_text: &str,
    candidates: &[Candidate],
) -> Result<AnonymizedDocument, IngestError> {
    let issues = validate_candidates(original_text, candidates);
    let mut entities = assign_batch(table, candidates)?;

    let claims: Vec<Vec<(usize, usize)>> = entities
        .iter()
        .map(|entity| {
            let found = find_occurrences(original_text, &entity.original_text);
            if found.is_empty() {
                entity.positions.clone()
            } else {
                found
            }
        })
        .collect();
    let owned = settle_claims(original_text.chars().count(), &claims);
    for (entity, positions) in entities.iter_mut().zip(owned) {
        entity.positions = positions;
    }

    let anonymized_text = apply_replacements(original_text, &entities);
    let stats = table.stats();
    info!(
        entities = entities.len(),
        issues = issues.len(),
        table_entries = stats.entries,
        persons = stats.persons,
        "document anonymized"
    );

    Ok(AnonymizedDocument {
        anonymized_text,
        entities,
        mappings: table.all_mappings(),
        issues,
    })
}

/// Give every character to at most one entity: longer ranges first, then
/// earlier ones, then earlier entities. Empty and out-of-bounds ranges are
/// dropped.
fn settle_claims(char_count: usize, claims: &[Vec<(usize, usize)>]) -> Vec<Vec<(usize, usize)>> {
    let mut ranked: Vec<(usize, (usize, usize))> = claims
        .iter()
        .enumerate()
        .flat_map(|(owner, ranges)| ranges.iter().map(move |&range| (owner, range)))
        .filter(|(_, (start, end))| start < end && *end <= char_count)
        .collect();
    ranked.sort_by(|(a_owner, a), (b_owner, b)| {
        (b.1 - b.0)
            .cmp(&(a.1 - a.0))
            .then(a.0.cmp(&b.0))
            .then(a_owner.cmp(b_owner))
    });

    let mut taken: Vec<(usize, usize)> = Vec::new();
    let mut owned = vec![Vec::new(); claims.len()];
    for (owner, range) in ranked {
        if !taken.iter().any(|t| ranges_overlap(*t, range)) {
            taken.push(range);
            owned[owner].push(range);
        }
    }
    for ranges in &mut owned {
        ranges.sort_unstable();
    }
    owned
}
