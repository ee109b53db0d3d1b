//! Session export and import in the `(original, replacement)` pair shape.

use std::collections::HashMap;

use tracing::info;

use clinanon_core::codes::{ParsedCode, parse_code};
use clinanon_core::models::entity::MappingPair;
use clinanon_core::models::name_variant::NameVariant;

use crate::error::MappingError;
use crate::person::PersonRecord;
use crate::table::{MappingEntry, MappingTable, normalize};

impl MappingTable {
    /// One pair per distinct code, sorted by display text.
    ///
    /// When several mentions share a code, the longest display text
    /// represents it; equally long texts resolve to the earliest inserted.
    pub fn all_mappings(&self) -> Vec<MappingPair> {
        let mut pairs: Vec<MappingPair> = representatives(self.entries())
            .into_iter()
            .map(|entry| MappingPair::new(entry.display_text.clone(), entry.code.clone()))
            .collect();
        pairs.sort_by(|a, b| {
            a.original
                .cmp(&b.original)
                .then_with(|| a.replacement.cmp(&b.replacement))
        });
        pairs
    }

    /// The representative original text for `code`.
    pub fn original_for(&self, code: &str) -> Option<&str> {
        representatives(self.entries())
            .into_iter()
            .find(|entry| entry.code == code)
            .map(|entry| entry.display_text.as_str())
    }

    /// Load exported pairs into the session.
    ///
    /// Every code is parsed before anything is written, so a bad pair
    /// leaves the table untouched. Counters move past every imported index.
    /// Person codes for a whole name (bare or `_FIRST_LAST`) with a
    /// multi-token original also restore the person record, so later
    /// mentions resolve to its variants.
    pub fn import_mappings(&mut self, pairs: &[MappingPair]) -> Result<usize, MappingError> {
        let parsed: Vec<(&MappingPair, ParsedCode)> = pairs
            .iter()
            .map(|pair| parse_code(&pair.replacement).map(|code| (pair, code)))
            .collect::<Result<_, _>>()?;

        for (pair, code) in &parsed {
            let key = normalize(&pair.original);
            if key.is_empty() {
                continue;
            }
            self.reserve(code.entity_type, code.index);
            self.insert(
                &pair.original,
                key,
                pair.replacement.trim().to_string(),
                code.entity_type,
            );

            let base_id = code.base_id();
            if code.entity_type.is_person()
                && matches!(code.variant(), Some(NameVariant::Full | NameVariant::FirstLast))
                && self.person(&base_id).is_none()
                && let Ok(record) = PersonRecord::parse(&pair.original, base_id)
                && record.is_variant_eligible()
            {
                self.persons_mut().push(record);
            }
        }

        info!(imported = parsed.len(), "mappings imported");
        Ok(parsed.len())
    }
}

/// For each code, in first-seen order, the entry with the longest display
/// text.
fn representatives(entries: &[MappingEntry]) -> Vec<&MappingEntry> {
    let mut order: Vec<&MappingEntry> = Vec::new();
    let mut slots: HashMap<&str, usize> = HashMap::new();

    for entry in entries {
        match slots.get(entry.code.as_str()) {
            Some(&slot) => {
                if entry.display_text.chars().count() > order[slot].display_text.chars().count() {
                    order[slot] = entry;
                }
            }
            None => {
                slots.insert(entry.code.as_str(), order.len());
                order.push(entry);
            }
        }
    }
    order
}
