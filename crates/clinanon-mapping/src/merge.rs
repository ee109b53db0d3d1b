//! Manual correction: binding aliases to known people and rebuilding a
//! person's name structure.
//!
//! Unlike automatic assignment, this path never guesses. When the alias is
//! not an exact variant of the primary's name the caller asks the user which
//! variant it is and finishes with
//! [`MappingTable::complete_merge_with_variant`].

use std::collections::HashSet;

use tracing::info;

use clinanon_core::codes::{self, parse_code};
use clinanon_core::models::entity_type::EntityType;
use clinanon_core::models::name_variant::NameVariant;

use crate::error::MappingError;
use crate::person::PersonRecord;
use crate::table::{MappingTable, normalize};

/// Variants written back by [`MappingTable::update_person_structure`], most
/// specific first.
const REDERIVE_ORDER: [NameVariant; 7] = [
    NameVariant::Full,
    NameVariant::FirstMiddle,
    NameVariant::FirstLast,
    NameVariant::First,
    NameVariant::Middle,
    NameVariant::Last,
    NameVariant::Formal,
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The alias is now mapped to `code`.
    Success { code: String, variant: NameVariant },
    /// The alias is not an exact variant of the primary's name. Nothing was
    /// written; ask the user for the variant.
    VariantNotDetected { base_id: String, primary_code: String },
}

impl MappingTable {
    /// Bind `alias` to the person behind the already-mapped `primary`
    /// mention, as the variant exact detection recognises.
    pub fn try_merge(&mut self, alias: &str, primary: &str) -> Result<MergeOutcome, MappingError> {
        let (base_id, primary_code, owner) = self.primary_person(primary)?;
        let slot = self.ensure_person(&base_id, primary)?;

        match self.persons()[slot].detect_exact(alias) {
            Some(variant) => {
                let code = self.bind_alias(alias, &base_id, variant, owner);
                Ok(MergeOutcome::Success { code, variant })
            }
            None => {
                info!(base_id = %base_id, "merge needs an explicit variant");
                Ok(MergeOutcome::VariantNotDetected {
                    base_id,
                    primary_code,
                })
            }
        }
    }

    /// Finish a merge with the variant the user chose.
    pub fn complete_merge_with_variant(
        &mut self,
        alias: &str,
        primary: &str,
        variant: NameVariant,
    ) -> Result<String, MappingError> {
        let (base_id, _, owner) = self.primary_person(primary)?;
        self.ensure_person(&base_id, primary)?;
        Ok(self.bind_alias(alias, &base_id, variant, owner))
    }

    /// Replace the name structure of the person owning `code` and rewrite
    /// the mapping entry of every variant text the corrected name produces.
    ///
    /// The title-plus-surname variant is only written when a title is given.
    pub fn update_person_structure(
        &mut self,
        code: &str,
        first: &str,
        middle: Option<&str>,
        last: &str,
        title: Option<&str>,
    ) -> Result<(), MappingError> {
        let parsed = parse_code(code)?;
        let base_id = parsed.base_id();
        if !parsed.entity_type.is_person() {
            return Err(MappingError::NoBaseId(code.to_string()));
        }
        let owned = self
            .entries()
            .iter()
            .any(|e| parse_code(&e.code).is_ok_and(|p| p.base_id() == base_id));
        if !owned && self.person(&base_id).is_none() {
            return Err(MappingError::CodeNotFound(code.to_string()));
        }

        let record = PersonRecord::from_parts(base_id.clone(), first, middle, last, title)?;

        let mut written = HashSet::new();
        for variant in REDERIVE_ORDER {
            if variant == NameVariant::Formal && record.detected_title.is_none() {
                continue;
            }
            let Some(text) = record.text_for(variant) else {
                continue;
            };
            let key = normalize(&text);
            if written.insert(key.clone()) {
                let variant_code = codes::variant_code(&base_id, variant);
                self.insert(&text, key, variant_code, parsed.entity_type);
            }
        }

        match self.person_slot(&base_id) {
            Some(slot) => self.persons_mut()[slot] = record,
            None => self.persons_mut().push(record),
        }

        info!(base_id = %base_id, variants = written.len(), "person structure updated");
        Ok(())
    }

    /// Base ID, code and owning type of the person behind `primary`.
    fn primary_person(&self, primary: &str) -> Result<(String, String, EntityType), MappingError> {
        let entry = self
            .lookup(primary)
            .ok_or_else(|| MappingError::PrimaryNotFound(primary.trim().to_string()))?;

        let parsed = parse_code(&entry.code)
            .map_err(|_| MappingError::NoBaseId(entry.code.clone()))?;
        if !parsed.entity_type.is_person() {
            return Err(MappingError::NoBaseId(entry.code.clone()));
        }

        Ok((parsed.base_id(), entry.code.clone(), parsed.entity_type))
    }

    /// Slot of the person record for `base_id`, created from the primary
    /// mention's text if it does not exist yet.
    fn ensure_person(&mut self, base_id: &str, primary: &str) -> Result<usize, MappingError> {
        if let Some(slot) = self.person_slot(base_id) {
            return Ok(slot);
        }
        let display = self
            .lookup(primary)
            .map(|e| e.display_text.clone())
            .unwrap_or_else(|| primary.trim().to_string());
        let record = PersonRecord::parse(&display, base_id)?;
        self.persons_mut().push(record);
        info!(base_id = %base_id, "person record created for merge");
        Ok(self.persons().len() - 1)
    }

    fn bind_alias(
        &mut self,
        alias: &str,
        base_id: &str,
        variant: NameVariant,
        owner: EntityType,
    ) -> String {
        let code = codes::variant_code(base_id, variant);
        self.insert(alias, normalize(alias), code.clone(), owner);
        info!(base_id = %base_id, ?variant, code = %code, "alias merged");
        code
    }
}
