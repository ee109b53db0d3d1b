//! The session mapping table: normalized mention text → placeholder code.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use clinanon_core::codes::{self, parse_code};
use clinanon_core::models::entity_type::EntityType;
use clinanon_core::models::name_variant::NameVariant;

use crate::component;
use crate::person::{DEFAULT_NICKNAME_MIN_LEN, PersonRecord};

/// One stored mention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingEntry {
    /// Lowercased, trimmed mention text. Unique within a table.
    pub key: String,
    /// The mention as it was first seen.
    pub display_text: String,
    pub code: String,
    /// Type of the entity that owns `code`.
    pub entity_type: EntityType,
}

/// Engine tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingOptions {
    /// Shortest single-token mention the nickname heuristic will match.
    #[serde(default = "default_nickname_min_len")]
    pub nickname_min_len: usize,
}

fn default_nickname_min_len() -> usize {
    DEFAULT_NICKNAME_MIN_LEN
}

impl Default for MappingOptions {
    fn default() -> Self {
        Self {
            nickname_min_len: DEFAULT_NICKNAME_MIN_LEN,
        }
    }
}

/// Counts describing the current session, for logging and the UI status bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionStats {
    pub entries: usize,
    pub persons: usize,
    /// Codes allocated so far, per type.
    pub allocated: BTreeMap<EntityType, usize>,
}

/// The session's single source of truth for placeholder assignments.
///
/// Owned by the caller and passed by `&mut` into every operation. Entries and
/// person records are kept in insertion order so every scan is
/// deterministic.
#[derive(Debug, Clone, Default)]
pub struct MappingTable {
    options: MappingOptions,
    entries: Vec<MappingEntry>,
    index: HashMap<String, usize>,
    counters: HashMap<EntityType, usize>,
    persons: Vec<PersonRecord>,
}

/// Lowercase and trim mention text into a lookup key.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

impl MappingTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: MappingOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn options(&self) -> MappingOptions {
        self.options
    }

    pub fn entries(&self) -> &[MappingEntry] {
        &self.entries
    }

    pub fn persons(&self) -> &[PersonRecord] {
        &self.persons
    }

    pub fn lookup(&self, text: &str) -> Option<&MappingEntry> {
        self.index
            .get(&normalize(text))
            .map(|&slot| &self.entries[slot])
    }

    pub fn code_for(&self, text: &str) -> Option<&str> {
        self.lookup(text).map(|entry| entry.code.as_str())
    }

    pub fn person(&self, base_id: &str) -> Option<&PersonRecord> {
        self.persons.iter().find(|p| p.base_id == base_id)
    }

    /// The person record owning `code`, whatever its variant suffix.
    pub fn person_for_code(&self, code: &str) -> Option<&PersonRecord> {
        let parsed = parse_code(code).ok()?;
        self.person(&parsed.base_id())
    }

    /// Next unused index for `entity_type`.
    pub fn counter(&self, entity_type: EntityType) -> usize {
        self.counters.get(&entity_type).copied().unwrap_or(0)
    }

    pub fn stats(&self) -> SessionStats {
        SessionStats {
            entries: self.entries.len(),
            persons: self.persons.len(),
            allocated: self.counters.iter().map(|(t, n)| (*t, *n)).collect(),
        }
    }

    /// Return the code for `text`, allocating a new one if the mention has
    /// not been seen.
    ///
    /// Person mentions that are a leading component or an extension of an
    /// already-mapped person name join that name's placeholder family.
    pub fn get_or_create_code(&mut self, text: &str, entity_type: EntityType) -> String {
        self.resolve_plain(text, entity_type).0
    }

    /// Return the code for `text` along with the name variant it represents.
    ///
    /// Multi-token person names with no existing match become new person
    /// records. `explicit_variant` overrides the variant chosen for a new
    /// record.
    pub fn get_or_create_variant_code(
        &mut self,
        text: &str,
        entity_type: EntityType,
        explicit_variant: Option<NameVariant>,
    ) -> (String, Option<NameVariant>) {
        if !entity_type.is_person() {
            return (self.get_or_create_code(text, entity_type), None);
        }

        let key = normalize(text);
        if let Some(entry) = self.lookup_key(&key) {
            let code = entry.code.clone();
            let variant = self.infer_variant(&code);
            return (code, variant);
        }

        if let Some((slot, variant)) = self.match_person(text) {
            let record = &self.persons[slot];
            let code = codes::variant_code(&record.base_id, variant);
            let owner = parse_code(&code)
                .map(|parsed| parsed.entity_type)
                .unwrap_or(entity_type);
            self.insert(text, key, code.clone(), owner);
            return (code, Some(variant));
        }

        let index = self.counter(entity_type);
        let base_id = codes::base_id(entity_type, index);
        match PersonRecord::parse(text, base_id.clone()) {
            Ok(record) if record.is_variant_eligible() => {
                let variant = explicit_variant.unwrap_or(
                    if record.full.split_whitespace().count() >= 3 {
                        NameVariant::Full
                    } else {
                        NameVariant::FirstLast
                    },
                );
                self.allocate(entity_type);
                let code = codes::variant_code(&base_id, variant);
                self.insert(text, key, code.clone(), entity_type);
                self.persons.push(record);
                debug!(base_id = %base_id, ?variant, "person record created");
                (code, Some(variant))
            }
            _ => self.resolve_plain(text, entity_type),
        }
    }

    /// Empty the mapping, counters and person records in one step.
    pub fn clear_all(&mut self) {
        let entries = self.entries.len();
        let persons = self.persons.len();
        self.entries.clear();
        self.index.clear();
        self.counters.clear();
        self.persons.clear();
        info!(entries, persons, "mapping session cleared");
    }

    /// Variant named by a stored code's suffix. Only codes backed by a
    /// person record carry a variant.
    pub fn infer_variant(&self, code: &str) -> Option<NameVariant> {
        let parsed = parse_code(code).ok()?;
        self.person(&parsed.base_id())?;
        parsed.variant()
    }

    fn resolve_plain(&mut self, text: &str, entity_type: EntityType) -> (String, Option<NameVariant>) {
        let key = normalize(text);
        if let Some(entry) = self.lookup_key(&key) {
            let code = entry.code.clone();
            let variant = self.infer_variant(&code);
            return (code, variant);
        }

        if entity_type.is_person()
            && let Some((code, owner, variant)) = self.code_from_related(text, &key)
        {
            self.insert(text, key, code.clone(), owner);
            return (code, variant);
        }

        let index = self.allocate(entity_type);
        let code = codes::next_code(entity_type, index);
        self.insert(text, key, code.clone(), entity_type);
        debug!(code = %code, entity_type = ?entity_type, "placeholder allocated");
        (code, None)
    }

    /// Reuse the code of a parent or extended person name. When the related
    /// code belongs to a person record, resolve the exact variant instead of
    /// copying the raw code.
    fn code_from_related(
        &self,
        text: &str,
        key: &str,
    ) -> Option<(String, EntityType, Option<NameVariant>)> {
        let related = component::find_related(&self.entries, key)?.entry();

        if let Some(record) = self.person_for_code(&related.code)
            && let Some(variant) = record.detect_variant(text, self.options.nickname_min_len)
        {
            let code = codes::variant_code(&record.base_id, variant);
            return Some((code, related.entity_type, Some(variant)));
        }

        Some((related.code.clone(), related.entity_type, None))
    }

    /// First person record matching `text`: exact matches across all
    /// records win over nickname matches, then creation order.
    fn match_person(&self, text: &str) -> Option<(usize, NameVariant)> {
        let eligible = || {
            self.persons
                .iter()
                .enumerate()
                .filter(|(_, p)| p.is_variant_eligible())
        };

        eligible()
            .find_map(|(slot, p)| p.detect_exact(text).map(|v| (slot, v)))
            .or_else(|| {
                eligible().find_map(|(slot, p)| {
                    p.detect_nickname(text, self.options.nickname_min_len)
                        .map(|v| (slot, v))
                })
            })
    }

    fn lookup_key(&self, key: &str) -> Option<&MappingEntry> {
        self.index.get(key).map(|&slot| &self.entries[slot])
    }

    /// Hand out the next index for a type. Indices are never reused.
    pub(crate) fn allocate(&mut self, entity_type: EntityType) -> usize {
        let counter = self.counters.entry(entity_type).or_insert(0);
        let index = *counter;
        *counter += 1;
        index
    }

    /// Make sure the next allocation for a type is past `index`.
    pub(crate) fn reserve(&mut self, entity_type: EntityType, index: usize) {
        let counter = self.counters.entry(entity_type).or_insert(0);
        *counter = (*counter).max(index + 1);
    }

    /// Insert or overwrite the entry for `key`.
    pub(crate) fn insert(
        &mut self,
        display_text: &str,
        key: String,
        code: String,
        entity_type: EntityType,
    ) {
        let entry = MappingEntry {
            key: key.clone(),
            display_text: display_text.trim().to_string(),
            code,
            entity_type,
        };
        match self.index.get(&key) {
            Some(&slot) => self.entries[slot] = entry,
            None => {
                self.index.insert(key, self.entries.len());
                self.entries.push(entry);
            }
        }
    }

    pub(crate) fn person_slot(&self, base_id: &str) -> Option<usize> {
        self.persons.iter().position(|p| p.base_id == base_id)
    }

    pub(crate) fn persons_mut(&mut self) -> &mut Vec<PersonRecord> {
        &mut self.persons
    }
}
