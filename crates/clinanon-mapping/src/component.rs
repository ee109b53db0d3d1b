//! Component and extension detection between person mentions.
//!
//! A known key is a *parent* of a new mention when the mention is a leading,
//! whitespace-bounded component of it ("john" under "john smith"). The
//! mention is an *extension* of a known key when the key is a leading
//! component of the mention ("john smith jr" over "john smith").
//!
//! Each lookup scans every entry once; session tables hold tens to low
//! hundreds of entries.

use crate::table::MappingEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation<'a> {
    Parent(&'a MappingEntry),
    Extension(&'a MappingEntry),
}

impl<'a> Relation<'a> {
    pub fn entry(&self) -> &'a MappingEntry {
        match self {
            Relation::Parent(entry) | Relation::Extension(entry) => entry,
        }
    }
}

/// Find the first person-typed entry, in insertion order, that is a parent
/// or extension of the normalized `key`.
pub fn find_related<'a>(entries: &'a [MappingEntry], key: &str) -> Option<Relation<'a>> {
    if key.is_empty() {
        return None;
    }
    entries
        .iter()
        .filter(|entry| entry.entity_type.is_person() && entry.key != key)
        .find_map(|entry| {
            if is_leading_component(key, &entry.key) {
                Some(Relation::Parent(entry))
            } else if is_leading_component(&entry.key, key) {
                Some(Relation::Extension(entry))
            } else {
                None
            }
        })
}

/// Whether `short` is followed by a space at the start of `long`.
fn is_leading_component(short: &str, long: &str) -> bool {
    long.strip_prefix(short)
        .is_some_and(|rest| rest.starts_with(' '))
}
