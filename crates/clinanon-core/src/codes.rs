//! Placeholder code conventions.
//!
//! Pure string functions. A code looks like `[CLIENT_AB_FIRST]`: the entity
//! type prefix, the per-type index rendered as spreadsheet-column letters,
//! and an optional name-variant suffix.

use crate::error::CoreError;
use crate::models::entity_type::EntityType;
use crate::models::name_variant::NameVariant;

/// Render an index as spreadsheet-column letters: 0 → `A`, 25 → `Z`,
/// 26 → `AA`, 27 → `AB`, 701 → `ZZ`, 702 → `AAA`.
///
/// Every digit position ranges over 1..=26, so each step divides and then
/// subtracts one.
pub fn letters(index: usize) -> String {
    let mut n = index;
    let mut out = Vec::new();
    loop {
        out.push(char::from(b'A' + (n % 26) as u8));
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    out.iter().rev().collect()
}

/// Inverse of [`letters`]. Returns `None` for empty input, anything other
/// than `A`-`Z`, or values that overflow.
pub fn index_for_letters(letters: &str) -> Option<usize> {
    if letters.is_empty() {
        return None;
    }
    let mut acc: usize = 0;
    for c in letters.chars() {
        if !c.is_ascii_uppercase() {
            return None;
        }
        let digit = (c as usize) - ('A' as usize) + 1;
        acc = acc.checked_mul(26)?.checked_add(digit)?;
    }
    Some(acc - 1)
}

/// The variant-independent identifier for the `index`th entity of a type,
/// e.g. `CLIENT_A`.
pub fn base_id(entity_type: EntityType, index: usize) -> String {
    format!("{}_{}", entity_type.prefix(), letters(index))
}

/// The bracketed placeholder for the `index`th entity of a type, e.g.
/// `[CLIENT_A]`.
pub fn next_code(entity_type: EntityType, index: usize) -> String {
    format!("[{}]", base_id(entity_type, index))
}

/// The placeholder for one variant of a person, e.g. `[CLIENT_A_FIRST]`.
pub fn variant_code(base_id: &str, variant: NameVariant) -> String {
    format!("[{base_id}{}]", variant.code_suffix())
}

/// A placeholder code split into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCode {
    pub entity_type: EntityType,
    pub index: usize,
    /// Variant suffix including its leading underscore, or empty.
    pub suffix: String,
}

impl ParsedCode {
    pub fn base_id(&self) -> String {
        base_id(self.entity_type, self.index)
    }

    /// The name variant named by the suffix. A bare code reads as
    /// [`NameVariant::Full`].
    pub fn variant(&self) -> Option<NameVariant> {
        NameVariant::from_suffix(&self.suffix)
    }
}

/// Parse a placeholder code. Surrounding brackets are optional.
pub fn parse_code(code: &str) -> Result<ParsedCode, CoreError> {
    let invalid = || CoreError::InvalidCode(code.to_string());

    let inner = code.trim();
    let inner = inner.strip_prefix('[').unwrap_or(inner);
    let inner = inner.strip_suffix(']').unwrap_or(inner);

    let mut parts = inner.splitn(3, '_');
    let prefix = parts.next().ok_or_else(invalid)?;
    let index_letters = parts.next().ok_or_else(invalid)?;
    let suffix = match parts.next() {
        Some(rest) if !rest.is_empty() => format!("_{rest}"),
        Some(_) => return Err(invalid()),
        None => String::new(),
    };

    let entity_type = EntityType::from_prefix(prefix).ok_or_else(invalid)?;
    let index = index_for_letters(index_letters).ok_or_else(invalid)?;
    if !suffix.is_empty() && NameVariant::from_suffix(&suffix).is_none() {
        return Err(invalid());
    }

    Ok(ParsedCode {
        entity_type,
        index,
        suffix,
    })
}
