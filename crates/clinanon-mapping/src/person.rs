//! Person records: one anonymized individual and the name variants that
//! refer to them.

use serde::{Deserialize, Serialize};

use clinanon_core::models::name_variant::NameVariant;

use crate::error::MappingError;

/// Honorifics recognised at the start of a name, in their stored form.
pub const TITLES: [&str; 6] = ["Mr", "Mrs", "Ms", "Dr", "Prof", "Miss"];

/// Title used to render the formal variant when none was detected.
pub const DEFAULT_FORMAL_TITLE: &str = "Mr";

/// Shortest candidate the nickname heuristic will consider.
pub const DEFAULT_NICKNAME_MIN_LEN: usize = 3;

/// Split a leading title off `text`.
///
/// Matching is case-insensitive and ignores a trailing period. A lone title
/// with nothing after it is not stripped. Returns the stored form of the
/// title and the trimmed remainder.
pub fn strip_title(text: &str) -> (Option<&'static str>, &str) {
    let trimmed = text.trim();
    let Some((head, rest)) = trimmed.split_once(char::is_whitespace) else {
        return (None, trimmed);
    };
    let rest = rest.trim_start();
    if rest.is_empty() {
        return (None, trimmed);
    }
    match canonical_title(head) {
        Some(title) => (Some(title), rest),
        None => (None, trimmed),
    }
}

/// The stored form of a title token, if it is one of [`TITLES`].
pub fn canonical_title(token: &str) -> Option<&'static str> {
    let bare = token.trim().trim_end_matches('.');
    TITLES
        .into_iter()
        .find(|title| title.eq_ignore_ascii_case(bare))
}

/// One anonymized individual within a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRecord {
    /// Variant-independent identifier, e.g. `CLIENT_A`. Never changes.
    pub base_id: String,
    /// Every name component joined by single spaces, title excluded.
    pub full: String,
    pub first: String,
    pub middle: Option<String>,
    pub last: String,
    pub detected_title: Option<String>,
}

impl PersonRecord {
    /// Parse a canonical full name into its components.
    ///
    /// A single-token name parses with `first == last` and no middle; see
    /// [`PersonRecord::is_variant_eligible`].
    pub fn parse(full_name: &str, base_id: impl Into<String>) -> Result<Self, MappingError> {
        let (title, rest) = strip_title(full_name);
        let tokens: Vec<&str> = rest.split_whitespace().collect();

        let (Some(first), Some(last)) = (tokens.first(), tokens.last()) else {
            return Err(MappingError::InvalidName(full_name.trim().to_string()));
        };
        let middle = (tokens.len() >= 3).then(|| tokens[1..tokens.len() - 1].join(" "));

        Ok(Self {
            base_id: base_id.into(),
            full: tokens.join(" "),
            first: first.to_string(),
            middle,
            last: last.to_string(),
            detected_title: title.map(str::to_string),
        })
    }

    /// Build a record from explicit components, as a manual correction does.
    pub fn from_parts(
        base_id: impl Into<String>,
        first: &str,
        middle: Option<&str>,
        last: &str,
        title: Option<&str>,
    ) -> Result<Self, MappingError> {
        let first = first.trim();
        let last = last.trim();
        if first.is_empty() || last.is_empty() {
            return Err(MappingError::InvalidName(format!("{first} {last}")));
        }
        let middle = middle
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(str::to_string);

        let full = match &middle {
            Some(m) => format!("{first} {m} {last}"),
            None => format!("{first} {last}"),
        };

        Ok(Self {
            base_id: base_id.into(),
            full,
            first: first.to_string(),
            middle,
            last: last.to_string(),
            detected_title: title.and_then(normalize_title),
        })
    }

    /// Whether the name has at least two components. Single-token names
    /// cannot be told apart from their own first or last name.
    pub fn is_variant_eligible(&self) -> bool {
        self.full.split_whitespace().count() >= 2
    }

    pub fn formal_title(&self) -> &str {
        self.detected_title.as_deref().unwrap_or(DEFAULT_FORMAL_TITLE)
    }

    /// Render one variant of this name. Middle-name variants are `None` when
    /// the person has no middle name.
    pub fn text_for(&self, variant: NameVariant) -> Option<String> {
        match variant {
            NameVariant::Full => Some(self.full.clone()),
            NameVariant::FirstLast => Some(format!("{} {}", self.first, self.last)),
            NameVariant::First => Some(self.first.clone()),
            NameVariant::Last => Some(self.last.clone()),
            NameVariant::Middle => self.middle.clone(),
            NameVariant::FirstMiddle => self
                .middle
                .as_ref()
                .map(|m| format!("{} {m}", self.first)),
            NameVariant::Formal => Some(format!("{} {}", self.formal_title(), self.last)),
        }
    }

    /// Recognise which variant of this name `candidate` is, trying exact
    /// matches first and then the nickname prefix heuristic.
    pub fn detect_variant(&self, candidate: &str, nickname_min_len: usize) -> Option<NameVariant> {
        self.detect_exact(candidate)
            .or_else(|| self.detect_nickname(candidate, nickname_min_len))
    }

    /// Exact, case-insensitive variant match. Longer forms are tried before
    /// shorter ones so a full name is never read as a bare first name.
    pub fn detect_exact(&self, candidate: &str) -> Option<NameVariant> {
        let (title, rest) = strip_title(candidate);
        let c = collapse_lower(rest);
        if c.is_empty() {
            return None;
        }

        let first = self.first.to_lowercase();
        let last = self.last.to_lowercase();
        let middle = self.middle.as_deref().map(str::to_lowercase);

        if c == self.full.to_lowercase() {
            return Some(NameVariant::Full);
        }
        if let Some(m) = &middle
            && c == format!("{first} {m}")
        {
            return Some(NameVariant::FirstMiddle);
        }
        if c == format!("{first} {last}") {
            return Some(NameVariant::FirstLast);
        }
        if title.is_some() && c == last {
            return Some(NameVariant::Formal);
        }
        if c == first {
            return Some(NameVariant::First);
        }
        if middle.as_deref() == Some(c.as_str()) {
            return Some(NameVariant::Middle);
        }
        if c == last {
            return Some(NameVariant::Last);
        }
        None
    }

    /// Nickname heuristic: a single-token candidate of at least
    /// `min_len` characters that is a prefix of the first name, or has the
    /// first name as its prefix ("Ron" and "Ronald").
    pub fn detect_nickname(&self, candidate: &str, min_len: usize) -> Option<NameVariant> {
        let (_, rest) = strip_title(candidate);
        let c = collapse_lower(rest);
        if c.chars().count() < min_len || c.contains(' ') {
            return None;
        }
        let first = self.first.to_lowercase();
        (first.starts_with(&c) || c.starts_with(&first)).then_some(NameVariant::First)
    }
}

/// Store a user-supplied title in canonical form: known titles as listed in
/// [`TITLES`], anything else with its trailing period removed.
fn normalize_title(title: &str) -> Option<String> {
    if let Some(known) = canonical_title(title) {
        return Some(known.to_string());
    }
    let bare = title.trim().trim_end_matches('.');
    (!bare.is_empty()).then(|| bare.to_string())
}

fn collapse_lower(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
