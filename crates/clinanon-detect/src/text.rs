//! Character-range helpers over the original text.
//!
//! Positions are half-open ranges of `char` indices, the unit the UI uses
//! for highlighting.

use clinanon_core::models::entity::Entity;

use crate::candidates::ranges_overlap;

/// Every case-insensitive, word-bounded occurrence of `needle` in `text`,
/// left to right and non-overlapping.
pub fn find_occurrences(text: &str, needle: &str) -> Vec<(usize, usize)> {
    let hay: Vec<char> = text.chars().collect();
    let pat: Vec<char> = needle.trim().chars().collect();
    let mut found = Vec::new();
    if pat.is_empty() || pat.len() > hay.len() {
        return found;
    }

    let mut i = 0;
    while i + pat.len() <= hay.len() {
        let end = i + pat.len();
        let matches = hay[i..end]
            .iter()
            .zip(&pat)
            .all(|(a, b)| chars_eq_ignore_case(*a, *b));
        let bounded_left = i == 0 || !hay[i - 1].is_alphanumeric();
        let bounded_right = end == hay.len() || !hay[end].is_alphanumeric();

        if matches && bounded_left && bounded_right {
            found.push((i, end));
            i = end;
        } else {
            i += 1;
        }
    }
    found
}

/// Substitute each entity's placeholder at its positions.
///
/// Where ranges collide the longer one wins, then the earlier one. Ranges
/// that are empty or outside the text are skipped.
pub fn apply_replacements(text: &str, entities: &[Entity]) -> String {
    let char_count = text.chars().count();
    let mut spans: Vec<((usize, usize), &str)> = entities
        .iter()
        .flat_map(|e| {
            e.positions
                .iter()
                .map(move |&range| (range, e.replacement_code.as_str()))
        })
        .filter(|((start, end), _)| start < end && *end <= char_count)
        .collect();
    spans.sort_by(|a, b| {
        let len_a = a.0.1 - a.0.0;
        let len_b = b.0.1 - b.0.0;
        len_b.cmp(&len_a).then(a.0.0.cmp(&b.0.0))
    });

    let mut accepted: Vec<((usize, usize), &str)> = Vec::new();
    for span in spans {
        if !accepted.iter().any(|(range, _)| ranges_overlap(*range, span.0)) {
            accepted.push(span);
        }
    }
    accepted.sort_by(|a, b| b.0.0.cmp(&a.0.0));

    // Byte offset of every char boundary, plus the end of the text.
    let mut offsets: Vec<usize> = text.char_indices().map(|(byte, _)| byte).collect();
    offsets.push(text.len());

    let mut out = text.to_string();
    for ((start, end), code) in accepted {
        out.replace_range(offsets[start]..offsets[end], code);
    }
    out
}

fn chars_eq_ignore_case(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}
