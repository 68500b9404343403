//! Centralized case transforms shared by every generation stage.
//!
//! Every stage that turns a profile value into candidates needs the same
//! handful of spellings. Keeping them here means the expander, the
//! combinator and the username composer agree on what "capitalized" means:
//!
//! - `"aLiCe"` → lowercase `"alice"`
//! - `"aLiCe"` → capitalized `"Alice"` (first char upper, rest lower)
//! - `"aLiCe"` → uppercase `"ALICE"`
//! - `"aLiCe"` → first-letter `Some("Alice")`, `None` for single-char values
//!
//! Capitalized and first-letter spell the same string; the first-letter form
//! exists so entity fields can ask for it explicitly and skip one-letter
//! values. Set semantics collapse the duplicate.

/// Lowercase every character.
pub fn lower(value: &str) -> String {
    value.to_lowercase()
}

/// Uppercase every character.
pub fn upper(value: &str) -> String {
    value.to_uppercase()
}

/// First character uppercased, the rest lowercased.
///
/// Digits and symbols have no case, so `"1990"` comes back unchanged.
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// First-letter capitalized form, only for values longer than one character.
pub fn first_letter(value: &str) -> Option<String> {
    if value.chars().count() > 1 {
        Some(capitalize(value))
    } else {
        None
    }
}

/// The last two characters of a value, or the whole value when shorter.
///
/// Used for two-digit year forms: `"1990"` → `"90"`.
pub fn last_two(value: &str) -> &str {
    let count = value.chars().count();
    if count <= 2 {
        return value;
    }
    let start = value
        .char_indices()
        .nth(count - 2)
        .map(|(idx, _)| idx)
        .unwrap_or(0);
    &value[start..]
}

/// First character lowercased, if any.
pub fn initial(value: &str) -> Option<String> {
    value.chars().next().map(|c| c.to_lowercase().collect())
}

/// Number of Unicode scalar values; the unit every length bound is measured in.
pub fn char_len(value: &str) -> usize {
    value.chars().count()
}
