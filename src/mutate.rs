//! Mutator: suffixes, prefixes and leet substitution.
//!
//! Both transforms are additive: the input pool is kept and the variants are
//! unioned in.
//!
//! ## Leet substitution
//!
//! ```text
//! a → @ 4    e → 3    i → 1 !    o → 0    s → $ 5
//! t → 7      b → 8    g → 9      l → 1
//! ```
//!
//! Each word gets [`LEET_VARIANTS`] independent attempts. An attempt picks up
//! to [`LEET_POSITIONS`] distinct positions; a picked position is rewritten
//! only if its lowercased character has a mapping, so an attempt may change
//! fewer characters than it picked, or none at all.

use rand::Rng;
use rand::seq::SliceRandom;
use rand::seq::index;

use crate::types::Pool;

/// Appended to every pool entry.
pub const SUFFIXES: [&str; 10] = [
    "123", "1234", "321", "!", "#", "@", "2023", "2024", "2025", "123!",
];

/// Prepended to every pool entry when prefixing is enabled.
pub const PREFIXES: [&str; 5] = ["The", "My", "A", "Secret", "Super"];

/// Randomized leet variants generated per word.
pub const LEET_VARIANTS: usize = 3;

/// Positions considered per leet variant.
pub const LEET_POSITIONS: usize = 3;

/// Visually similar replacements for a lowercase letter.
pub fn leet_replacements(c: char) -> Option<&'static [char]> {
    match c {
        'a' => Some(&['@', '4']),
        'e' => Some(&['3']),
        'i' => Some(&['1', '!']),
        'o' => Some(&['0']),
        's' => Some(&['$', '5']),
        't' => Some(&['7']),
        'b' => Some(&['8']),
        'g' => Some(&['9']),
        'l' => Some(&['1']),
        _ => None,
    }
}

fn leet_key(c: char) -> char {
    // Multi-char lowercase expansions (e.g. 'İ') never map.
    let mut lowered = c.to_lowercase();
    match (lowered.next(), lowered.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}

/// The pool plus every entry with every suffix appended.
pub fn with_suffixes(pool: Pool) -> Pool {
    let mut suffixed = Pool::new();
    for word in &pool {
        for suffix in SUFFIXES {
            suffixed.insert(format!("{word}{suffix}"));
        }
    }
    let mut out = pool;
    out.extend(suffixed);
    out
}

/// The pool plus every entry with every prefix prepended.
pub fn with_prefixes(pool: Pool) -> Pool {
    let mut prefixed = Pool::new();
    for word in &pool {
        for prefix in PREFIXES {
            prefixed.insert(format!("{prefix}{word}"));
        }
    }
    let mut out = pool;
    out.extend(prefixed);
    out
}

/// One randomized leet variant of `word`.
pub fn leet_variant<R: Rng + ?Sized>(word: &str, rng: &mut R) -> String {
    let mut chars: Vec<char> = word.chars().collect();
    let picks = LEET_POSITIONS.min(chars.len());
    for pos in index::sample(rng, chars.len(), picks).into_iter() {
        if let Some(choices) = leet_replacements(leet_key(chars[pos])) {
            if let Some(&replacement) = choices.choose(rng) {
                chars[pos] = replacement;
            }
        }
    }
    chars.into_iter().collect()
}

/// The pool plus [`LEET_VARIANTS`] leet variants of every entry.
pub fn with_leet<R: Rng + ?Sized>(pool: Pool, rng: &mut R) -> Pool {
    let mut variants = Pool::new();
    for word in &pool {
        for _ in 0..LEET_VARIANTS {
            variants.insert(leet_variant(word, rng));
        }
    }
    let mut out = pool;
    out.extend(variants);
    out
}
