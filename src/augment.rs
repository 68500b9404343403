//! Augmenter: synthesizes candidates when the filtered pool is short.
//!
//! Runs two strategies in order, each only while a shortfall remains:
//!
//! 1. **Affix**: pick an existing candidate, wrap it in 1-3 random digits and
//!    0-2 random specials, keep the result if it fits the length window.
//! 2. **Random**: fresh strings of random length inside the window, drawn
//!    from letters, digits and specials.
//!
//! ```text
//! Prepend   digits + specials + base      "42!@alice"
//! Append    base + digits + specials      "alice42!@"
//! Split     digits + base + specials      "42alice!@"
//! ```
//!
//! Both loops carry an attempt budget, so the augmenter always terminates:
//! a window nothing can satisfy, or a pool with nothing to sample, leaves the
//! pool short instead of spinning. The result is at most `target_count`
//! candidates, never more, and [`AugmentReport`] says what happened.

use rand::Rng;
use rand::seq::{IteratorRandom, SliceRandom};
use serde::Serialize;
use tracing::debug;

use crate::filter::LengthWindow;
use crate::types::Pool;

/// Specials used for affixes and random strings.
pub const SPECIAL_CHARS: &str = "!@#$%^&*()-_=+[]{};:,.<>?/";

const DIGITS: &str = "0123456789";
const LETTERS: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Draws allowed per missing candidate before a strategy gives up.
const ATTEMPTS_PER_SLOT: usize = 32;

/// Where the affix goes relative to the base word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Prepend,
    Append,
    Split,
}

impl Placement {
    pub const ALL: [Placement; 3] = [Placement::Prepend, Placement::Append, Placement::Split];

    pub fn apply(self, base: &str, digits: &str, specials: &str) -> String {
        match self {
            Placement::Prepend => format!("{digits}{specials}{base}"),
            Placement::Append => format!("{base}{digits}{specials}"),
            Placement::Split => format!("{digits}{base}{specials}"),
        }
    }
}

/// What the augmenter added.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AugmentReport {
    /// Candidates missing when augmentation started.
    pub shortfall: usize,
    /// Accepted affixed candidates.
    pub affixed: usize,
    /// Accepted fully random candidates.
    pub random: usize,
    /// The pool was empty, so affix augmentation had nothing to work with.
    pub starved: bool,
}

impl AugmentReport {
    /// Candidates still missing after both strategies.
    pub fn remaining(&self) -> usize {
        self.shortfall.saturating_sub(self.affixed + self.random)
    }
}

/// Attempts a strategy may spend on `missing` candidates.
fn attempt_budget(missing: usize) -> usize {
    missing.saturating_mul(ATTEMPTS_PER_SLOT)
}

fn sample_from<R: Rng + ?Sized>(alphabet: &str, count: usize, rng: &mut R) -> String {
    (0..count)
        .filter_map(|_| alphabet.chars().choose(rng))
        .collect()
}

/// One affixed variant of `base`.
pub fn affix<R: Rng + ?Sized>(base: &str, rng: &mut R) -> String {
    let digit_count = rng.gen_range(1..=3);
    let digits = sample_from(DIGITS, digit_count, rng);
    let special_count = rng.gen_range(0..=2);
    let specials = sample_from(SPECIAL_CHARS, special_count, rng);
    let placement = Placement::ALL
        .choose(rng)
        .copied()
        .unwrap_or(Placement::Append);
    placement.apply(base, &digits, &specials)
}

/// One random string with a length drawn uniformly from the window.
pub fn random_candidate<R: Rng + ?Sized>(window: LengthWindow, rng: &mut R) -> String {
    let alphabet: Vec<char> = LETTERS
        .chars()
        .chain(DIGITS.chars())
        .chain(SPECIAL_CHARS.chars())
        .collect();
    let len = rng.gen_range(window.min..=window.max);
    (0..len)
        .filter_map(|_| alphabet.choose(rng).copied())
        .collect()
}

/// Grow `pool` towards `target_count` candidates inside `window`.
///
/// Returns the pool unchanged when it already holds enough.
pub fn augment<R: Rng + ?Sized>(
    pool: Pool,
    target_count: usize,
    window: LengthWindow,
    rng: &mut R,
) -> (Pool, AugmentReport) {
    let mut report = AugmentReport {
        shortfall: target_count.saturating_sub(pool.len()),
        ..AugmentReport::default()
    };
    if report.shortfall == 0 {
        return (pool, report);
    }

    let bases: Vec<String> = pool.iter().cloned().collect();
    let mut pool = pool;

    if bases.is_empty() {
        report.starved = true;
        debug!("No candidates to affix, skipping to random fallback");
    } else {
        let budget = attempt_budget(report.shortfall);
        let mut attempts = 0;
        while pool.len() < target_count && attempts < budget {
            attempts += 1;
            let Some(base) = bases.choose(rng) else {
                break;
            };
            let candidate = affix(base, rng);
            if window.contains(&candidate) && pool.insert(candidate) {
                report.affixed += 1;
            }
        }
        debug!(affixed = report.affixed, attempts, "Affix augmentation done");
    }

    let still_needed = target_count.saturating_sub(pool.len());
    let budget = attempt_budget(still_needed);
    let mut attempts = 0;
    while pool.len() < target_count && attempts < budget {
        attempts += 1;
        if pool.insert(random_candidate(window, rng)) {
            report.random += 1;
        }
    }
    if still_needed > 0 {
        debug!(random = report.random, attempts, "Random fallback done");
    }

    (pool, report)
}
