//! # wordforge
//!
//! Profile-driven password candidate generation for authorized security
//! testing. Given facts about a target (names, organization, relations,
//! dates, interests), wordforge derives the strings a person plausibly
//! builds passwords from, mutates them the way people do, and emits a
//! bounded, deduplicated wordlist inside a length window.
//!
//! # Architecture: Forward-Only Pipeline
//!
//! Every stage is a function from one pool to the next. Pools are ordered
//! sets, so duplicates vanish as they appear and iteration order never
//! depends on hashing.
//!
//! ```text
//! Profile
//!   │
//!   ├─ expand      case forms of every present field
//!   ├─ combine     name pairs, name+org joins
//!   ├─ years       × birth year, recent years; symbol and common patterns
//!   ├─ mutate      suffixes, optional prefixes, randomized leet
//!   │              ∪ remote suggestions (optional)
//!   ├─ filter      inclusive length window
//!   ├─ augment     affix / random fill when short
//!   └─ select      shuffle, cut to target_count
//!   │
//!   ▼
//! Vec<String>
//! ```
//!
//! Randomness is threaded through explicitly as `&mut impl Rng`. With a
//! fixed seed the same profile, config and year always produce the same
//! list.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`profile`] | Target facts, field classification, TOML profile files |
//! | [`config`] | `wordforge.toml` loading and generation-setting normalization |
//! | [`case`] | Case forms, initials, year suffixes, character length |
//! | [`expand`] | Base Expander: per-field case variants |
//! | [`combine`] | Combinator: pairs, joins, year window, symbol and common patterns |
//! | [`mutate`] | Mutator: suffixes, prefixes, leet substitution |
//! | [`filter`] | Length Filter |
//! | [`augment`] | Augmenter: affix and random fallback under attempt budgets |
//! | [`select`] | Selector: shuffle and truncate |
//! | [`generate`] | Pipeline composition, stage report, parallel batch mode |
//! | [`suggest`] | Optional remote model suggestions (five providers) |
//! | [`collect`] | Interactive prompts for settings, profile and hydra target |
//! | [`persist`] | Wordlist and username files |
//! | [`hydra`] | Username derivation and `hydra` command composition |
//! | [`output`] | CLI summaries |
//! | [`types`] | Shared pool and report types |
//!
//! # Design Decisions
//!
//! ## Normalize, Don't Reject
//!
//! Generation numbers the operator gets wrong (a zero count, an inverted
//! length window, a typo) are corrected to usable values and reported as
//! [`config::ConfigAdjustment`]s. A run never fails because of them.
//!
//! ## Bounded Augmentation
//!
//! When the window leaves too few candidates, the augmenter fills the gap
//! under a fixed attempt budget. An unsatisfiable window yields a shorter
//! list instead of a hang.
//!
//! ## Collaborators Can't Break a Run
//!
//! The remote suggestion source is advisory. Missing keys, network errors
//! and malformed replies are logged and contribute nothing.
//!
//! ## Closed Field Enums
//!
//! Stages dispatch on [`profile::FieldKind`], never on key strings, so a
//! new field is a compile error everywhere it needs handling.

pub mod augment;
pub mod case;
pub mod collect;
pub mod combine;
pub mod config;
pub mod expand;
pub mod filter;
pub mod generate;
pub mod hydra;
pub mod mutate;
pub mod output;
pub mod persist;
pub mod profile;
pub mod select;
pub mod suggest;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use config::GenerationConfig;
pub use generate::generate;
pub use profile::Profile;
