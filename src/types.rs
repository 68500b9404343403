//! Shared types passed between generation stages.
//!
//! Every stage takes a [`Pool`] and returns a [`Pool`]; the pipeline in
//! [`crate::generate`] composes them and records a [`StageReport`].

use crate::augment::AugmentReport;
use serde::Serialize;
use std::collections::BTreeSet;

/// A set of candidates, unique by exact value (no case folding).
///
/// Ordered so that iterating a pool and drawing from a seeded RNG is
/// reproducible run to run. Presentation order is assigned by the selector.
pub type Pool = BTreeSet<String>;

/// Candidate counts recorded after each stage of one generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StageReport {
    /// Primitive strings from the base expander.
    pub base: usize,
    /// Pool after name pairs and name/organization joins.
    pub combined: usize,
    /// Pool after year combination, symbol joins and common patterns.
    pub with_years: usize,
    /// Pool after suffix/prefix application and leet substitution.
    pub mutated: usize,
    /// Extra candidates supplied from outside the core (suggestions).
    pub external: usize,
    /// Candidates inside the length window before augmentation.
    pub filtered: usize,
    /// What the augmenter added, if it ran.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub augment: Option<AugmentReport>,
    /// Size of the final selection.
    pub selected: usize,
}
