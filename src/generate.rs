//! The generation pipeline.
//!
//! Composes the stages in a fixed forward order. Every stage takes the
//! previous pool by value and returns a new one; nothing reads back from a
//! later stage.
//!
//! ```text
//! Profile ─► expand ─► combine ─► years + patterns ─► suffix/prefix ─► leet
//!                                                                       │
//!            select ◄─ augment (if short) ◄─ length filter ◄─ ∪ external
//! ```
//!
//! Symbol joins and the common-pattern vocabulary enter with the dated pool,
//! ahead of suffixing and leet. Forms such as `password123!` and `p@ssword`
//! are therefore expected output.
//!
//! The RNG is passed in explicitly. Pools are ordered sets, so the same
//! profile, config, year and seed always produce the same list.
//!
//! ## Batch mode
//!
//! [`generate_batch`] runs one pipeline per profile on the rayon pool. Each
//! job gets its own [`StdRng`] seeded from SHA-256 of the base seed and the
//! job name: jobs share no mutable state and a job's output does not depend
//! on which other jobs run beside it.

use chrono::Datelike;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::augment::augment;
use crate::combine::{combine, pattern_joins, with_years, year_window};
use crate::config::GenerationConfig;
use crate::expand::expand_base;
use crate::mutate::{with_leet, with_prefixes, with_suffixes};
use crate::profile::Profile;
use crate::select::select;
use crate::types::{Pool, StageReport};

/// Final candidates plus the per-stage counts that produced them.
#[derive(Debug, Clone)]
pub struct Generation {
    pub candidates: Vec<String>,
    pub report: StageReport,
}

/// The local calendar year, used for the recent-years part of the window.
pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

/// Generate candidates for `profile` using the local calendar year.
pub fn generate<R: Rng + ?Sized>(
    profile: &Profile,
    config: &GenerationConfig,
    rng: &mut R,
) -> Vec<String> {
    generate_at(profile, config, current_year(), rng)
}

/// Generate candidates with an explicit calendar year.
pub fn generate_at<R: Rng + ?Sized>(
    profile: &Profile,
    config: &GenerationConfig,
    year: i32,
    rng: &mut R,
) -> Vec<String> {
    run(profile, config, year, Pool::new(), rng).candidates
}

/// Everything derived from the profile, before length filtering.
pub fn derive_pool<R: Rng + ?Sized>(
    profile: &Profile,
    config: &GenerationConfig,
    year: i32,
    rng: &mut R,
) -> (Pool, StageReport) {
    let mut report = StageReport::default();

    let base = expand_base(profile);
    report.base = base.len();

    let combined = combine(profile, base);
    report.combined = combined.len();

    let years = year_window(profile, year);
    let mut dated = with_years(combined, &years);
    dated.extend(pattern_joins(profile));
    report.with_years = dated.len();

    let mut mutated = with_suffixes(dated);
    if config.apply_prefixes() {
        mutated = with_prefixes(mutated);
    }
    let mutated = with_leet(mutated, rng);
    report.mutated = mutated.len();

    debug!(
        base = report.base,
        combined = report.combined,
        with_years = report.with_years,
        mutated = report.mutated,
        "Derived candidate pool"
    );
    (mutated, report)
}

/// Candidates inside the length window before augmentation and selection.
pub fn candidate_pool<R: Rng + ?Sized>(
    profile: &Profile,
    config: &GenerationConfig,
    year: i32,
    rng: &mut R,
) -> Pool {
    let (pool, _) = derive_pool(profile, config, year, rng);
    config.window().filter(pool)
}

/// Full pipeline with `external` candidates (e.g. remote suggestions)
/// unioned in before the length filter.
pub fn run<R: Rng + ?Sized>(
    profile: &Profile,
    config: &GenerationConfig,
    year: i32,
    external: Pool,
    rng: &mut R,
) -> Generation {
    let (mut pool, mut report) = derive_pool(profile, config, year, rng);

    report.external = external.len();
    pool.extend(external);

    let window = config.window();
    let filtered = window.filter(pool);
    report.filtered = filtered.len();
    debug!(filtered = report.filtered, "Applied length window");

    let target = config.target_count();
    let pool = if filtered.len() < target {
        let (grown, augment_report) = augment(filtered, target, window, rng);
        report.augment = Some(augment_report);
        grown
    } else {
        filtered
    };

    let candidates = select(pool, target, rng);
    report.selected = candidates.len();

    Generation { candidates, report }
}

/// A named profile in a batch run.
#[derive(Debug, Clone)]
pub struct BatchJob {
    pub name: String,
    pub profile: Profile,
}

#[derive(Debug, Clone)]
pub struct BatchOutput {
    pub name: String,
    pub seed: u64,
    pub generation: Generation,
}

/// Per-job seed: the first 8 bytes of SHA-256(base seed ‖ name).
pub fn job_seed(base_seed: u64, name: &str) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(base_seed.to_le_bytes());
    hasher.update(name.as_bytes());
    let digest = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(bytes)
}

/// Run every job in parallel, each with its own seeded RNG.
///
/// Output order matches `jobs`.
pub fn generate_batch(
    jobs: &[BatchJob],
    config: &GenerationConfig,
    year: i32,
    base_seed: u64,
) -> Vec<BatchOutput> {
    jobs.par_iter()
        .map(|job| {
            let seed = job_seed(base_seed, &job.name);
            let mut rng = StdRng::seed_from_u64(seed);
            let generation = run(&job.profile, config, year, Pool::new(), &mut rng);
            BatchOutput {
                name: job.name.clone(),
                seed,
                generation,
            }
        })
        .collect()
}
