//! Selector: the final shuffle and cut.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::types::Pool;

/// Shuffle the pool and keep at most `target_count` candidates.
///
/// A pool smaller than the target is returned whole, shuffled.
pub fn select<R: Rng + ?Sized>(pool: Pool, target_count: usize, rng: &mut R) -> Vec<String> {
    let mut candidates: Vec<String> = pool.into_iter().collect();
    candidates.shuffle(rng);
    candidates.truncate(target_count);
    candidates
}
