//! Shared test utilities for the wordforge test suite.
//!
//! Provides fixture profiles, a seeded RNG, pool constructors and assertions
//! over candidate lists.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let mut rng = seeded_rng();
//! let out = generate_at(&alice_profile(), &config, TEST_YEAR, &mut rng);
//! assert_all_within(&out, 6, 12);
//! assert_unique(&out);
//! ```

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::case::char_len;
use crate::profile::{Field, ListField, Profile};
use crate::types::Pool;

/// Calendar year tests pin the year window to.
pub const TEST_YEAR: i32 = 2025;

/// A fixed-seed RNG so randomized stages are reproducible in tests.
pub fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(0x5eed)
}

pub fn rng_with_seed(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

// =========================================================================
// Fixture profiles
// =========================================================================

/// Alice Smith, born 1990. The canonical small profile.
pub fn alice_profile() -> Profile {
    Profile::builder()
        .set(Field::FirstName, "Alice")
        .set(Field::LastName, "Smith")
        .set(Field::BirthYear, "1990")
        .build()
}

/// A profile with every field set.
pub fn full_profile() -> Profile {
    Profile::builder()
        .set(Field::FirstName, "Alice")
        .set(Field::LastName, "Smith")
        .set(Field::Nickname, "ace")
        .set(Field::BirthYear, "1990")
        .set(Field::CompanyName, "Acme")
        .set(Field::CompanyShort, "ACM")
        .set(Field::JobTitle, "engineer")
        .set(Field::Department, "ops")
        .set(Field::PetName, "Rex")
        .set(Field::SpouseName, "Bob")
        .set(Field::ChildName, "Eve")
        .set(Field::BirthDate, "15081990")
        .set(Field::Anniversary, "01062015")
        .list(ListField::Interests, ["chess", "hiking"])
        .list(ListField::Keywords, ["rover"])
        .build()
}

// =========================================================================
// Pools
// =========================================================================

pub fn pool_of(items: &[&str]) -> Pool {
    items.iter().map(|s| s.to_string()).collect()
}

// =========================================================================
// Assertions
// =========================================================================

/// Assert every candidate is within `[min, max]` characters.
pub fn assert_all_within(candidates: &[String], min: usize, max: usize) {
    for c in candidates {
        let len = char_len(c);
        assert!(
            (min..=max).contains(&len),
            "candidate {c:?} has length {len}, outside [{min}, {max}]"
        );
    }
}

/// Assert no candidate appears twice.
pub fn assert_unique(candidates: &[String]) {
    let unique: Pool = candidates.iter().cloned().collect();
    assert_eq!(
        unique.len(),
        candidates.len(),
        "candidate list contains duplicates"
    );
}
