//! Base expander: primitive candidates straight from profile fields.
//!
//! | Field | Forms |
//! |-------|-------|
//! | any scalar | lowercase, capitalized |
//! | identity scalar ([`Field::has_entity_forms`]) | + uppercase, first-letter |
//! | list items | lowercase, capitalized |
//!
//! No randomness and no errors: the same profile always expands to the same
//! set, and an empty profile expands to nothing.
//!
//! [`Field::has_entity_forms`]: crate::profile::Field::has_entity_forms

use crate::case::{capitalize, first_letter, lower, upper};
use crate::profile::{ListField, Profile};
use crate::types::Pool;

pub fn expand_base(profile: &Profile) -> Pool {
    let mut pool = Pool::new();

    for (field, value) in profile.scalars() {
        pool.insert(lower(value));
        pool.insert(capitalize(value));
        if field.has_entity_forms() {
            pool.insert(upper(value));
            if let Some(form) = first_letter(value) {
                pool.insert(form);
            }
        }
    }

    for list in ListField::ALL {
        for item in profile.list(list) {
            pool.insert(lower(item));
            pool.insert(capitalize(item));
        }
    }

    pool
}
