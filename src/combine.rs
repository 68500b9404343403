//! Combinator: joins across profile fields.
//!
//! Works on two reduced views of the profile, each field contributing its
//! lowercase and capitalized spelling:
//!
//! - **name forms** from [`FieldKind::Name`] fields,
//! - **organization forms** from [`FieldKind::Organization`] fields.
//!
//! ```text
//! name × name   (a ≠ b)   →  ab   a.b   a_b
//! name × org              →  name+org   org+name
//! word × year             →  word+year  word_year
//! name × symbol           →  name+sym   sym+name   name+sym+yy
//! pattern (× org short)   →  pattern    pattern+short
//! ```
//!
//! The year window is derived on demand from `birth_year` and the calendar
//! year; nothing here reads the clock.

use crate::case::{capitalize, last_two, lower};
use crate::profile::{Field, FieldKind, Profile};
use crate::types::Pool;

/// Symbols glued to name forms.
pub const NAME_SYMBOLS: [&str; 7] = ["!", "@", "#", "$", "%", "&", "*"];

/// Passwords common enough to include whatever the profile says.
pub const COMMON_PATTERNS: [&str; 10] = [
    "password",
    "pass",
    "123456",
    "qwerty",
    "admin",
    "welcome",
    "letmein",
    "abc123",
    "monkey",
    "1234567890",
];

/// How many calendar years back from the current one the window reaches.
const RECENT_YEARS: i32 = 5;

/// Lowercase and capitalized forms of every present field of `kind`,
/// deduplicated, in canonical field order.
pub fn forms_of_kind(profile: &Profile, kind: FieldKind) -> Vec<String> {
    let mut forms = Vec::new();
    for (_, value) in profile.of_kind(kind) {
        for form in [lower(value), capitalize(value)] {
            if !forms.contains(&form) {
                forms.push(form);
            }
        }
    }
    forms
}

/// Every ordered pair of distinct name forms, joined three ways.
///
/// Fewer than two distinct forms produce nothing.
pub fn name_pairs(names: &[String]) -> Pool {
    let mut pool = Pool::new();
    for a in names {
        for b in names {
            if a == b {
                continue;
            }
            pool.insert(format!("{a}{b}"));
            pool.insert(format!("{a}.{b}"));
            pool.insert(format!("{a}_{b}"));
        }
    }
    pool
}

/// Every (name, organization) pair, in both orders.
pub fn name_org_joins(names: &[String], orgs: &[String]) -> Pool {
    let mut pool = Pool::new();
    for name in names {
        for org in orgs {
            pool.insert(format!("{name}{org}"));
            pool.insert(format!("{org}{name}"));
        }
    }
    pool
}

/// Base pool plus name pairs and name/organization joins.
pub fn combine(profile: &Profile, base: Pool) -> Pool {
    let names = forms_of_kind(profile, FieldKind::Name);
    let orgs = forms_of_kind(profile, FieldKind::Organization);

    let mut pool = base;
    pool.extend(name_pairs(&names));
    pool.extend(name_org_joins(&names, &orgs));
    pool
}

/// Year values worth appending to words.
///
/// Birth year (full, two-digit, and ±1 when numeric) followed by the current
/// year and the four before it, full and two-digit. First occurrence wins.
pub fn year_window(profile: &Profile, current_year: i32) -> Vec<String> {
    let mut years: Vec<String> = Vec::new();
    let mut push = |value: String| {
        if !years.contains(&value) {
            years.push(value);
        }
    };

    if let Some(birth) = profile.get(Field::BirthYear) {
        push(birth.to_string());
        push(last_two(birth).to_string());
        if let Ok(year) = birth.parse::<i64>() {
            for neighbour in [year.checked_add(1), year.checked_sub(1)].into_iter().flatten() {
                push(neighbour.to_string());
            }
        }
    }

    for back in 0..RECENT_YEARS {
        let year = (current_year - back).to_string();
        let short = last_two(&year).to_string();
        push(year);
        push(short);
    }

    years
}

/// The pool plus `word+year` and `word_year` for every word and year.
pub fn with_years(pool: Pool, years: &[String]) -> Pool {
    let mut dated = Pool::new();
    for word in &pool {
        for year in years {
            dated.insert(format!("{word}{year}"));
            dated.insert(format!("{word}_{year}"));
        }
    }
    let mut out = pool;
    out.extend(dated);
    out
}

/// Name forms glued to common symbols, and the common-pattern vocabulary.
///
/// The `name+sym+yy` form needs a birth year; without one it is skipped,
/// never emitted half-built.
pub fn pattern_joins(profile: &Profile) -> Pool {
    let names = forms_of_kind(profile, FieldKind::Name);
    let birth_suffix = profile.get(Field::BirthYear).map(last_two);
    let mut pool = Pool::new();

    for name in &names {
        for sym in NAME_SYMBOLS {
            pool.insert(format!("{name}{sym}"));
            pool.insert(format!("{sym}{name}"));
            if let Some(yy) = birth_suffix {
                pool.insert(format!("{name}{sym}{yy}"));
            }
        }
    }

    let company_short = profile.get(Field::CompanyShort).map(lower);
    for pattern in COMMON_PATTERNS {
        pool.insert(pattern.to_string());
        if let Some(short) = &company_short {
            pool.insert(format!("{pattern}{short}"));
        }
    }

    pool
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn name_forms_in_field_order() {
        let forms = forms_of_kind(&alice_profile(), FieldKind::Name);
        assert_eq!(forms, strings(&["alice", "Alice", "smith", "Smith"]));
    }

    #[test]
    fn numeric_name_collapses_forms() {
        let profile = Profile::builder().set(Field::Nickname, "007").build();
        assert_eq!(forms_of_kind(&profile, FieldKind::Name), strings(&["007"]));
    }

    #[test]
    fn pairs_use_three_separators() {
        let pool = name_pairs(&strings(&["alice", "smith"]));
        assert_eq!(
            pool,
            pool_of(&[
                "alicesmith",
                "alice.smith",
                "alice_smith",
                "smithalice",
                "smith.alice",
                "smith_alice",
            ])
        );
    }

    #[test]
    fn pairs_never_repeat_a_form() {
        let names = strings(&["alice", "Alice", "smith", "Smith"]);
        let pool = name_pairs(&names);
        for name in &names {
            assert!(!pool.contains(&format!("{name}{name}")));
            assert!(!pool.contains(&format!("{name}.{name}")));
            assert!(!pool.contains(&format!("{name}_{name}")));
        }
        // 4 forms → 12 ordered pairs → 36 joins
        assert_eq!(pool.len(), 36);
    }

    #[test]
    fn single_form_produces_no_pairs() {
        assert!(name_pairs(&strings(&["007"])).is_empty());
        assert!(name_pairs(&[]).is_empty());
    }

    #[test]
    fn org_joins_both_orders() {
        let pool = name_org_joins(&strings(&["alice"]), &strings(&["acme"]));
        assert_eq!(pool, pool_of(&["aliceacme", "acmealice"]));
    }

    #[test]
    fn combine_keeps_base() {
        let base = pool_of(&["keepme"]);
        let pool = combine(&alice_profile(), base);
        assert!(pool.contains("keepme"));
        assert!(pool.contains("alicesmith"));
    }

    #[test]
    fn year_window_with_birth_year() {
        let years = year_window(&alice_profile(), 2025);
        assert_eq!(
            years,
            strings(&[
                "1990", "90", "1991", "1989", "2025", "25", "2024", "24", "2023", "23", "2022",
                "22", "2021", "21",
            ])
        );
    }

    #[test]
    fn year_window_without_birth_year() {
        let years = year_window(&Profile::default(), 2025);
        assert_eq!(years.len(), 10);
        assert!(years.contains(&"2021".to_string()));
        assert!(!years.contains(&"2020".to_string()));
    }

    #[test]
    fn non_numeric_birth_year_skips_neighbours() {
        let profile = Profile::builder().set(Field::BirthYear, "nineties").build();
        let years = year_window(&profile, 2025);
        assert_eq!(&years[..2], &strings(&["nineties", "es"])[..]);
        assert_eq!(years.len(), 12);
    }

    #[test]
    fn extreme_birth_year_skips_overflowing_neighbours() {
        let max = i64::MAX.to_string();
        let profile = Profile::builder().set(Field::BirthYear, &max).build();
        let years = year_window(&profile, 2025);
        assert_eq!(years[0], max);
        assert_eq!(years[2], (i64::MAX - 1).to_string());
        assert_eq!(years.len(), 13);

        let min = i64::MIN.to_string();
        let profile = Profile::builder().set(Field::BirthYear, &min).build();
        let years = year_window(&profile, 2025);
        assert_eq!(years[2], (i64::MIN + 1).to_string());
        assert_eq!(years.len(), 13);
    }

    #[test]
    fn birth_year_inside_recent_window_is_not_duplicated() {
        let profile = Profile::builder().set(Field::BirthYear, "2024").build();
        let years = year_window(&profile, 2025);
        let unique: std::collections::BTreeSet<_> = years.iter().collect();
        assert_eq!(unique.len(), years.len());
    }

    #[test]
    fn with_years_adds_both_joins() {
        let pool = with_years(pool_of(&["alice"]), &strings(&["90"]));
        assert_eq!(pool, pool_of(&["alice", "alice90", "alice_90"]));
    }

    #[test]
    fn symbol_joins_with_birth_year() {
        let pool = pattern_joins(&alice_profile());
        assert!(pool.contains("alice!"));
        assert!(pool.contains("@Smith"));
        assert!(pool.contains("alice#90"));
    }

    #[test]
    fn symbol_joins_skip_year_form_without_birth_year() {
        let profile = Profile::builder().set(Field::FirstName, "alice").build();
        let pool = pattern_joins(&profile);
        assert!(pool.contains("alice!"));
        assert!(pool.contains("!alice"));
        assert!(!pool.iter().any(|c| c.starts_with("alice!") && c.len() > 6));
        assert!(!pool.contains(""));
    }

    #[test]
    fn common_patterns_join_company_short() {
        let profile = Profile::builder().set(Field::CompanyShort, "ACME").build();
        let pool = pattern_joins(&profile);
        assert!(pool.contains("password"));
        assert!(pool.contains("passwordacme"));
        assert!(pool.contains("letmeinacme"));
    }

    #[test]
    fn common_patterns_present_for_empty_profile() {
        let pool = pattern_joins(&Profile::default());
        assert_eq!(pool.len(), COMMON_PATTERNS.len());
    }
}
