//! Length filter: keeps candidates inside the inclusive length window.
//!
//! Length is counted in Unicode scalar values, so `"ñandú"` is 5 long.

use crate::case::char_len;
use crate::types::Pool;

/// Inclusive `[min, max]` bound on candidate length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthWindow {
    pub min: usize,
    pub max: usize,
}

impl LengthWindow {
    pub fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, candidate: &str) -> bool {
        let len = char_len(candidate);
        self.min <= len && len <= self.max
    }

    /// Keep only the candidates inside the window.
    pub fn filter(&self, pool: Pool) -> Pool {
        pool.into_iter().filter(|c| self.contains(c)).collect()
    }

    /// Keep matching candidates from any iterator, deduplicating.
    pub fn collect<I, S>(&self, candidates: I) -> Pool
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        candidates
            .into_iter()
            .map(Into::into)
            .filter(|c| self.contains(c))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(items: &[&str]) -> Pool {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bounds_are_inclusive() {
        let window = LengthWindow::new(3, 5);
        assert!(!window.contains("ab"));
        assert!(window.contains("abc"));
        assert!(window.contains("abcde"));
        assert!(!window.contains("abcdef"));
    }

    #[test]
    fn filter_keeps_only_in_window() {
        let window = LengthWindow::new(4, 6);
        let filtered = window.filter(pool(&["abc", "abcd", "abcdef", "abcdefg"]));
        assert_eq!(filtered, pool(&["abcd", "abcdef"]));
    }

    #[test]
    fn empty_in_empty_out() {
        let window = LengthWindow::new(1, 10);
        assert!(window.filter(Pool::new()).is_empty());
    }

    #[test]
    fn filtering_twice_is_identity() {
        let window = LengthWindow::new(5, 8);
        let once = window.filter(pool(&["alice", "al", "alicesmith", "smith99", "x"]));
        let twice = window.filter(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn multibyte_counts_chars() {
        let window = LengthWindow::new(5, 5);
        assert!(window.contains("ñandú"));
    }

    #[test]
    fn collect_deduplicates() {
        let window = LengthWindow::new(1, 3);
        let collected = window.collect(vec!["ab", "ab", "abcd"]);
        assert_eq!(collected, pool(&["ab"]));
    }
}
