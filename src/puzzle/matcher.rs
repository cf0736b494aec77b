//! Answer matching
//!
//! Every puzzle screen reduces to the same question: does what the user
//! entered equal a target string, ignoring case? Word search additionally
//! accepts a selection made backwards.

use std::collections::BTreeSet;

/// Case-insensitive exact comparison of an attempt against a target.
///
/// An empty attempt never matches, even an empty target.
pub fn check_solved(attempt: &str, target: &str) -> bool {
    if attempt.is_empty() {
        return false;
    }
    attempt.to_uppercase() == target.to_uppercase()
}

/// Like [`check_solved`], but also accepts the attempt read in reverse.
pub fn check_solved_either_way(attempt: &str, target: &str) -> bool {
    if check_solved(attempt, target) {
        return true;
    }
    let reversed: String = attempt.chars().rev().collect();
    check_solved(&reversed, target)
}

/// Tracks which entries of an answer key have been found.
#[derive(Debug, Clone)]
pub struct FoundSet<K: Ord> {
    found: BTreeSet<K>,
    total: usize,
}

impl<K: Ord> FoundSet<K> {
    /// Create a tracker for an answer key with `total` entries
    pub fn new(total: usize) -> Self {
        Self {
            found: BTreeSet::new(),
            total,
        }
    }

    /// Mark an entry found. Returns true only the first time.
    pub fn mark(&mut self, key: K) -> bool {
        self.found.insert(key)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.found.contains(key)
    }

    pub fn count(&self) -> usize {
        self.found.len()
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// All entries found
    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.found.len() >= self.total
    }

    pub fn iter(&self) -> impl Iterator<Item = &K> {
        self.found.iter()
    }
}
