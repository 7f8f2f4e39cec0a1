//! # Pattern Index
//!
//! Precompute-on-write, O(1)-on-read lookup for three-position patterns.
//!
//! Every fact (s, p, o) is inserted under all 2^3 wildcard generalizations of
//! its triple:
//!
//! ```text
//! s p o   s p ?   s ? o   ? p o   s ? ?   ? ? o   ? p ?   ? ? ?
//! ```
//!
//! A query of any shape is then a single map lookup, independent of how many
//! facts are stored.
//!
//! ## Cost
//!
//! Each distinct fact costs eight set insertions at write time and eight live
//! bucket memberships, so index memory is O(8 * F) in the number of distinct
//! facts. The `? ? ?` bucket holds every fact ever imported.
//!
//! Buckets are created lazily and never removed. A bucket that was never
//! created is the not-found signal; because nothing is ever deleted, a bucket
//! that exists is never empty.

use crate::FactId;
use crate::primitives::{GENERALIZATIONS, WILDCARD};
use crate::statement::{Pattern, pattern_key};
use std::collections::{BTreeMap, BTreeSet};

/// Position bits of a generalization mask. A set bit makes that position `?`.
const SUBJECT_BIT: u8 = 0b100;
const PREDICATE_BIT: u8 = 0b010;
const OBJECT_BIT: u8 = 0b001;

/// All eight index keys for a triple of canonical tokens.
#[must_use]
pub fn generalizations(subject: &str, predicate: &str, object: &str) -> Vec<String> {
    (0..GENERALIZATIONS)
        .map(|mask| {
            let pick = |bit: u8, token| if mask & bit != 0 { WILDCARD } else { token };
            pattern_key(
                pick(SUBJECT_BIT, subject),
                pick(PREDICATE_BIT, predicate),
                pick(OBJECT_BIT, object),
            )
        })
        .collect()
}

/// Map from pattern key to the set of facts it matches.
#[derive(Debug, Clone, Default)]
pub struct PatternIndex {
    /// Bucket storage: "s p ?" -> {FactId}
    buckets: BTreeMap<String, BTreeSet<FactId>>,
}

impl PatternIndex {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `fact` under every generalization of its canonical tokens.
    ///
    /// Re-indexing the same fact leaves every bucket unchanged.
    pub fn index(&mut self, fact: FactId, subject: &str, predicate: &str, object: &str) {
        for key in generalizations(subject, predicate, object) {
            self.buckets.entry(key).or_default().insert(fact);
        }
    }

    /// Members of the bucket for `pattern`, or `None` if it was never created.
    #[must_use]
    pub fn lookup(&self, pattern: &Pattern) -> Option<&BTreeSet<FactId>> {
        self.buckets.get(&pattern.key())
    }

    /// Number of members in the bucket for `pattern`.
    #[must_use]
    pub fn bucket_len(&self, pattern: &Pattern) -> Option<usize> {
        self.lookup(pattern).map(BTreeSet::len)
    }

    /// Keys of every bucket that holds `fact`, in key order.
    ///
    /// Scans all buckets; meant for verification, not the query path.
    pub fn buckets_containing(&self, fact: FactId) -> Vec<&str> {
        self.buckets
            .iter()
            .filter(|(_, members)| members.contains(&fact))
            .map(|(key, _)| key.as_str())
            .collect()
    }

    /// Number of buckets created so far.
    #[must_use]
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Total bucket memberships across all buckets.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.buckets.values().map(BTreeSet::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(text: &str) -> Pattern {
        Pattern::parse(text).expect("pattern")
    }

    #[test]
    fn generalizations_are_the_eight_shapes() {
        let keys: BTreeSet<String> = generalizations("s", "p", "o").into_iter().collect();
        let expected: BTreeSet<String> = [
            "s p o", "s p ?", "s ? o", "? p o", "s ? ?", "? ? o", "? p ?", "? ? ?",
        ]
        .iter()
        .map(|k| k.to_string())
        .collect();

        assert_eq!(keys, expected);
    }

    #[test]
    fn index_fills_exactly_eight_buckets() {
        let mut index = PatternIndex::new();
        index.index(FactId(0), "bob", "is_in", "kitchen");

        assert_eq!(index.bucket_count(), 8);
        assert_eq!(index.buckets_containing(FactId(0)).len(), 8);
    }

    #[test]
    fn reindex_keeps_set_semantics() {
        let mut index = PatternIndex::new();
        index.index(FactId(0), "bob", "is_in", "kitchen");
        index.index(FactId(0), "bob", "is_in", "kitchen");

        assert_eq!(index.entry_count(), 8);
        assert_eq!(index.bucket_len(&pattern("bob is_in kitchen")), Some(1));
    }

    #[test]
    fn subject_equal_to_object_still_fills_eight_buckets() {
        let mut index = PatternIndex::new();
        index.index(FactId(0), "a", "r", "a");

        assert_eq!(index.buckets_containing(FactId(0)).len(), 8);
    }

    #[test]
    fn lookup_shares_generalized_buckets() {
        let mut index = PatternIndex::new();
        index.index(FactId(0), "a", "r", "b");
        index.index(FactId(1), "a", "r", "c");

        let both: Vec<_> = index
            .lookup(&pattern("a r ?"))
            .map(|s| s.iter().copied().collect())
            .unwrap_or_default();
        assert_eq!(both, vec![FactId(0), FactId(1)]);
        assert_eq!(index.bucket_len(&pattern("a ? b")), Some(1));
    }

    #[test]
    fn lookup_never_created_bucket_is_none() {
        let mut index = PatternIndex::new();
        index.index(FactId(0), "a", "r", "b");

        assert!(index.lookup(&pattern("nobody ? ?")).is_none());
    }
}
