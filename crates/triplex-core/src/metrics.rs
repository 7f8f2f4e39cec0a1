//! # Store Metrics
//!
//! Size counters for a `KnowledgeGraph`, reported by `triplex stats`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Counts describing the current store contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StoreMetrics {
    /// Interned subject/object entities.
    pub node_count: usize,
    /// Interned relations.
    pub predicate_count: usize,
    /// Distinct facts.
    pub fact_count: usize,
    /// Index buckets created.
    pub bucket_count: usize,
    /// Bucket memberships across the index. Always eight per fact.
    pub index_entries: usize,
}

impl fmt::Display for StoreMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Nodes:         {}", self.node_count)?;
        writeln!(f, "Predicates:    {}", self.predicate_count)?;
        writeln!(f, "Facts:         {}", self.fact_count)?;
        writeln!(f, "Buckets:       {}", self.bucket_count)?;
        write!(f, "Index entries: {}", self.index_entries)
    }
}
