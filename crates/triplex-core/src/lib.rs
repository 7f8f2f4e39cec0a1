//! # triplex-core
//!
//! An in-memory store of subject-predicate-object facts - THE STORE.
//!
//! Every imported statement is interned, deduplicated, and indexed under all
//! eight wildcard generalizations of its triple, so that any pattern query
//! (`bob is_in ?`, `? ? kitchen`, `? ? ?`, ...) is a single lookup.
//!
//! ## Layers
//!
//! ```text
//! KnowledgeGraph (facade: normalize, validate, import, query)
//!   ├── EntityInterner  (node + predicate handles)
//!   ├── FactRegistry    (one Fact per unique triple)
//!   └── PatternIndex    (pattern key -> {FactId})
//! ```
//!
//! Collaborators (`Importer`, `QueryRunner`, `OccupantTracker`) are written
//! against the [`FactStore`] trait and receive a store by injection.
//!
//! ## Architectural Constraints
//!
//! - No async, no network, no filesystem access, no logging
//! - Deterministic iteration (`BTreeMap`/`BTreeSet`)
//! - Additive only: nothing is ever mutated or removed once stored

// =============================================================================
// MODULES
// =============================================================================

pub mod graph;
pub mod importer;
pub mod index;
pub mod interner;
pub mod metrics;
pub mod occupant;
pub mod primitives;
pub mod query;
pub mod registry;
pub mod statement;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{Fact, FactId, KgError, Node, NodeId, Predicate, PredicateId};

// =============================================================================
// RE-EXPORTS: Store
// =============================================================================

pub use graph::{FactStore, KnowledgeGraph, SharedGraph, global};
pub use index::PatternIndex;
pub use interner::EntityInterner;
pub use metrics::StoreMetrics;
pub use registry::{FactRegistry, Registration};
pub use statement::{Pattern, Statement, Term};

// =============================================================================
// RE-EXPORTS: Collaborators
// =============================================================================

pub use importer::{ImportReport, Importer, LineError, MalformedPolicy};
pub use occupant::OccupantTracker;
pub use query::{QueryReport, QueryRunner};
