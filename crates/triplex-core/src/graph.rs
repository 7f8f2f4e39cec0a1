//! # Knowledge Graph
//!
//! The query facade over the interner, the fact registry, and the pattern
//! index, plus the `FactStore` trait that collaborators are written against.
//!
//! ```text
//! "Bob" "IS_IN" "Kitchen"
//!    │ normalize + validate
//!    ▼
//! EntityInterner ──► FactRegistry ──► PatternIndex (8 buckets)
//! ```
//!
//! `KnowledgeGraph` performs no locking. `SharedGraph` puts one behind a
//! single `RwLock` for callers on several threads: an import holds the write
//! lock across interner, registry, and index; a query holds the read lock.

use crate::index::PatternIndex;
use crate::interner::EntityInterner;
use crate::metrics::StoreMetrics;
use crate::registry::{FactRegistry, Registration};
use crate::statement::{Pattern, normalize_token, validate_literal};
use crate::{Fact, FactId, KgError, Node, NodeId, Predicate, PredicateId};
use std::sync::{Arc, OnceLock, RwLock};

// =============================================================================
// FACTSTORE TRAIT
// =============================================================================

/// The store operations collaborators depend on.
///
/// Query results are owned so that lock-backed stores can hand them out
/// after releasing the lock.
pub trait FactStore {
    /// Record a statement. Idempotent per unique normalized triple.
    fn import_statement(
        &mut self,
        subject: &str,
        predicate: &str,
        object: &str,
    ) -> Result<Registration, KgError>;

    /// Facts matching a pattern, each token literal or `?`.
    ///
    /// `Ok(None)` means no fact of that pattern shape was ever imported.
    fn query(
        &self,
        subject: &str,
        predicate: &str,
        object: &str,
    ) -> Result<Option<Vec<Fact>>, KgError>;

    /// Number of distinct facts.
    fn fact_count(&self) -> Result<usize, KgError>;
}

// =============================================================================
// KNOWLEDGE GRAPH
// =============================================================================

/// Single-owner fact store.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeGraph {
    interner: EntityInterner,
    registry: FactRegistry,
    index: PatternIndex,
}

impl KnowledgeGraph {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record (subject, predicate, object).
    ///
    /// Tokens are trimmed and lowercased, then must be non-empty, free of
    /// whitespace and periods, and not the wildcard. Importing an existing triple returns
    /// the existing fact and leaves every bucket unchanged.
    pub fn import_statement(
        &mut self,
        subject: &str,
        predicate: &str,
        object: &str,
    ) -> Result<Registration, KgError> {
        let subject = normalize_token(subject);
        let predicate = normalize_token(predicate);
        let object = normalize_token(object);
        validate_literal(&subject)?;
        validate_literal(&predicate)?;
        validate_literal(&object)?;

        let (s, p, o) = self.interner.resolve_triple(&subject, &predicate, &object);
        let registration = self.registry.resolve_fact(s, p, o);
        if registration.is_new() {
            self.index.index(registration.id(), &subject, &predicate, &object);
        }
        Ok(registration)
    }

    /// Facts matching a pattern given as raw tokens.
    ///
    /// Returns `Ok(None)` when the bucket was never created.
    pub fn query(
        &self,
        subject: &str,
        predicate: &str,
        object: &str,
    ) -> Result<Option<Vec<&Fact>>, KgError> {
        let pattern = Pattern::from_tokens(subject, predicate, object)?;
        Ok(self.lookup(&pattern))
    }

    /// Facts matching an already-parsed pattern, in creation order.
    #[must_use]
    pub fn lookup(&self, pattern: &Pattern) -> Option<Vec<&Fact>> {
        let members = self.index.lookup(pattern)?;
        Some(
            members
                .iter()
                .filter_map(|&id| self.registry.fact(id))
                .collect(),
        )
    }

    /// Look up a fact by id.
    #[must_use]
    pub fn fact(&self, id: FactId) -> Option<&Fact> {
        self.registry.fact(id)
    }

    /// Look up a node by id.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.interner.node(id)
    }

    /// Look up a predicate by id.
    #[must_use]
    pub fn predicate(&self, id: PredicateId) -> Option<&Predicate> {
        self.interner.predicate(id)
    }

    /// All facts in creation order.
    pub fn facts(&self) -> impl Iterator<Item = &Fact> {
        self.registry.iter()
    }

    /// Read access to the pattern index.
    #[must_use]
    pub fn index(&self) -> &PatternIndex {
        &self.index
    }

    /// Read access to the interner.
    #[must_use]
    pub fn interner(&self) -> &EntityInterner {
        &self.interner
    }

    /// Size counters.
    #[must_use]
    pub fn metrics(&self) -> StoreMetrics {
        StoreMetrics {
            node_count: self.interner.node_count(),
            predicate_count: self.interner.predicate_count(),
            fact_count: self.registry.len(),
            bucket_count: self.index.bucket_count(),
            index_entries: self.index.entry_count(),
        }
    }
}

impl FactStore for KnowledgeGraph {
    fn import_statement(
        &mut self,
        subject: &str,
        predicate: &str,
        object: &str,
    ) -> Result<Registration, KgError> {
        KnowledgeGraph::import_statement(self, subject, predicate, object)
    }

    fn query(
        &self,
        subject: &str,
        predicate: &str,
        object: &str,
    ) -> Result<Option<Vec<Fact>>, KgError> {
        Ok(KnowledgeGraph::query(self, subject, predicate, object)?
            .map(|facts| facts.into_iter().cloned().collect()))
    }

    fn fact_count(&self) -> Result<usize, KgError> {
        Ok(self.registry.len())
    }
}

// =============================================================================
// SHARED GRAPH
// =============================================================================

/// A `KnowledgeGraph` behind a single writer lock, cheap to clone.
#[derive(Debug, Clone, Default)]
pub struct SharedGraph {
    inner: Arc<RwLock<KnowledgeGraph>>,
}

impl SharedGraph {
    /// Wrap a fresh, empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing store.
    #[must_use]
    pub fn with_graph(graph: KnowledgeGraph) -> Self {
        Self {
            inner: Arc::new(RwLock::new(graph)),
        }
    }

    /// Run `f` with shared read access.
    pub fn read<T>(&self, f: impl FnOnce(&KnowledgeGraph) -> T) -> Result<T, KgError> {
        let guard = self.inner.read().map_err(|_| KgError::LockPoisoned)?;
        Ok(f(&guard))
    }

    /// Run `f` with exclusive write access.
    pub fn write<T>(&self, f: impl FnOnce(&mut KnowledgeGraph) -> T) -> Result<T, KgError> {
        let mut guard = self.inner.write().map_err(|_| KgError::LockPoisoned)?;
        Ok(f(&mut guard))
    }

    /// Size counters.
    pub fn metrics(&self) -> Result<StoreMetrics, KgError> {
        self.read(KnowledgeGraph::metrics)
    }
}

impl FactStore for SharedGraph {
    fn import_statement(
        &mut self,
        subject: &str,
        predicate: &str,
        object: &str,
    ) -> Result<Registration, KgError> {
        self.write(|graph| graph.import_statement(subject, predicate, object))?
    }

    fn query(
        &self,
        subject: &str,
        predicate: &str,
        object: &str,
    ) -> Result<Option<Vec<Fact>>, KgError> {
        self.read(|graph| FactStore::query(graph, subject, predicate, object))?
    }

    fn fact_count(&self) -> Result<usize, KgError> {
        self.read(|graph| graph.registry.len())
    }
}

// =============================================================================
// PROCESS-WIDE STORE
// =============================================================================

/// The process-wide store, created empty on first access and never dropped.
///
/// Only the binary's entry point should call this; everything else takes a
/// store as a parameter.
pub fn global() -> &'static SharedGraph {
    static GLOBAL: OnceLock<SharedGraph> = OnceLock::new();
    GLOBAL.get_or_init(SharedGraph::new)
}

// =============================================================================
// TESTS
// =============================================================================
