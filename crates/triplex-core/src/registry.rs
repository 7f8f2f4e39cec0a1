//! # Fact Registry
//!
//! One canonical [`Fact`] per unique (subject, predicate, object) triple.
//!
//! Facts are keyed by their canonical identifier (`"s p o."`). Resolving a
//! triple that is already registered returns the existing id; a second record
//! is never allocated. That idempotence is what keeps index buckets free of
//! duplicate members on repeated imports.

use crate::primitives::unix_now;
use crate::{Fact, FactId, Node, Predicate};
use std::collections::BTreeMap;

/// Outcome of [`FactRegistry::resolve_fact`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    /// The triple was new; a fact was registered.
    Created(FactId),
    /// The triple was already registered.
    Existing(FactId),
}

impl Registration {
    /// The fact id, new or existing.
    #[must_use]
    pub fn id(self) -> FactId {
        match self {
            Self::Created(id) | Self::Existing(id) => id,
        }
    }

    /// Whether this call registered the fact.
    #[must_use]
    pub fn is_new(self) -> bool {
        matches!(self, Self::Created(_))
    }
}

/// Registry of deduplicated facts.
#[derive(Debug, Clone, Default)]
pub struct FactRegistry {
    /// Fact arena, indexed by `FactId`.
    facts: Vec<Fact>,
    /// Reverse lookup: canonical identifier -> FactId
    by_identifier: BTreeMap<String, FactId>,
}

impl FactRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the fact for this triple, registering it on first sight.
    pub fn resolve_fact(
        &mut self,
        subject: &Node,
        predicate: &Predicate,
        object: &Node,
    ) -> Registration {
        let identifier = Fact::canonical_identifier(
            subject.identifier(),
            predicate.identifier(),
            object.identifier(),
        );
        if let Some(&id) = self.by_identifier.get(&identifier) {
            return Registration::Existing(id);
        }

        let id = FactId(self.facts.len() as u64);
        self.facts.push(Fact::new(id, subject, predicate, object, unix_now()));
        self.by_identifier.insert(identifier, id);
        Registration::Created(id)
    }

    /// Look up a fact by id.
    #[must_use]
    pub fn fact(&self, id: FactId) -> Option<&Fact> {
        self.facts.get(id.0 as usize)
    }

    /// Look up a fact by canonical identifier.
    #[must_use]
    pub fn find(&self, identifier: &str) -> Option<FactId> {
        self.by_identifier.get(identifier).copied()
    }

    /// All facts in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Fact> {
        self.facts.iter()
    }

    /// Number of registered facts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.facts.len()
    }

    /// Whether no fact has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NodeId, PredicateId};

    fn parts(s: &str, p: &str, o: &str) -> (Node, Predicate, Node) {
        (
            Node::new(NodeId(0), s, 0),
            Predicate::new(PredicateId(0), p, 0),
            Node::new(NodeId(1), o, 0),
        )
    }

    #[test]
    fn resolve_registers_once() {
        let mut registry = FactRegistry::new();
        let (s, p, o) = parts("bob", "is_in", "kitchen");

        let first = registry.resolve_fact(&s, &p, &o);
        let second = registry.resolve_fact(&s, &p, &o);

        assert!(first.is_new());
        assert_eq!(second, Registration::Existing(first.id()));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn distinct_triples_get_distinct_facts() {
        let mut registry = FactRegistry::new();
        let (s, p, o) = parts("bob", "is_in", "kitchen");
        let (_, _, other) = parts("bob", "is_in", "office");

        let a = registry.resolve_fact(&s, &p, &o).id();
        let b = registry.resolve_fact(&s, &p, &other).id();

        assert_ne!(a, b);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn find_by_identifier() {
        let mut registry = FactRegistry::new();
        let (s, p, o) = parts("a", "b", "c");
        let id = registry.resolve_fact(&s, &p, &o).id();

        assert_eq!(registry.find("a b c."), Some(id));
        assert_eq!(registry.find("a b d."), None);
        assert_eq!(registry.fact(id).map(Fact::identifier), Some("a b c."));
    }

    #[test]
    fn iter_in_creation_order() {
        let mut registry = FactRegistry::new();
        for object in ["x", "y", "z"] {
            let (s, p, o) = parts("a", "b", object);
            registry.resolve_fact(&s, &p, &o);
        }

        let ids: Vec<_> = registry.iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![FactId(0), FactId(1), FactId(2)]);
    }
}
