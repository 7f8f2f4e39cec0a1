//! # Entity Interner
//!
//! Canonical handles for node and predicate identifiers.
//!
//! Each namespace is an arena (`Vec`) plus an identifier -> id map. A given
//! identifier is interned at most once; later references get the same id.
//! Both maps only grow.
//!
//! Identifiers arrive already normalized (the facade trims and lowercases),
//! so the interner compares them byte for byte.

use crate::primitives::unix_now;
use crate::{Node, NodeId, Predicate, PredicateId};
use std::collections::BTreeMap;

/// Interner for nodes and predicates.
///
/// A node and a predicate may share an identifier without colliding.
#[derive(Debug, Clone, Default)]
pub struct EntityInterner {
    /// Node arena, indexed by `NodeId`.
    nodes: Vec<Node>,
    /// Reverse lookup: identifier -> NodeId
    node_index: BTreeMap<String, NodeId>,
    /// Predicate arena, indexed by `PredicateId`.
    predicates: Vec<Predicate>,
    /// Reverse lookup: identifier -> PredicateId
    predicate_index: BTreeMap<String, PredicateId>,
}

impl EntityInterner {
    /// Create an empty interner.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the node for `identifier`, creating it on first reference.
    pub fn resolve_node(&mut self, identifier: &str) -> NodeId {
        if let Some(&id) = self.node_index.get(identifier) {
            return id;
        }

        let id = NodeId(self.nodes.len() as u64);
        self.nodes.push(Node::new(id, identifier, unix_now()));
        self.node_index.insert(identifier.to_string(), id);
        id
    }

    /// Return the predicate for `identifier`, creating it on first reference.
    pub fn resolve_predicate(&mut self, identifier: &str) -> PredicateId {
        if let Some(&id) = self.predicate_index.get(identifier) {
            return id;
        }

        let id = PredicateId(self.predicates.len() as u64);
        self.predicates.push(Predicate::new(id, identifier, unix_now()));
        self.predicate_index.insert(identifier.to_string(), id);
        id
    }

    /// Intern all three parts of a triple and return their records.
    ///
    /// Ids handed out by `resolve_*` always index their own arena.
    pub fn resolve_triple(
        &mut self,
        subject: &str,
        predicate: &str,
        object: &str,
    ) -> (&Node, &Predicate, &Node) {
        let s = self.resolve_node(subject);
        let p = self.resolve_predicate(predicate);
        let o = self.resolve_node(object);
        (
            &self.nodes[s.0 as usize],
            &self.predicates[p.0 as usize],
            &self.nodes[o.0 as usize],
        )
    }

    /// Look up a node record.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0 as usize)
    }

    /// Look up a predicate record.
    #[must_use]
    pub fn predicate(&self, id: PredicateId) -> Option<&Predicate> {
        self.predicates.get(id.0 as usize)
    }

    /// Find an already-interned node without creating one.
    #[must_use]
    pub fn find_node(&self, identifier: &str) -> Option<NodeId> {
        self.node_index.get(identifier).copied()
    }

    /// Find an already-interned predicate without creating one.
    #[must_use]
    pub fn find_predicate(&self, identifier: &str) -> Option<PredicateId> {
        self.predicate_index.get(identifier).copied()
    }

    /// Number of interned nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of interned predicates.
    #[must_use]
    pub fn predicate_count(&self) -> usize {
        self.predicates.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_node_is_idempotent() {
        let mut interner = EntityInterner::new();
        let first = interner.resolve_node("bob");
        let second = interner.resolve_node("bob");

        assert_eq!(first, second);
        assert_eq!(interner.node_count(), 1);
    }

    #[test]
    fn resolve_triple_returns_interned_records() {
        let mut interner = EntityInterner::new();
        let bob = interner.resolve_node("bob");
        let (subject, predicate, object) = interner.resolve_triple("bob", "likes", "bob");

        assert_eq!(subject.id, bob);
        assert_eq!(object.id, bob);
        assert_eq!(predicate.identifier(), "likes");
        assert_eq!(interner.node_count(), 1);
        assert_eq!(interner.predicate_count(), 1);
    }

    #[test]
    fn distinct_identifiers_get_distinct_ids() {
        let mut interner = EntityInterner::new();
        let bob = interner.resolve_node("bob");
        let amy = interner.resolve_node("amy");

        assert_ne!(bob, amy);
        assert_eq!(interner.node(amy).map(Node::identifier), Some("amy"));
    }

    #[test]
    fn namespaces_do_not_collide() {
        let mut interner = EntityInterner::new();
        let node = interner.resolve_node("owns");
        let predicate = interner.resolve_predicate("owns");

        assert_eq!(interner.node_count(), 1);
        assert_eq!(interner.predicate_count(), 1);
        assert_eq!(interner.node(node).map(Node::identifier), Some("owns"));
        assert_eq!(
            interner.predicate(predicate).map(Predicate::identifier),
            Some("owns")
        );
    }

    #[test]
    fn find_does_not_create() {
        let mut interner = EntityInterner::new();
        assert_eq!(interner.find_node("bob"), None);
        assert_eq!(interner.node_count(), 0);

        let id = interner.resolve_node("bob");
        assert_eq!(interner.find_node("bob"), Some(id));
        assert_eq!(interner.find_predicate("bob"), None);
    }

    #[test]
    fn interned_record_keeps_creation_time() {
        let mut interner = EntityInterner::new();
        let before = unix_now();
        let id = interner.resolve_predicate("is_in");
        let created = interner.predicate(id).map(|p| p.created_at);

        assert!(created.is_some_and(|t| t >= before));
    }
}
