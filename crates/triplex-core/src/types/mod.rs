//! # Core Type Definitions
//!
//! This module contains the record types shared by every part of the store:
//! - Arena identifiers (`NodeId`, `PredicateId`, `FactId`)
//! - Interned records (`Node`, `Predicate`)
//! - The deduplicated statement record (`Fact`)
//! - Error types (`KgError`)
//!
//! ## Identity
//!
//! Records are owned by arenas inside the store. Everything else refers to
//! them by id, so "the same instance" means "the same id". Ids are assigned
//! in creation order and never reused.

use crate::primitives::TERMINATOR;
use crate::statement::Statement;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// ARENA IDENTIFIERS
// =============================================================================

/// Arena index of an interned subject/object entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u64);

/// Arena index of an interned relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PredicateId(pub u64);

/// Arena index of a registered fact.
///
/// Ordering follows creation order, which is the order query results use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FactId(pub u64);

// =============================================================================
// NODE / PREDICATE
// =============================================================================

/// An interned entity identifier (subject or object position).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Arena index.
    pub id: NodeId,
    /// Canonical identifier (trimmed, lowercased).
    identifier: String,
    /// Unix seconds at first reference.
    pub created_at: u64,
}

impl Node {
    /// Create a node record.
    #[must_use]
    pub fn new(id: NodeId, identifier: impl Into<String>, created_at: u64) -> Self {
        Self {
            id,
            identifier: identifier.into(),
            created_at,
        }
    }

    /// The canonical identifier.
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }
}

/// An interned relation identifier.
///
/// Same shape as [`Node`], kept in a separate namespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Predicate {
    /// Arena index.
    pub id: PredicateId,
    /// Canonical identifier (trimmed, lowercased).
    identifier: String,
    /// Unix seconds at first reference.
    pub created_at: u64,
}

impl Predicate {
    /// Create a predicate record.
    #[must_use]
    pub fn new(id: PredicateId, identifier: impl Into<String>, created_at: u64) -> Self {
        Self {
            id,
            identifier: identifier.into(),
            created_at,
        }
    }

    /// The canonical identifier.
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }
}

// =============================================================================
// FACT
// =============================================================================

/// A deduplicated (subject, predicate, object) statement.
///
/// One `Fact` exists per unique triple. It is never mutated after
/// registration and is shared by id across every index bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fact {
    /// Arena index.
    pub id: FactId,
    /// Subject node.
    pub subject: NodeId,
    /// Relation.
    pub predicate: PredicateId,
    /// Object node.
    pub object: NodeId,
    /// `"<subject> <predicate> <object>."`
    identifier: String,
    /// Unix seconds at registration.
    pub created_at: u64,
}

impl Fact {
    /// Build a fact from its three interned parts.
    #[must_use]
    pub fn new(
        id: FactId,
        subject: &Node,
        predicate: &Predicate,
        object: &Node,
        created_at: u64,
    ) -> Self {
        Self {
            id,
            subject: subject.id,
            predicate: predicate.id,
            object: object.id,
            identifier: Self::canonical_identifier(
                subject.identifier(),
                predicate.identifier(),
                object.identifier(),
            ),
            created_at,
        }
    }

    /// The canonical identifier for a triple of canonical tokens.
    #[must_use]
    pub fn canonical_identifier(subject: &str, predicate: &str, object: &str) -> String {
        format!("{subject} {predicate} {object}{TERMINATOR}")
    }

    /// The canonical identifier.
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Parse the identifier back into its three tokens.
    pub fn statement(&self) -> Result<Statement, KgError> {
        Statement::parse(&self.identifier)
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in triplex.
///
/// - Not-found is never an error; lookups return `Option`
/// - Interning and fact resolution never fail for valid tokens
/// - Only token validation, line parsing, and the I/O boundary can fail
#[derive(Debug, Error)]
pub enum KgError {
    /// An input source could not be opened or was rejected before reading.
    #[error("Source unavailable: {0}")]
    SourceUnavailable(String),

    /// Reading or writing a stream failed part-way.
    #[error("I/O error: {0}")]
    Io(String),

    /// A line did not decompose into exactly three tokens.
    #[error("Malformed statement at line {line}: {reason}")]
    MalformedStatement {
        /// 1-based line number (0 when not read from a stream).
        line: usize,
        /// What was wrong with the line.
        reason: String,
    },

    /// A token failed validation after normalization.
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// A thread panicked while holding the store lock.
    #[error("Store lock poisoned")]
    LockPoisoned,

    /// The configuration file could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<std::io::Error> for KgError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn fact(s: &str, p: &str, o: &str) -> Fact {
        Fact::new(
            FactId(0),
            &Node::new(NodeId(0), s, 0),
            &Predicate::new(PredicateId(0), p, 0),
            &Node::new(NodeId(1), o, 0),
            0,
        )
    }

    #[test]
    fn fact_identifier_is_space_joined_with_terminator() {
        assert_eq!(fact("a", "b", "c").identifier(), "a b c.");
    }

    #[test]
    fn fact_identifier_round_trips() {
        let stmt = fact("a", "b", "c").statement().expect("parse");
        assert_eq!(stmt.subject, "a");
        assert_eq!(stmt.predicate, "b");
        assert_eq!(stmt.object, "c");
    }

    #[test]
    fn fact_ids_order_by_creation() {
        assert!(FactId(1) < FactId(2));
    }

    #[test]
    fn malformed_error_names_line() {
        let err = KgError::MalformedStatement {
            line: 7,
            reason: "expected 3 tokens, found 2".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Malformed statement at line 7: expected 3 tokens, found 2"
        );
    }
}
