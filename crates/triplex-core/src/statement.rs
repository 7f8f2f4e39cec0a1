//! # Statement Syntax
//!
//! Line-level syntax shared by the importer, the query runner, and fact
//! identifiers:
//!
//! ```text
//! bob is_in kitchen.      statement: three literal tokens, optional terminator
//! bob is_in ?             pattern:   each position literal or wildcard
//! ```
//!
//! Tokens are separated by any run of whitespace and periods, so
//! `bob.is_in.kitchen.` reads the same as `bob is_in kitchen.`. A token can
//! therefore never contain a `.` of its own.
//!
//! Normalization (trim + lowercase) and validation also live here so that the
//! facade and the pattern parser agree on what a canonical token is.

use crate::KgError;
use crate::primitives::{ARITY, MAX_TOKEN_LENGTH, TERMINATOR, WILDCARD};
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// TOKENS
// =============================================================================

/// Canonical form of a raw token: surrounding whitespace removed, lowercased.
#[must_use]
pub fn normalize_token(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Check that a normalized token may be stored as an identifier.
pub fn validate_literal(token: &str) -> Result<(), KgError> {
    if token.is_empty() {
        return Err(KgError::InvalidToken("empty token".to_string()));
    }
    if token.len() > MAX_TOKEN_LENGTH {
        return Err(KgError::InvalidToken(format!(
            "token exceeds {} bytes",
            MAX_TOKEN_LENGTH
        )));
    }
    if token.chars().any(char::is_whitespace) {
        return Err(KgError::InvalidToken(format!(
            "token contains whitespace: {:?}",
            token
        )));
    }
    if token.contains(TERMINATOR) {
        return Err(KgError::InvalidToken(format!(
            "token contains '{}': {:?}",
            TERMINATOR, token
        )));
    }
    if token == WILDCARD {
        return Err(KgError::InvalidToken(format!(
            "wildcard '{}' cannot be stored",
            WILDCARD
        )));
    }
    Ok(())
}

/// Split a line into exactly three tokens.
fn tokenize(text: &str) -> Result<[&str; ARITY], String> {
    let tokens: Vec<&str> = text
        .split(|c: char| c.is_whitespace() || c == TERMINATOR)
        .filter(|token| !token.is_empty())
        .collect();
    match tokens.as_slice() {
        [subject, predicate, object] => Ok([*subject, *predicate, *object]),
        other => Err(format!("expected {} tokens, found {}", ARITY, other.len())),
    }
}

// =============================================================================
// STATEMENT
// =============================================================================

/// Three literal tokens, as read from a line or a fact identifier.
///
/// Tokens are kept as written; the facade normalizes them on import.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Statement {
    /// Subject token.
    pub subject: String,
    /// Predicate token.
    pub predicate: String,
    /// Object token.
    pub object: String,
}

impl Statement {
    /// Create a statement from three tokens.
    #[must_use]
    pub fn new(
        subject: impl Into<String>,
        predicate: impl Into<String>,
        object: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
        }
    }

    /// Parse a statement outside any stream (line number 0).
    pub fn parse(text: &str) -> Result<Self, KgError> {
        Self::parse_line(text, 0)
    }

    /// Parse line `line` (1-based) of a stream.
    pub fn parse_line(text: &str, line: usize) -> Result<Self, KgError> {
        let [subject, predicate, object] =
            tokenize(text).map_err(|reason| KgError::MalformedStatement { line, reason })?;
        Ok(Self::new(subject, predicate, object))
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}{}",
            self.subject, self.predicate, self.object, TERMINATOR
        )
    }
}

// =============================================================================
// PATTERN
// =============================================================================

/// One position of a pattern.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Term {
    /// Matches exactly this canonical identifier.
    Exact(String),
    /// Matches any identifier.
    Wildcard,
}

impl Term {
    /// Normalize a raw token; `?` becomes [`Term::Wildcard`].
    pub fn parse(raw: &str) -> Result<Self, KgError> {
        let token = normalize_token(raw);
        if token == WILDCARD {
            return Ok(Self::Wildcard);
        }
        validate_literal(&token)?;
        Ok(Self::Exact(token))
    }

    /// The token this term contributes to an index key.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Exact(token) => token,
            Self::Wildcard => WILDCARD,
        }
    }

    /// Whether this is the wildcard.
    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Self::Wildcard)
    }
}

/// A three-position query, each position exact or wildcard.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pattern {
    /// Subject position.
    pub subject: Term,
    /// Predicate position.
    pub predicate: Term,
    /// Object position.
    pub object: Term,
}

impl Pattern {
    /// Create a pattern from three terms.
    #[must_use]
    pub fn new(subject: Term, predicate: Term, object: Term) -> Self {
        Self {
            subject,
            predicate,
            object,
        }
    }

    /// Normalize three raw tokens into a pattern.
    pub fn from_tokens(subject: &str, predicate: &str, object: &str) -> Result<Self, KgError> {
        Ok(Self::new(
            Term::parse(subject)?,
            Term::parse(predicate)?,
            Term::parse(object)?,
        ))
    }

    /// Parse a pattern outside any stream (line number 0).
    pub fn parse(text: &str) -> Result<Self, KgError> {
        Self::parse_line(text, 0)
    }

    /// Parse line `line` (1-based) of a query stream.
    pub fn parse_line(text: &str, line: usize) -> Result<Self, KgError> {
        let [subject, predicate, object] =
            tokenize(text).map_err(|reason| KgError::MalformedStatement { line, reason })?;
        Self::from_tokens(subject, predicate, object)
    }

    /// The index key: the three position tokens joined by single spaces.
    #[must_use]
    pub fn key(&self) -> String {
        pattern_key(
            self.subject.as_str(),
            self.predicate.as_str(),
            self.object.as_str(),
        )
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

/// Join three key tokens.
#[must_use]
pub fn pattern_key(subject: &str, predicate: &str, object: &str) -> String {
    format!("{subject} {predicate} {object}")
}

// =============================================================================
// TESTS
// =============================================================================
