//! # Store Primitives
//!
//! Hardcoded runtime constants for the triplex store.
//!
//! The store starts with zero facts but fixed syntax.
//! These primitives are compiled into the binary and are immutable at runtime.

use std::time::{SystemTime, UNIX_EPOCH};

/// The wildcard token. A pattern position holding this token matches any value.
///
/// Statements may never use it as a literal identifier.
pub const WILDCARD: &str = "?";

/// Terminator that may close a statement line (`bob is_in kitchen.`).
///
/// Canonical fact identifiers always end with it.
pub const TERMINATOR: char = '.';

/// Number of positions in a statement or pattern.
pub const ARITY: usize = 3;

/// Number of wildcard generalizations indexed per fact (2^ARITY).
pub const GENERALIZATIONS: u8 = 1 << ARITY;

/// Marker printed by the query runner when a pattern was never indexed.
pub const NULL_MARKER: &str = "<null>";

/// Predicate used by the occupant tracker for location facts.
pub const LOCATION_PREDICATE: &str = "is_in";

// =============================================================================
// INPUT VALIDATION LIMITS
// =============================================================================

/// Maximum length for a single normalized token, in bytes.
///
/// Tokens longer than this are rejected by the facade.
pub const MAX_TOKEN_LENGTH: usize = 256;

/// Current Unix time in whole seconds.
///
/// Clocks set before the epoch report 0.
#[must_use]
pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
