//! # Occupant Tracker
//!
//! The write/read boundary a device-rule engine uses to keep track of who is
//! where. Derived observations are recorded as ordinary statements:
//!
//! ```text
//! bob is_in house1:kitchen.
//! bob status active.
//! ```
//!
//! The tracker owns no state of its own; it is a thin adapter over an
//! injected [`FactStore`].

use crate::graph::FactStore;
use crate::primitives::{LOCATION_PREDICATE, WILDCARD};
use crate::registry::Registration;
use crate::{Fact, KgError};

/// Records and reads occupant facts through a store.
#[derive(Debug, Clone, Default)]
pub struct OccupantTracker<S> {
    store: S,
}

impl<S: FactStore> OccupantTracker<S> {
    /// Wrap a store.
    #[must_use]
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Record `occupant status value`.
    pub fn record(
        &mut self,
        occupant: &str,
        status: &str,
        value: &str,
    ) -> Result<Registration, KgError> {
        self.store.import_statement(occupant, status, value)
    }

    /// Record that `occupant` was detected in `room` of `house`.
    pub fn record_location(
        &mut self,
        occupant: &str,
        house: &str,
        room: &str,
    ) -> Result<Registration, KgError> {
        let place = format!("{}:{}", house.trim(), room.trim());
        self.record(occupant, LOCATION_PREDICATE, &place)
    }

    /// Where `occupant` is, or `None` if no location was ever recorded.
    ///
    /// Locations are never retracted; with several on record this is the
    /// earliest one.
    pub fn location(&self, occupant: &str) -> Result<Option<String>, KgError> {
        let Some(facts) = self.store.query(occupant, LOCATION_PREDICATE, WILDCARD)? else {
            return Ok(None);
        };
        match facts.first() {
            Some(fact) => Ok(Some(fact.statement()?.object)),
            None => Ok(None),
        }
    }

    /// Every fact in the store, or `None` if it is empty.
    pub fn all_facts(&self) -> Result<Option<Vec<Fact>>, KgError> {
        self.store.query(WILDCARD, WILDCARD, WILDCARD)
    }

    /// The wrapped store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Give the store back.
    #[must_use]
    pub fn into_inner(self) -> S {
        self.store
    }
}
