//! Selector-to-backend routing table.
//!
//! The registry is pure data. Authorization and event emission happen in the
//! [`Dispatcher`](crate::Dispatcher), which checks the caller before touching
//! the table.

use relay_core::{Address, DispatchError, Selector};
use std::collections::HashMap;

/// A mapping from selector to backend address.
///
/// A present selector always maps to a non-zero address; absence means the
/// selector is unroutable.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    map: HashMap<Selector, Address>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new entry.
    ///
    /// Existing entries are never overwritten; use [`Registry::update`].
    pub fn add(&mut self, selector: Selector, target: Address) -> Result<(), DispatchError> {
        self.check_add(selector, target)?;
        self.map.insert(selector, target);
        Ok(())
    }

    /// Validate an insert without performing it.
    pub fn check_add(&self, selector: Selector, target: Address) -> Result<(), DispatchError> {
        if target.is_zero() {
            return Err(DispatchError::InvalidTarget(selector));
        }
        if self.map.contains_key(&selector) {
            return Err(DispatchError::AlreadyExists(selector));
        }
        Ok(())
    }

    /// Point an existing entry at a new target, returning the previous one.
    pub fn update(&mut self, selector: Selector, target: Address) -> Result<Address, DispatchError> {
        let slot = self
            .map
            .get_mut(&selector)
            .ok_or(DispatchError::NotFound(selector))?;
        if target.is_zero() {
            return Err(DispatchError::InvalidTarget(selector));
        }
        Ok(std::mem::replace(slot, target))
    }

    /// Delete an entry, returning its target.
    pub fn remove(&mut self, selector: Selector) -> Result<Address, DispatchError> {
        self.map
            .remove(&selector)
            .ok_or(DispatchError::NotFound(selector))
    }

    /// Look up the backend for `selector`.
    pub fn resolve(&self, selector: Selector) -> Option<Address> {
        self.map.get(&selector).copied()
    }

    /// Whether `selector` has an entry.
    pub fn contains(&self, selector: Selector) -> bool {
        self.map.contains_key(&selector)
    }

    /// All entries, sorted by selector.
    pub fn entries(&self) -> Vec<(Selector, Address)> {
        let mut entries: Vec<_> = self.map.iter().map(|(s, t)| (*s, *t)).collect();
        entries.sort_unstable();
        entries
    }

    /// Selectors routed to `target`, sorted.
    pub fn selectors_for(&self, target: Address) -> Vec<Selector> {
        let mut selectors: Vec<_> = self
            .map
            .iter()
            .filter(|(_, t)| **t == target)
            .map(|(s, _)| *s)
            .collect();
        selectors.sort_unstable();
        selectors
    }

    /// Get the number of entries.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
