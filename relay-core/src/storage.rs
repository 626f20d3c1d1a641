//! The dispatcher's persistent storage area.
//!
//! Storage is a flat map from 32-byte [`Slot`]s to [`Word`]s. Backends never
//! own storage; they address slots inside the dispatcher's [`StateStore`]
//! through a [`CallContext`](crate::CallContext).
//!
//! # Layout
//!
//! Backends derive slots from a namespace they declare in their
//! [`StorageSchema`]. Two backends that share a namespace share fields, which
//! is how a replacement backend inherits its predecessor's state. Nothing here
//! stops two unrelated backends from picking overlapping slots.

use crate::primitives::{Word, keccak256};
use std::{collections::BTreeMap, fmt};

/// A storage key.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Slot([u8; 32]);

impl Slot {
    /// Wrap raw bytes.
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// The slot for `field` within `namespace`: `keccak256(namespace ":" field)`.
    pub fn field(namespace: &str, field: &str) -> Self {
        let mut preimage = Vec::with_capacity(namespace.len() + field.len() + 1);
        preimage.extend_from_slice(namespace.as_bytes());
        preimage.push(b':');
        preimage.extend_from_slice(field.as_bytes());
        Self(keccak256(preimage))
    }

    /// The slot for `key` in a mapping rooted at `self`: `keccak256(key ++ base)`.
    pub fn mapping(&self, key: impl Into<Word>) -> Self {
        let key = key.into();
        let mut preimage = [0u8; 64];
        preimage[..32].copy_from_slice(key.as_bytes());
        preimage[32..].copy_from_slice(&self.0);
        Self(keccak256(preimage))
    }

    /// Raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Slot(0x{})", hex::encode(self.0))
    }
}

/// Storage layout tag a backend publishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StorageSchema {
    /// Prefix for every slot the backend derives.
    pub namespace: &'static str,
    /// Layout revision. Bump when fields move.
    pub version: u32,
}

impl StorageSchema {
    /// A schema at `version` 1.
    pub const fn new(namespace: &'static str) -> Self {
        Self {
            namespace,
            version: 1,
        }
    }

    /// Set the layout revision.
    pub const fn with_version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    /// Shorthand for `Slot::field(self.namespace, field)`.
    pub fn slot(&self, field: &str) -> Slot {
        Slot::field(self.namespace, field)
    }
}

/// Committed storage. Unwritten slots read as [`Word::ZERO`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateStore {
    slots: BTreeMap<Slot, Word>,
}

impl StateStore {
    /// Empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a slot.
    pub fn load(&self, slot: &Slot) -> Word {
        self.slots.get(slot).copied().unwrap_or(Word::ZERO)
    }

    /// Write a slot. Writing zero clears it.
    pub fn store(&mut self, slot: Slot, value: Word) {
        if value.is_zero() {
            self.slots.remove(&slot);
        } else {
            self.slots.insert(slot, value);
        }
    }

    /// Apply a set of writes.
    pub fn apply(&mut self, writes: impl IntoIterator<Item = (Slot, Word)>) {
        for (slot, value) in writes {
            self.store(slot, value);
        }
    }

    /// Number of non-zero slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether every slot is zero.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Iterate non-zero slots in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&Slot, &Word)> {
        self.slots.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::{Slot, StateStore, StorageSchema};
    use crate::primitives::{Address, Word};

    #[test]
    fn zero_writes_clear_slots() {
        let mut store = StateStore::new();
        let slot = Slot::field("token", "totalSupply");
        store.store(slot, Word::from(5u128));
        assert_eq!(store.load(&slot), Word::from(5u128));
        assert_eq!(store.len(), 1);

        store.store(slot, Word::ZERO);
        assert!(store.is_empty());
        assert_eq!(store.load(&slot), Word::ZERO);
    }

    #[test]
    fn mapping_slots_are_distinct_per_key() {
        let base = StorageSchema::new("token").slot("balances");
        let a = base.mapping(Address::repeat_byte(1));
        let b = base.mapping(Address::repeat_byte(2));
        assert_ne!(a, b);
        assert_ne!(a, base);
        assert_eq!(a, base.mapping(Address::repeat_byte(1)));
    }

    #[test]
    fn namespaces_separate_fields() {
        assert_ne!(Slot::field("token", "owner"), Slot::field("staking", "owner"));
        assert_eq!(StorageSchema::new("token").slot("owner"), Slot::field("token", "owner"));
    }
}
