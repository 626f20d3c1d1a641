//! Installed backend code, keyed by address.
//!
//! Installing code is permissionless; it does nothing until the Moderator
//! routes a selector to its address.

use relay_core::{Address, Backend, DispatchError, SharedBackend, StorageSchema};
use std::{collections::HashMap, sync::Arc};

/// The address space of installed backends.
pub struct BackendSet {
    creator: Address,
    nonce: u64,
    code: HashMap<Address, SharedBackend>,
}

impl BackendSet {
    /// An empty set whose derived addresses are rooted at `creator`.
    pub fn new(creator: Address) -> Self {
        Self {
            creator,
            nonce: 0,
            code: HashMap::new(),
        }
    }

    /// Install `backend` at the next derived address and return it.
    pub fn deploy<B: Backend>(&mut self, backend: B) -> Address {
        self.deploy_shared(Arc::new(backend))
    }

    /// Install an already shared backend at the next derived address.
    pub fn deploy_shared(&mut self, backend: SharedBackend) -> Address {
        let mut address = Address::derive(self.creator, self.nonce);
        self.nonce += 1;
        // Skip addresses taken by explicit installs.
        while self.code.contains_key(&address) {
            address = Address::derive(self.creator, self.nonce);
            self.nonce += 1;
        }
        self.code.insert(address, backend);
        address
    }

    /// Install `backend` at a chosen, empty address.
    ///
    /// Occupied addresses are refused with [`DispatchError::CodeExists`].
    pub fn install<B: Backend>(&mut self, address: Address, backend: B) -> Result<(), DispatchError> {
        if self.code.contains_key(&address) {
            return Err(DispatchError::CodeExists(address));
        }
        self.code.insert(address, Arc::new(backend));
        Ok(())
    }

    /// Code at `address`.
    pub fn get(&self, address: Address) -> Option<SharedBackend> {
        self.code.get(&address).cloned()
    }

    /// Storage layout declared by the code at `address`.
    pub fn schema(&self, address: Address) -> Option<StorageSchema> {
        self.code.get(&address).map(|b| b.schema_dyn())
    }

    /// Whether code is installed at `address`.
    pub fn contains(&self, address: Address) -> bool {
        self.code.contains_key(&address)
    }

    /// Get the number of installed backends.
    pub fn len(&self) -> usize {
        self.code.len()
    }

    /// Check if nothing is installed.
    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }
}

impl std::fmt::Debug for BackendSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut addresses: Vec<_> = self.code.keys().collect();
        addresses.sort_unstable();
        f.debug_struct("BackendSet")
            .field("creator", &self.creator)
            .field("nonce", &self.nonce)
            .field("installed", &addresses)
            .finish()
    }
}
