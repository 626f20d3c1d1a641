//! # Forwarding frame
//!
//! A [`CallContext`] is what a backend sees while it runs on behalf of the
//! dispatcher. It carries:
//!
//! - the **original caller** and attached value, never the dispatcher's own
//!   identity as caller;
//! - the dispatcher's address (`this`) and the backend's own code address;
//! - read/write access to the dispatcher's [`StateStore`] through a journal.
//!
//! Writes and logs land in the journal first. The dispatcher applies the
//! journal only when the backend returns `Ok`, so a reverted call leaves no
//! trace in storage or in the event log.

use crate::{
    calldata::{Call, Calldata},
    error::Revert,
    event::BackendLog,
    primitives::{Address, Word},
    storage::{Slot, StateStore},
};
use std::collections::BTreeMap;

/// Pending effects of a forwarded call.
#[derive(Debug, Default)]
pub struct Journal {
    /// Staged slot writes. The last write to a slot wins.
    pub writes: BTreeMap<Slot, Word>,
    /// Logs in emission order.
    pub logs: Vec<BackendLog>,
}

/// Execution frame handed to a backend.
pub struct CallContext<'a> {
    call: &'a Call,
    this: Address,
    code_address: Address,
    storage: &'a StateStore,
    journal: Journal,
}

impl<'a> CallContext<'a> {
    /// Open a frame over `storage` for `call`, running code installed at
    /// `code_address` on behalf of the dispatcher at `this`.
    pub fn new(this: Address, code_address: Address, call: &'a Call, storage: &'a StateStore) -> Self {
        Self {
            call,
            this,
            code_address,
            storage,
            journal: Journal::default(),
        }
    }

    /// The identity that called the dispatcher.
    pub fn caller(&self) -> Address {
        self.call.caller
    }

    /// Value attached to the call.
    pub fn value(&self) -> u128 {
        self.call.value
    }

    /// The dispatcher's own address. Storage belongs to this identity.
    pub fn this(&self) -> Address {
        self.this
    }

    /// Where the running backend is installed.
    pub fn code_address(&self) -> Address {
        self.code_address
    }

    /// Selector and arguments.
    pub fn calldata(&self) -> &Calldata {
        &self.call.data
    }

    /// Read a slot, seeing this frame's own pending writes.
    pub fn load(&self, slot: &Slot) -> Word {
        self.journal
            .writes
            .get(slot)
            .copied()
            .unwrap_or_else(|| self.storage.load(slot))
    }

    /// Stage a write.
    pub fn store(&mut self, slot: Slot, value: impl Into<Word>) {
        self.journal.writes.insert(slot, value.into());
    }

    /// Read a slot as a `uint`, reverting if it holds something wider.
    pub fn load_u128(&self, slot: &Slot) -> Result<u128, Revert> {
        self.load(slot)
            .to_u128()
            .ok_or_else(|| Revert::new("storage word exceeds 128 bits"))
    }

    /// Read a slot as an address, reverting if its high bytes are dirty.
    pub fn load_address(&self, slot: &Slot) -> Result<Address, Revert> {
        self.load(slot)
            .to_address()
            .ok_or_else(|| Revert::new("storage word is not an address"))
    }

    /// Stage a log. It is published from the dispatcher's address.
    pub fn emit(&mut self, name: impl Into<String>, args: Vec<Word>) {
        self.journal.logs.push(BackendLog {
            emitter: self.this,
            code_address: self.code_address,
            name: name.into(),
            args,
        });
    }

    /// Revert with `reason` unless `condition` holds.
    pub fn require(&self, condition: bool, reason: &str) -> Result<(), Revert> {
        if condition {
            Ok(())
        } else {
            Err(Revert::new(reason))
        }
    }

    /// Close the frame and hand back its pending effects.
    pub fn into_journal(self) -> Journal {
        self.journal
    }
}
