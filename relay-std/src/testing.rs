//! Testing utilities for Relay.
//!
//! Fixtures that make dispatcher tests short to write.
//!
//! # Features
//!
//! - [`Accounts`]: Fixed, distinct identities for the usual cast of callers
//! - [`EchoBackend`]: Returns the identities it observed
//! - [`RecordingBackend`]: Records every call and counts them in storage
//! - [`RevertingBackend`]: Stages effects, then always reverts

use relay_core::{
    Address, Backend, CallContext, Output, Revert, Selector, StorageSchema, Word,
};
use std::sync::{Arc, Mutex};

// ============================================================================
// Accounts
// ============================================================================

/// Distinct identities for tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Accounts {
    /// Deploys the dispatcher and so starts as Admin.
    pub deployer: Address,
    /// Initial Moderator.
    pub moderator: Address,
    /// An ordinary caller.
    pub user: Address,
    /// Another ordinary caller.
    pub other: Address,
}

impl Accounts {
    /// The standard cast.
    pub const fn new() -> Self {
        Self {
            deployer: Address::repeat_byte(0xd0),
            moderator: Address::repeat_byte(0xa0),
            user: Address::repeat_byte(0x0b),
            other: Address::repeat_byte(0x0c),
        }
    }
}

impl Default for Accounts {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Echo Backend
// ============================================================================

/// A backend that reports who called it and where it ran.
///
/// Output words: caller, storage owner (`this`), code address, value.
#[derive(Debug, Clone, Copy, Default)]
pub struct EchoBackend;

impl EchoBackend {
    /// Create a new echo backend.
    pub fn new() -> Self {
        Self
    }
}

impl Backend for EchoBackend {
    async fn invoke(&self, ctx: &mut CallContext<'_>) -> Result<Output, Revert> {
        Ok(Output::from(vec![
            Word::from(ctx.caller()),
            Word::from(ctx.this()),
            Word::from(ctx.code_address()),
            Word::from(ctx.value()),
        ]))
    }

    fn schema(&self) -> StorageSchema {
        StorageSchema::new("echo")
    }
}

// ============================================================================
// Recording Backend
// ============================================================================

/// One call observed by a [`RecordingBackend`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordedCall {
    /// Caller as seen by the backend.
    pub caller: Address,
    /// Selector it was invoked with.
    pub selector: Selector,
    /// Value attached.
    pub value: u128,
}

/// A backend that records every call it receives.
///
/// Each call also bumps a counter in storage and emits `Recorded(caller)`, so
/// tests can see whether the effects were committed.
///
/// # Example
///
/// ```rust,ignore
/// let recorder = RecordingBackend::new();
/// let target = dispatcher.deploy_backend(recorder.clone());
///
/// // Route and call...
///
/// assert_eq!(recorder.count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RecordingBackend {
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl RecordingBackend {
    const SCHEMA: StorageSchema = StorageSchema::new("recording");

    /// Create a new recording backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a clone of the recorded calls.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Get the number of recorded calls.
    pub fn count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Clear all recorded calls.
    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }

    /// Counter slot the backend bumps on every call.
    pub fn counter_slot() -> relay_core::Slot {
        Self::SCHEMA.slot("count")
    }
}

impl Backend for RecordingBackend {
    async fn invoke(&self, ctx: &mut CallContext<'_>) -> Result<Output, Revert> {
        self.calls.lock().unwrap().push(RecordedCall {
            caller: ctx.caller(),
            selector: ctx.calldata().selector(),
            value: ctx.value(),
        });

        let slot = Self::counter_slot();
        let count = ctx.load_u128(&slot)? + 1;
        ctx.store(slot, count);
        ctx.emit("Recorded", vec![Word::from(ctx.caller())]);
        Ok(Output::word(count))
    }

    fn schema(&self) -> StorageSchema {
        Self::SCHEMA
    }
}

// ============================================================================
// Reverting Backend
// ============================================================================

/// A backend that stages a write and a log, then reverts with a fixed reason.
#[derive(Debug, Clone)]
pub struct RevertingBackend {
    reason: String,
}

impl RevertingBackend {
    /// Revert with `reason` on every call.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl Backend for RevertingBackend {
    async fn invoke(&self, ctx: &mut CallContext<'_>) -> Result<Output, Revert> {
        ctx.store(StorageSchema::new("reverting").slot("touched"), true);
        ctx.emit("Touched", Vec::new());
        Err(Revert::new(self.reason.clone()))
    }

    fn schema(&self) -> StorageSchema {
        StorageSchema::new("reverting")
    }
}
