//! # relay-core
//!
//! Core types and traits for the Relay selector-routed dispatch proxy.
//!
//! This crate has minimal dependencies and is designed to be imported by
//! backends that don't need the full `relay-std` engine.
//!
//! # Model
//!
//! A dispatcher is a single persistent front-end. Every inbound [`Call`]
//! carries a 4-byte [`Selector`] derived from its signature. The dispatcher
//! resolves the selector to a backend address and forwards the call so that
//! the backend runs:
//!
//! - against the **dispatcher's** storage ([`StateStore`]), not its own;
//! - with the **original caller** visible through [`CallContext::caller`].
//!
//! Backends implement [`Backend`] and are stored as [`DynBackend`] trait
//! objects. Their effects are journaled and only committed on success.
//!
//! # Error Types
//!
//! - [`DispatchError`] - Every dispatcher failure, with a stable `reason()`
//! - [`Revert`] - Backend failures, propagated verbatim
//! - [`CalldataError`] - Malformed payloads
//! - [`SignatureError`] - Non-canonical signatures

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod backend;
mod calldata;
mod context;
mod error;
mod event;
mod primitives;
mod role;
mod selector;
mod storage;

// Re-exports
pub use backend::{Backend, DynBackend, SharedBackend};
pub use calldata::{Call, Calldata, CalldataError, Output};
pub use context::{CallContext, Journal};
pub use error::{DispatchError, Revert};
pub use event::{BackendLog, Event, LogEntry};
pub use primitives::{Address, ParseHexError, Word, keccak256};
pub use role::Role;
pub use selector::{Selector, SignatureError, validate_signature};
pub use storage::{Slot, StateStore, StorageSchema};
