//! # relay - Selector-Routed Dispatch Proxy
//!
//! `relay` keeps one persistent front-end, the [`Dispatcher`], whose identity
//! and storage never change, while the logic behind it is swapped per function.
//! Each inbound call is routed by its 4-byte [`Selector`] to a registered
//! backend. The backend runs against the dispatcher's storage and sees the
//! original caller.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use relay::prelude::*;
//!
//! struct Greeter;
//!
//! impl Backend for Greeter {
//!     async fn invoke(&self, ctx: &mut CallContext<'_>) -> Result<Output, Revert> {
//!         Ok(Output::word(ctx.caller()))
//!     }
//!
//!     fn schema(&self) -> StorageSchema {
//!         StorageSchema::new("greeter")
//!     }
//! }
//!
//! let mut dispatcher = Dispatcher::new(deployer, DispatcherConfig::new(moderator))?;
//! let greeter = dispatcher.deploy_backend(Greeter);
//! dispatcher.add_entry(moderator, selector!("hello()"), greeter)?;
//!
//! let out = dispatcher.execute(Call::signature(user, "hello()")).await?;
//! assert_eq!(out.as_address(), Some(user));
//! ```
//!
//! ## Roles
//!
//! - **Admin** holds the top-tier role and can only hand it on.
//! - **Moderator** edits routing entries.
//!
//! Role transfers take effect immediately and are recorded in the event log.

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use relay_core::{
    // Identity and encoding
    Address,
    // Backend traits
    Backend,
    BackendLog,
    Call,
    CallContext,
    Calldata,
    CalldataError,
    // Errors
    DispatchError,
    DynBackend,
    // Events
    Event,
    Journal,
    LogEntry,
    Output,
    ParseHexError,
    Revert,
    Role,
    Selector,
    SharedBackend,
    SignatureError,
    // Storage
    Slot,
    StateStore,
    StorageSchema,
    Word,
    keccak256,
    validate_signature,
};

pub use relay_std::{
    BackendSet, Dispatcher, DispatcherConfig, EventLog, Governance, MANAGEMENT_SIGNATURES,
    Management, Registry, is_reserved,
};

/// Testing utilities.
pub mod testing {
    #![allow(clippy::wildcard_imports)]
    pub use relay_std::testing::*;
}

/// Prelude module - common imports for Relay.
///
/// # Usage
///
/// ```rust,ignore
/// use relay::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        Address, Backend, Call, CallContext, DispatchError, Dispatcher, DispatcherConfig, Output,
        Revert, Selector, StorageSchema, Word,
    };

    #[cfg(feature = "macros")]
    pub use crate::selector;
}

#[cfg(feature = "macros")]
pub use relay_macros::{selector, selectors};
