//! # relay-std
//!
//! Standard implementations for the Relay dispatch proxy.
//!
//! This crate provides:
//! - **Routing**: [`Registry`], the selector to backend table
//! - **Governance**: [`Governance`], the Admin/Moderator role slots
//! - **Event log**: [`EventLog`], append-only and ordered
//! - **Dispatch**: [`Dispatcher`], the persistent front-end that ties them together
//! - **Management surface**: [`Management`], the dispatcher's own operations

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use relay_core;

// Modules
pub mod backends;
pub mod config;
pub mod dispatcher;
pub mod governance;
pub mod log;
pub mod management;
pub mod registry;
pub mod testing;

pub use backends::BackendSet;
pub use config::DispatcherConfig;
pub use dispatcher::Dispatcher;
pub use governance::Governance;
pub use log::EventLog;
pub use management::{MANAGEMENT_SIGNATURES, Management, is_reserved};
pub use registry::Registry;
