//! Error types for Relay.
//!
//! - [`DispatchError`] - Every way a call into the dispatcher can fail
//! - [`Revert`] - A failure raised by backend code, propagated verbatim
//!
//! Each [`DispatchError`] exposes a stable [`reason`](DispatchError::reason)
//! string so callers can match on the failure kind rather than on a generic
//! rejection.

use crate::{
    calldata::CalldataError,
    primitives::Address,
    role::Role,
    selector::{Selector, SignatureError},
};
use thiserror::Error;

/// A failure raised by backend code.
///
/// The dispatcher never wraps or rewrites the reason.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{reason}")]
pub struct Revert {
    reason: String,
}

impl Revert {
    /// Revert with a reason string.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    /// The reason given by the backend.
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl From<CalldataError> for Revert {
    fn from(err: CalldataError) -> Self {
        Revert::new(err.to_string())
    }
}

/// Errors returned by dispatcher operations.
///
/// Any error aborts the whole call: no registry entry, role slot, storage slot
/// or log entry is changed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// The caller does not hold the role the operation requires.
    #[error("not {0}")]
    NotAuthorized(Role),

    /// Update or removal of a selector with no entry.
    #[error("no entry for selector {0}")]
    NotFound(Selector),

    /// Addition of a selector that already has an entry.
    #[error("entry already exists for selector {0}")]
    AlreadyExists(Selector),

    /// A routing entry pointing at the null address.
    #[error("null target for selector {0}")]
    InvalidTarget(Selector),

    /// A role transfer naming the null identity.
    #[error("invalid {0} successor")]
    InvalidSuccessor(Role),

    /// A selector owned by the management surface cannot be routed.
    #[error("selector {0} is reserved for management")]
    Reserved(Selector),

    /// No routing entry for the call's selector.
    #[error("unroutable call {0}")]
    UnroutableCall(Selector),

    /// A routing entry points at an address with no backend installed.
    #[error("no backend installed at {0}")]
    MissingBackend(Address),

    /// Code is already installed at the address. Installed code is never
    /// replaced; route to a fresh deployment instead.
    #[error("code already installed at {0}")]
    CodeExists(Address),

    /// Value attached to a management call.
    #[error("management calls do not accept value")]
    NonPayable,

    /// A signature handed to management tooling is not canonical.
    #[error(transparent)]
    InvalidSignature(#[from] SignatureError),

    /// Management calldata could not be decoded.
    #[error(transparent)]
    Calldata(#[from] CalldataError),

    /// The backend reverted.
    #[error(transparent)]
    Reverted(#[from] Revert),
}

impl DispatchError {
    /// Stable, matchable reason for this failure.
    ///
    /// For [`DispatchError::Reverted`] this is the backend's own reason.
    pub fn reason(&self) -> &str {
        match self {
            DispatchError::NotAuthorized(Role::Admin) => "not admin",
            DispatchError::NotAuthorized(Role::Moderator) => "not moderator",
            DispatchError::NotFound(_) => "entry not found",
            DispatchError::AlreadyExists(_) => "entry already exists",
            DispatchError::InvalidTarget(_) => "invalid target",
            DispatchError::InvalidSuccessor(_) => "invalid successor",
            DispatchError::Reserved(_) => "reserved selector",
            DispatchError::UnroutableCall(_) => "unroutable call",
            DispatchError::MissingBackend(_) => "missing backend",
            DispatchError::CodeExists(_) => "code exists",
            DispatchError::NonPayable => "non-payable",
            DispatchError::InvalidSignature(_) => "invalid signature",
            DispatchError::Calldata(_) => "invalid calldata",
            DispatchError::Reverted(revert) => revert.reason(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DispatchError, Revert};
    use crate::{role::Role, selector::Selector};

    #[test]
    fn reasons_are_stable() {
        assert_eq!(
            DispatchError::NotAuthorized(Role::Moderator).reason(),
            "not moderator"
        );
        assert_eq!(DispatchError::NotAuthorized(Role::Admin).to_string(), "not admin");
        let sel = Selector::from_signature("initialize()");
        assert_eq!(DispatchError::UnroutableCall(sel).reason(), "unroutable call");
        assert_eq!(
            DispatchError::UnroutableCall(sel).to_string(),
            "unroutable call 0x8129fc1c"
        );
    }

    #[test]
    fn reverts_pass_through_unchanged() {
        let err = DispatchError::from(Revert::new("Amount must be greater than 0"));
        assert_eq!(err.reason(), "Amount must be greater than 0");
        assert_eq!(err.to_string(), "Amount must be greater than 0");
    }
}
