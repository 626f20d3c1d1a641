//! Admin and Moderator role slots.
//!
//! The Admin may only hand the Admin role to a successor. The Moderator
//! controls routing entries and may hand the Moderator role to a successor.
//! Neither slot is ever empty.

use relay_core::{Address, DispatchError, Role};

/// The two singleton role holders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Governance {
    admin: Address,
    moderator: Address,
}

impl Governance {
    /// Seat both roles. Fails if either holder is the null identity.
    pub fn new(admin: Address, moderator: Address) -> Result<Self, DispatchError> {
        if admin.is_zero() {
            return Err(DispatchError::InvalidSuccessor(Role::Admin));
        }
        if moderator.is_zero() {
            return Err(DispatchError::InvalidSuccessor(Role::Moderator));
        }
        Ok(Self { admin, moderator })
    }

    /// Current holder of `role`.
    pub fn holder(&self, role: Role) -> Address {
        match role {
            Role::Admin => self.admin,
            Role::Moderator => self.moderator,
        }
    }

    /// Current Admin.
    pub fn admin(&self) -> Address {
        self.admin
    }

    /// Current Moderator.
    pub fn moderator(&self) -> Address {
        self.moderator
    }

    /// Fail with `NotAuthorized(role)` unless `caller` holds `role`.
    pub fn ensure(&self, role: Role, caller: Address) -> Result<(), DispatchError> {
        if self.holder(role) == caller {
            Ok(())
        } else {
            Err(DispatchError::NotAuthorized(role))
        }
    }

    /// Hand `role` from `caller` to `successor`.
    ///
    /// Authorization is checked first, then the successor. Returns
    /// `(old, new)`. Naming oneself as successor is allowed.
    pub fn transfer(
        &mut self,
        role: Role,
        caller: Address,
        successor: Address,
    ) -> Result<(Address, Address), DispatchError> {
        self.ensure(role, caller)?;
        if successor.is_zero() {
            return Err(DispatchError::InvalidSuccessor(role));
        }
        let slot = match role {
            Role::Admin => &mut self.admin,
            Role::Moderator => &mut self.moderator,
        };
        let old = std::mem::replace(slot, successor);
        Ok((old, successor))
    }
}
