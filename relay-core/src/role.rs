//! Governance roles.

use std::fmt;

/// One of the two singleton role slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Meta-governance. Can only hand itself to a successor.
    Admin,
    /// Operational control of routing entries.
    Moderator,
}

impl Role {
    /// Lower-case role name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Moderator => "moderator",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
