//! Records of committed state transitions.

use crate::{
    primitives::{Address, Word},
    role::Role,
    selector::Selector,
};
use std::fmt;

/// A log raised by backend code during a forwarded call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendLog {
    /// The dispatcher the log is published from.
    pub emitter: Address,
    /// The backend that raised it.
    pub code_address: Address,
    /// Event name, e.g. `Staked`.
    pub name: String,
    /// Event arguments.
    pub args: Vec<Word>,
}

/// A committed mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A routing entry was inserted.
    EntryAdded {
        /// Lookup key.
        selector: Selector,
        /// Backend address.
        target: Address,
    },
    /// A routing entry now points somewhere else.
    EntryUpdated {
        /// Lookup key.
        selector: Selector,
        /// New backend address.
        target: Address,
    },
    /// A routing entry was deleted.
    EntryRemoved {
        /// Lookup key.
        selector: Selector,
    },
    /// The Admin role changed hands.
    AdminChanged {
        /// Previous holder.
        old: Address,
        /// New holder.
        new: Address,
    },
    /// The Moderator role changed hands.
    ModeratorChanged {
        /// Previous holder.
        old: Address,
        /// New holder.
        new: Address,
    },
    /// A forwarded backend raised a log.
    Backend(BackendLog),
}

impl Event {
    /// The role-changed event for `role`.
    pub fn role_changed(role: Role, old: Address, new: Address) -> Self {
        match role {
            Role::Admin => Event::AdminChanged { old, new },
            Role::Moderator => Event::ModeratorChanged { old, new },
        }
    }

    /// The event name as external observers know it.
    pub fn name(&self) -> &str {
        match self {
            Event::EntryAdded { .. } => "EntryAdded",
            Event::EntryUpdated { .. } => "EntryUpdated",
            Event::EntryRemoved { .. } => "EntryRemoved",
            Event::AdminChanged { .. } => "AdminChanged",
            Event::ModeratorChanged { .. } => "ModeratorChanged",
            Event::Backend(log) => &log.name,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::EntryAdded { selector, target } | Event::EntryUpdated { selector, target } => {
                write!(f, "{}({selector}, {target})", self.name())
            }
            Event::EntryRemoved { selector } => write!(f, "EntryRemoved({selector})"),
            Event::AdminChanged { old, new } | Event::ModeratorChanged { old, new } => {
                write!(f, "{}({old}, {new})", self.name())
            }
            Event::Backend(log) => {
                write!(f, "{}(", log.name)?;
                for (i, arg) in log.args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg:?}")?;
                }
                f.write_str(")")
            }
        }
    }
}

/// An event with its position in the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Zero-based commit order.
    pub sequence: u64,
    /// What happened.
    pub event: Event,
}
