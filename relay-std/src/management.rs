//! The dispatcher's own management surface.
//!
//! These operations are handled by the dispatcher itself and are never
//! forwarded. Their selectors are reserved: a routing entry for one of them
//! could never be reached.

use relay_core::{Address, Calldata, CalldataError, Selector};
use std::sync::LazyLock;

/// Canonical signatures of every management operation.
pub const MANAGEMENT_SIGNATURES: [&str; 8] = [
    "addEntry(bytes4,address)",
    "updateEntry(bytes4,address)",
    "removeEntry(bytes4)",
    "renounceAdmin(address)",
    "renounceModerator(address)",
    "resolve(bytes4)",
    "admin()",
    "moderator()",
];

static MANAGEMENT_SELECTORS: LazyLock<[Selector; 8]> =
    LazyLock::new(|| MANAGEMENT_SIGNATURES.map(Selector::from_signature));

/// Whether `selector` belongs to the management surface.
pub fn is_reserved(selector: Selector) -> bool {
    MANAGEMENT_SELECTORS.contains(&selector)
}

/// A decoded management operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Management {
    /// `addEntry(bytes4,address)`
    AddEntry {
        /// Lookup key.
        selector: Selector,
        /// Backend address.
        target: Address,
    },
    /// `updateEntry(bytes4,address)`
    UpdateEntry {
        /// Lookup key.
        selector: Selector,
        /// New backend address.
        target: Address,
    },
    /// `removeEntry(bytes4)`
    RemoveEntry {
        /// Lookup key.
        selector: Selector,
    },
    /// `renounceAdmin(address)`
    RenounceAdmin {
        /// Next Admin.
        successor: Address,
    },
    /// `renounceModerator(address)`
    RenounceModerator {
        /// Next Moderator.
        successor: Address,
    },
    /// `resolve(bytes4)`
    Resolve {
        /// Lookup key.
        selector: Selector,
    },
    /// `admin()`
    Admin,
    /// `moderator()`
    Moderator,
}

impl Management {
    /// Decode `data` if it targets a management operation.
    ///
    /// Returns `Ok(None)` for selectors outside the management surface.
    pub fn decode(data: &Calldata) -> Result<Option<Self>, CalldataError> {
        let Some(index) = MANAGEMENT_SELECTORS
            .iter()
            .position(|s| *s == data.selector())
        else {
            return Ok(None);
        };

        let op = match index {
            0 => Management::AddEntry {
                selector: data.selector_arg(0)?,
                target: data.address(1)?,
            },
            1 => Management::UpdateEntry {
                selector: data.selector_arg(0)?,
                target: data.address(1)?,
            },
            2 => Management::RemoveEntry {
                selector: data.selector_arg(0)?,
            },
            3 => Management::RenounceAdmin {
                successor: data.address(0)?,
            },
            4 => Management::RenounceModerator {
                successor: data.address(0)?,
            },
            5 => Management::Resolve {
                selector: data.selector_arg(0)?,
            },
            6 => Management::Admin,
            _ => Management::Moderator,
        };
        Ok(Some(op))
    }

    /// Encode as calldata, the way external tooling would.
    pub fn encode(&self) -> Calldata {
        let index = match self {
            Management::AddEntry { .. } => 0,
            Management::UpdateEntry { .. } => 1,
            Management::RemoveEntry { .. } => 2,
            Management::RenounceAdmin { .. } => 3,
            Management::RenounceModerator { .. } => 4,
            Management::Resolve { .. } => 5,
            Management::Admin => 6,
            Management::Moderator => 7,
        };
        let data = Calldata::new(MANAGEMENT_SELECTORS[index]);
        match *self {
            Management::AddEntry { selector, target }
            | Management::UpdateEntry { selector, target } => data.arg(selector).arg(target),
            Management::RemoveEntry { selector } | Management::Resolve { selector } => {
                data.arg(selector)
            }
            Management::RenounceAdmin { successor }
            | Management::RenounceModerator { successor } => data.arg(successor),
            Management::Admin | Management::Moderator => data,
        }
    }
}
