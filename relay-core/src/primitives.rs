//! Fixed-width primitive values shared by the dispatcher and its backends.
//!
//! - [`Address`] - 20-byte identity of callers, backends and the dispatcher
//! - [`Word`] - 32-byte big-endian value, the unit of calldata and storage
//! - [`keccak256`] - the hash used for selectors, storage slots and addresses

use sha3::{Digest, Keccak256};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// Keccak-256 digest of `data`.
pub fn keccak256(data: impl AsRef<[u8]>) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(data.as_ref());
    hasher.finalize().into()
}

/// Errors produced when parsing hex-encoded primitives.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseHexError {
    /// The input was not valid hex.
    #[error("invalid hex: {0}")]
    Hex(#[from] hex::FromHexError),

    /// The decoded value had the wrong width.
    #[error("expected {expected} bytes, got {actual}")]
    Length {
        /// Expected byte length.
        expected: usize,
        /// Decoded byte length.
        actual: usize,
    },
}

pub(crate) fn decode_fixed<const N: usize>(s: &str) -> Result<[u8; N], ParseHexError> {
    let raw = s.strip_prefix("0x").unwrap_or(s);
    let bytes = hex::decode(raw)?;
    bytes
        .as_slice()
        .try_into()
        .map_err(|_| ParseHexError::Length {
            expected: N,
            actual: bytes.len(),
        })
}

/// A 20-byte identity.
///
/// [`Address::ZERO`] is the null identity: it never holds a role and is never
/// a valid routing target.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Address([u8; 20]);

impl Address {
    /// The null identity.
    pub const ZERO: Self = Self([0; 20]);

    /// Wrap raw bytes.
    pub const fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// An address with every byte set to `byte`. Handy for fixtures.
    pub const fn repeat_byte(byte: u8) -> Self {
        Self([byte; 20])
    }

    /// Derive the address of code created by `creator` at `nonce`.
    ///
    /// The last 20 bytes of `keccak256(creator ++ nonce_be)`.
    pub fn derive(creator: Address, nonce: u64) -> Self {
        let mut preimage = [0u8; 28];
        preimage[..20].copy_from_slice(&creator.0);
        preimage[20..].copy_from_slice(&nonce.to_be_bytes());
        let digest = keccak256(preimage);
        let mut out = [0u8; 20];
        out.copy_from_slice(&digest[12..]);
        Self(out)
    }

    /// Whether this is the null identity.
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// Raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({self})")
    }
}

impl FromStr for Address {
    type Err = ParseHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_fixed(s).map(Self)
    }
}

impl From<[u8; 20]> for Address {
    fn from(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }
}

/// A 32-byte big-endian value.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Word([u8; 32]);

impl Word {
    /// All zero bits. Unwritten storage reads as this value.
    pub const ZERO: Self = Self([0; 32]);

    /// Wrap raw bytes.
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Whether every bit is zero.
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// Interpret as an unsigned integer.
    ///
    /// Returns `None` when the value does not fit in 128 bits.
    pub fn to_u128(&self) -> Option<u128> {
        if self.0[..16].iter().any(|b| *b != 0) {
            return None;
        }
        let mut low = [0u8; 16];
        low.copy_from_slice(&self.0[16..]);
        Some(u128::from_be_bytes(low))
    }

    /// Interpret the low 20 bytes as an address.
    ///
    /// Returns `None` when the high 12 bytes are not clean.
    pub fn to_address(&self) -> Option<Address> {
        if self.0[..12].iter().any(|b| *b != 0) {
            return None;
        }
        let mut out = [0u8; 20];
        out.copy_from_slice(&self.0[12..]);
        Some(Address(out))
    }

    /// Interpret as a boolean (`0` or `1`).
    pub fn to_bool(&self) -> Option<bool> {
        match self.to_u128()? {
            0 => Some(false),
            1 => Some(true),
            _ => None,
        }
    }
}

impl From<u128> for Word {
    fn from(value: u128) -> Self {
        let mut out = [0u8; 32];
        out[16..].copy_from_slice(&value.to_be_bytes());
        Self(out)
    }
}

impl From<u64> for Word {
    fn from(value: u64) -> Self {
        Self::from(u128::from(value))
    }
}

impl From<Address> for Word {
    fn from(address: Address) -> Self {
        let mut out = [0u8; 32];
        out[12..].copy_from_slice(&address.0);
        Self(out)
    }
}

impl From<bool> for Word {
    fn from(value: bool) -> Self {
        Self::from(u128::from(value))
    }
}

impl From<[u8; 32]> for Word {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_u128() {
            Some(n) => write!(f, "Word({n})"),
            None => write!(f, "Word({self})"),
        }
    }
}
