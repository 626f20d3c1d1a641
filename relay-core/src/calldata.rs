//! Inbound calls and their encoded payloads.
//!
//! Calldata is the selector followed by one 32-byte word per argument, the
//! static-type subset of the ABI encoding. A [`Call`] wraps calldata with the
//! caller identity and the attached value; it is never stored.

use crate::{
    primitives::{Address, Word},
    selector::Selector,
};
use thiserror::Error;

/// Errors decoding calldata or reading its arguments.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalldataError {
    /// Fewer than four bytes: no selector.
    #[error("calldata too short: {0} bytes")]
    TooShort(usize),

    /// The argument section is not a whole number of words.
    #[error("calldata arguments are not word aligned: {0} bytes")]
    Misaligned(usize),

    /// An argument index past the end of the payload.
    #[error("missing argument {0}")]
    MissingArgument(usize),

    /// An argument whose word does not hold the expected type.
    #[error("argument {index} is not a valid {expected}")]
    InvalidArgument {
        /// Argument position.
        index: usize,
        /// Expected ABI type name.
        expected: &'static str,
    },
}

/// The selector plus its argument words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Calldata {
    selector: Selector,
    args: Vec<Word>,
}

impl Calldata {
    /// Calldata with no arguments.
    pub fn new(selector: Selector) -> Self {
        Self {
            selector,
            args: Vec::new(),
        }
    }

    /// Calldata for a signature, hashed with [`Selector::from_signature`].
    pub fn for_signature(signature: &str) -> Self {
        Self::new(Selector::from_signature(signature))
    }

    /// Append an argument.
    pub fn arg(mut self, value: impl Into<Word>) -> Self {
        self.args.push(value.into());
        self
    }

    /// The lookup key.
    pub fn selector(&self) -> Selector {
        self.selector
    }

    /// All argument words.
    pub fn args(&self) -> &[Word] {
        &self.args
    }

    /// The raw word at `index`.
    pub fn word(&self, index: usize) -> Result<Word, CalldataError> {
        self.args
            .get(index)
            .copied()
            .ok_or(CalldataError::MissingArgument(index))
    }

    /// Argument `index` as a `uint` that fits in 128 bits.
    pub fn uint(&self, index: usize) -> Result<u128, CalldataError> {
        self.word(index)?
            .to_u128()
            .ok_or(CalldataError::InvalidArgument {
                index,
                expected: "uint128",
            })
    }

    /// Argument `index` as an `address`.
    pub fn address(&self, index: usize) -> Result<Address, CalldataError> {
        self.word(index)?
            .to_address()
            .ok_or(CalldataError::InvalidArgument {
                index,
                expected: "address",
            })
    }

    /// Argument `index` as a `bytes4`.
    pub fn selector_arg(&self, index: usize) -> Result<Selector, CalldataError> {
        Selector::from_word(&self.word(index)?).ok_or(CalldataError::InvalidArgument {
            index,
            expected: "bytes4",
        })
    }

    /// Encode as `selector ++ args`.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(4 + 32 * self.args.len());
        out.extend_from_slice(self.selector.as_bytes());
        for word in &self.args {
            out.extend_from_slice(word.as_bytes());
        }
        out
    }

    /// Decode raw bytes produced by [`Calldata::encode`] or an external encoder.
    pub fn decode(bytes: &[u8]) -> Result<Self, CalldataError> {
        let (head, tail) = bytes
            .split_first_chunk::<4>()
            .ok_or(CalldataError::TooShort(bytes.len()))?;
        if tail.len() % 32 != 0 {
            return Err(CalldataError::Misaligned(tail.len()));
        }
        let args = tail
            .chunks_exact(32)
            .map(|chunk| {
                let mut word = [0u8; 32];
                word.copy_from_slice(chunk);
                Word::new(word)
            })
            .collect();
        Ok(Self {
            selector: Selector::from_bytes(*head),
            args,
        })
    }
}

/// An inbound invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    /// The identity that made the call.
    pub caller: Address,
    /// Selector and arguments.
    pub data: Calldata,
    /// Value transferred with the call.
    pub value: u128,
}

impl Call {
    /// A call from `caller` with no value attached.
    pub fn new(caller: Address, data: Calldata) -> Self {
        Self {
            caller,
            data,
            value: 0,
        }
    }

    /// Shorthand for `Call::new(caller, Calldata::for_signature(signature))`.
    pub fn signature(caller: Address, signature: &str) -> Self {
        Self::new(caller, Calldata::for_signature(signature))
    }

    /// Append an argument.
    pub fn arg(mut self, value: impl Into<Word>) -> Self {
        self.data = self.data.arg(value);
        self
    }

    /// Attach value.
    pub fn with_value(mut self, value: u128) -> Self {
        self.value = value;
        self
    }

    /// The lookup key.
    pub fn selector(&self) -> Selector {
        self.data.selector()
    }
}

/// Words returned by a call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Output(Vec<Word>);

impl Output {
    /// No return data.
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// A single returned word.
    pub fn word(value: impl Into<Word>) -> Self {
        Self(vec![value.into()])
    }

    /// All returned words.
    pub fn words(&self) -> &[Word] {
        &self.0
    }

    /// Whether nothing was returned.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The first word as a `uint`.
    pub fn as_u128(&self) -> Option<u128> {
        self.0.first()?.to_u128()
    }

    /// The first word as an `address`.
    pub fn as_address(&self) -> Option<Address> {
        self.0.first()?.to_address()
    }
}

impl From<Vec<Word>> for Output {
    fn from(words: Vec<Word>) -> Self {
        Self(words)
    }
}
