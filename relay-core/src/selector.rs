//! Lookup keys derived from operation signatures.
//!
//! A selector is the first four bytes of `keccak256(signature)`, where the
//! signature is the canonical text `name(type,type,...)` with no whitespace.
//! Callers, management tooling and the `selector!` macro all derive keys the
//! same way, so a route registered off-path matches the calls made on-path.

use crate::primitives::{ParseHexError, Word, decode_fixed, keccak256};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// A 4-byte function identifier.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Selector([u8; 4]);

impl Selector {
    /// Wrap raw bytes.
    pub const fn from_bytes(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }

    /// Hash a signature without checking that it is canonical.
    pub fn from_signature(signature: &str) -> Self {
        let digest = keccak256(signature.as_bytes());
        Self([digest[0], digest[1], digest[2], digest[3]])
    }

    /// Validate `signature` and hash it.
    pub fn parse_signature(signature: &str) -> Result<Self, SignatureError> {
        validate_signature(signature)?;
        Ok(Self::from_signature(signature))
    }

    /// Read an ABI `bytes4` argument (left-aligned in its word).
    pub fn from_word(word: &Word) -> Option<Self> {
        let bytes = word.as_bytes();
        if bytes[4..].iter().any(|b| *b != 0) {
            return None;
        }
        Some(Self([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }
}

impl From<Selector> for Word {
    fn from(selector: Selector) -> Self {
        let mut out = [0u8; 32];
        out[..4].copy_from_slice(&selector.0);
        Word::new(out)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Selector({self})")
    }
}

impl FromStr for Selector {
    type Err = ParseHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_fixed(s).map(Self)
    }
}

/// Reasons a signature is not in canonical form.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SignatureError {
    /// The function name is empty or not an identifier.
    #[error("invalid function name in `{0}`")]
    Name(String),

    /// The parameter list is not enclosed in a single pair of parentheses.
    #[error("malformed parameter list in `{0}`")]
    Parameters(String),

    /// Whitespace is not allowed anywhere in a canonical signature.
    #[error("whitespace in signature `{0}`")]
    Whitespace(String),

    /// A parameter type is empty or contains unexpected characters.
    #[error("invalid parameter type `{ty}` in `{signature}`")]
    Type {
        /// The offending type.
        ty: String,
        /// The whole signature.
        signature: String,
    },
}

/// Check that `signature` looks like `name(type,type,...)`.
///
/// Tuple types are accepted as long as their parentheses balance; the type
/// names themselves are not checked against the ABI type list.
pub fn validate_signature(signature: &str) -> Result<(), SignatureError> {
    if signature.chars().any(char::is_whitespace) {
        return Err(SignatureError::Whitespace(signature.to_owned()));
    }

    let (name, rest) = signature
        .split_once('(')
        .ok_or_else(|| SignatureError::Parameters(signature.to_owned()))?;

    let mut chars = name.chars();
    let valid_name = match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        }
        _ => false,
    };
    if !valid_name {
        return Err(SignatureError::Name(signature.to_owned()));
    }

    let params = rest
        .strip_suffix(')')
        .ok_or_else(|| SignatureError::Parameters(signature.to_owned()))?;
    if params.is_empty() {
        return Ok(());
    }

    for ty in split_top_level(params).ok_or_else(|| SignatureError::Parameters(signature.to_owned()))? {
        let valid = !ty.is_empty()
            && ty
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '[' | ']' | '(' | ')' | ','));
        if !valid {
            return Err(SignatureError::Type {
                ty: ty.to_owned(),
                signature: signature.to_owned(),
            });
        }
    }
    Ok(())
}

// Split on commas that are not inside a tuple. `None` when parentheses do not balance.
fn split_top_level(params: &str) -> Option<Vec<&str>> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in params.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.checked_sub(1)?,
            ',' if depth == 0 => {
                parts.push(&params[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return None;
    }
    parts.push(&params[start..]);
    Some(parts)
}

#[cfg(test)]
mod tests {
    use super::{Selector, SignatureError, validate_signature};
    use crate::primitives::Word;

    #[test]
    fn known_selectors() {
        // Values as produced by `keccak256(toUtf8Bytes(sig)).slice(0, 10)`.
        let cases = [
            ("initialize()", "0x8129fc1c"),
            ("owner()", "0x8da5cb5b"),
            ("balanceOf(address)", "0x70a08231"),
            ("transfer(address,uint256)", "0xa9059cbb"),
            ("stake(uint256)", "0xa694fc3a"),
        ];
        for (sig, expected) in cases {
            assert_eq!(Selector::from_signature(sig).to_string(), expected, "{sig}");
        }
    }

    #[test]
    fn parse_round_trips_display() {
        let sel = Selector::from_signature("mintToken(uint256)");
        assert_eq!(sel.to_string().parse::<Selector>().unwrap(), sel);
    }

    #[test]
    fn bytes4_word_is_left_aligned() {
        let sel = Selector::from_bytes([0xde, 0xad, 0xbe, 0xef]);
        let word = Word::from(sel);
        assert_eq!(&word.as_bytes()[..4], &[0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(Selector::from_word(&word), Some(sel));
        assert_eq!(Selector::from_word(&Word::from(1u128)), None);
    }

    #[test]
    fn rejects_non_canonical_signatures() {
        assert!(validate_signature("transfer(address,uint256)").is_ok());
        assert!(validate_signature("submit((uint256,address),bytes32[])").is_ok());
        assert!(matches!(
            validate_signature("transfer(address, uint256)"),
            Err(SignatureError::Whitespace(_))
        ));
        assert!(matches!(
            validate_signature("1bad()"),
            Err(SignatureError::Name(_))
        ));
        assert!(matches!(
            validate_signature("missing"),
            Err(SignatureError::Parameters(_))
        ));
        assert!(matches!(
            validate_signature("f(uint256,)"),
            Err(SignatureError::Type { .. })
        ));
        assert!(matches!(
            validate_signature("f((uint256)"),
            Err(SignatureError::Parameters(_))
        ));
    }
}
