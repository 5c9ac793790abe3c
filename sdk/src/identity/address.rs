//! # Sultan Addresses
//!
//! An address is derived from an Ed25519 public key:
//!
//! ```text
//! public_key (32 bytes)
//!     -> SHA-256(public_key)       -> 32 bytes
//!     -> first 20 bytes             -> payload
//!     -> Bech32("sultan", payload)  -> sultan1…
//! ```
//!
//! Bech32 here is the original BIP-173 checksum, not Bech32m. The 8-to-5 bit
//! regrouping pads the final group with zero bits. All three choices (digest
//! truncation, padding rule, checksum variant) have to match the node's own
//! derivation or the account simply does not exist from its point of view.

use bech32::primitives::decode::CheckedHrpstring;
use bech32::{Bech32, Hrp};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::config::{ADDRESS_DIGEST_LENGTH, ADDRESS_HRP, PUBLIC_KEY_LENGTH};
use crate::crypto::hash::address_digest;
use crate::crypto::keys::{KeyError, SultanPublicKey};

const SULTAN_HRP: Hrp = Hrp::parse_unchecked(ADDRESS_HRP);

/// Errors from parsing or validating an address string.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressError {
    /// Not valid Bech32 (bad charset, mixed case, or checksum failure).
    #[error("bech32 decode error: {0}")]
    Bech32Decode(String),

    #[error("invalid HRP: expected '{expected}', got '{got}'")]
    InvalidHrp { expected: String, got: String },

    #[error("invalid address data length: expected {expected} bytes, got {got}")]
    InvalidDataLength { expected: usize, got: usize },
}

/// A Sultan account address (`sultan1…`).
///
/// The wrapped string is **not** validated by `From<&str>`/`From<String>` or
/// by `Deserialize`: node responses and caller-built intents carry addresses
/// as plain text and the SDK passes them through untouched. Use
/// [`Address::parse`] when the string comes from a user and must be checked.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    /// Parse and validate an address: Bech32 checksum, `sultan` HRP, and a
    /// 20-byte payload. The result is normalized to lowercase.
    ///
    /// ```
    /// use sultan_sdk::crypto::SultanKeypair;
    /// use sultan_sdk::identity::Address;
    ///
    /// let addr = SultanKeypair::generate().address();
    /// let parsed = Address::parse(&addr.as_str().to_uppercase()).unwrap();
    /// assert_eq!(parsed, addr);
    /// ```
    pub fn parse(s: &str) -> Result<Self, AddressError> {
        let payload = decode_payload(s)?;
        Ok(encode_payload(&payload))
    }

    /// Wrap a string without validation.
    pub fn from_unchecked(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Decode the 20-byte payload, validating the address on the way.
    pub fn payload(&self) -> Result<[u8; ADDRESS_DIGEST_LENGTH], AddressError> {
        decode_payload(&self.0)
    }

    pub fn is_valid(&self) -> bool {
        self.payload().is_ok()
    }

    /// `true` if this address is the one derived from `public_key`.
    pub fn matches_public_key(&self, public_key: &SultanPublicKey) -> bool {
        match self.payload() {
            Ok(payload) => payload == address_digest(public_key.as_bytes()),
            Err(_) => false,
        }
    }
}

/// Derive the address for a 32-byte Ed25519 public key.
///
/// Pure and deterministic: the same key always yields the same string.
pub fn derive_address(public_key: &[u8; PUBLIC_KEY_LENGTH]) -> Address {
    encode_payload(&address_digest(public_key))
}

/// [`derive_address`] for a key of unchecked length.
pub fn derive_address_from_slice(public_key: &[u8]) -> Result<Address, KeyError> {
    let bytes: [u8; PUBLIC_KEY_LENGTH] =
        public_key
            .try_into()
            .map_err(|_| KeyError::InvalidKeyLength {
                expected: PUBLIC_KEY_LENGTH,
                got: public_key.len(),
            })?;
    Ok(derive_address(&bytes))
}

fn encode_payload(payload: &[u8; ADDRESS_DIGEST_LENGTH]) -> Address {
    // 6 + 1 + 32 + 6 = 45 characters, far below the 90-character Bech32 limit.
    let encoded = bech32::encode::<Bech32>(SULTAN_HRP, payload)
        .expect("a 20-byte payload always fits in a bech32 string");
    Address(encoded)
}

fn decode_payload(s: &str) -> Result<[u8; ADDRESS_DIGEST_LENGTH], AddressError> {
    let checked = CheckedHrpstring::new::<Bech32>(s)
        .map_err(|e| AddressError::Bech32Decode(e.to_string()))?;

    if checked.hrp() != SULTAN_HRP {
        return Err(AddressError::InvalidHrp {
            expected: ADDRESS_HRP.to_string(),
            got: checked.hrp().to_string(),
        });
    }

    let data: Vec<u8> = checked.byte_iter().collect();
    data.as_slice()
        .try_into()
        .map_err(|_| AddressError::InvalidDataLength {
            expected: ADDRESS_DIGEST_LENGTH,
            got: data.len(),
        })
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.0)
    }
}

impl AsRef<str> for Address {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Address {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Address {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::str::FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
