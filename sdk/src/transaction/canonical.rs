//! The canonical signable encoding.
//!
//! ```text
//! {"amount":"<digits>","from":"…","memo":"…","nonce":N,"timestamp":N,"to":"…"}
//! ```
//!
//! Compact JSON, keys in lexicographic order, no whitespace, UTF-8. `amount`
//! is a decimal *string* here even though the submitted `tx.amount` is a
//! number. The node rebuilds this byte string from the submitted transaction
//! and verifies the signature against it, so every byte counts.
//!
//! Key order comes from the field declaration order of [`CanonicalSignable`]
//! (serde serializes struct fields in declaration order). Do not reorder the
//! fields.

use serde::{Deserialize, Serialize};

use super::builder::TransactionIntent;
use super::submission::SubmissionBody;
use super::verification::TransactionError;
use crate::identity::Address;

/// The exact field set covered by a transaction signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CanonicalSignable {
    pub amount: String,
    pub from: Address,
    pub memo: String,
    pub nonce: u64,
    pub timestamp: u64,
    pub to: Address,
}

impl CanonicalSignable {
    pub fn from_intent(intent: &TransactionIntent) -> Self {
        Self {
            amount: intent.amount_atomic().to_string(),
            from: intent.from().clone(),
            memo: intent.memo().to_string(),
            nonce: intent.nonce(),
            timestamp: intent.timestamp(),
            to: intent.to().clone(),
        }
    }

    /// The signable view of a submitted transaction, as the node derives it.
    pub fn from_body(body: &SubmissionBody) -> Self {
        Self {
            amount: body.amount.to_string(),
            from: body.from.clone(),
            memo: body.memo.clone(),
            nonce: body.nonce,
            timestamp: body.timestamp,
            to: body.to.clone(),
        }
    }

    /// Parse canonical bytes back into their fields.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TransactionError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// The amount as atomic units. Fails if the string is not plain digits.
    pub fn amount_atomic(&self) -> Result<u128, TransactionError> {
        if self.amount.is_empty() || !self.amount.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TransactionError::MalformedAmount(self.amount.clone()));
        }
        self.amount
            .parse()
            .map_err(|_| TransactionError::MalformedAmount(self.amount.clone()))
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        // Strings and integers only: serde_json cannot fail on this shape.
        serde_json::to_vec(self).expect("canonical signable always serializes")
    }
}

/// Canonical signable bytes for `intent`. Pure and total.
///
/// ```
/// use sultan_sdk::transaction::{canonicalize, TransactionBuilder};
///
/// let intent = TransactionBuilder::new()
///     .sender("sultan1abc...")
///     .receiver("sultan1def...")
///     .amount_atomic(5_000_000_000)
///     .memo("test")
///     .nonce(3)
///     .timestamp(1_700_000_000)
///     .build();
///
/// assert_eq!(
///     canonicalize(&intent),
///     br#"{"amount":"5000000000","from":"sultan1abc...","memo":"test","nonce":3,"timestamp":1700000000,"to":"sultan1def..."}"#
/// );
/// ```
pub fn canonicalize(intent: &TransactionIntent) -> Vec<u8> {
    CanonicalSignable::from_intent(intent).to_bytes()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
