//! Signature checks over submissions.
//!
//! [`verify_submission`] does what the node's verifier does: rebuild the
//! canonical bytes from the submitted `tx` object (amount number turned back
//! into a string), then check the Ed25519 signature against the embedded
//! public key. It also checks that `tx.from` is that key's address, which the
//! node enforces when it debits the account.

use thiserror::Error;

use super::canonical::CanonicalSignable;
use super::submission::SignedSubmission;
use crate::crypto::keys::{SultanPublicKey, SultanSignature};
use crate::crypto::signatures;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors from building or checking a signed transaction.
#[derive(Debug, Error)]
pub enum TransactionError {
    /// The signed canonical form and the submission disagree on a field.
    /// Submitting would be rejected by the node; nothing is sent.
    #[error("encoding mismatch on '{field}': signed {signed}, submitted {submitted}")]
    EncodingMismatch {
        field: &'static str,
        signed: String,
        submitted: String,
    },

    /// The signature is not 64 bytes of hex.
    #[error("malformed signature: {reason}")]
    MalformedSignature { reason: String },

    /// The public key is not 32 bytes of hex, or not a curve point.
    #[error("malformed public key: {reason}")]
    MalformedPublicKey { reason: String },

    /// The signature does not verify over the canonical bytes.
    #[error("invalid signature: does not verify against sender {sender}")]
    InvalidSignature { sender: String },

    /// `tx.from` is not the address derived from `public_key`.
    #[error("sender {sender} is not the address of public key {public_key}")]
    SenderMismatch { sender: String, public_key: String },

    /// The canonical `amount` is not a plain decimal integer.
    #[error("malformed canonical amount '{0}'")]
    MalformedAmount(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

// ---------------------------------------------------------------------------
// Verification
// ---------------------------------------------------------------------------

pub(crate) fn decode_signature(signature_hex: &str) -> Result<SultanSignature, TransactionError> {
    SultanSignature::from_hex(signature_hex).map_err(|e| TransactionError::MalformedSignature {
        reason: e.to_string(),
    })
}

pub(crate) fn decode_public_key(public_key_hex: &str) -> Result<SultanPublicKey, TransactionError> {
    SultanPublicKey::from_hex(public_key_hex).map_err(|e| TransactionError::MalformedPublicKey {
        reason: e.to_string(),
    })
}

/// Check `signature_hex` over `canonical` with `public_key_hex`.
///
/// `sender` only feeds the error message.
pub fn verify_canonical(
    canonical: &[u8],
    signature_hex: &str,
    public_key_hex: &str,
    sender: &str,
) -> Result<(), TransactionError> {
    let signature = decode_signature(signature_hex)?;
    let public_key = decode_public_key(public_key_hex)?;

    if !signatures::verify(&public_key, canonical, &signature) {
        return Err(TransactionError::InvalidSignature {
            sender: sender.to_string(),
        });
    }
    Ok(())
}

/// Verify a submission the way the network does.
///
/// Checks, cheapest first:
///
/// 1. `signature` and `public_key` decode to the right lengths.
/// 2. `tx.from` is the address of `public_key`.
/// 3. The signature verifies over the canonical form of `tx`.
pub fn verify_submission(submission: &SignedSubmission) -> Result<(), TransactionError> {
    let signature = decode_signature(&submission.signature)?;
    let public_key = decode_public_key(&submission.public_key)?;

    if !submission.tx.from.matches_public_key(&public_key) {
        return Err(TransactionError::SenderMismatch {
            sender: submission.tx.from.to_string(),
            public_key: public_key.to_hex(),
        });
    }

    let canonical = CanonicalSignable::from_body(&submission.tx).to_bytes();
    if !signatures::verify(&public_key, &canonical, &signature) {
        return Err(TransactionError::InvalidSignature {
            sender: submission.tx.from.to_string(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
