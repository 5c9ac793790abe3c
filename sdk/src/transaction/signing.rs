//! Transaction signing with Ed25519 keypairs, and assembly of the wire
//! submission.
//!
//! The signed bytes are [`canonicalize`] output. Ed25519 is deterministic, so
//! signing the same intent with the same key twice gives identical
//! signatures. A retry after a transport failure re-submits the same bytes.

use super::builder::TransactionIntent;
use super::canonical::{canonicalize, CanonicalSignable};
use super::submission::{SignedSubmission, SubmissionBody};
use super::types::SubmissionState;
use super::verification::{decode_public_key, decode_signature, TransactionError};
use crate::crypto::keys::SultanKeypair;
use crate::crypto::signatures;

/// Sign `intent`, returning `(signature_hex, public_key_hex)`.
///
/// Both strings are lowercase hex: 128 and 64 characters.
pub fn sign_intent(keypair: &SultanKeypair, intent: &TransactionIntent) -> (String, String) {
    let canonical = canonicalize(intent);
    let signature = signatures::sign(keypair, &canonical);
    (signature.to_hex(), keypair.public_key_hex())
}

/// Assemble the `POST /tx` payload for an intent and its signature.
///
/// `tx.amount` is emitted as a number. Only the signature records what was
/// signed, so it must verify over the canonical form the node will rebuild
/// from `tx`. If it does not, the signed form and the submission disagree and
/// the result is [`TransactionError::EncodingMismatch`] on `canonical`.
pub fn build_submission(
    intent: &TransactionIntent,
    signature_hex: &str,
    public_key_hex: &str,
) -> Result<SignedSubmission, TransactionError> {
    let signature = decode_signature(signature_hex)?;
    let public_key = decode_public_key(public_key_hex)?;

    let tx = SubmissionBody::from_intent(intent);
    let submitted = CanonicalSignable::from_body(&tx).to_bytes();
    if !signatures::verify(&public_key, &submitted, &signature) {
        return Err(TransactionError::EncodingMismatch {
            field: "canonical",
            signed: format!("bytes under signature {}", signature.to_hex()),
            submitted: String::from_utf8_lossy(&submitted).into_owned(),
        });
    }

    Ok(SignedSubmission {
        tx,
        signature: signature.to_hex(),
        public_key: public_key.to_hex(),
    })
}

/// Assemble the `POST /tx` payload from the exact bytes that were signed.
///
/// `signed_canonical` is parsed back and compared field by field with the
/// canonical form the node will rebuild from `tx`, including the numeric
/// amount after string conversion. The first disagreement is
/// [`TransactionError::EncodingMismatch`] and nothing is produced. The
/// signature must then verify over `signed_canonical`.
pub fn assemble_submission(
    signed_canonical: &[u8],
    tx: SubmissionBody,
    signature_hex: &str,
    public_key_hex: &str,
) -> Result<SignedSubmission, TransactionError> {
    let signature = decode_signature(signature_hex)?;
    let public_key = decode_public_key(public_key_hex)?;

    let signed = CanonicalSignable::from_bytes(signed_canonical)?;
    let submitted = CanonicalSignable::from_body(&tx);
    if let Some((field, signed_value, submitted_value)) = first_mismatch(&signed, &submitted) {
        return Err(TransactionError::EncodingMismatch {
            field,
            signed: signed_value,
            submitted: submitted_value,
        });
    }
    if signed.amount_atomic()? != tx.amount {
        return Err(TransactionError::EncodingMismatch {
            field: "amount",
            signed: signed.amount.clone(),
            submitted: tx.amount.to_string(),
        });
    }

    if !signatures::verify(&public_key, signed_canonical, &signature) {
        return Err(TransactionError::InvalidSignature {
            sender: tx.from.to_string(),
        });
    }

    Ok(SignedSubmission {
        tx,
        signature: signature.to_hex(),
        public_key: public_key.to_hex(),
    })
}

fn first_mismatch(
    signed: &CanonicalSignable,
    submitted: &CanonicalSignable,
) -> Option<(&'static str, String, String)> {
    if signed.amount != submitted.amount {
        return Some(("amount", signed.amount.clone(), submitted.amount.clone()));
    }
    if signed.from != submitted.from {
        return Some(("from", signed.from.to_string(), submitted.from.to_string()));
    }
    if signed.memo != submitted.memo {
        return Some(("memo", signed.memo.clone(), submitted.memo.clone()));
    }
    if signed.nonce != submitted.nonce {
        return Some(("nonce", signed.nonce.to_string(), submitted.nonce.to_string()));
    }
    if signed.timestamp != submitted.timestamp {
        return Some((
            "timestamp",
            signed.timestamp.to_string(),
            submitted.timestamp.to_string(),
        ));
    }
    if signed.to != submitted.to {
        return Some(("to", signed.to.to_string(), submitted.to.to_string()));
    }
    None
}

// ---------------------------------------------------------------------------
// SignedTransaction
// ---------------------------------------------------------------------------

/// An intent together with its signature. The `Signed` lifecycle state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    intent: TransactionIntent,
    canonical: Vec<u8>,
    signature: String,
    public_key: String,
}

impl SignedTransaction {
    pub fn intent(&self) -> &TransactionIntent {
        &self.intent
    }

    pub fn signature_hex(&self) -> &str {
        &self.signature
    }

    pub fn public_key_hex(&self) -> &str {
        &self.public_key
    }

    /// The bytes the signature covers.
    pub fn canonical_bytes(&self) -> &[u8] {
        &self.canonical
    }

    pub fn state(&self) -> SubmissionState {
        SubmissionState::Signed
    }

    /// Build the wire payload, checked against the signed bytes. See
    /// [`assemble_submission`].
    pub fn into_submission(self) -> Result<SignedSubmission, TransactionError> {
        let tx = SubmissionBody::from_intent(&self.intent);
        assemble_submission(&self.canonical, tx, &self.signature, &self.public_key)
    }
}

/// Sign an intent, consuming it.
///
/// # Example
///
/// ```rust
/// use sultan_sdk::crypto::SultanKeypair;
/// use sultan_sdk::transaction::{sign_transaction, TransactionBuilder};
///
/// let keypair = SultanKeypair::generate();
/// let intent = TransactionBuilder::new()
///     .sender(keypair.address())
///     .receiver("sultan1def...")
///     .amount_atomic(1_000)
///     .nonce(1)
///     .build();
///
/// let signed = sign_transaction(&keypair, intent);
/// assert_eq!(signed.signature_hex().len(), 128);
/// ```
pub fn sign_transaction(keypair: &SultanKeypair, intent: TransactionIntent) -> SignedTransaction {
    let canonical = canonicalize(&intent);
    let signature = signatures::sign(keypair, &canonical);
    SignedTransaction {
        intent,
        canonical,
        signature: signature.to_hex(),
        public_key: keypair.public_key_hex(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
