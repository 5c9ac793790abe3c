//! # Digital Signatures
//!
//! Ed25519 signing and verification entry points. The network checks every
//! submitted transaction with exactly this algorithm over exactly the
//! canonical bytes, so these functions are the single place where signing
//! happens in the SDK.

use ed25519_dalek::{Signature as DalekSignature, Verifier, VerifyingKey};
use thiserror::Error;

use super::keys::{SultanKeypair, SultanPublicKey, SultanSignature};
use crate::config::{PUBLIC_KEY_LENGTH, SIGNATURE_LENGTH};

/// Errors during signature verification.
///
/// Intentionally vague about why verification failed.
#[derive(Debug, Error)]
pub enum SignatureError {
    #[error("signature verification failed")]
    VerificationFailed,

    #[error("invalid public key")]
    InvalidPublicKey,
}

/// Sign `message` with `keypair`.
///
/// ```
/// use sultan_sdk::crypto::{sign, verify, SultanKeypair};
///
/// let keypair = SultanKeypair::generate();
/// let signature = sign(&keypair, b"canonical bytes");
/// assert!(verify(&keypair.public_key(), b"canonical bytes", &signature));
/// ```
pub fn sign(keypair: &SultanKeypair, message: &[u8]) -> SultanSignature {
    keypair.sign(message)
}

/// `true` if `signature` over `message` verifies against `public_key`.
pub fn verify(public_key: &SultanPublicKey, message: &[u8], signature: &SultanSignature) -> bool {
    public_key.verify(message, signature)
}

/// Verify using raw byte components, e.g. after decoding hex off the wire.
pub fn verify_raw(
    public_key_bytes: &[u8; PUBLIC_KEY_LENGTH],
    message: &[u8],
    signature_bytes: &[u8; SIGNATURE_LENGTH],
) -> Result<(), SignatureError> {
    let verifying_key =
        VerifyingKey::from_bytes(public_key_bytes).map_err(|_| SignatureError::InvalidPublicKey)?;
    let signature = DalekSignature::from_bytes(signature_bytes);

    verifying_key
        .verify(message, &signature)
        .map_err(|_| SignatureError::VerificationFailed)
}
