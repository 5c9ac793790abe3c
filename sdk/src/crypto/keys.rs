//! # Key Management
//!
//! Ed25519 keypairs for Sultan accounts.
//!
//! A keypair is 32 bytes of secret seed and the 32-byte public key derived
//! from it. The public key is never stored separately from the secret, so the
//! two cannot drift apart: it is recomputed by ed25519-dalek on demand.
//!
//! ## Security considerations
//!
//! - Secret keys are zeroized on drop (ed25519-dalek's `zeroize` feature).
//! - Key generation uses `OsRng`. An entropy failure is not something we can
//!   retry around, so [`SultanKeypair::generate`] panics on it;
//!   [`SultanKeypair::try_generate`] reports it instead.
//! - Secret bytes never appear in `Debug` output or log lines.

use ed25519_dalek::{Signature as DalekSignature, Signer, SigningKey, Verifier, VerifyingKey};
use rand::rngs::OsRng;
use rand_core::RngCore;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use thiserror::Error;

use crate::config::{PUBLIC_KEY_LENGTH, SECRET_KEY_LENGTH, SIGNATURE_LENGTH};
use crate::identity::address::{derive_address, Address};

/// Errors that can occur during key operations.
///
/// Deliberately silent about the key bytes themselves.
#[derive(Debug, Error)]
pub enum KeyError {
    #[error("invalid key length: expected {expected} bytes, got {got}")]
    InvalidKeyLength { expected: usize, got: usize },

    #[error("invalid hex encoding for key material")]
    InvalidHex,

    #[error("invalid public key bytes: not a valid Ed25519 point")]
    InvalidPublicKey,

    #[error("operating system entropy source failed: {0}")]
    EntropyUnavailable(String),
}

/// A Sultan account keypair wrapping an Ed25519 signing key.
///
/// `SultanKeypair` intentionally does NOT implement `Serialize`. Exporting a
/// secret should be a deliberate call to [`secret_key_hex`](Self::secret_key_hex),
/// not a side effect of serializing some struct that happens to hold one.
///
/// # Examples
///
/// ```
/// use sultan_sdk::crypto::SultanKeypair;
///
/// let kp = SultanKeypair::generate();
/// let sig = kp.sign(b"hello sultan");
/// assert!(kp.verify(b"hello sultan", &sig));
/// assert!(kp.address().as_str().starts_with("sultan1"));
/// ```
pub struct SultanKeypair {
    signing_key: SigningKey,
}

/// The public half of a keypair. Safe to share and log.
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SultanPublicKey {
    bytes: [u8; PUBLIC_KEY_LENGTH],
}

/// A 64-byte Ed25519 signature.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct SultanSignature {
    bytes: [u8; SIGNATURE_LENGTH],
}

impl SultanKeypair {
    /// Generate a fresh keypair from the OS RNG.
    ///
    /// # Panics
    ///
    /// If the operating system cannot supply entropy.
    pub fn generate() -> Self {
        let signing_key = SigningKey::generate(&mut OsRng);
        Self { signing_key }
    }

    /// Generate a fresh keypair, reporting entropy failure as an error.
    pub fn try_generate() -> Result<Self, KeyError> {
        let mut seed = [0u8; SECRET_KEY_LENGTH];
        OsRng
            .try_fill_bytes(&mut seed)
            .map_err(|e| KeyError::EntropyUnavailable(e.to_string()))?;
        let keypair = Self::from_seed(&seed);
        seed.fill(0);
        Ok(keypair)
    }

    /// Construct a keypair deterministically from a 32-byte seed.
    ///
    /// In Ed25519 the 32-byte secret key *is* the seed.
    pub fn from_seed(seed: &[u8; SECRET_KEY_LENGTH]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(seed),
        }
    }

    /// Reconstruct a keypair from raw secret bytes of unchecked length.
    pub fn from_secret(secret: &[u8]) -> Result<Self, KeyError> {
        let seed: [u8; SECRET_KEY_LENGTH] =
            secret.try_into().map_err(|_| KeyError::InvalidKeyLength {
                expected: SECRET_KEY_LENGTH,
                got: secret.len(),
            })?;
        Ok(Self::from_seed(&seed))
    }

    /// Reconstruct a keypair from a hex-encoded secret key.
    ///
    /// An optional `0x` prefix and surrounding whitespace are tolerated since
    /// keys are usually pasted from somewhere.
    pub fn from_hex(hex_str: &str) -> Result<Self, KeyError> {
        let trimmed = hex_str.trim();
        let trimmed = trimmed.strip_prefix("0x").unwrap_or(trimmed);
        let bytes = hex::decode(trimmed).map_err(|_| KeyError::InvalidHex)?;
        Self::from_secret(&bytes)
    }

    pub fn public_key(&self) -> SultanPublicKey {
        SultanPublicKey {
            bytes: self.signing_key.verifying_key().to_bytes(),
        }
    }

    pub fn public_key_bytes(&self) -> [u8; PUBLIC_KEY_LENGTH] {
        self.signing_key.verifying_key().to_bytes()
    }

    /// Lowercase hex of the public key, 64 characters.
    pub fn public_key_hex(&self) -> String {
        hex::encode(self.public_key_bytes())
    }

    /// The `sultan1…` address owned by this keypair.
    pub fn address(&self) -> Address {
        derive_address(&self.public_key_bytes())
    }

    /// Sign a message. Deterministic for a given (key, message) pair.
    pub fn sign(&self, message: &[u8]) -> SultanSignature {
        SultanSignature {
            bytes: self.signing_key.sign(message).to_bytes(),
        }
    }

    pub fn verify(&self, message: &[u8], signature: &SultanSignature) -> bool {
        self.public_key().verify(message, signature)
    }

    /// Export the raw secret key.
    ///
    /// **Handle with care.** Whoever holds these 32 bytes owns the account.
    pub fn secret_key_bytes(&self) -> [u8; SECRET_KEY_LENGTH] {
        self.signing_key.to_bytes()
    }

    /// Export the secret key as lowercase hex.
    pub fn secret_key_hex(&self) -> String {
        hex::encode(self.secret_key_bytes())
    }
}

impl Clone for SultanKeypair {
    fn clone(&self) -> Self {
        Self::from_seed(&self.signing_key.to_bytes())
    }
}

impl fmt::Debug for SultanKeypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Public half only. Never the seed, not even a prefix of it.
        write!(f, "SultanKeypair(pub={})", self.public_key_hex())
    }
}

impl PartialEq for SultanKeypair {
    fn eq(&self, other: &Self) -> bool {
        self.public_key_bytes() == other.public_key_bytes()
    }
}

impl Eq for SultanKeypair {}

// ---------------------------------------------------------------------------
// SultanPublicKey
// ---------------------------------------------------------------------------

impl SultanPublicKey {
    /// Wrap raw bytes without checking that they are a curve point.
    /// Verification against an invalid point simply fails.
    pub fn from_bytes(bytes: [u8; PUBLIC_KEY_LENGTH]) -> Self {
        Self { bytes }
    }

    /// Parse a byte slice, validating length and that it is an Ed25519 point.
    pub fn try_from_slice(slice: &[u8]) -> Result<Self, KeyError> {
        let bytes: [u8; PUBLIC_KEY_LENGTH] =
            slice.try_into().map_err(|_| KeyError::InvalidKeyLength {
                expected: PUBLIC_KEY_LENGTH,
                got: slice.len(),
            })?;
        VerifyingKey::from_bytes(&bytes).map_err(|_| KeyError::InvalidPublicKey)?;
        Ok(Self { bytes })
    }

    /// Parse the 64-character hex form used on the wire.
    pub fn from_hex(s: &str) -> Result<Self, KeyError> {
        let bytes = hex::decode(s).map_err(|_| KeyError::InvalidHex)?;
        Self::try_from_slice(&bytes)
    }

    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        &self.bytes
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }

    /// The address this public key controls.
    pub fn address(&self) -> Address {
        derive_address(&self.bytes)
    }

    /// `true` if `signature` is a valid signature of `message` by this key.
    pub fn verify(&self, message: &[u8], signature: &SultanSignature) -> bool {
        let Ok(verifying_key) = VerifyingKey::from_bytes(&self.bytes) else {
            return false;
        };
        let dalek_sig = DalekSignature::from_bytes(&signature.bytes);
        verifying_key.verify(message, &dalek_sig).is_ok()
    }
}

impl Hash for SultanPublicKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bytes.hash(state);
    }
}

impl fmt::Display for SultanPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for SultanPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SultanPublicKey({})", &self.to_hex()[..16])
    }
}

// ---------------------------------------------------------------------------
// SultanSignature
// ---------------------------------------------------------------------------

impl SultanSignature {
    pub fn from_bytes(bytes: [u8; SIGNATURE_LENGTH]) -> Self {
        Self { bytes }
    }

    pub fn try_from_slice(slice: &[u8]) -> Result<Self, KeyError> {
        let bytes: [u8; SIGNATURE_LENGTH] =
            slice.try_into().map_err(|_| KeyError::InvalidKeyLength {
                expected: SIGNATURE_LENGTH,
                got: slice.len(),
            })?;
        Ok(Self { bytes })
    }

    /// Parse the 128-character hex form used on the wire.
    pub fn from_hex(s: &str) -> Result<Self, KeyError> {
        let bytes = hex::decode(s).map_err(|_| KeyError::InvalidHex)?;
        Self::try_from_slice(&bytes)
    }

    pub fn as_bytes(&self) -> &[u8; SIGNATURE_LENGTH] {
        &self.bytes
    }

    /// Lowercase hex, 128 characters. Hex, not base64: the node only reads hex.
    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }
}

impl fmt::Display for SultanSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for SultanSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex_str = self.to_hex();
        write!(f, "SultanSignature({}...{})", &hex_str[..8], &hex_str[120..])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_produces_valid_keypair() {
        let kp = SultanKeypair::generate();
        assert_eq!(kp.public_key_hex().len(), 64);
        assert_eq!(kp.secret_key_hex().len(), 64);
    }

    #[test]
    fn test_try_generate_succeeds() {
        let kp = SultanKeypair::try_generate().unwrap();
        let msg = b"entropy is fine";
        assert!(kp.verify(msg, &kp.sign(msg)));
    }

    #[test]
    fn test_two_generated_keypairs_are_different() {
        let kp1 = SultanKeypair::generate();
        let kp2 = SultanKeypair::generate();
        assert_ne!(kp1.public_key_bytes(), kp2.public_key_bytes());
    }

    #[test]
    fn from_secret_rejects_wrong_length() {
        for len in [0usize, 16, 31, 33, 64] {
            let err = SultanKeypair::from_secret(&vec![1u8; len]).unwrap_err();
            match err {
                KeyError::InvalidKeyLength { expected, got } => {
                    assert_eq!(expected, 32);
                    assert_eq!(got, len);
                }
                other => panic!("unexpected error: {other}"),
            }
        }
    }

    #[test]
    fn from_secret_is_deterministic() {
        let kp1 = SultanKeypair::from_secret(&[9u8; 32]).unwrap();
        let kp2 = SultanKeypair::from_secret(&[9u8; 32]).unwrap();
        assert_eq!(kp1.public_key(), kp2.public_key());
        assert_eq!(kp1.address(), kp2.address());
    }

    #[test]
    fn test_roundtrip_hex() {
        let kp = SultanKeypair::generate();
        let restored = SultanKeypair::from_hex(&kp.secret_key_hex()).unwrap();
        assert_eq!(kp, restored);

        let prefixed = format!("  0x{}\n", kp.secret_key_hex());
        assert_eq!(SultanKeypair::from_hex(&prefixed).unwrap(), kp);
    }

    #[test]
    fn test_invalid_hex_rejected() {
        assert!(matches!(
            SultanKeypair::from_hex("not-hex-at-all"),
            Err(KeyError::InvalidHex)
        ));
        assert!(matches!(
            SultanKeypair::from_hex("deadbeef"),
            Err(KeyError::InvalidKeyLength { got: 4, .. })
        ));
    }

    #[test]
    fn test_rfc8032_test_vector_1() {
        // RFC 8032 §7.1, TEST 1.
        let kp = SultanKeypair::from_hex(
            "9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60",
        )
        .unwrap();
        assert_eq!(
            kp.public_key_hex(),
            "d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a"
        );
        assert_eq!(
            kp.sign(b"").to_hex(),
            "e5564300c360ac729086e2cc806e828a84877f1eb8e5d974d873e06522490155\
             5fb8821590a33bacc61e39701cf9b46bd25bf5f0595bbe24655141438e7a100b"
        );
    }

    #[test]
    fn keypair_sign_verify_roundtrip() {
        let kp = SultanKeypair::generate();
        let msg = b"send 10 SLTN";
        let sig = kp.sign(msg);
        assert!(kp.verify(msg, &sig));
        assert!(!kp.verify(b"send 11 SLTN", &sig));
    }

    #[test]
    fn wrong_key_fails_verification() {
        let kp1 = SultanKeypair::generate();
        let kp2 = SultanKeypair::generate();
        let sig = kp1.sign(b"message");
        assert!(!kp2.verify(b"message", &sig));
    }

    #[test]
    fn test_deterministic_signatures() {
        let kp = SultanKeypair::from_seed(&[3u8; 32]);
        assert_eq!(kp.sign(b"same").as_bytes(), kp.sign(b"same").as_bytes());
    }

    #[test]
    fn public_key_hex_roundtrip() {
        let pk = SultanKeypair::generate().public_key();
        assert_eq!(SultanPublicKey::from_hex(&pk.to_hex()).unwrap(), pk);
    }

    #[test]
    fn public_key_rejects_wrong_length() {
        assert!(matches!(
            SultanPublicKey::try_from_slice(&[0u8; 16]),
            Err(KeyError::InvalidKeyLength { expected: 32, got: 16 })
        ));
    }

    #[test]
    fn signature_hex_roundtrip() {
        let kp = SultanKeypair::generate();
        let sig = kp.sign(b"test");
        let hex_str = sig.to_hex();
        assert_eq!(hex_str.len(), 128);
        assert_eq!(hex_str, hex_str.to_lowercase());
        assert_eq!(SultanSignature::from_hex(&hex_str).unwrap(), sig);
    }

    #[test]
    fn signature_from_hex_rejects_short_input() {
        assert!(SultanSignature::from_hex("abcd").is_err());
    }

    #[test]
    fn debug_does_not_leak_secret() {
        let kp = SultanKeypair::generate();
        let debug_str = format!("{:?}", kp);
        assert!(debug_str.starts_with("SultanKeypair(pub="));
        assert!(!debug_str.contains(&kp.secret_key_hex()));
    }

    #[test]
    fn clone_preserves_identity() {
        let kp = SultanKeypair::generate();
        let cloned = kp.clone();
        assert_eq!(kp.secret_key_bytes(), cloned.secret_key_bytes());
    }

    #[test]
    fn keypair_and_public_key_derive_same_address() {
        let kp = SultanKeypair::from_seed(&[5u8; 32]);
        assert_eq!(kp.address(), kp.public_key().address());
    }
}
