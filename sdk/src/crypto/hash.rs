//! # Hashing Utilities
//!
//! Sultan uses exactly one hash on the client side: SHA-256, for address
//! derivation. Ed25519 does its own SHA-512 internally and we never touch it.

use sha2::{Digest, Sha256};

use crate::config::ADDRESS_DIGEST_LENGTH;

/// Compute the SHA-256 digest of `data`.
///
/// # Example
///
/// ```
/// use sultan_sdk::crypto::sha256;
///
/// let hash = sha256(b"sultan");
/// assert_eq!(hash.len(), 32);
/// ```
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// The first [`ADDRESS_DIGEST_LENGTH`] bytes of `SHA-256(data)`.
///
/// This truncation is part of the address format. The network's verifier
/// does the same thing, so it is not a tunable.
pub fn address_digest(data: &[u8]) -> [u8; ADDRESS_DIGEST_LENGTH] {
    let full = sha256(data);
    let mut out = [0u8; ADDRESS_DIGEST_LENGTH];
    out.copy_from_slice(&full[..ADDRESS_DIGEST_LENGTH]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_known_vector() {
        // NIST FIPS 180-2, "abc".
        assert_eq!(
            hex::encode(sha256(b"abc")),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_sha256_empty_input() {
        assert_eq!(
            hex::encode(sha256(b"")),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn address_digest_is_sha256_prefix() {
        let data = b"some public key bytes";
        assert_eq!(address_digest(data), sha256(data)[..20]);
    }

    #[test]
    fn address_digest_deterministic() {
        assert_eq!(address_digest(b"x"), address_digest(b"x"));
        assert_ne!(address_digest(b"x"), address_digest(b"y"));
    }
}
