//! # Cryptographic Primitives
//!
//! Thin, typed wrappers around audited implementations:
//!
//! - **Ed25519** (`ed25519-dalek`) for account keys and transaction signatures.
//! - **SHA-256** (`sha2`) for address digests.
//!
//! Nothing here is hand-rolled.

pub mod hash;
pub mod keys;
pub mod signatures;

pub use hash::{address_digest, sha256};
pub use keys::{KeyError, SultanKeypair, SultanPublicKey, SultanSignature};
pub use signatures::{sign, verify, verify_raw, SignatureError};
