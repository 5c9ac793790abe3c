//! # Identity Module
//!
//! Account identity on Sultan L1 is an Ed25519 public key, and the name
//! people paste into payment forms is its Bech32 address: `sultan1…`.
//!
//! The key material itself lives in [`crate::crypto::keys`]; this module is
//! the mapping from keys to addresses and back (as far as "back" goes: an
//! address only recovers the 20-byte digest, never the key).

pub mod address;

pub use address::{derive_address, derive_address_from_slice, Address, AddressError};
