// Copyright (c) 2026 Sultan Labs. MIT License.
// See LICENSE for details.

//! # Sultan SDK: Client Library
//!
//! Everything a client needs to move value on Sultan L1: Ed25519 keys,
//! `sultan1…` addresses, the canonical signing format the network verifies,
//! and a small async client for the node's HTTP API.
//!
//! The part that actually matters is the signing protocol. The network
//! rebuilds the exact same JSON bytes from the submitted transaction and
//! checks our Ed25519 signature against them. Get one byte wrong (a space,
//! a key out of order, the amount as a number instead of a string) and the
//! node rejects the transaction with nothing more helpful than "invalid
//! signature".
//!
//! ## Architecture
//!
//! - **crypto**: Ed25519 keypairs, signatures, SHA-256.
//! - **identity**: Bech32 address derivation and parsing.
//! - **transaction**: Intents, unit conversion, canonical bytes, signing,
//!   submission payloads, and verification.
//! - **network**: RPC response types, the HTTP transport, and the client
//!   that submits and polls.
//! - **config**: Protocol constants and client configuration.
//!
//! Only `network` does I/O. Everything else is synchronous and pure (key
//! generation aside), so it can be called from any thread without locking.
//!
//! ## Quick start
//!
//! ```
//! use sultan_sdk::crypto::SultanKeypair;
//! use sultan_sdk::transaction::{sign_transaction, TransactionBuilder};
//!
//! let keypair = SultanKeypair::from_seed(&[7u8; 32]);
//! let intent = TransactionBuilder::new()
//!     .sender(keypair.address())
//!     .receiver("sultan1qqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqrhakpc")
//!     .amount_atomic(5_000_000_000)
//!     .nonce(3)
//!     .timestamp(1_700_000_000)
//!     .build();
//!
//! let signed = sign_transaction(&keypair, intent);
//! let submission = signed.into_submission().unwrap();
//! assert_eq!(submission.signature.len(), 128);
//! assert_eq!(submission.public_key.len(), 64);
//! ```

pub mod config;
pub mod crypto;
pub mod identity;
pub mod network;
pub mod transaction;

pub use config::ClientConfig;
pub use crypto::{SultanKeypair, SultanPublicKey, SultanSignature};
pub use identity::Address;
pub use network::{ClientError, SultanClient};
pub use transaction::{SignedSubmission, TransactionIntent};
