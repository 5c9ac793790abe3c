//! # Transaction Module
//!
//! Construction, canonical encoding, signing, and verification of Sultan
//! transfers.
//!
//! ## Architecture
//!
//! ```text
//! types.rs       : Unit conversion, node status, client lifecycle state
//! builder.rs     : TransactionIntent and its fluent builder
//! canonical.rs   : The signed byte format (sorted keys, amount as string)
//! signing.rs     : Ed25519 signing and submission assembly
//! submission.rs  : The POST /tx payload (amount as number)
//! verification.rs: Signature checks and TransactionError
//! ```
//!
//! ## Transaction Lifecycle
//!
//! 1. **Build**: [`TransactionBuilder`] produces a [`TransactionIntent`].
//! 2. **Sign**: [`sign_transaction`] consumes the intent.
//! 3. **Submit**: [`SignedTransaction::into_submission`] yields the payload
//!    that [`crate::network::SultanClient`] posts.
//! 4. **Confirm**: the client polls until the node reports a final status.
//!
//! Amounts are `u128` atomic units everywhere past [`to_atomic`].

pub mod builder;
pub mod canonical;
pub mod signing;
pub mod submission;
pub mod types;
pub mod verification;

pub use builder::{TransactionBuilder, TransactionIntent};
pub use canonical::{canonicalize, CanonicalSignable};
pub use signing::{
    assemble_submission, build_submission, sign_intent, sign_transaction, SignedTransaction,
};
pub use submission::{SignedSubmission, SubmissionBody};
pub use types::{
    format_display_amount, from_atomic, parse_display_amount, to_atomic, AmountError,
    SubmissionState, TransactionStatus,
};
pub use verification::{verify_canonical, verify_submission, TransactionError};
