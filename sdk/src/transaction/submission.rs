//! The `POST /tx` payload.
//!
//! ```json
//! {
//!   "tx": {"from": "...", "to": "...", "amount": 5000000000,
//!          "timestamp": 1700000000, "nonce": 3, "memo": "test"},
//!   "signature":  "<128 lowercase hex>",
//!   "public_key": "<64 lowercase hex>"
//! }
//! ```
//!
//! Unlike the canonical form, `tx.amount` is a JSON number. The node turns it
//! back into a string when it rebuilds the signed bytes.

use serde::{Deserialize, Serialize};

use super::builder::TransactionIntent;
use crate::identity::Address;

/// The transaction as submitted. Field order mirrors the node's own request
/// type; it is not signed, so order here is cosmetic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionBody {
    pub from: Address,
    pub to: Address,
    pub amount: u128,
    pub timestamp: u64,
    pub nonce: u64,
    pub memo: String,
}

impl SubmissionBody {
    pub fn from_intent(intent: &TransactionIntent) -> Self {
        Self {
            from: intent.from().clone(),
            to: intent.to().clone(),
            amount: intent.amount_atomic(),
            timestamp: intent.timestamp(),
            nonce: intent.nonce(),
            memo: intent.memo().to_string(),
        }
    }
}

/// A signed transaction ready to be posted verbatim to `POST /tx`.
///
/// Built by [`super::build_submission`] or [`super::assemble_submission`],
/// which guarantee that `signature` covers exactly the canonical form of `tx`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedSubmission {
    pub tx: SubmissionBody,
    /// Ed25519 signature, 128 lowercase hex characters.
    pub signature: String,
    /// Sender's public key, 64 lowercase hex characters.
    pub public_key: String,
}

impl SignedSubmission {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body() -> SubmissionBody {
        SubmissionBody {
            from: Address::from("sultan1abc..."),
            to: Address::from("sultan1def..."),
            amount: 5_000_000_000,
            timestamp: 1_700_000_000,
            nonce: 3,
            memo: "test".to_string(),
        }
    }

    #[test]
    fn amount_is_a_number_on_the_wire() {
        let submission = SignedSubmission {
            tx: body(),
            signature: "ab".repeat(64),
            public_key: "cd".repeat(32),
        };
        let json = submission.to_json().unwrap();
        assert!(json.starts_with(
            r#"{"tx":{"from":"sultan1abc...","to":"sultan1def...","amount":5000000000,"timestamp":1700000000,"nonce":3,"memo":"test"},"signature":""#
        ));
        assert!(json.contains(r#""public_key":""#));
    }

    #[test]
    fn amounts_above_u64_survive_json() {
        let mut tx = body();
        tx.amount = u64::MAX as u128 + 1;
        let json = serde_json::to_string(&tx).unwrap();
        assert!(json.contains("\"amount\":18446744073709551616"));
        let back: SubmissionBody = serde_json::from_str(&json).unwrap();
        assert_eq!(back.amount, u64::MAX as u128 + 1);
    }
}
