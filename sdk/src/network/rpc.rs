//! Response bodies of the node's HTTP API.
//!
//! | Method | Path              | Response                |
//! |--------|-------------------|-------------------------|
//! | GET    | `/status`         | [`StatusResponse`]      |
//! | GET    | `/balance/{addr}` | [`BalanceResponse`]     |
//! | POST   | `/tx`             | [`TransactionResponse`] |
//! | GET    | `/tx/{hash}`      | [`TransactionResponse`] |

use serde::{Deserialize, Serialize};

use crate::config::ATOMIC_SCALE;
use crate::identity::Address;
use crate::transaction::{format_display_amount, TransactionStatus};

/// Path for node status.
pub const STATUS_PATH: &str = "/status";

/// Path for transaction submission.
pub const SUBMIT_PATH: &str = "/tx";

pub fn balance_path(address: &Address) -> String {
    format!("/balance/{}", address)
}

/// `/tx/{hash}`, or `None` if `hash` is not plain hex. The hash becomes a
/// path segment verbatim, so nothing else may reach the URL.
pub fn transaction_path(hash: &str) -> Option<String> {
    is_valid_hash(hash).then(|| format!("/tx/{}", hash))
}

/// Non-empty ASCII hex, either case, no `0x`.
pub fn is_valid_hash(hash: &str) -> bool {
    !hash.is_empty() && hash.bytes().all(|b| b.is_ascii_hexdigit())
}

/// `GET /balance/{address}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceResponse {
    pub address: Address,
    /// Atomic units.
    pub balance: u128,
    /// Next nonce to sign with.
    pub nonce: u64,
}

impl BalanceResponse {
    /// Balance in SLTN. Lossy for very large balances.
    pub fn balance_display(&self) -> f64 {
        self.balance as f64 / ATOMIC_SCALE as f64
    }

    /// Exact balance as a decimal string.
    pub fn balance_formatted(&self) -> String {
        format_display_amount(self.balance)
    }
}

/// `GET /status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub node_id: String,
    pub block_height: u64,
    pub validators: u32,
    pub uptime_seconds: u64,
    pub version: String,
    pub shard_count: u32,
    pub tps_capacity: u32,
}

/// A transaction as the node reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionResponse {
    pub hash: String,
    pub from: Address,
    pub to: Address,
    pub amount: u128,
    /// Absent until the transaction lands in a block.
    #[serde(default)]
    pub block_height: Option<u64>,
    pub status: TransactionStatus,
}
