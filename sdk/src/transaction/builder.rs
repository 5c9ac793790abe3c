//! Transaction intents via the builder pattern.
//!
//! A [`TransactionIntent`] is what the sender means to happen: who pays, who
//! receives, how many atomic units, plus the replay guards (nonce and
//! timestamp). It carries no key material and no signature. Signing lives in
//! [`super::signing`].

use chrono::Utc;

use super::canonical::canonicalize;
use crate::identity::Address;

// ---------------------------------------------------------------------------
// TransactionIntent
// ---------------------------------------------------------------------------

/// An unsigned transfer.
///
/// Fields are private: once built, an intent cannot be edited, only handed
/// to [`super::sign_transaction`] (which consumes it).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionIntent {
    from: Address,
    to: Address,
    amount_atomic: u128,
    memo: String,
    nonce: u64,
    timestamp: u64,
}

impl TransactionIntent {
    pub fn from(&self) -> &Address {
        &self.from
    }

    pub fn to(&self) -> &Address {
        &self.to
    }

    /// Amount in atomic units (10^-9 SLTN).
    pub fn amount_atomic(&self) -> u128 {
        self.amount_atomic
    }

    pub fn memo(&self) -> &str {
        &self.memo
    }

    /// The sender's account nonce as reported by `/balance`.
    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    /// Unix seconds.
    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    /// The exact bytes a signature over this intent covers.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        canonicalize(self)
    }
}

// ---------------------------------------------------------------------------
// TransactionBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`TransactionIntent`].
///
/// ```rust
/// use sultan_sdk::transaction::TransactionBuilder;
///
/// let intent = TransactionBuilder::new()
///     .sender("sultan1abc...")
///     .receiver("sultan1def...")
///     .amount_atomic(5_000_000_000)
///     .memo("test")
///     .nonce(3)
///     .timestamp(1_700_000_000)
///     .build();
///
/// assert_eq!(intent.amount_atomic(), 5_000_000_000);
/// ```
///
/// Addresses are taken as given. Validate user input with
/// [`Address::parse`] before it reaches the builder; the client does this
/// for the recipient in `send`.
#[derive(Debug, Default)]
pub struct TransactionBuilder {
    from: Address,
    to: Address,
    amount_atomic: u128,
    memo: String,
    nonce: u64,
    timestamp: Option<u64>,
}

impl TransactionBuilder {
    /// Creates an empty builder.
    ///
    /// Defaults:
    /// - `amount_atomic`: 0
    /// - `memo`: empty
    /// - `nonce`: 0
    /// - `timestamp`: current UTC time (seconds) at build time
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sender(mut self, address: impl Into<Address>) -> Self {
        self.from = address.into();
        self
    }

    pub fn receiver(mut self, address: impl Into<Address>) -> Self {
        self.to = address.into();
        self
    }

    /// Sets the amount in atomic units. Convert display amounts first with
    /// [`super::to_atomic`] or [`super::parse_display_amount`].
    pub fn amount_atomic(mut self, amount: u128) -> Self {
        self.amount_atomic = amount;
        self
    }

    pub fn memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = memo.into();
        self
    }

    pub fn nonce(mut self, nonce: u64) -> Self {
        self.nonce = nonce;
        self
    }

    /// Sets the timestamp explicitly (Unix seconds).
    ///
    /// If not called, `build()` uses the current UTC time.
    pub fn timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn build(self) -> TransactionIntent {
        let timestamp = self
            .timestamp
            .unwrap_or_else(|| Utc::now().timestamp().max(0) as u64);

        TransactionIntent {
            from: self.from,
            to: self.to,
            amount_atomic: self.amount_atomic,
            memo: self.memo,
            nonce: self.nonce,
            timestamp,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
