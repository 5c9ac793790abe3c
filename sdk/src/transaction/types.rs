//! Core value types for Sultan transactions: unit conversion, node-reported
//! status, and the client-side submission lifecycle.
//!
//! Amounts travel as `u128` atomic units (1 SLTN = 10^9 atomic). Floating
//! point only ever appears at the edge, in [`to_atomic`] and [`from_atomic`],
//! and is converted before anything gets signed.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::config::{ATOMIC_DECIMALS, ATOMIC_SCALE};

// ---------------------------------------------------------------------------
// Amount conversion
// ---------------------------------------------------------------------------

/// Errors converting a display amount into atomic units.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AmountError {
    #[error("amount must not be negative")]
    Negative,

    #[error("amount must be a finite number")]
    NotFinite,

    #[error("amount overflows the atomic unit range")]
    Overflow,

    #[error("malformed amount '{0}'")]
    Malformed(String),
}

/// Convert a display amount (SLTN) to atomic units.
///
/// Multiplies by 10^9 and truncates toward zero. Anything below one atomic
/// unit is dropped, never rounded up.
///
/// ```
/// use sultan_sdk::transaction::to_atomic;
///
/// assert_eq!(to_atomic(10.0).unwrap(), 10_000_000_000);
/// assert_eq!(to_atomic(0.000000001).unwrap(), 1);
/// ```
pub fn to_atomic(display: f64) -> Result<u128, AmountError> {
    if !display.is_finite() {
        return Err(AmountError::NotFinite);
    }
    if display < 0.0 {
        return Err(AmountError::Negative);
    }
    let scaled = display * ATOMIC_SCALE as f64;
    if scaled >= u128::MAX as f64 {
        return Err(AmountError::Overflow);
    }
    Ok(scaled.trunc() as u128)
}

/// Convert atomic units to a display amount. Lossy above 2^53 atomic units;
/// use [`format_display_amount`] when the exact value matters.
pub fn from_atomic(atomic: u128) -> f64 {
    atomic as f64 / ATOMIC_SCALE as f64
}

/// Parse a decimal string such as `"12.5"` into atomic units without going
/// through `f64`.
///
/// Digits beyond the ninth decimal place are truncated, matching
/// [`to_atomic`].
pub fn parse_display_amount(s: &str) -> Result<u128, AmountError> {
    let trimmed = s.trim();
    let malformed = || AmountError::Malformed(s.to_string());

    if trimmed.starts_with('-') {
        return Err(AmountError::Negative);
    }

    let (whole, frac) = match trimmed.split_once('.') {
        Some((w, f)) => (w, f),
        None => (trimmed, ""),
    };
    if whole.is_empty() && frac.is_empty() {
        return Err(malformed());
    }
    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(whole) || !all_digits(frac) {
        return Err(malformed());
    }

    let whole_units: u128 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| AmountError::Overflow)?
    };

    let decimals = ATOMIC_DECIMALS as usize;
    let kept = &frac[..frac.len().min(decimals)];
    let frac_units: u128 = if kept.is_empty() {
        0
    } else {
        let padded = format!("{:0<width$}", kept, width = decimals);
        padded.parse().map_err(|_| malformed())?
    };

    whole_units
        .checked_mul(ATOMIC_SCALE)
        .and_then(|v| v.checked_add(frac_units))
        .ok_or(AmountError::Overflow)
}

/// Format atomic units as an exact decimal string with all nine places,
/// e.g. `1_500_000_000` becomes `"1.500000000"`.
pub fn format_display_amount(atomic: u128) -> String {
    let whole = atomic / ATOMIC_SCALE;
    let frac = atomic % ATOMIC_SCALE;
    format!(
        "{}.{:0>width$}",
        whole,
        frac,
        width = ATOMIC_DECIMALS as usize
    )
}

// ---------------------------------------------------------------------------
// TransactionStatus
// ---------------------------------------------------------------------------

/// Status of a transaction as reported by the node's `/tx/{hash}` endpoint.
///
/// Unrecognized strings deserialize as [`TransactionStatus::Unknown`] rather
/// than failing the whole response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    /// Accepted into the mempool, not yet in a block.
    Pending,
    /// Included in a finalized block.
    Confirmed,
    /// Rejected by the node or failed execution.
    Failed,
    #[serde(other)]
    Unknown,
}

impl TransactionStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Confirmed | Self::Failed)
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Confirmed => write!(f, "confirmed"),
            Self::Failed => write!(f, "failed"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

// ---------------------------------------------------------------------------
// SubmissionState
// ---------------------------------------------------------------------------

/// Client-side lifecycle of one transaction.
///
/// ```text
/// Built -> Signed -> Submitted -> { Confirmed | Failed | TimedOut }
/// ```
///
/// The signing core only ever produces `Built` and `Signed` values. The rest
/// of the transitions are driven by [`crate::network::SultanClient`].
/// `TimedOut` is not final: the outcome is unknown and a later poll may still
/// observe `Confirmed` or `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubmissionState {
    Built,
    Signed,
    Submitted,
    Confirmed,
    Failed,
    TimedOut,
}

impl SubmissionState {
    /// Whether moving from `self` to `next` is a legal lifecycle step.
    pub fn can_transition_to(&self, next: SubmissionState) -> bool {
        use SubmissionState::*;
        matches!(
            (self, next),
            (Built, Signed)
                | (Signed, Submitted)
                | (Submitted, Submitted)
                | (Submitted, Confirmed)
                | (Submitted, Failed)
                | (Submitted, TimedOut)
                | (TimedOut, Confirmed)
                | (TimedOut, Failed)
                | (TimedOut, TimedOut)
        )
    }

    /// The state implied by a status the node reported after submission.
    pub fn from_status(status: TransactionStatus) -> Self {
        match status {
            TransactionStatus::Confirmed => SubmissionState::Confirmed,
            TransactionStatus::Failed => SubmissionState::Failed,
            TransactionStatus::Pending | TransactionStatus::Unknown => SubmissionState::Submitted,
        }
    }

    pub fn is_final(&self) -> bool {
        matches!(self, SubmissionState::Confirmed | SubmissionState::Failed)
    }
}

impl fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SubmissionState::Built => "built",
            SubmissionState::Signed => "signed",
            SubmissionState::Submitted => "submitted",
            SubmissionState::Confirmed => "confirmed",
            SubmissionState::Failed => "failed",
            SubmissionState::TimedOut => "timed-out",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
