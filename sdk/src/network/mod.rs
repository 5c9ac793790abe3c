//! # Network Layer
//!
//! The only part of the SDK that does I/O.
//!
//! - **rpc**: request paths and response bodies of the node API.
//! - **transport**: the [`Transport`] trait and its `reqwest` implementation.
//! - **client**: [`SultanClient`], with balance and status queries, send, submit,
//!   and confirmation polling.
//!
//! Timeouts live here and only here: a per-request timeout on the HTTP
//! transport and an overall deadline on `wait_for_confirmation`.

pub mod client;
pub mod rpc;
pub mod transport;

pub use client::{ClientError, SultanClient};
pub use rpc::{BalanceResponse, StatusResponse, TransactionResponse};
pub use transport::{HttpTransport, Transport, TransportError};
