//! The Sultan RPC client.
//!
//! [`SultanClient`] owns the I/O half of the lifecycle: it fetches the nonce,
//! drives the signing core, posts the submission, and polls for a final
//! status. Everything it signs goes through [`crate::transaction`]; the client
//! never builds signable bytes itself.

use std::time::Duration;

use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::rpc::{
    balance_path, transaction_path, BalanceResponse, StatusResponse, TransactionResponse,
    STATUS_PATH, SUBMIT_PATH,
};
use super::transport::{HttpTransport, Transport, TransportError};
use crate::config::ClientConfig;
use crate::crypto::keys::{KeyError, SultanKeypair};
use crate::identity::{Address, AddressError};
use crate::transaction::{
    sign_transaction, to_atomic, AmountError, SignedSubmission, TransactionBuilder,
    TransactionError, TransactionStatus,
};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The deadline passed without the node reporting a final status. The
    /// transaction may still be included later.
    #[error("transaction {hash} not confirmed within {waited:?}")]
    ConfirmationTimeout { hash: String, waited: Duration },

    /// The node reported the transaction as failed.
    #[error("transaction {hash} failed on chain")]
    TransactionFailed { hash: String },

    /// Transaction hashes are hex; anything else never reaches the URL.
    #[error("invalid transaction hash '{hash}'")]
    InvalidHash { hash: String },

    #[error("invalid recipient address '{address}': {source}")]
    InvalidRecipient {
        address: String,
        #[source]
        source: AddressError,
    },

    #[error(transparent)]
    Key(#[from] KeyError),

    #[error(transparent)]
    Transaction(#[from] TransactionError),

    #[error(transparent)]
    Amount(#[from] AmountError),
}

impl ClientError {
    /// Transport failures and confirmation timeouts may succeed on retry.
    /// Signing refusals, bad input, and on-chain failures never will.
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::Transport(e) => e.is_retryable(),
            ClientError::ConfirmationTimeout { .. } => true,
            ClientError::TransactionFailed { .. }
            | ClientError::InvalidHash { .. }
            | ClientError::InvalidRecipient { .. }
            | ClientError::Key(_)
            | ClientError::Transaction(_)
            | ClientError::Amount(_) => false,
        }
    }
}

// ---------------------------------------------------------------------------
// SultanClient
// ---------------------------------------------------------------------------

/// Async client for a Sultan node.
///
/// ```no_run
/// use sultan_sdk::{ClientConfig, SultanClient, SultanKeypair};
///
/// # async fn run() -> Result<(), sultan_sdk::ClientError> {
/// let client = SultanClient::new(ClientConfig::testnet())?;
/// let keypair = SultanKeypair::generate();
///
/// let tx = client
///     .send(&keypair, "sultan1qqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqrhakpc", 1.5, "")
///     .await?;
/// let confirmed = client.wait_for_confirmation(&tx.hash).await?;
/// println!("included at height {:?}", confirmed.block_height);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SultanClient<T: Transport = HttpTransport> {
    config: ClientConfig,
    transport: T,
}

impl SultanClient<HttpTransport> {
    /// Client over HTTP for `config.rpc_url`.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self { config, transport })
    }

    pub fn mainnet() -> Result<Self, ClientError> {
        Self::new(ClientConfig::mainnet())
    }

    pub fn testnet() -> Result<Self, ClientError> {
        Self::new(ClientConfig::testnet())
    }
}

impl<T: Transport> SultanClient<T> {
    /// Client over a caller-supplied transport.
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn get_json<R: DeserializeOwned>(&self, path: &str) -> Result<R, ClientError> {
        let body = self.transport.get(path).await?;
        decode(&body)
    }

    /// `GET /status`.
    pub async fn get_status(&self) -> Result<StatusResponse, ClientError> {
        self.get_json(STATUS_PATH).await
    }

    /// `GET /balance/{address}`, in atomic units, with the account nonce.
    pub async fn get_balance(&self, address: &Address) -> Result<BalanceResponse, ClientError> {
        self.get_json(&balance_path(address)).await
    }

    /// Balance in SLTN.
    pub async fn get_balance_display(&self, address: &Address) -> Result<f64, ClientError> {
        Ok(self.get_balance(address).await?.balance_display())
    }

    /// `GET /tx/{hash}`.
    pub async fn get_transaction(&self, hash: &str) -> Result<TransactionResponse, ClientError> {
        let path = transaction_path(hash).ok_or_else(|| ClientError::InvalidHash {
            hash: hash.to_string(),
        })?;
        self.get_json(&path).await
    }

    /// `POST /tx` with an already-signed submission, posted verbatim.
    pub async fn submit(
        &self,
        submission: &SignedSubmission,
    ) -> Result<TransactionResponse, ClientError> {
        let body = serde_json::to_vec(submission).map_err(TransactionError::from)?;
        let reply = self.transport.post(SUBMIT_PATH, body).await?;
        let response: TransactionResponse = decode(&reply)?;
        info!(
            hash = %response.hash,
            from = %submission.tx.from,
            to = %submission.tx.to,
            amount = %submission.tx.amount,
            "transaction submitted"
        );
        Ok(response)
    }

    /// Send `amount` SLTN to `to`.
    ///
    /// Converts to atomic units first (truncating below 10^-9), then see
    /// [`send_atomic`](Self::send_atomic).
    pub async fn send(
        &self,
        keypair: &SultanKeypair,
        to: &str,
        amount: f64,
        memo: &str,
    ) -> Result<TransactionResponse, ClientError> {
        let amount_atomic = to_atomic(amount)?;
        self.send_atomic(keypair, to, amount_atomic, memo).await
    }

    /// Send `amount_atomic` atomic units to `to`.
    ///
    /// The recipient is validated before anything is signed. The nonce comes
    /// from `GET /balance` for the sender and the timestamp is the current
    /// time in seconds.
    pub async fn send_atomic(
        &self,
        keypair: &SultanKeypair,
        to: &str,
        amount_atomic: u128,
        memo: &str,
    ) -> Result<TransactionResponse, ClientError> {
        let recipient = Address::parse(to).map_err(|source| ClientError::InvalidRecipient {
            address: to.to_string(),
            source,
        })?;
        let sender = keypair.address();

        let nonce = self.get_balance(&sender).await?.nonce;
        debug!(%sender, nonce, "fetched sender nonce");

        let intent = TransactionBuilder::new()
            .sender(sender)
            .receiver(recipient)
            .amount_atomic(amount_atomic)
            .memo(memo)
            .nonce(nonce)
            .build();

        let submission = sign_transaction(keypair, intent).into_submission()?;
        self.submit(&submission).await
    }

    /// Poll `GET /tx/{hash}` until the node reports a final status.
    ///
    /// Returns the confirmed transaction, [`ClientError::TransactionFailed`]
    /// if the node marks it failed, or [`ClientError::ConfirmationTimeout`]
    /// once `confirmation_timeout` has elapsed. The deadline covers the whole
    /// call, including a request that hangs.
    pub async fn wait_for_confirmation(
        &self,
        hash: &str,
    ) -> Result<TransactionResponse, ClientError> {
        let waited = self.config.confirmation_timeout;
        match tokio::time::timeout(waited, self.poll_until_final(hash)).await {
            Ok(result) => result,
            Err(_) => {
                warn!(%hash, ?waited, "confirmation timed out");
                Err(ClientError::ConfirmationTimeout {
                    hash: hash.to_string(),
                    waited,
                })
            }
        }
    }

    async fn poll_until_final(&self, hash: &str) -> Result<TransactionResponse, ClientError> {
        loop {
            match self.get_transaction(hash).await {
                Ok(tx) => match tx.status {
                    TransactionStatus::Confirmed => {
                        info!(%hash, block_height = ?tx.block_height, "transaction confirmed");
                        return Ok(tx);
                    }
                    TransactionStatus::Failed => {
                        warn!(%hash, "transaction failed");
                        return Err(ClientError::TransactionFailed {
                            hash: hash.to_string(),
                        });
                    }
                    TransactionStatus::Pending | TransactionStatus::Unknown => {
                        debug!(%hash, status = %tx.status, "not final yet");
                    }
                },
                // Freshly submitted transactions can 404 until the node indexes them.
                Err(ClientError::Transport(TransportError::Status { status: 404, .. })) => {
                    debug!(%hash, "transaction not visible yet");
                }
                Err(e) if e.is_retryable() => {
                    debug!(%hash, error = %e, "poll failed, retrying");
                }
                Err(e) => return Err(e),
            }
            tokio::time::sleep(self.config.poll_interval).await;
        }
    }
}

fn decode<R: DeserializeOwned>(body: &[u8]) -> Result<R, ClientError> {
    serde_json::from_slice(body).map_err(|e| ClientError::Transport(TransportError::Decode(e)))
}
