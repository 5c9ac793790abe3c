//! # CLI Interface
//!
//! Command-line structure for `sultan` using `clap` derive. Connection
//! settings are global flags with `SULTAN_*` environment fallbacks.

use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};
use sultan_sdk::config::{
    ClientConfig, Network, ENV_CONFIRMATION_TIMEOUT, ENV_NETWORK, ENV_RPC_URL,
};

use crate::logging::LogFormat;

/// Wallet and RPC client for Sultan L1.
#[derive(Parser, Debug)]
#[command(
    name = "sultan",
    about = "Wallet and RPC client for Sultan L1",
    version,
    propagate_version = true
)]
pub struct SultanCli {
    /// RPC endpoint. Overrides `--network`.
    #[arg(long, global = true, env = ENV_RPC_URL)]
    pub rpc_url: Option<String>,

    /// Public network to connect to.
    #[arg(long, global = true, env = ENV_NETWORK, value_enum, default_value_t = NetworkArg::Mainnet)]
    pub network: NetworkArg,

    /// Seconds to wait for confirmation before giving up.
    #[arg(long, global = true, env = ENV_CONFIRMATION_TIMEOUT)]
    pub confirmation_timeout: Option<u64>,

    /// Log output format (logs go to stderr).
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

impl SultanCli {
    /// Client configuration from the global flags.
    pub fn client_config(&self) -> ClientConfig {
        let mut config = match &self.rpc_url {
            Some(url) => ClientConfig::new(url.as_str()),
            None => ClientConfig::for_network(self.network.into()),
        };
        if let Some(secs) = self.confirmation_timeout {
            config = config.with_confirmation_timeout(Duration::from_secs(secs));
        }
        config
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum NetworkArg {
    Mainnet,
    Testnet,
}

impl From<NetworkArg> for Network {
    fn from(arg: NetworkArg) -> Self {
        match arg {
            NetworkArg::Mainnet => Network::Mainnet,
            NetworkArg::Testnet => Network::Testnet,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a new keypair and print its secret, public key, and address.
    Keygen,
    /// Print the public key and address for a secret key.
    Address(SecretArgs),
    /// Query node status.
    Status,
    /// Query the balance and nonce of an address.
    Balance(BalanceArgs),
    /// Sign and submit a transfer.
    Send(SendArgs),
    /// Look up a transaction by hash.
    Tx(TxArgs),
    /// Sign a transfer offline and print the payload without sending it.
    Sign(SignArgs),
    /// Print version information and exit.
    Version,
}

#[derive(Args, Debug)]
pub struct SecretArgs {
    /// Hex-encoded 32-byte Ed25519 secret key.
    ///
    /// Prefer the environment variable: flags end up in shell history.
    #[arg(long, env = "SULTAN_SECRET_KEY", hide_env_values = true)]
    pub secret_key: String,
}

#[derive(Args, Debug)]
pub struct BalanceArgs {
    /// `sultan1…` address.
    pub address: String,
}

#[derive(Args, Debug)]
pub struct SendArgs {
    #[command(flatten)]
    pub secret: SecretArgs,

    /// Recipient `sultan1…` address.
    #[arg(long)]
    pub to: String,

    /// Amount in SLTN, e.g. `1.5`. Up to nine decimal places.
    #[arg(long)]
    pub amount: String,

    #[arg(long, default_value = "")]
    pub memo: String,

    /// Wait for the transaction to be confirmed.
    #[arg(long)]
    pub wait: bool,
}

#[derive(Args, Debug)]
pub struct TxArgs {
    /// Transaction hash.
    pub hash: String,

    /// Poll until the transaction is confirmed or fails.
    #[arg(long)]
    pub wait: bool,
}

#[derive(Args, Debug)]
pub struct SignArgs {
    #[command(flatten)]
    pub secret: SecretArgs,

    /// Recipient `sultan1…` address.
    #[arg(long)]
    pub to: String,

    /// Amount in SLTN.
    #[arg(long)]
    pub amount: String,

    #[arg(long, default_value = "")]
    pub memo: String,

    /// Sender nonce. Offline signing cannot look it up.
    #[arg(long)]
    pub nonce: u64,

    /// Unix seconds. Defaults to now.
    #[arg(long)]
    pub timestamp: Option<u64>,
}
