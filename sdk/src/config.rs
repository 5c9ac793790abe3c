//! # Protocol Configuration & Constants
//!
//! Every magic number the SDK depends on lives here. Several of them are
//! not ours to choose: the HRP, the digest truncation, and the atomic scale
//! are fixed by the network's verifier, and changing any of them produces
//! addresses or amounts the node will not recognize.
//!
//! Runtime settings (which node to talk to, how long to wait) are carried in
//! [`ClientConfig`], which is passed to the client explicitly. There is no
//! global endpoint.

use std::time::Duration;

// ---------------------------------------------------------------------------
// Network endpoints
// ---------------------------------------------------------------------------

/// Public mainnet RPC endpoint.
pub const MAINNET_RPC_URL: &str = "https://rpc.sltn.io";

/// Public testnet RPC endpoint.
pub const TESTNET_RPC_URL: &str = "https://testnet.sltn.io";

// ---------------------------------------------------------------------------
// Addresses
// ---------------------------------------------------------------------------

/// Bech32 human-readable prefix for every Sultan address.
pub const ADDRESS_HRP: &str = "sultan";

/// Number of leading SHA-256 bytes that become the address payload.
pub const ADDRESS_DIGEST_LENGTH: usize = 20;

// ---------------------------------------------------------------------------
// Cryptographic Parameters
// ---------------------------------------------------------------------------

/// Ed25519 (RFC 8032). Deterministic, so retries re-sign to the same bytes.
pub const SIGNING_ALGORITHM: &str = "Ed25519";

/// Signing key length in bytes.
pub const SECRET_KEY_LENGTH: usize = 32;

/// Public (verifying) key length in bytes.
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// Ed25519 signature length in bytes.
pub const SIGNATURE_LENGTH: usize = 64;

// ---------------------------------------------------------------------------
// Units
// ---------------------------------------------------------------------------

/// Display ticker for the native token.
pub const TOKEN_SYMBOL: &str = "SLTN";

/// Decimal places between one SLTN and one atomic unit.
pub const ATOMIC_DECIMALS: u32 = 9;

/// Atomic units per SLTN (10^9).
pub const ATOMIC_SCALE: u128 = 1_000_000_000;

// ---------------------------------------------------------------------------
// Timing Constants
// ---------------------------------------------------------------------------

/// Target block time. Confirmation polling uses it as the default interval.
pub const BLOCK_TIME: Duration = Duration::from_secs(2);

/// How long `wait_for_confirmation` keeps polling before giving up.
pub const DEFAULT_CONFIRMATION_TIMEOUT: Duration = Duration::from_secs(30);

/// Per-request HTTP timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// ---------------------------------------------------------------------------
// Environment
// ---------------------------------------------------------------------------

/// Overrides the RPC endpoint. Takes priority over `SULTAN_NETWORK`.
pub const ENV_RPC_URL: &str = "SULTAN_RPC_URL";

/// `mainnet` or `testnet`.
pub const ENV_NETWORK: &str = "SULTAN_NETWORK";

/// Confirmation timeout in whole seconds.
pub const ENV_CONFIRMATION_TIMEOUT: &str = "SULTAN_CONFIRMATION_TIMEOUT_SECS";

// ---------------------------------------------------------------------------
// Network selection
// ---------------------------------------------------------------------------

/// The public networks the SDK knows endpoints for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Network {
    Mainnet,
    Testnet,
}

impl Network {
    /// Default RPC endpoint for this network.
    pub fn rpc_url(&self) -> &'static str {
        match self {
            Network::Mainnet => MAINNET_RPC_URL,
            Network::Testnet => TESTNET_RPC_URL,
        }
    }

    /// Parse a network name (case-insensitive). Unknown names are `None`;
    /// we don't guess.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "mainnet" => Some(Network::Mainnet),
            "testnet" => Some(Network::Testnet),
            _ => None,
        }
    }
}

impl std::fmt::Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Network::Mainnet => write!(f, "mainnet"),
            Network::Testnet => write!(f, "testnet"),
        }
    }
}

// ---------------------------------------------------------------------------
// ClientConfig
// ---------------------------------------------------------------------------

/// Settings for [`crate::network::SultanClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the node, without a trailing slash.
    pub rpc_url: String,
    /// Timeout applied to each individual HTTP request.
    pub request_timeout: Duration,
    /// Overall deadline for `wait_for_confirmation`.
    pub confirmation_timeout: Duration,
    /// Delay between confirmation polls.
    pub poll_interval: Duration,
}

impl ClientConfig {
    /// Configuration for a custom endpoint with default timings.
    pub fn new(rpc_url: impl Into<String>) -> Self {
        let rpc_url: String = rpc_url.into();
        Self {
            rpc_url: rpc_url.trim_end_matches('/').to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            confirmation_timeout: DEFAULT_CONFIRMATION_TIMEOUT,
            poll_interval: BLOCK_TIME,
        }
    }

    pub fn mainnet() -> Self {
        Self::new(MAINNET_RPC_URL)
    }

    pub fn testnet() -> Self {
        Self::new(TESTNET_RPC_URL)
    }

    pub fn for_network(network: Network) -> Self {
        Self::new(network.rpc_url())
    }

    /// Build a configuration from the environment.
    ///
    /// Priority:
    /// 1. `SULTAN_RPC_URL`
    /// 2. `SULTAN_NETWORK` (`mainnet` / `testnet`)
    /// 3. mainnet
    ///
    /// `SULTAN_CONFIRMATION_TIMEOUT_SECS` overrides the confirmation deadline.
    /// Unparseable values are ignored with a warning.
    pub fn from_env() -> Self {
        let mut config = if let Ok(url) = std::env::var(ENV_RPC_URL) {
            tracing::debug!("using {} for the RPC endpoint", ENV_RPC_URL);
            Self::new(url)
        } else if let Ok(name) = std::env::var(ENV_NETWORK) {
            match Network::from_name(&name) {
                Some(network) => Self::for_network(network),
                None => {
                    tracing::warn!(network = %name, "unknown {}, falling back to mainnet", ENV_NETWORK);
                    Self::mainnet()
                }
            }
        } else {
            Self::mainnet()
        };

        if let Ok(raw) = std::env::var(ENV_CONFIRMATION_TIMEOUT) {
            match raw.trim().parse::<u64>() {
                Ok(secs) => config.confirmation_timeout = Duration::from_secs(secs),
                Err(_) => {
                    tracing::warn!(value = %raw, "ignoring unparseable {}", ENV_CONFIRMATION_TIMEOUT)
                }
            }
        }

        config
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_confirmation_timeout(mut self, timeout: Duration) -> Self {
        self.confirmation_timeout = timeout;
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::mainnet()
    }
}
