// Copyright (c) 2026 Sultan Labs. MIT License.
// See LICENSE for details.

//! # Sultan CLI
//!
//! Entry point for the `sultan` binary. Parses arguments, initializes
//! logging, and dispatches to the SDK.
//!
//! - `keygen` : generate a keypair
//! - `address`: derive the address for a secret key
//! - `status` : node status
//! - `balance`: balance and nonce of an address
//! - `send`   : sign and submit a transfer, optionally waiting for it
//! - `tx`     : look up a transaction
//! - `sign`   : sign offline and print the payload
//! - `version`: print build version information

mod cli;
mod logging;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use sultan_sdk::config::{ClientConfig, TOKEN_SYMBOL};
use sultan_sdk::transaction::{
    format_display_amount, parse_display_amount, sign_transaction, SignedSubmission,
    TransactionBuilder,
};
use sultan_sdk::{Address, SultanClient, SultanKeypair};

use cli::{Commands, SultanCli};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = SultanCli::parse();
    logging::init_logging(logging::DEFAULT_FILTER, cli.log_format);

    let config = cli.client_config();
    tracing::debug!(rpc_url = %config.rpc_url, "resolved client configuration");

    match cli.command {
        Commands::Keygen => keygen(),
        Commands::Address(args) => show_address(args),
        Commands::Status => query_status(config).await,
        Commands::Balance(args) => query_balance(config, args).await,
        Commands::Send(args) => send(config, args).await,
        Commands::Tx(args) => query_tx(config, args).await,
        Commands::Sign(args) => sign_offline(args),
        Commands::Version => {
            print_version();
            Ok(())
        }
    }
}

fn load_keypair(args: &cli::SecretArgs) -> Result<SultanKeypair> {
    SultanKeypair::from_hex(&args.secret_key).context("failed to load secret key")
}

fn client(config: ClientConfig) -> Result<SultanClient> {
    let rpc_url = config.rpc_url.clone();
    SultanClient::new(config).with_context(|| format!("failed to create client for {}", rpc_url))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Generates a fresh keypair and prints it.
fn keygen() -> Result<()> {
    let keypair = SultanKeypair::try_generate().context("failed to generate keypair")?;

    println!("Keypair generated. Store the secret key somewhere safe.");
    println!("  Secret key : {}", keypair.secret_key_hex());
    println!("  Public key : {}", keypair.public_key_hex());
    println!("  Address    : {}", keypair.address());
    Ok(())
}

fn show_address(args: cli::SecretArgs) -> Result<()> {
    let keypair = load_keypair(&args)?;
    println!("  Public key : {}", keypair.public_key_hex());
    println!("  Address    : {}", keypair.address());
    Ok(())
}

async fn query_status(config: ClientConfig) -> Result<()> {
    let status = client(config)?
        .get_status()
        .await
        .context("status request failed")?;
    print_json(&status)
}

async fn query_balance(config: ClientConfig, args: cli::BalanceArgs) -> Result<()> {
    let address = Address::parse(&args.address)
        .with_context(|| format!("invalid address '{}'", args.address))?;
    let balance = client(config)?
        .get_balance(&address)
        .await
        .context("balance request failed")?;

    println!(
        "{} {} (nonce {})",
        format_display_amount(balance.balance),
        TOKEN_SYMBOL,
        balance.nonce
    );
    Ok(())
}

/// Signs and submits a transfer; with `--wait`, polls until it is final.
async fn send(config: ClientConfig, args: cli::SendArgs) -> Result<()> {
    let keypair = load_keypair(&args.secret)?;
    let amount = parse_display_amount(&args.amount)
        .with_context(|| format!("invalid amount '{}'", args.amount))?;
    let client = client(config)?;

    tracing::info!(
        from = %keypair.address(),
        to = %args.to,
        amount = %format_display_amount(amount),
        "sending"
    );

    let submitted = client
        .send_atomic(&keypair, &args.to, amount, &args.memo)
        .await
        .context("failed to submit transaction")?;
    println!("Submitted {}", submitted.hash);

    if args.wait {
        let confirmed = client
            .wait_for_confirmation(&submitted.hash)
            .await
            .with_context(|| format!("transaction {} was not confirmed", submitted.hash))?;
        print_json(&confirmed)?;
    }
    Ok(())
}

async fn query_tx(config: ClientConfig, args: cli::TxArgs) -> Result<()> {
    let client = client(config)?;
    let tx = if args.wait {
        client.wait_for_confirmation(&args.hash).await
    } else {
        client.get_transaction(&args.hash).await
    }
    .with_context(|| format!("failed to fetch transaction {}", args.hash))?;
    print_json(&tx)
}

/// Prints the canonical bytes and the `POST /tx` body without sending.
fn sign_offline(args: cli::SignArgs) -> Result<()> {
    let keypair = load_keypair(&args.secret)?;
    let recipient =
        Address::parse(&args.to).with_context(|| format!("invalid recipient '{}'", args.to))?;
    let amount = parse_display_amount(&args.amount)
        .with_context(|| format!("invalid amount '{}'", args.amount))?;

    let mut builder = TransactionBuilder::new()
        .sender(keypair.address())
        .receiver(recipient)
        .amount_atomic(amount)
        .memo(args.memo)
        .nonce(args.nonce);
    if let Some(timestamp) = args.timestamp {
        builder = builder.timestamp(timestamp);
    }

    let signed = sign_transaction(&keypair, builder.build());
    let canonical = std::str::from_utf8(signed.canonical_bytes())
        .context("canonical bytes are not UTF-8")?
        .to_string();
    let submission = signed
        .into_submission()
        .context("failed to assemble submission")?;

    print_json(&OfflineSigned {
        canonical: &canonical,
        submission: &submission,
    })
}

#[derive(Serialize)]
struct OfflineSigned<'a> {
    canonical: &'a str,
    submission: &'a SignedSubmission,
}

/// Prints version information to stdout.
fn print_version() {
    println!("sultan     {}", env!("CARGO_PKG_VERSION"));
    println!("algorithm  {}", sultan_sdk::config::SIGNING_ALGORITHM);
    println!("rustc      {}", rustc_version());
}

/// Returns the Rust compiler version used to build this binary.
fn rustc_version() -> &'static str {
    option_env!("RUSTC_VERSION").unwrap_or("unknown")
}
