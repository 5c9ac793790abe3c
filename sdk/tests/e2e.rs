//! End-to-end tests against a mock Sultan node.
//!
//! A `wiremock` server stands in for the RPC endpoint, so these exercise the
//! real `reqwest` transport: URL construction, JSON bodies, status handling.
//! The posted `/tx` body is checked the way the node checks it.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use sultan_sdk::network::{ClientError, SultanClient, TransportError};
use sultan_sdk::transaction::{verify_submission, SignedSubmission, TransactionStatus};
use sultan_sdk::{Address, ClientConfig, SultanKeypair};

// ---------------------------------------------------------------------------
// Test Helpers
// ---------------------------------------------------------------------------

fn client_for(server: &MockServer) -> SultanClient {
    let config = ClientConfig::new(server.uri())
        .with_poll_interval(Duration::from_millis(10))
        .with_confirmation_timeout(Duration::from_secs(5));
    SultanClient::new(config).expect("client")
}

fn recipient() -> Address {
    SultanKeypair::from_seed(&[9u8; 32]).address()
}

fn tx_json(hash: &str, status: &str) -> serde_json::Value {
    let block_height = (status == "confirmed").then_some(42u64);
    json!({
        "hash": hash,
        "from": "sultan1abc...",
        "to": "sultan1def...",
        "amount": 1_500_000_000u64,
        "block_height": block_height,
        "status": status,
    })
}

async fn mount_balance(server: &MockServer, address: &Address, balance: u64, nonce: u64) {
    Mock::given(method("GET"))
        .and(path(format!("/balance/{}", address)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "address": address.as_str(),
            "balance": balance,
            "nonce": nonce,
        })))
        .mount(server)
        .await;
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_get_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "node_id": "validator-3",
            "block_height": 1_234_567,
            "validators": 21,
            "uptime_seconds": 3600,
            "version": "1.2.0",
            "shard_count": 16,
            "tps_capacity": 64_000,
        })))
        .mount(&server)
        .await;

    let status = client_for(&server).get_status().await.unwrap();
    assert_eq!(status.node_id, "validator-3");
    assert_eq!(status.block_height, 1_234_567);
    assert_eq!(status.shard_count, 16);
}

#[tokio::test]
async fn test_get_balance_and_display() {
    let server = MockServer::start().await;
    let address = recipient();
    mount_balance(&server, &address, 12_500_000_000, 4).await;

    let client = client_for(&server);
    let balance = client.get_balance(&address).await.unwrap();
    assert_eq!(balance.balance, 12_500_000_000);
    assert_eq!(balance.nonce, 4);
    assert_eq!(client.get_balance_display(&address).await.unwrap(), 12.5);
}

#[tokio::test]
async fn test_get_transaction() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tx/abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(tx_json("abc123", "confirmed")))
        .mount(&server)
        .await;

    let tx = client_for(&server).get_transaction("abc123").await.unwrap();
    assert_eq!(tx.status, TransactionStatus::Confirmed);
    assert_eq!(tx.block_height, Some(42));
}

#[tokio::test]
async fn test_http_error_status_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/status"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&server)
        .await;

    let err = client_for(&server).get_status().await.unwrap_err();
    match &err {
        ClientError::Transport(TransportError::Status { status, body }) => {
            assert_eq!(*status, 503);
            assert_eq!(body, "overloaded");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_garbage_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/status"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let err = client_for(&server).get_status().await.unwrap_err();
    assert!(matches!(
        err,
        ClientError::Transport(TransportError::Decode(_))
    ));
}

// ---------------------------------------------------------------------------
// Send
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_send_posts_a_verifiable_submission() {
    let server = MockServer::start().await;
    let keypair = SultanKeypair::from_seed(&[1u8; 32]);
    let sender = keypair.address();
    mount_balance(&server, &sender, 100_000_000_000, 7).await;

    Mock::given(method("POST"))
        .and(path("/tx"))
        .respond_with(ResponseTemplate::new(200).set_body_json(tx_json("feed01", "pending")))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let resp = client
        .send(&keypair, recipient().as_str(), 1.5, "lunch")
        .await
        .unwrap();
    assert_eq!(resp.hash, "feed01");
    assert_eq!(resp.status, TransactionStatus::Pending);

    let requests = server.received_requests().await.unwrap();
    let post = requests
        .iter()
        .find(|r| r.method.as_str() == "POST")
        .expect("a POST /tx was made");

    // Wire shape: amount numeric in tx, hex signature and key.
    let raw: serde_json::Value = serde_json::from_slice(&post.body).unwrap();
    assert_eq!(raw["tx"]["amount"], json!(1_500_000_000u64));
    assert_eq!(raw["tx"]["nonce"], json!(7));
    assert_eq!(raw["tx"]["memo"], json!("lunch"));
    assert_eq!(raw["tx"]["from"], json!(sender.as_str()));
    assert_eq!(raw["public_key"], json!(keypair.public_key_hex()));
    assert_eq!(raw["signature"].as_str().unwrap().len(), 128);

    // And it verifies the way the node verifies it.
    let submission: SignedSubmission = serde_json::from_slice(&post.body).unwrap();
    verify_submission(&submission).unwrap();
}

#[tokio::test]
async fn test_send_posts_amounts_wider_than_u64() {
    let server = MockServer::start().await;
    let keypair = SultanKeypair::from_seed(&[2u8; 32]);
    mount_balance(&server, &keypair.address(), 0, 0).await;

    let amount = u64::MAX as u128 + 1;
    Mock::given(method("POST"))
        .and(path("/tx"))
        .and(header("content-type", "application/json"))
        .and(body_string_contains(r#""amount":18446744073709551616"#))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!(
            r#"{{"hash":"feed02","from":"{}","to":"{}","amount":{},"status":"pending"}}"#,
            keypair.address(),
            recipient(),
            amount
        )))
        .expect(1)
        .mount(&server)
        .await;

    let resp = client_for(&server)
        .send_atomic(&keypair, recipient().as_str(), amount, "")
        .await
        .unwrap();
    assert_eq!(resp.amount, amount);

    let requests = server.received_requests().await.unwrap();
    let post = requests
        .iter()
        .find(|r| r.method.as_str() == "POST")
        .expect("a POST /tx was made");
    let submission: SignedSubmission = serde_json::from_slice(&post.body).unwrap();
    assert_eq!(submission.tx.amount, amount);
    verify_submission(&submission).unwrap();
}

#[tokio::test]
async fn test_send_rejects_bad_recipient_before_signing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tx"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let keypair = SultanKeypair::generate();
    let err = client_for(&server)
        .send(&keypair, "cosmos1notours", 1.0, "")
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::InvalidRecipient { .. }));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_send_rejects_negative_amount() {
    let server = MockServer::start().await;
    let keypair = SultanKeypair::generate();
    let err = client_for(&server)
        .send(&keypair, recipient().as_str(), -1.0, "")
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Amount(_)));
}

#[tokio::test]
async fn test_node_rejection_is_not_retryable() {
    let server = MockServer::start().await;
    let keypair = SultanKeypair::generate();
    mount_balance(&server, &keypair.address(), 0, 0).await;
    Mock::given(method("POST"))
        .and(path("/tx"))
        .respond_with(ResponseTemplate::new(400).set_body_string("invalid signature"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .send_atomic(&keypair, recipient().as_str(), 1, "")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ClientError::Transport(TransportError::Status { status: 400, .. })
    ));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_non_hex_hash_never_reaches_the_node() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(tx_json("ab", "confirmed")))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    for bad in ["../status", "x?y", "ab/cd"] {
        let err = client.get_transaction(bad).await.unwrap_err();
        assert!(matches!(err, ClientError::InvalidHash { .. }), "{bad}");
        assert!(!err.is_retryable());
    }
}

// ---------------------------------------------------------------------------
// Confirmation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_wait_for_confirmation_polls_until_confirmed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tx/beef"))
        .respond_with(ResponseTemplate::new(200).set_body_json(tx_json("beef", "pending")))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/tx/beef"))
        .respond_with(ResponseTemplate::new(200).set_body_json(tx_json("beef", "confirmed")))
        .mount(&server)
        .await;

    let tx = client_for(&server).wait_for_confirmation("beef").await.unwrap();
    assert_eq!(tx.status, TransactionStatus::Confirmed);

    let polls = server.received_requests().await.unwrap().len();
    assert_eq!(polls, 3);
}

#[tokio::test]
async fn test_wait_for_confirmation_tolerates_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tx/cafe"))
        .respond_with(ResponseTemplate::new(404))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/tx/cafe"))
        .respond_with(ResponseTemplate::new(200).set_body_json(tx_json("cafe", "confirmed")))
        .mount(&server)
        .await;

    let tx = client_for(&server).wait_for_confirmation("cafe").await.unwrap();
    assert_eq!(tx.hash, "cafe");
}

#[tokio::test]
async fn test_wait_for_confirmation_reports_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tx/dead"))
        .respond_with(ResponseTemplate::new(200).set_body_json(tx_json("dead", "failed")))
        .mount(&server)
        .await;

    let err = client_for(&server).wait_for_confirmation("dead").await.unwrap_err();
    assert!(matches!(err, ClientError::TransactionFailed { ref hash } if hash == "dead"));
}
