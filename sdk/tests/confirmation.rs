//! Confirmation deadline behavior under a paused tokio clock.
//!
//! A scripted in-memory transport replays canned `/tx/{hash}` replies, so
//! time only moves when every task is idle and a 30 second deadline runs in
//! microseconds.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use sultan_sdk::network::{ClientError, SultanClient, Transport, TransportError};
use sultan_sdk::transaction::{SubmissionState, TransactionStatus};
use sultan_sdk::ClientConfig;

// ---------------------------------------------------------------------------
// Scripted transport
// ---------------------------------------------------------------------------

#[derive(Clone)]
enum Reply {
    Status(&'static str),
    Error(u16),
    Hang,
}

/// Replays `script` in order; the last entry repeats forever.
#[derive(Clone)]
struct ScriptedTransport {
    script: Arc<Mutex<VecDeque<Reply>>>,
    polls: Arc<AtomicUsize>,
}

impl ScriptedTransport {
    fn new(script: Vec<Reply>) -> Self {
        Self {
            script: Arc::new(Mutex::new(script.into())),
            polls: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn polls(&self) -> usize {
        self.polls.load(Ordering::SeqCst)
    }

    fn next_reply(&self) -> Reply {
        let mut script = self.script.lock().unwrap();
        if script.len() > 1 {
            script.pop_front().unwrap()
        } else {
            script.front().cloned().unwrap()
        }
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn get(&self, path: &str) -> Result<Vec<u8>, TransportError> {
        self.polls.fetch_add(1, Ordering::SeqCst);
        let hash = path.trim_start_matches("/tx/");
        match self.next_reply() {
            Reply::Status(status) => Ok(json!({
                "hash": hash,
                "from": "sultan1abc...",
                "to": "sultan1def...",
                "amount": 1,
                "block_height": null,
                "status": status,
            })
            .to_string()
            .into_bytes()),
            Reply::Error(status) => Err(TransportError::Status {
                status,
                body: String::new(),
            }),
            Reply::Hang => std::future::pending().await,
        }
    }

    async fn post(&self, _path: &str, _body: Vec<u8>) -> Result<Vec<u8>, TransportError> {
        unreachable!("confirmation tests never submit")
    }
}

fn client(transport: ScriptedTransport) -> SultanClient<ScriptedTransport> {
    // Defaults: 30 s deadline, 2 s poll interval.
    SultanClient::with_transport(ClientConfig::new("http://scripted"), transport)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn pending_forever_times_out_after_deadline() {
    let transport = ScriptedTransport::new(vec![Reply::Status("pending")]);
    let client = client(transport.clone());

    let started = tokio::time::Instant::now();
    let err = client.wait_for_confirmation("abc").await.unwrap_err();
    let elapsed = started.elapsed();

    match &err {
        ClientError::ConfirmationTimeout { hash, waited } => {
            assert_eq!(hash, "abc");
            assert_eq!(*waited, Duration::from_secs(30));
        }
        other => panic!("expected timeout, got {other:?}"),
    }
    assert!(err.is_retryable());
    assert!(elapsed >= Duration::from_secs(30));
    assert!(elapsed < Duration::from_secs(31));

    // One poll per 2 s block inside a 30 s window.
    let polls = transport.polls();
    assert!((15..=16).contains(&polls), "polled {} times", polls);
}

#[tokio::test(start_paused = true)]
async fn hung_request_still_hits_the_deadline() {
    let transport = ScriptedTransport::new(vec![Reply::Hang]);
    let client = client(transport.clone());

    let err = client.wait_for_confirmation("5e1f").await.unwrap_err();
    assert!(matches!(err, ClientError::ConfirmationTimeout { .. }));
    assert_eq!(transport.polls(), 1);
}

#[tokio::test(start_paused = true)]
async fn confirmed_before_deadline_returns_transaction() {
    let transport = ScriptedTransport::new(vec![
        Reply::Status("pending"),
        Reply::Status("pending"),
        Reply::Status("confirmed"),
    ]);
    let client = client(transport.clone());

    let started = tokio::time::Instant::now();
    let tx = client.wait_for_confirmation("0c").await.unwrap();
    assert_eq!(tx.status, TransactionStatus::Confirmed);
    assert_eq!(transport.polls(), 3);
    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_secs(4) && elapsed < Duration::from_secs(5));
    assert_eq!(
        SubmissionState::from_status(tx.status),
        SubmissionState::Confirmed
    );
}

#[tokio::test(start_paused = true)]
async fn transient_errors_are_polled_through() {
    let transport = ScriptedTransport::new(vec![
        Reply::Error(503),
        Reply::Error(404),
        Reply::Status("confirmed"),
    ]);
    let tx = client(transport.clone())
        .wait_for_confirmation("f1a")
        .await
        .unwrap();
    assert_eq!(tx.hash, "f1a");
    assert_eq!(transport.polls(), 3);
}

#[tokio::test(start_paused = true)]
async fn permanent_error_stops_polling() {
    let transport = ScriptedTransport::new(vec![Reply::Error(400)]);
    let err = client(transport.clone())
        .wait_for_confirmation("bad")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ClientError::Transport(TransportError::Status { status: 400, .. })
    ));
    assert_eq!(transport.polls(), 1);
}

#[tokio::test(start_paused = true)]
async fn failed_status_is_final() {
    let transport = ScriptedTransport::new(vec![Reply::Status("pending"), Reply::Status("failed")]);
    let err = client(transport)
        .wait_for_confirmation("0fe")
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::TransactionFailed { .. }));
    assert!(!err.is_retryable());
}

#[tokio::test(start_paused = true)]
async fn custom_deadline_is_honored() {
    let transport = ScriptedTransport::new(vec![Reply::Status("pending")]);
    let config = ClientConfig::new("http://scripted")
        .with_confirmation_timeout(Duration::from_secs(5))
        .with_poll_interval(Duration::from_secs(1));
    let client = SultanClient::with_transport(config, transport);

    let err = client.wait_for_confirmation("0a").await.unwrap_err();
    assert!(matches!(
        err,
        ClientError::ConfirmationTimeout { waited, .. } if waited == Duration::from_secs(5)
    ));
}

#[tokio::test(start_paused = true)]
async fn non_hex_hash_is_refused_without_polling() {
    let transport = ScriptedTransport::new(vec![Reply::Status("confirmed")]);
    let err = client(transport.clone())
        .wait_for_confirmation("../status")
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::InvalidHash { .. }));
    assert_eq!(transport.polls(), 0);
}
