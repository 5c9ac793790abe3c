//! HTTP transport.
//!
//! [`Transport`] is the seam between the client and the wire: two JSON
//! operations, `get` and `post`, relative to a base URL. [`HttpTransport`]
//! implements it over `reqwest`; tests swap in scripted transports.
//!
//! Bodies cross the seam as serialized bytes in both directions. Amounts are
//! `u128`, wider than a `serde_json::Value` number can hold, so the client
//! serializes and decodes its own typed structs.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use thiserror::Error;
use tracing::debug;

use crate::config::ClientConfig;

/// Errors from the HTTP layer.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection, TLS, or protocol failure.
    #[error("HTTP error: {0}")]
    Http(#[source] reqwest::Error),

    /// The node answered with a non-2xx status.
    #[error("node returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body was not the JSON we expected.
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The request exceeded its per-request timeout.
    #[error("request timed out")]
    Timeout,
}

impl TransportError {
    fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else {
            TransportError::Http(err)
        }
    }

    /// `true` for failures where sending the same request again may succeed:
    /// network errors, timeouts, 429 and 5xx.
    pub fn is_retryable(&self) -> bool {
        match self {
            TransportError::Http(_) | TransportError::Timeout => true,
            TransportError::Status { status, .. } => *status == 429 || *status >= 500,
            TransportError::Decode(_) => false,
        }
    }
}

/// JSON request/response over some transport.
///
/// Both methods return the body of a 2xx reply. Any other status is
/// [`TransportError::Status`].
#[async_trait]
pub trait Transport: Send + Sync {
    /// `GET {base}{path}`.
    async fn get(&self, path: &str) -> Result<Vec<u8>, TransportError>;

    /// `POST {base}{path}` with `body`, already serialized JSON, sent as is.
    async fn post(&self, path: &str, body: Vec<u8>) -> Result<Vec<u8>, TransportError>;
}

/// [`Transport`] over `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    base_url: String,
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!("sultan-sdk/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(TransportError::Http)?;
        Ok(Self {
            base_url: config.rpc_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn read_body(resp: reqwest::Response) -> Result<Vec<u8>, TransportError> {
        let status = resp.status();
        let body = resp.bytes().await.map_err(TransportError::from_reqwest)?;
        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }
        Ok(body.to_vec())
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, path: &str) -> Result<Vec<u8>, TransportError> {
        let url = self.url(path);
        debug!(%url, "GET");
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(TransportError::from_reqwest)?;
        Self::read_body(resp).await
    }

    async fn post(&self, path: &str, body: Vec<u8>) -> Result<Vec<u8>, TransportError> {
        let url = self.url(path);
        debug!(%url, bytes = body.len(), "POST");
        let resp = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(TransportError::from_reqwest)?;
        Self::read_body(resp).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_base_and_path() {
        let transport = HttpTransport::new(&ClientConfig::new("http://127.0.0.1:9000/")).unwrap();
        assert_eq!(transport.base_url(), "http://127.0.0.1:9000");
        assert_eq!(transport.url("/status"), "http://127.0.0.1:9000/status");
    }

    #[test]
    fn retryable_classification() {
        assert!(TransportError::Timeout.is_retryable());
        assert!(TransportError::Status {
            status: 503,
            body: String::new()
        }
        .is_retryable());
        assert!(TransportError::Status {
            status: 429,
            body: String::new()
        }
        .is_retryable());
        assert!(!TransportError::Status {
            status: 400,
            body: "invalid signature".into()
        }
        .is_retryable());

        let decode = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        assert!(!TransportError::Decode(decode).is_retryable());
    }
}
