//! HTTP transport collaborator.
//!
//! The gateway talks to the record server through the [`Transport`] trait so
//! that tests can substitute an in-process fake. The production
//! implementation is [`HttpTransport`]: reqwest underneath, with a fixed
//! retry count and fixed delay between attempts. Retries stay below the
//! gateway; only exhaustion surfaces as an error. No cancellation is
//! exposed; an in-flight request runs to completion, success or retry
//! exhaustion.

use std::time::Duration;

use acuity_fhir::OperationOutcome;
use async_trait::async_trait;
use reqwest::Method;
use tracing::{debug, warn};

/// One request to the record server.
#[derive(Clone, Debug)]
pub struct TransportRequest {
    pub method: Method,
    /// Server base address, e.g. `https://fhir.example.org/r4`.
    pub base_address: String,
    /// Resource path relative to the base address, e.g. `Observation`.
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub query: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

/// Failures below the gateway.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The request never produced a usable response (connect, timeout,
    /// decode).
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-success status, possibly carrying a
    /// structured diagnostic payload.
    #[error("server returned HTTP {status}")]
    Status {
        status: u16,
        outcome: Option<OperationOutcome>,
    },
}

impl TransportError {
    fn is_retryable(&self) -> bool {
        match self {
            TransportError::Network(err) => !err.is_decode(),
            // Server-side failures may be transient; client errors are not.
            TransportError::Status { status, .. } => *status >= 500,
        }
    }
}

/// A request/response channel to the record server.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Deliver one request and return the response body as JSON.
    async fn request(&self, request: TransportRequest) -> Result<serde_json::Value, TransportError>;
}

/// Retry configuration of the HTTP transport.
#[derive(Clone, Copy, Debug)]
pub struct RetryPolicy {
    /// Total attempts per request, including the first.
    pub attempts: u32,
    /// Fixed delay between attempts.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            attempts: 3,
            delay: Duration::from_millis(500),
        }
    }
}

/// reqwest-backed [`Transport`] with fixed-count, fixed-delay retry.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
    retry: RetryPolicy,
}

impl HttpTransport {
    /// Transport with the default retry policy.
    pub fn new() -> Self {
        Self::with_retry_policy(RetryPolicy::default())
    }

    /// Transport with an explicit retry policy.
    pub fn with_retry_policy(retry: RetryPolicy) -> Self {
        HttpTransport {
            client: reqwest::Client::new(),
            retry,
        }
    }

    async fn send_once(
        &self,
        request: &TransportRequest,
        url: &str,
    ) -> Result<serde_json::Value, TransportError> {
        let mut builder = self
            .client
            .request(request.method.clone(), url)
            .query(&request.query);

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        // Any JSON object parses as an outcome; one without diagnostics
        // falls through to the generic message downstream.
        let outcome = response.json::<OperationOutcome>().await.ok();
        Err(TransportError::Status {
            status: status.as_u16(),
            outcome,
        })
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn request(&self, request: TransportRequest) -> Result<serde_json::Value, TransportError> {
        let url = format!(
            "{}/{}",
            request.base_address.trim_end_matches('/'),
            request.path
        );
        let attempts = self.retry.attempts.max(1);

        let mut attempt = 0;
        loop {
            match self.send_once(&request, &url).await {
                Ok(value) => return Ok(value),
                Err(err) => {
                    attempt += 1;
                    if attempt == attempts || !err.is_retryable() {
                        if attempt == attempts && err.is_retryable() {
                            warn!(attempts, url = %url, error = %err, "request retries exhausted");
                        }
                        return Err(err);
                    }
                    debug!(
                        attempt,
                        attempts,
                        url = %url,
                        error = %err,
                        "request attempt failed, retrying"
                    );
                    tokio::time::sleep(self.retry.delay).await;
                }
            }
        }
    }
}
