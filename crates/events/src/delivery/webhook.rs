//! Webhook delivery for job-completion notifications.
//!
//! [`WebhookDelivery`] POSTs a JSON-encoded [`JobCompletedPayload`] to an
//! external URL and hands back the response body. A failed attempt is
//! reported to the caller as a [`WebhookError`]; it is never retried.

use std::time::Duration;

use async_trait::async_trait;

use super::{CompletionNotifier, JobCompletedPayload};

/// Default HTTP request timeout for a delivery attempt.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for webhook delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The remote server returned a non-2xx status code.
    #[error("Webhook returned HTTP {0}")]
    HttpStatus(u16),
}

// ---------------------------------------------------------------------------
// WebhookDelivery
// ---------------------------------------------------------------------------

/// Delivers completion notifications to a webhook endpoint.
pub struct WebhookDelivery {
    client: reqwest::Client,
}

impl WebhookDelivery {
    /// Create a delivery service with the default 10-second timeout.
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_REQUEST_TIMEOUT)
    }

    /// Create a delivery service whose requests give up after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self { client }
    }

    /// Execute a single POST request and decode the response body.
    async fn try_send(
        &self,
        url: &str,
        payload: &JobCompletedPayload,
    ) -> Result<serde_json::Value, WebhookError> {
        let response = self.client.post(url).json(payload).send().await?;
        if !response.status().is_success() {
            return Err(WebhookError::HttpStatus(response.status().as_u16()));
        }
        let body = response.text().await?;
        Ok(decode_body(body))
    }
}

impl Default for WebhookDelivery {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompletionNotifier for WebhookDelivery {
    async fn deliver(
        &self,
        url: &str,
        payload: &JobCompletedPayload,
    ) -> Result<serde_json::Value, WebhookError> {
        let body = self.try_send(url, payload).await?;
        tracing::info!(url, job_id = payload.job_id, "Webhook delivered");
        Ok(body)
    }
}

/// Interpret a response body: JSON if it parses, otherwise a JSON string.
pub fn decode_body(body: String) -> serde_json::Value {
    serde_json::from_str(&body).unwrap_or(serde_json::Value::String(body))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
