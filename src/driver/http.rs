use super::{WebhookClient, WebhookResponse};
use crate::error::ExecutionError;
use reqwest::blocking::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::info;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Calls webhooks over HTTP with a fixed per-request timeout.
#[derive(Debug, Clone)]
pub struct HttpWebhookClient {
    client: Client,
}

impl HttpWebhookClient {
    pub fn new() -> Result<Self, ExecutionError> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, ExecutionError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ExecutionError::Http {
                url: String::new(),
                message: format!("could not build HTTP client: {e}"),
            })?;
        Ok(Self { client })
    }
}

impl WebhookClient for HttpWebhookClient {
    fn post(&self, url: &str, payload: &Value) -> Result<WebhookResponse, ExecutionError> {
        info!(url, "calling webhook");
        let http_error = |e: reqwest::Error| ExecutionError::Http {
            url: url.to_string(),
            message: e.to_string(),
        };
        let response = self.client.post(url).json(payload).send().map_err(http_error)?;
        let status = response.status().as_u16();
        let body = response.text().map_err(http_error)?;
        Ok(WebhookResponse { status, body })
    }
}
