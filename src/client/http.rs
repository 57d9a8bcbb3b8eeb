use std::time::Duration;

use serde_json::Value;
use tracing::debug;

use super::Transport;
use crate::core::{FapiaoError, Result};

/// Request timeout used by [`HttpTransport::new`].
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Blocking HTTPS transport backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FapiaoError::Transport(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn post_json(&self, url: &str, body: &Value) -> Result<Value> {
        let resp = self
            .client
            .post(url)
            .json(body)
            .send()
            .map_err(|e| FapiaoError::Transport(e.to_string()))?;

        let status = resp.status();
        let text = resp
            .text()
            .map_err(|e| FapiaoError::Transport(e.to_string()))?;
        debug!(%status, body_len = text.len(), "received response");

        if !status.is_success() {
            return Err(FapiaoError::Transport(format!("HTTP {status}: {text}")));
        }

        serde_json::from_str(&text)
            .map_err(|e| FapiaoError::Payload(format!("response body is not JSON: {e}")))
    }
}
