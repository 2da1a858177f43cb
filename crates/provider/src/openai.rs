use relay_core::config::Config;
use relay_core::error::RelayError;
use bytes::Bytes;
use relay_core::types::responses::UpstreamPayload;
use serde_json::Value;

/// Client for the OpenAI Responses API (`POST /v1/responses`).
pub struct ResponsesClient {
    client: reqwest::Client,
    url: String,
}

impl ResponsesClient {
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    /// Build a client from the current config snapshot.
    pub fn from_config(config: &Config) -> Result<Self, RelayError> {
        let client = relay_core::proxy::build_http_client(config)
            .map_err(|e| RelayError::Internal(format!("failed to build HTTP client: {e}")))?;
        Ok(Self::new(client, config.upstream.responses_url()))
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Send one payload and return the decoded response body.
    ///
    /// Non-2xx statuses become [`RelayError::Upstream`] carrying the raw
    /// body. A body that cannot be read or decoded reads as `{}`.
    pub async fn create(
        &self,
        api_key: &str,
        payload: &UpstreamPayload,
    ) -> Result<Value, RelayError> {
        let body = serde_json::to_vec(payload)?;

        let resp = self
            .client
            .post(&self.url)
            .header("authorization", format!("Bearer {api_key}"))
            .header("content-type", "application/json")
            .body(body)
            .send()
            .await?;

        let status = resp.status();
        let raw = resp.bytes().await.unwrap_or_else(|e| {
            tracing::debug!("Failed to read upstream body: {e}");
            Bytes::new()
        });

        if !status.is_success() {
            return Err(RelayError::upstream(status.as_u16(), raw));
        }

        Ok(crate::decode_body(&raw))
    }
}
