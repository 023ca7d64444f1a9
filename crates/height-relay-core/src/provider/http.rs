use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Url};
use tracing::{debug, trace};

use crate::error::CoreError;
use crate::types::{PlainText, UpstreamBlock};

use super::parsing::parse_block_height_body;
use super::HeightProvider;

// ==============================================================================
// HttpProvider — client for blockchain.info-compatible query endpoints
// ==============================================================================

pub struct HttpProvider {
    client: reqwest::Client,
    base_url: String,
}

impl HttpProvider {
    /// Create a client for the provider rooted at `base_url`
    /// (for example `https://blockchain.info`). Every request is bounded by
    /// `timeout`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, CoreError> {
        let base_url = parse_base_url(base_url)?;

        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10).min(timeout))
            .timeout(timeout)
            .pool_max_idle_per_host(8)
            .build()
            .map_err(|e| CoreError::Provider(format!("build HTTP client: {e}")))?;

        Ok(Self { client, base_url })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    async fn get(&self, path: &str) -> Result<reqwest::Response, CoreError> {
        let url = self.endpoint(path);
        debug!(%url, "provider request");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| CoreError::Provider(format!("HTTP error: {e}")))?;
        let status = response.status();
        debug!(%url, %status, "provider response");

        if !status.is_success() {
            return Err(CoreError::Provider(format!(
                "{url} returned status {status}"
            )));
        }
        Ok(response)
    }

    async fn get_plain(&self, path: &str) -> Result<PlainText, CoreError> {
        let response = self.get(path).await?;
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let body = response
            .bytes()
            .await
            .map_err(|e| CoreError::Provider(format!("read response body: {e}")))?
            .to_vec();
        trace!(path, body = %String::from_utf8_lossy(&body), "provider response body");

        Ok(PlainText { body, content_type })
    }
}

#[async_trait]
impl HeightProvider for HttpProvider {
    async fn latest_height(&self) -> Result<PlainText, CoreError> {
        self.get_plain("q/getblockcount").await
    }

    async fn current_difficulty(&self) -> Result<PlainText, CoreError> {
        self.get_plain("q/getdifficulty").await
    }

    async fn block_at_height(&self, height: u64) -> Result<UpstreamBlock, CoreError> {
        let response = self
            .get(&format!("block-height/{height}?format=json"))
            .await?;
        let body = response
            .text()
            .await
            .map_err(|e| CoreError::Provider(format!("read block-height body: {e}")))?;
        debug!(height, body_len = body.len(), "block-height response");

        parse_block_height_body(&body)
    }
}

/// Validate an HTTP(S) base URL and strip any trailing slash so endpoint
/// paths can be appended directly.
fn parse_base_url(base_url: &str) -> Result<String, CoreError> {
    let parsed = Url::parse(base_url).map_err(|e| {
        CoreError::Provider(format!(
            "invalid provider URL `{base_url}`: expected HTTP(S) URL ({e})"
        ))
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(base_url.trim_end_matches('/').to_owned()),
        other => Err(CoreError::Provider(format!(
            "unsupported provider URL scheme `{other}`; expected http or https"
        ))),
    }
}
