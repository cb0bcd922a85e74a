// Reqwest-backed transport for the memchat backend (HTTP direct, no SDK)

use anyhow::{Context, Result};
use async_trait::async_trait;
use futures::TryStreamExt;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};

use crate::config::ClientConfig;
use crate::traits::{ByteStream, ChatRequest, StreamTransport};

/// HTTP client for the memchat backend's streaming chat endpoint.
pub struct MemChatClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl MemChatClient {
    /// Create a client from configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("text/event-stream"));

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let http_client = builder.build().context("Failed to create HTTP client")?;

        Ok(Self {
            http_client,
            base_url: config.base_url,
        })
    }

    /// The backend base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl StreamTransport for MemChatClient {
    async fn open_stream(&self, request: &ChatRequest) -> Result<ByteStream> {
        let response = self
            .http_client
            .post(format!("{}/chat", self.base_url))
            .json(request)
            .send()
            .await
            .context("Failed to send chat request")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("Backend error ({}): {}", status, error_text);
        }

        Ok(Box::pin(
            response.bytes_stream().map_err(anyhow::Error::from),
        ))
    }
}
