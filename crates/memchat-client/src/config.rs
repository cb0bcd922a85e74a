use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default backend address (the development server's port).
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5019";

/// Connection settings for [`MemChatClient`](crate::MemChatClient).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the backend, without a trailing slash.
    pub base_url: String,
    /// Whole-request timeout. Streaming responses usually leave this
    /// unset and rely on the transport's own limits; when set, a hung
    /// stream surfaces as an ordinary read fault.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, None);
    }

    #[test]
    fn test_builder_methods() {
        let config = ClientConfig::new()
            .with_base_url("http://backend:8080")
            .with_timeout(Duration::from_secs(60));

        assert_eq!(config.base_url, "http://backend:8080");
        assert_eq!(config.timeout, Some(Duration::from_secs(60)));
    }

    #[test]
    fn test_serde_roundtrip() {
        let config = ClientConfig::new().with_base_url("http://backend:8080");

        let json = serde_json::to_string(&config).unwrap();
        let deserialized: ClientConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.base_url, config.base_url);
    }
}
