use std::pin::Pin;

use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use serde::{Deserialize, Serialize};

/// Boxed byte stream pulled from the transport. Each item is one raw
/// chunk; the stream ending is the transport EOF. Dropping the stream
/// releases the underlying connection.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes>> + Send>>;

/// A chat turn submitted to the streaming endpoint. Immutable once
/// submitted; serialized as the JSON request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interest_tag: Option<Vec<String>>,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            user_id: None,
            interest_tag: None,
        }
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Explicit interest tags, used by the backend's ad matching.
    pub fn with_interest_tags(mut self, tags: Vec<String>) -> Self {
        self.interest_tag = Some(tags);
        self
    }
}

/// Transport collaborator: issues the request and hands back the
/// response byte stream.
///
/// Implementations must reject non-success responses at open time with
/// an error carrying the status and response text, so the session can
/// surface the diagnostic. Releasing the connection is dropping the
/// returned stream.
#[async_trait]
pub trait StreamTransport: Send + Sync {
    async fn open_stream(&self, request: &ChatRequest) -> Result<ByteStream>;
}

/// Receiver side of a streaming session.
///
/// All methods have no-op defaults; implement the channels the caller
/// cares about. Callbacks run synchronously between pulls, in wire
/// order. `on_terminal` is invoked exactly once per session: with the
/// fault message on error paths, with `None` on normal completion and
/// on cancellation.
pub trait ChatStreamHandler: Send {
    /// Incremental response text to append.
    fn on_chunk(&mut self, _text: &str) {}

    /// The response text is final; input may be unlocked. Side-channel
    /// data can still arrive after this.
    fn on_text_done(&mut self) {}

    /// Ad recommendations for the in-progress response.
    fn on_advertise(&mut self, _items: &[serde_json::Value]) {}

    /// The session is over. Fires exactly once, on every exit path.
    fn on_terminal(&mut self, _error: Option<&str>) {}
}
