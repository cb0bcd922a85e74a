use std::pin::Pin;

use anyhow::Result;
use futures::{Stream, StreamExt};
use serde::{Deserialize, Serialize};

use crate::buffering::LineBuffer;
use crate::traits::ByteStream;

/// Frame prefix carried by every event line of the chat stream.
pub const DATA_PREFIX: &str = "data: ";

/// End-of-stream sentinel some backend builds send instead of a `done`
/// record.
pub const DONE_SENTINEL: &str = "[DONE]";

/// A classified frame from the chat stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamEvent {
    /// Incremental response text to append.
    Message {
        content: String,
    },

    /// The response text is final. Side-channel data may still follow,
    /// so this is not stream completion.
    TextDone,

    /// Ad recommendations associated with the in-progress response.
    /// Items are passed through opaquely; the backend decides their shape.
    Advertise {
        items: Vec<serde_json::Value>,
    },

    /// Explicit normal termination.
    Done,

    /// Server-signaled failure. Terminal.
    Error {
        message: String,
    },
}

/// One decoded `data:` record from the wire.
///
/// The backend sends these fields in any combination; field presence
/// decides which events the record yields. Unknown fields (e.g. the
/// `heartbeat` some endpoints emit) are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatStreamChunk {
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub text_done: Option<bool>,
    #[serde(default)]
    pub advertise: Option<Vec<serde_json::Value>>,
    #[serde(default)]
    pub done: Option<bool>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ChatStreamChunk {
    /// Fan a record out into events, in fixed priority order: response
    /// text, text-done marker, advertise payload, completion marker,
    /// error. One record may legitimately yield several events.
    pub fn to_stream_events(&self) -> Vec<StreamEvent> {
        let mut events = Vec::new();

        if let Some(content) = &self.response {
            if !content.is_empty() {
                events.push(StreamEvent::Message {
                    content: content.clone(),
                });
            }
        }

        if self.text_done.unwrap_or(false) {
            events.push(StreamEvent::TextDone);
        }

        if let Some(items) = &self.advertise {
            events.push(StreamEvent::Advertise {
                items: items.clone(),
            });
        }

        if self.done.unwrap_or(false) {
            events.push(StreamEvent::Done);
        }

        if let Some(message) = &self.error {
            events.push(StreamEvent::Error {
                message: message.clone(),
            });
        }

        events
    }
}

/// Classify a single decoded line into zero or more events.
///
/// Lines without the `data: ` prefix (blank lines included) carry no
/// frame. An empty payload and the `[DONE]` sentinel both mean normal
/// termination. A payload that fails to parse as a record is a
/// recoverable fault: it is logged and dropped, and the stream goes on.
pub fn classify_line(line: &str) -> Vec<StreamEvent> {
    if line.trim().is_empty() {
        return Vec::new();
    }

    let Some(payload) = line.strip_prefix(DATA_PREFIX) else {
        return Vec::new();
    };

    let payload = payload.trim();
    if payload.is_empty() || payload == DONE_SENTINEL {
        return vec![StreamEvent::Done];
    }

    match serde_json::from_str::<ChatStreamChunk>(payload) {
        Ok(chunk) => chunk.to_stream_events(),
        Err(e) => {
            tracing::warn!("Dropping undecodable stream record: {} ({})", e, line);
            Vec::new()
        }
    }
}

/// Decode a transport byte stream into classified events.
///
/// Runs the line decoder across chunk boundaries and classifies each
/// complete line, yielding events lazily so the session dispatches each
/// one before the next pull. Decode faults never surface as items; only
/// transport errors do. The stream ends after a `Done` or `Error` event
/// even if more bytes follow, matching the backend's framing.
pub fn parse_chat_sse_stream(
    bytes: ByteStream,
) -> Pin<Box<dyn Stream<Item = Result<StreamEvent>> + Send>> {
    Box::pin(async_stream::stream! {
        let mut chunks = bytes;
        let mut buffer = LineBuffer::with_capacity(8192);

        while let Some(chunk_result) = chunks.next().await {
            match chunk_result {
                Ok(bytes) => {
                    buffer.extend(&bytes);

                    while let Some(line_result) = buffer.next_line() {
                        match line_result {
                            Ok(line) => {
                                for event in classify_line(&line) {
                                    let terminal = matches!(
                                        event,
                                        StreamEvent::Done | StreamEvent::Error { .. }
                                    );
                                    yield Ok(event);
                                    if terminal {
                                        return;
                                    }
                                }
                            }
                            Err(e) => {
                                tracing::warn!("Dropping undecodable stream line: {}", e);
                            }
                        }
                    }
                }
                Err(e) => {
                    yield Err(e);
                    return;
                }
            }
        }

        // Transport EOF. Anything after the last newline never became a
        // complete frame and is discarded.
        if !buffer.is_empty() {
            tracing::debug!("Discarding {} unterminated bytes at EOF", buffer.len());
        }
    })
}
