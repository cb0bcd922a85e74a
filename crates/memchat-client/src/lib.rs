//! Streaming client for the memchat conversational backend.
//!
//! The backend answers a chat request with one long-lived HTTP response
//! that pushes newline-delimited `data:` records. This crate consumes
//! that stream: [`LineBuffer`] reassembles lines across chunk
//! boundaries, [`parse_chat_sse_stream`] classifies them into
//! [`StreamEvent`]s, and [`ChatSession`] drives one stream at a time
//! with exactly one terminal notification per session.

pub mod buffering;
pub mod client;
pub mod config;
pub mod session;
pub mod streaming;
pub mod traits;

pub use buffering::LineBuffer;
pub use client::MemChatClient;
pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use session::{ChatSession, SessionHandle};
pub use streaming::{classify_line, parse_chat_sse_stream, ChatStreamChunk, StreamEvent};
pub use traits::{ByteStream, ChatRequest, ChatStreamHandler, StreamTransport};
