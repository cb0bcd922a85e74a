//! # MemChat - streaming chat client for Rust
//!
//! MemChat is a client SDK for the MemChat conversational backend:
//! - **Real-time streaming** (token-by-token responses over SSE)
//! - **Side-channel events** (ad recommendations delivered mid-stream)
//! - **Session control** (busy flag, early input unlock, cancellation)
//! - **Async/await** (built on Tokio)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use memchat::prelude::*;
//!
//! struct Printer;
//!
//! impl ChatStreamHandler for Printer {
//!     fn on_chunk(&mut self, text: &str) {
//!         print!("{}", text);
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = MemChatClient::new(ClientConfig::default())?;
//!     let session = ChatSession::new(client);
//!
//!     let request = ChatRequest::new("Hello!").with_user_id("user_001");
//!     session.send_message(request, &mut Printer).await;
//!
//!     if let Some(error) = session.last_error() {
//!         eprintln!("stream failed: {}", error);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Cancellation
//!
//! A [`SessionHandle`](memchat_client::SessionHandle) observes and
//! controls a session from elsewhere:
//!
//! ```rust,no_run
//! # use memchat::prelude::*;
//! # fn demo(session: &ChatSession<MemChatClient>) {
//! let handle = session.handle();
//! assert!(!handle.is_streaming());
//! handle.cancel(); // safe at any time, any number of times
//! # }
//! ```
//!
//! ## Architecture
//!
//! The SDK is a thin facade over `memchat-client`:
//!
//! - `buffering` - line reassembly across transport chunk boundaries
//! - `streaming` - wire records and the classified event stream
//! - `session` - the one-stream-at-a-time lifecycle controller
//! - `client` - the reqwest transport
//!
//! All types are re-exported here; depend on `memchat` alone.

pub use memchat_client as client;

pub use memchat_client::{
    classify_line, parse_chat_sse_stream, ByteStream, ChatRequest, ChatSession, ChatStreamChunk,
    ChatStreamHandler, ClientConfig, LineBuffer, MemChatClient, SessionHandle, StreamEvent,
    StreamTransport, DEFAULT_BASE_URL,
};

/// Common imports for building on the SDK.
pub mod prelude {
    pub use memchat_client::{
        ChatRequest, ChatSession, ChatStreamHandler, ClientConfig, MemChatClient, SessionHandle,
        StreamEvent, StreamTransport,
    };
}
