// Cancel an in-flight stream from another task via a SessionHandle.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use memchat_client::{
    ChatRequest, ChatSession, ChatStreamHandler, ClientConfig, MemChatClient, DEFAULT_BASE_URL,
};

struct Printer;

impl ChatStreamHandler for Printer {
    fn on_chunk(&mut self, text: &str) {
        print!("{}", text);
    }

    fn on_terminal(&mut self, error: Option<&str>) {
        match error {
            Some(e) => eprintln!("\nstream failed: {}", e),
            None => println!("\n[stream over]"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let base_url =
        std::env::var("MEMCHAT_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

    let client = MemChatClient::new(ClientConfig::new().with_base_url(base_url))?;
    let session = Arc::new(ChatSession::new(client));
    let handle = session.handle();

    let worker = tokio::spawn({
        let session = Arc::clone(&session);
        async move {
            let mut printer = Printer;
            session
                .send_message(
                    ChatRequest::new("Tell me a very long story about the sea."),
                    &mut printer,
                )
                .await;
        }
    });

    // Let some text arrive, then pull the plug.
    tokio::time::sleep(Duration::from_millis(500)).await;
    handle.cancel();

    worker.await?;
    println!("cancelled; last error: {:?}", handle.last_error());

    Ok(())
}
