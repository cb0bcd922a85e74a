// Stream one chat turn and print the response as it arrives.
//
// Usage: MEMCHAT_BASE_URL=http://127.0.0.1:5019 cargo run --example 01_chat_stream

use std::io::{self, Write};

use anyhow::Result;
use memchat_client::{
    ChatRequest, ChatSession, ChatStreamHandler, ClientConfig, MemChatClient, DEFAULT_BASE_URL,
};

struct Typewriter;

impl ChatStreamHandler for Typewriter {
    fn on_chunk(&mut self, text: &str) {
        print!("{}", text);
        let _ = io::stdout().flush();
    }

    fn on_text_done(&mut self) {
        println!();
    }

    fn on_advertise(&mut self, items: &[serde_json::Value]) {
        println!(
            "\n[recommended]\n{}",
            serde_json::to_string_pretty(items).unwrap_or_default()
        );
    }

    fn on_terminal(&mut self, error: Option<&str>) {
        if let Some(e) = error {
            eprintln!("\nstream failed: {}", e);
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let base_url =
        std::env::var("MEMCHAT_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

    let client = MemChatClient::new(ClientConfig::new().with_base_url(base_url))?;
    let session = ChatSession::new(client);

    let request = ChatRequest::new("I want to start jogging in the mornings, any advice?")
        .with_user_id("example_user")
        .with_interest_tags(vec!["sports".to_string(), "health".to_string()]);

    session.send_message(request, &mut Typewriter).await;

    if let Some(error) = session.last_error() {
        anyhow::bail!("chat stream failed: {}", error);
    }

    Ok(())
}
