use anyhow::Result;
use memchat_client::{
    ChatRequest, ChatSession, ChatStreamHandler, ClientConfig, MemChatClient, DEFAULT_BASE_URL,
};
use std::io::{self, Write};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

struct ConsoleHandler;

impl ChatStreamHandler for ConsoleHandler {
    fn on_chunk(&mut self, text: &str) {
        print!("{}", text);
        let _ = io::stdout().flush();
    }

    fn on_text_done(&mut self) {
        println!("\n\n   [response text complete, input unlocked]");
    }

    fn on_advertise(&mut self, items: &[serde_json::Value]) {
        println!("\n   [recommended ads]");
        println!(
            "{}",
            serde_json::to_string_pretty(items).unwrap_or_default()
        );
    }

    fn on_terminal(&mut self, error: Option<&str>) {
        match error {
            Some(e) => println!("\n   [stream ended with fault: {}]", e),
            None => println!("\n   [stream ended]"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    println!("MemChat - Streaming Chat Example");
    println!("================================\n");

    let base_url =
        std::env::var("MEMCHAT_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
    let user_id = std::env::var("MEMCHAT_USER_ID").unwrap_or_else(|_| "test_user_001".to_string());

    println!("1. Connecting to backend at {}...", base_url);
    let client = MemChatClient::new(ClientConfig::new().with_base_url(base_url))?;
    let session = ChatSession::new(client);
    println!("   ✓ Client ready (user: {})\n", user_id);

    println!("2. Sending chat request with interest tags...\n");
    let request = ChatRequest::new(
        "I want to start jogging in the mornings. Any advice? My knees are not great.",
    )
    .with_user_id(user_id)
    .with_interest_tags(vec![
        "sports".to_string(),
        "health".to_string(),
        "protective gear".to_string(),
    ]);

    let mut handler = ConsoleHandler;
    session.send_message(request, &mut handler).await;

    println!("\n================================");
    match session.last_error() {
        Some(error) => {
            println!("Finished with fault: {}", error);
            println!("(is the backend running and its memory initialized?)");
        }
        None => println!("Example completed successfully!"),
    }

    Ok(())
}

fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
