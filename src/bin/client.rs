//! chat-client: interactive client for the chat relay.
//!
//! Connects once, then alternates sending a line of input and printing the
//! server's reply. Typing the exit word closes the session locally.

use std::process;

use anyhow::Result;
use chat_relay::constants::{DEFAULT_HOST, DEFAULT_PORT, EXIT_SENTINEL, MAX_MESSAGE_BYTES};
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let host = std::env::var("CHAT_SERVER").unwrap_or_else(|_| DEFAULT_HOST.to_string());
    let port: u16 = std::env::var("CHAT_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT);

    let mut stream = match TcpStream::connect((host.as_str(), port)).await {
        Ok(stream) => stream,
        Err(e) => {
            eprintln!("Cannot connect to {host}:{port}: {e}");
            eprintln!("Is the server running?");
            process::exit(1);
        }
    };

    println!("Connected to {host}:{port}");
    println!("Type a message and press enter; '{EXIT_SENTINEL}' quits.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut reply_buf = [0u8; MAX_MESSAGE_BYTES];

    loop {
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let message = line.trim();

        if message.eq_ignore_ascii_case(EXIT_SENTINEL) {
            println!("Disconnecting.");
            break;
        }
        // Empty input never reaches the server.
        if message.is_empty() {
            println!("Message cannot be empty.");
            continue;
        }

        stream.write_all(message.as_bytes()).await?;

        let n = stream.read(&mut reply_buf).await?;
        if n == 0 {
            eprintln!("Server closed the connection.");
            break;
        }
        println!("Server: {}", String::from_utf8_lossy(&reply_buf[..n]));
    }

    Ok(())
}
