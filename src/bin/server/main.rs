//! chat-server: TCP chat relay server.
//!
//! Accepts client connections, persists every received message to SQLite
//! with a timestamp and the peer address, and acknowledges each one.

mod config;

use anyhow::Result;
use chat_relay::{ChatServer, MessageStore};
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::load_or_default("chat-relay.toml")?;
    let addr = config.listen_addr()?;

    println!("╔════════════════════════════════════════╗");
    println!("║           chat-relay server            ║");
    println!("╠════════════════════════════════════════╣");
    println!("║ Listen: {:<31}║", addr);
    println!("║ Database: {:<29}║", config.database_path);
    println!("╚════════════════════════════════════════╝");

    let store = MessageStore::new(&config.database_path);
    store.initialize()?;

    let server = ChatServer::bind(addr, store)?;

    tokio::select! {
        result = server.serve() => result?,
        _ = tokio::signal::ctrl_c() => {
            info!("shutdown signal received, closing listener");
        }
    }

    Ok(())
}
