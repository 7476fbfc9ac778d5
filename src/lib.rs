//! # chat-relay
//!
//! A minimal multi-client TCP chat relay.
//!
//! The server accepts TCP connections, receives one UTF-8 text message at a
//! time per client, persists each message to SQLite with a timestamp and the
//! peer address, and answers every message with an acknowledgment.

pub mod connection;
pub mod constants;
pub mod error;
pub mod server;
pub mod store;

pub use error::{Error, Result};
pub use server::ChatServer;
pub use store::{MessageStore, StoredMessage};
