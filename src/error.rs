//! Error types for the chat-relay library.

use std::io;
use std::net::SocketAddr;

/// Result type alias for chat-relay operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while serving or persisting messages.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The database file could not be opened or the schema could not be
    /// created. Fatal to server startup.
    #[error("message store unavailable: {0}")]
    StoreUnavailable(#[source] rusqlite::Error),

    /// The medium rejected a single insert. The message was not persisted;
    /// the connection it came from keeps running.
    #[error("message write failed: {0}")]
    WriteFailed(#[source] rusqlite::Error),

    /// The listening socket could not be created. Fatal to server startup.
    #[error("failed to bind {addr}: {source}")]
    BindFailed {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error("store worker failed: {0}")]
    StoreWorker(#[from] tokio::task::JoinError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}
