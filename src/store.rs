//! SQLite-backed message store.
//!
//! The store is an append-only log: messages are inserted and read back,
//! never updated or deleted. Every operation opens its own connection to the
//! database file and drops it when done, so concurrent connection handlers
//! never share a handle and SQLite serializes the individual inserts.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::Local;
use rusqlite::{Connection, params};

use crate::constants::TIMESTAMP_FORMAT;
use crate::error::{Error, Result};

/// How long one operation waits on a locked database before giving up.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// A persisted chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredMessage {
    pub id: i64,
    pub content: String,
    pub sent_at: String,
    pub client_address: String,
}

/// Append-only message log backed by a SQLite file.
///
/// Cheap to clone; each handler task owns its own copy and the copies share
/// nothing but the file itself.
#[derive(Debug, Clone)]
pub struct MessageStore {
    path: PathBuf,
}

impl MessageStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the backing database file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open(&self) -> rusqlite::Result<Connection> {
        let conn = Connection::open(&self.path)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        Ok(conn)
    }

    /// Ensures the message table exists. Safe to call more than once.
    ///
    /// AUTOINCREMENT keeps ids strictly increasing and never reused, even
    /// across process restarts.
    pub fn initialize(&self) -> Result<()> {
        let conn = self.open().map_err(Error::StoreUnavailable)?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS messages (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                content TEXT NOT NULL,
                sent_at TEXT NOT NULL,
                client_address TEXT NOT NULL
            );",
        )
        .map_err(Error::StoreUnavailable)?;
        Ok(())
    }

    /// Persists one message and returns the stored timestamp.
    ///
    /// The insert runs on the blocking thread pool so handler tasks never
    /// stall the async workers on file I/O.
    pub async fn append(&self, content: &str, client_address: &str) -> Result<String> {
        let store = self.clone();
        let content = content.to_string();
        let client_address = client_address.to_string();
        tokio::task::spawn_blocking(move || store.append_blocking(&content, &client_address))
            .await?
    }

    /// Synchronous insert; stamps `sent_at` at the moment of the call.
    pub fn append_blocking(&self, content: &str, client_address: &str) -> Result<String> {
        let sent_at = Local::now().format(TIMESTAMP_FORMAT).to_string();
        let conn = self.open().map_err(Error::WriteFailed)?;
        conn.execute(
            "INSERT INTO messages (content, sent_at, client_address) VALUES (?1, ?2, ?3)",
            params![content, sent_at, client_address],
        )
        .map_err(Error::WriteFailed)?;
        Ok(sent_at)
    }

    /// All stored messages in insertion order.
    pub fn messages(&self) -> Result<Vec<StoredMessage>> {
        let conn = self.open().map_err(Error::StoreUnavailable)?;
        let mut stmt = conn
            .prepare("SELECT id, content, sent_at, client_address FROM messages ORDER BY id")
            .map_err(Error::StoreUnavailable)?;
        let messages = stmt
            .query_map([], |row| {
                Ok(StoredMessage {
                    id: row.get(0)?,
                    content: row.get(1)?,
                    sent_at: row.get(2)?,
                    client_address: row.get(3)?,
                })
            })
            .map_err(Error::StoreUnavailable)?
            .filter_map(|r| r.ok())
            .collect();
        Ok(messages)
    }

    /// Number of stored messages.
    pub fn count(&self) -> Result<u64> {
        let conn = self.open().map_err(Error::StoreUnavailable)?;
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM messages", [], |row| row.get(0))
            .map_err(Error::StoreUnavailable)?;
        Ok(count as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use tempfile::TempDir;

    fn temp_store(dir: &TempDir) -> MessageStore {
        MessageStore::new(dir.path().join("messages.db"))
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = temp_store(&dir);

        store.initialize().unwrap();
        store.append_blocking("hola", "127.0.0.1:4000").unwrap();
        store.initialize().unwrap();

        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_append_stamps_parseable_timestamp() {
        let dir = TempDir::new().unwrap();
        let store = temp_store(&dir);
        store.initialize().unwrap();

        let sent_at = store.append_blocking("hola", "127.0.0.1:4000").unwrap();
        assert!(NaiveDateTime::parse_from_str(&sent_at, TIMESTAMP_FORMAT).is_ok());

        let messages = store.messages().unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].content, "hola");
        assert_eq!(messages[0].sent_at, sent_at);
        assert_eq!(messages[0].client_address, "127.0.0.1:4000");
    }

    #[test]
    fn test_ids_strictly_increasing() {
        let dir = TempDir::new().unwrap();
        let store = temp_store(&dir);
        store.initialize().unwrap();

        for i in 0..5 {
            store
                .append_blocking(&format!("message {i}"), "127.0.0.1:4000")
                .unwrap();
        }

        let messages = store.messages().unwrap();
        assert_eq!(messages.len(), 5);
        for pair in messages.windows(2) {
            assert!(pair[0].id < pair[1].id);
        }
    }

    #[test]
    fn test_append_without_schema_is_write_failed() {
        let dir = TempDir::new().unwrap();
        let store = temp_store(&dir);

        let err = store.append_blocking("hola", "127.0.0.1:4000").unwrap_err();
        assert!(matches!(err, Error::WriteFailed(_)));
    }

    #[test]
    fn test_initialize_on_unusable_path_is_store_unavailable() {
        let dir = TempDir::new().unwrap();
        // A directory cannot be opened as a database file.
        let store = MessageStore::new(dir.path());

        let err = store.initialize().unwrap_err();
        assert!(matches!(err, Error::StoreUnavailable(_)));
    }
}
