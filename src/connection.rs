//! Per-connection receive, persist, acknowledge loop.

use std::net::SocketAddr;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::{debug, warn};

use crate::constants::{ACK_PREFIX, DECODE_ERROR_REPLY, MAX_MESSAGE_BYTES, STORE_ERROR_REPLY};
use crate::error::Result;
use crate::store::MessageStore;

/// Serves one accepted connection until the peer disconnects or an I/O
/// error ends the session.
///
/// Each received chunk of up to [`MAX_MESSAGE_BYTES`] is one message: it is
/// decoded as UTF-8, appended to the store, and answered with exactly one
/// acknowledgment. A failed store write (or a payload that is not UTF-8) is
/// reported to the peer and the session continues; a failed read or write
/// ends it. Dropping the stream on return releases the socket.
pub async fn handle_connection(
    mut stream: TcpStream,
    addr: SocketAddr,
    store: MessageStore,
) -> Result<()> {
    // Recorded once and reused for every message on this connection.
    let client_address = addr.to_string();
    stream.set_nodelay(true)?;

    debug!("client connected: {client_address}");

    let mut buf = [0u8; MAX_MESSAGE_BYTES];
    loop {
        let n = stream.read(&mut buf).await?;
        if n == 0 {
            debug!("client disconnected: {client_address}");
            return Ok(());
        }

        let reply = match std::str::from_utf8(&buf[..n]) {
            Ok(content) => match store.append(content, &client_address).await {
                Ok(sent_at) => format!("{ACK_PREFIX}{sent_at}"),
                Err(e) => {
                    warn!("failed to store message from {client_address}: {e}");
                    STORE_ERROR_REPLY.to_string()
                }
            },
            Err(_) => {
                warn!("non UTF-8 payload from {client_address}");
                DECODE_ERROR_REPLY.to_string()
            }
        };

        stream.write_all(reply.as_bytes()).await?;
    }
}
