//! TCP acceptor: listens and spawns one handler task per connection.

use std::net::SocketAddr;

use tokio::net::{TcpListener, TcpSocket};
use tracing::{info, warn};

use crate::connection::handle_connection;
use crate::error::{Error, Result};
use crate::store::MessageStore;

/// Listening chat server.
///
/// Owns the bound socket. [`ChatServer::serve`] accepts connections until
/// its future is dropped; handler tasks are detached and share only the
/// message store.
pub struct ChatServer {
    listener: TcpListener,
    store: MessageStore,
}

impl ChatServer {
    /// Binds the listening socket with address reuse enabled, so a restart
    /// does not fail on a lingering prior binding.
    pub fn bind(addr: SocketAddr, store: MessageStore) -> Result<Self> {
        let socket = match addr {
            SocketAddr::V4(_) => TcpSocket::new_v4(),
            SocketAddr::V6(_) => TcpSocket::new_v6(),
        }
        .map_err(|source| Error::BindFailed { addr, source })?;

        socket
            .set_reuseaddr(true)
            .map_err(|source| Error::BindFailed { addr, source })?;
        socket
            .bind(addr)
            .map_err(|source| Error::BindFailed { addr, source })?;

        let listener = socket
            .listen(1024)
            .map_err(|source| Error::BindFailed { addr, source })?;

        Ok(Self { listener, store })
    }

    /// Address the server is listening on.
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Accepts connections forever, spawning one detached handler task per
    /// connection, then immediately resumes accepting.
    ///
    /// A failed accept is logged and skipped; it never stops the loop.
    pub async fn serve(&self) -> Result<()> {
        info!("listening on {}", self.local_addr()?);

        loop {
            match self.listener.accept().await {
                Ok((stream, addr)) => {
                    let store = self.store.clone();
                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(stream, addr, store).await {
                            warn!("connection error from {addr}: {e}");
                        }
                    });
                }
                Err(e) => {
                    warn!("accept error: {e}");
                }
            }
        }
    }
}
