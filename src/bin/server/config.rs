//! Server configuration.

use std::net::{SocketAddr, ToSocketAddrs};
use std::path::Path;

use anyhow::Result;
use chat_relay::constants::{DEFAULT_DATABASE, DEFAULT_HOST, DEFAULT_PORT};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Host to listen on
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// SQLite database file receiving the messages
    pub database_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            database_path: DEFAULT_DATABASE.to_string(),
        }
    }
}

impl Config {
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        (self.host.as_str(), self.port)
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| anyhow::anyhow!("cannot resolve {}:{}", self.host, self.port))
    }
}
