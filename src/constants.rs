//! Protocol constants shared by the server and the client.

/// Default host the server listens on and the client connects to.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default port.
pub const DEFAULT_PORT: u16 = 5000;

/// Default SQLite database file receiving the messages.
pub const DEFAULT_DATABASE: &str = "chat_mensajes.db";

/// Maximum bytes accepted in one receive call. A longer send arrives as
/// multiple messages; chunks are never reassembled.
pub const MAX_MESSAGE_BYTES: usize = 1024;

/// Reply prefix confirming persistence; the stored timestamp follows.
pub const ACK_PREFIX: &str = "Mensaje recibido: ";

/// Reply sent when the store rejects a write. The connection stays open.
pub const STORE_ERROR_REPLY: &str =
    "Error: No se pudo guardar el mensaje en la base de datos";

/// Reply sent when the received bytes are not valid UTF-8. Nothing is
/// stored and the connection stays open.
pub const DECODE_ERROR_REPLY: &str = "Error: El mensaje no es texto UTF-8 valido";

/// `chrono` format of the stored `sent_at` column and of the acknowledgment
/// timestamp. One-second resolution.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Client-local input that ends the interactive session. Never sent over
/// the wire.
pub const EXIT_SENTINEL: &str = "exito";
