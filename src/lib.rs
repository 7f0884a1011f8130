use thiserror::Error;

/// Error types for the wsechosrv library
#[derive(Error, Debug)]
pub enum EchoError {
    /// Transport-level I/O errors (accept, read, write)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TLS errors (identity loading, TLS handshake)
    #[error("TLS error: {0}")]
    Tls(#[from] native_tls::Error),

    /// Upgrade handshake failures; no session is created for these
    #[error("WebSocket handshake error: {0}")]
    Handshake(tokio_tungstenite::tungstenite::Error),

    /// Errors on an established channel (receive or send)
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for the wsechosrv library
pub type Result<T> = std::result::Result<T, EchoError>;

pub mod config;
pub mod observer;
pub mod server;
pub mod session;
pub mod transport;
pub mod upgrade;

// Re-export main types for convenience
pub use config::{ListenerConfig, TlsConfig};
pub use observer::{Direction, SessionObserver, TracingObserver};
pub use server::{EchoServer, WsEchoServer};
pub use session::{Session, SessionState};
pub use transport::{TcpTransport, TlsTransport, Transport};
pub use upgrade::{DEFAULT_BUFFER_SIZE, upgrade};

/// Message type carried over upgraded channels, re-exported for callers.
pub use tokio_tungstenite::tungstenite::Message;
