use crate::config::ListenerConfig;
use std::future::Future;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;

pub mod tcp;
pub mod tls;

pub use tcp::TcpTransport;
pub use tls::TlsTransport;

/// Trait for the byte-stream transports the upgrader can sit on
///
/// The upgrader itself is transport-agnostic; implementations of this trait
/// decide what happens between accepting a TCP connection and handing a byte
/// stream to the handshake (nothing for plain TCP, TLS termination for the
/// TLS transport).
pub trait Transport: Send + Sync + Sized + 'static {
    /// Byte stream handed to the upgrader once transport setup completes
    type Stream: AsyncRead + AsyncWrite + Unpin + Send + 'static;

    /// Builds the transport from listener configuration at startup
    ///
    /// Failures here (missing or invalid certificate material) are fatal
    /// startup errors.
    fn from_config(config: &ListenerConfig) -> crate::Result<Self>;

    /// Completes transport-level setup on an accepted connection
    ///
    /// Runs inside the per-connection task, so a slow or failing setup
    /// never blocks the accept loop.
    fn establish(
        &self,
        stream: TcpStream,
    ) -> impl Future<Output = crate::Result<Self::Stream>> + Send;
}
