use super::Transport;
use crate::config::ListenerConfig;
use std::future::Future;
use tokio::net::TcpStream;

/// Plaintext TCP transport
///
/// Accepted connections are handed to the upgrader as-is.
pub struct TcpTransport;

impl Transport for TcpTransport {
    type Stream = TcpStream;

    fn from_config(_config: &ListenerConfig) -> crate::Result<Self> {
        Ok(Self)
    }

    fn establish(
        &self,
        stream: TcpStream,
    ) -> impl Future<Output = crate::Result<TcpStream>> + Send {
        async move { Ok(stream) }
    }
}
