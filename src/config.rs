use std::net::SocketAddr;
use std::path::PathBuf;

use crate::upgrade::DEFAULT_BUFFER_SIZE;

/// Configuration for the WebSocket echo listener
///
/// # Examples
///
/// ```
/// use wsechosrv::ListenerConfig;
///
/// let config = ListenerConfig {
///     bind_addr: "127.0.0.1:8080".parse().unwrap(),
///     ..Default::default()
/// };
/// assert_eq!(config.path, "/ws");
/// assert_eq!(config.buffer_size, 1024);
/// ```
#[derive(Debug, Clone)]
pub struct ListenerConfig {
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Request path that accepts upgrade requests; everything else is not found
    pub path: String,
    /// Read/write buffer size hint for upgraded channels. Bounds
    /// per-connection memory, not message size.
    pub buffer_size: usize,
    /// TLS material, when this listener terminates TLS
    pub tls: Option<TlsConfig>,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:80".parse().unwrap(),
            path: "/ws".to_string(),
            buffer_size: DEFAULT_BUFFER_SIZE,
            tls: None,
        }
    }
}

/// Filesystem locations of the TLS certificate chain and private key
///
/// The certificate is a PEM chain, the key a PEM-encoded PKCS#8 private
/// key. Both are read once at startup; unreadable or unparsable material
/// is a fatal startup error.
#[derive(Debug, Clone)]
pub struct TlsConfig {
    /// Path to the PEM certificate chain
    pub cert_path: PathBuf,
    /// Path to the PEM PKCS#8 private key
    pub key_path: PathBuf,
}

impl Default for TlsConfig {
    fn default() -> Self {
        Self {
            cert_path: "server.crt".into(),
            key_path: "server.key".into(),
        }
    }
}
