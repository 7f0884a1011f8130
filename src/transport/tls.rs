use super::Transport;
use crate::config::{ListenerConfig, TlsConfig};
use crate::EchoError;
use std::fs;
use std::future::Future;
use tokio::net::TcpStream;
use tokio_native_tls::{TlsAcceptor, TlsStream};

/// TLS-terminated transport
///
/// Loads the certificate chain and private key once at startup and
/// terminates TLS on every accepted connection before the upgrade.
pub struct TlsTransport {
    acceptor: TlsAcceptor,
}

impl TlsTransport {
    fn load_identity(config: &TlsConfig) -> crate::Result<native_tls::Identity> {
        let cert = fs::read(&config.cert_path).map_err(|e| {
            EchoError::Config(format!(
                "Failed to read certificate {}: {e}",
                config.cert_path.display()
            ))
        })?;
        let key = fs::read(&config.key_path).map_err(|e| {
            EchoError::Config(format!(
                "Failed to read private key {}: {e}",
                config.key_path.display()
            ))
        })?;
        native_tls::Identity::from_pkcs8(&cert, &key).map_err(EchoError::Tls)
    }
}

impl Transport for TlsTransport {
    type Stream = TlsStream<TcpStream>;

    fn from_config(config: &ListenerConfig) -> crate::Result<Self> {
        let tls = config.tls.as_ref().ok_or_else(|| {
            EchoError::Config("TLS transport requires certificate and key paths".to_string())
        })?;
        let identity = Self::load_identity(tls)?;
        let acceptor = native_tls::TlsAcceptor::new(identity).map_err(EchoError::Tls)?;
        Ok(Self {
            acceptor: TlsAcceptor::from(acceptor),
        })
    }

    fn establish(
        &self,
        stream: TcpStream,
    ) -> impl Future<Output = crate::Result<Self::Stream>> + Send {
        async move { self.acceptor.accept(stream).await.map_err(EchoError::Tls) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    fn config_with_paths(cert: &std::path::Path, key: &std::path::Path) -> ListenerConfig {
        ListenerConfig {
            tls: Some(TlsConfig {
                cert_path: cert.to_path_buf(),
                key_path: key.to_path_buf(),
            }),
            ..Default::default()
        }
    }

    #[test]
    fn missing_certificate_files_fail_startup() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_with_paths(&dir.path().join("absent.crt"), &dir.path().join("absent.key"));
        let result = TlsTransport::from_config(&config);
        assert!(matches!(result, Err(EchoError::Config(_))));
    }

    #[test]
    fn garbage_certificate_material_fails_startup() {
        let dir = tempfile::tempdir().unwrap();
        let cert_path = dir.path().join("server.crt");
        let key_path = dir.path().join("server.key");
        let mut cert = std::fs::File::create(&cert_path).unwrap();
        cert.write_all(b"not a certificate").unwrap();
        let mut key = std::fs::File::create(&key_path).unwrap();
        key.write_all(b"not a key").unwrap();

        let result = TlsTransport::from_config(&config_with_paths(&cert_path, &key_path));
        assert!(matches!(result, Err(EchoError::Tls(_))));
    }

    #[test]
    fn missing_tls_section_fails_startup() {
        let config = ListenerConfig::default();
        let result = TlsTransport::from_config(&config);
        assert!(matches!(result, Err(EchoError::Config(_))));
    }
}
