use crate::config::ListenerConfig;
use crate::observer::{SessionObserver, TracingObserver};
use crate::session::Session;
use crate::transport::Transport;
use crate::upgrade::upgrade;
use crate::{EchoError, Result};
use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::net::{TcpListener, TcpStream};
use tokio::signal;
use tracing::{Instrument, error, info};

/// Common interface for echo servers
#[async_trait]
pub trait EchoServer {
    /// Runs the accept loop until shutdown or a fatal listener error
    async fn run(&self) -> Result<()>;

    /// Returns a sender that can be used to request shutdown
    fn shutdown_signal(&self) -> tokio::sync::broadcast::Sender<()>;
}

/// WebSocket echo server generic over the byte-stream transport below it
///
/// For every accepted connection that upgrades on the configured path, one
/// independent session task echoes every message back to its sender until
/// the connection closes or an I/O error occurs. Sessions never interact
/// and share no mutable state.
///
/// # Examples
///
/// ```no_run
/// use wsechosrv::{EchoServer, ListenerConfig, TcpTransport, WsEchoServer};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = ListenerConfig {
///         bind_addr: "127.0.0.1:8080".parse()?,
///         ..Default::default()
///     };
///
///     let server: WsEchoServer<TcpTransport> = WsEchoServer::new(config)?;
///     server.run().await?;
///     Ok(())
/// }
/// ```
pub struct WsEchoServer<T: Transport> {
    config: ListenerConfig,
    transport: Arc<T>,
    observer: Arc<dyn SessionObserver>,
    shutdown_signal: Arc<tokio::sync::broadcast::Sender<()>>,
}

impl<T: Transport> WsEchoServer<T> {
    /// Creates a server that logs session events to the `tracing` stream
    ///
    /// Fails if the transport cannot be built from the configuration, e.g.
    /// missing or invalid TLS certificate material.
    pub fn new(config: ListenerConfig) -> Result<Self> {
        Self::with_observer(config, Arc::new(TracingObserver))
    }

    /// Creates a server that reports session events to the given observer
    pub fn with_observer(
        config: ListenerConfig,
        observer: Arc<dyn SessionObserver>,
    ) -> Result<Self> {
        let transport = T::from_config(&config)?;
        let (shutdown_signal, _) = tokio::sync::broadcast::channel(1);
        Ok(Self {
            config,
            transport: Arc::new(transport),
            observer,
            shutdown_signal: Arc::new(shutdown_signal),
        })
    }

    /// Handles one accepted connection: transport setup, upgrade, session
    ///
    /// An error return means the handshake never completed and no session
    /// was created; session-level failures are reported by the session
    /// itself through its observer.
    async fn handle_connection(
        transport: Arc<T>,
        stream: TcpStream,
        config: ListenerConfig,
        observer: Arc<dyn SessionObserver>,
    ) -> Result<()> {
        let stream = transport.establish(stream).await?;
        let channel = upgrade(stream, &config.path, config.buffer_size).await?;
        Session::new(channel, observer).run().await;
        Ok(())
    }
}

#[async_trait]
impl<T: Transport> EchoServer for WsEchoServer<T> {
    /// Starts the listener and accepts connections until shutdown
    async fn run(&self) -> Result<()> {
        let listener = TcpListener::bind(self.config.bind_addr).await.map_err(|e| {
            EchoError::Config(format!(
                "Failed to bind listener on {}: {e}",
                self.config.bind_addr
            ))
        })?;

        info!(address = %self.config.bind_addr, path = %self.config.path, "WebSocket echo server listening");

        let connection_count = Arc::new(AtomicUsize::new(0));
        let mut shutdown_rx = self.shutdown_signal.subscribe();

        loop {
            tokio::select! {
                accept_result = listener.accept() => {
                    match accept_result {
                        Ok((stream, addr)) => {
                            connection_count.fetch_add(1, Ordering::SeqCst);
                            let current = connection_count.load(Ordering::SeqCst);
                            info!(%addr, current, "Accepted connection");

                            let transport = self.transport.clone();
                            let config = self.config.clone();
                            let observer = self.observer.clone();
                            let connection_count = connection_count.clone();
                            let span = tracing::info_span!("connection", %addr);

                            tokio::spawn(async move {
                                let result =
                                    Self::handle_connection(transport, stream, config, observer)
                                        .instrument(span)
                                        .await;
                                if let Err(e) = result {
                                    error!(%addr, error = %e, "Connection ended before a session was created");
                                }
                                let remaining = connection_count.fetch_sub(1, Ordering::SeqCst) - 1;
                                info!(%addr, current = remaining, "Connection closed");
                            });
                        }
                        Err(e) => {
                            error!(error = %e, "Failed to accept connection");
                        }
                    }
                }
                _ = signal::ctrl_c() => {
                    info!("Received shutdown signal, stopping server");
                    break;
                }
                _ = shutdown_rx.recv() => {
                    info!("Received internal shutdown signal, stopping server");
                    break;
                }
            }
        }

        info!("WebSocket echo server stopped");
        Ok(())
    }

    fn shutdown_signal(&self) -> tokio::sync::broadcast::Sender<()> {
        self.shutdown_signal.as_ref().clone()
    }
}
