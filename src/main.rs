use color_eyre::eyre::{Result, WrapErr};
use wsechosrv::{EchoServer, ListenerConfig, TcpTransport, TlsConfig, TlsTransport, WsEchoServer};

use tracing::info;

fn print_usage(program: &str) {
    println!("Usage: {program} [tls|help]");
    println!("  tls  : launch the server with TLS on port 443 (reads server.crt and server.key)");
    println!("  help : print this message");
    println!();
    println!("With no argument the plaintext server starts on port 80.");
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter("wsechosrv=info")
        .init();

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();
    let mode = args.get(1).map(|s| s.trim().to_lowercase());

    match mode.as_deref() {
        Some("help") => {
            print_usage(&args[0]);
        }
        Some("tls") => {
            let config = ListenerConfig {
                bind_addr: "0.0.0.0:443".parse().unwrap(),
                tls: Some(TlsConfig::default()),
                ..Default::default()
            };

            info!(address = %config.bind_addr, path = %config.path, "Starting TLS WebSocket echo server");

            let server: WsEchoServer<TlsTransport> =
                WsEchoServer::new(config).wrap_err("Failed to load TLS listener configuration")?;
            server
                .run()
                .await
                .wrap_err("Failed to run TLS WebSocket echo server")?;
        }
        // Any other value means "not tls": fall back to the plaintext listener.
        _ => {
            let config = ListenerConfig::default();

            info!(address = %config.bind_addr, path = %config.path, "Starting WebSocket echo server");

            let server: WsEchoServer<TcpTransport> =
                WsEchoServer::new(config).wrap_err("Failed to configure listener")?;
            server
                .run()
                .await
                .wrap_err("Failed to run WebSocket echo server")?;
        }
    }

    Ok(())
}
