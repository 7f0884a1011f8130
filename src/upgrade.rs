use crate::{EchoError, Result};
use http::StatusCode;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_tungstenite::tungstenite::handshake::server::{ErrorResponse, Request, Response};
use tokio_tungstenite::tungstenite::protocol::WebSocketConfig;
use tokio_tungstenite::{WebSocketStream, accept_hdr_async_with_config};

/// Default read/write buffer size hint for upgraded channels
pub const DEFAULT_BUFFER_SIZE: usize = 1024;

/// Upgrades an accepted byte stream into a message-oriented WebSocket channel
///
/// Performs the one-time handshake that converts a request/response byte
/// stream into a persistent full-duplex channel. Read and write buffers are
/// sized at `buffer_size`; message and frame sizes are unbounded. Requests
/// for any path other than `path` are answered with a plain not-found
/// response and no channel is created.
///
/// On success the returned channel supports blocking receive and send of
/// kind-tagged messages, usable as a strictly alternating pair from a
/// single owning task.
pub async fn upgrade<S>(stream: S, path: &str, buffer_size: usize) -> Result<WebSocketStream<S>>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let config = WebSocketConfig::default()
        .read_buffer_size(buffer_size)
        .write_buffer_size(buffer_size)
        .max_message_size(None)
        .max_frame_size(None);

    let expected = path.to_owned();
    let callback = move |request: &Request, response: Response| {
        if request.uri().path() == expected {
            Ok(response)
        } else {
            let mut not_found = ErrorResponse::new(Some("no such endpoint\n".to_owned()));
            *not_found.status_mut() = StatusCode::NOT_FOUND;
            Err(not_found)
        }
    };

    accept_hdr_async_with_config(stream, callback, Some(config))
        .await
        .map_err(EchoError::Handshake)
}
