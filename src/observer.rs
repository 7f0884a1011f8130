use crate::EchoError;
use std::fmt;
use tokio_tungstenite::tungstenite::Message;
use tracing::{error, info};

/// Direction of the half of an exchange that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Receive,
    Send,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Receive => write!(f, "receive"),
            Direction::Send => write!(f, "send"),
        }
    }
}

/// Diagnostic sink for session events
///
/// Sessions report every received message, every completed echo, and the
/// failure that ends them through this capability instead of logging
/// directly, so a session can be unit tested without capturing global log
/// output. Events are observational only and carry no protocol meaning.
pub trait SessionObserver: Send + Sync {
    /// A message arrived from the peer
    fn received(&self, message: &Message);

    /// The message was written back to the peer unchanged
    fn echoed(&self, message: &Message);

    /// The peer ended the session with a close message or end-of-stream
    fn peer_closed(&self);

    /// A receive or send failed; the session terminates
    fn failed(&self, direction: Direction, error: &EchoError);
}

/// Observer that forwards session events to the process-wide `tracing` stream
pub struct TracingObserver;

impl SessionObserver for TracingObserver {
    fn received(&self, message: &Message) {
        info!(
            kind = kind(message),
            size = message.len(),
            preview = %String::from_utf8_lossy(payload(message)),
            "Received message"
        );
    }

    fn echoed(&self, message: &Message) {
        info!(kind = kind(message), size = message.len(), "Echoed message");
    }

    fn peer_closed(&self) {
        info!("Peer closed connection");
    }

    fn failed(&self, direction: Direction, error: &EchoError) {
        error!(direction = %direction, error = %error, "Session failed");
    }
}

/// Kind tag of a message, for diagnostics
pub(crate) fn kind(message: &Message) -> &'static str {
    match message {
        Message::Text(_) => "text",
        Message::Binary(_) => "binary",
        Message::Ping(_) => "ping",
        Message::Pong(_) => "pong",
        Message::Close(_) => "close",
        Message::Frame(_) => "frame",
    }
}

/// Raw payload bytes of a message, for diagnostics
pub(crate) fn payload(message: &Message) -> &[u8] {
    match message {
        Message::Text(text) => text.as_bytes(),
        Message::Binary(data) | Message::Ping(data) | Message::Pong(data) => data.as_ref(),
        Message::Close(_) | Message::Frame(_) => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    #[test]
    fn kind_tags_cover_data_and_control_messages() {
        assert_eq!(kind(&Message::text("hi")), "text");
        assert_eq!(kind(&Message::binary(Bytes::new())), "binary");
        assert_eq!(kind(&Message::Ping(Bytes::new())), "ping");
        assert_eq!(kind(&Message::Pong(Bytes::new())), "pong");
        assert_eq!(kind(&Message::Close(None)), "close");
    }

    #[test]
    fn payload_exposes_raw_bytes() {
        assert_eq!(payload(&Message::text("ping")), b"ping");
        assert_eq!(payload(&Message::binary(Bytes::from_static(b"\x00\x01"))), b"\x00\x01");
        assert!(payload(&Message::Close(None)).is_empty());
    }
}
