use crate::observer::{Direction, SessionObserver};
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_tungstenite::WebSocketStream;
use tokio_tungstenite::tungstenite::Message;

/// Lifecycle state of an echo session
///
/// The only transition is Active -> Terminated, triggered by a receive
/// failure, a send failure, or the peer ending the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Active,
    Terminated,
}

/// The lifetime-bound unit of work owning one upgraded channel
///
/// Runs an unbounded loop of {receive one message, send it back with the
/// same kind tag}. Strictly synchronous send-after-receive; never more than
/// one in-flight message. The channel is owned exclusively by this session
/// and closed unconditionally when the session leaves the active state.
pub struct Session<S> {
    channel: WebSocketStream<S>,
    observer: Arc<dyn SessionObserver>,
    state: SessionState,
}

impl<S> Session<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Creates a session owning an upgraded channel
    pub fn new(channel: WebSocketStream<S>, observer: Arc<dyn SessionObserver>) -> Self {
        Self {
            channel,
            observer,
            state: SessionState::Active,
        }
    }

    /// Runs the echo loop until the first failure in either direction
    ///
    /// Consumes the session; when this returns the channel has been closed.
    pub async fn run(mut self) {
        while self.state == SessionState::Active {
            self.step().await;
        }
    }

    async fn step(&mut self) {
        let message = match self.channel.next().await {
            Some(Ok(message)) => message,
            Some(Err(error)) => {
                self.observer.failed(Direction::Receive, &error.into());
                return self.terminate().await;
            }
            None => {
                self.observer.peer_closed();
                return self.terminate().await;
            }
        };

        if let Message::Close(_) = message {
            self.observer.peer_closed();
            return self.terminate().await;
        }

        self.observer.received(&message);

        // Payloads are Bytes-backed, so keeping a handle for the echoed
        // event is a refcount bump, not a copy.
        let echoed = message.clone();
        match self.channel.send(message).await {
            Ok(()) => self.observer.echoed(&echoed),
            Err(error) => {
                self.observer.failed(Direction::Send, &error.into());
                self.terminate().await;
            }
        }
    }

    /// Enters the terminated state; closing the channel is unconditional here
    async fn terminate(&mut self) {
        self.state = SessionState::Terminated;
        let _ = self.channel.close(None).await;
    }
}
