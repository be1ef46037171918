//! WebSocket connection to the Tuganire server.
//!
//! ## 責務
//!
//! - Open the socket (with the session cookie) and keep at most one open
//! - Feed inbound text frames to a [`ConnectionListener`] in arrival order
//! - Reconnect after every close according to the [`ReconnectPolicy`]
//! - Hand out [`WebSocketFrameSender`]s that drop frames while no socket is open

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::{Mutex, mpsc};
use tokio_tungstenite::{
    connect_async,
    tungstenite::{
        client::IntoClientRequest,
        handshake::client::Request,
        http::{HeaderValue, header::COOKIE},
        protocol::Message,
    },
};

use crate::{
    domain::{ConnectionListener, FrameSender, PushError, ReconnectPolicy},
    error::ClientError,
};

/// Outbound channel of the currently open socket, `None` while disconnected.
type OutboundSlot = Arc<Mutex<Option<mpsc::UnboundedSender<String>>>>;

/// Reconnecting WebSocket connection
pub struct WebSocketConnection {
    url: String,
    token: Option<String>,
    policy: ReconnectPolicy,
    outbound: OutboundSlot,
}

impl WebSocketConnection {
    /// Create a new connection (not yet opened)
    ///
    /// # Arguments
    ///
    /// * `url` - WebSocket endpoint, e.g. `ws://127.0.0.1:8080/ws/chat`
    /// * `token` - Session JWT sent as the `token` cookie during the handshake
    /// * `policy` - Reconnect policy applied after every close
    pub fn new(url: impl Into<String>, token: Option<String>, policy: ReconnectPolicy) -> Self {
        Self {
            url: url.into(),
            token,
            policy,
            outbound: Arc::new(Mutex::new(None)),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Sender bound to whichever socket is open at push time
    pub fn sender(&self) -> WebSocketFrameSender {
        WebSocketFrameSender {
            outbound: self.outbound.clone(),
        }
    }

    /// Run the connection, reconnecting after every close.
    ///
    /// # Errors
    ///
    /// Only returns when the reconnect policy gives up
    /// ([`ClientError::ReconnectExhausted`]). With the default policy this
    /// future never completes.
    pub async fn run(&self, listener: Arc<dyn ConnectionListener>) -> Result<(), ClientError> {
        let mut failed_attempts: u32 = 0;

        loop {
            tracing::info!("Connecting to {}", self.url);

            match self.run_session(listener.as_ref()).await {
                Ok(()) => {
                    // the socket was open, so only failures from here on count
                    failed_attempts = 0;
                }
                Err(e) => {
                    tracing::warn!("Connection failed: {}", e);
                    failed_attempts = failed_attempts.saturating_add(1);
                }
            }

            let Some(delay) = self.policy.next_delay(failed_attempts) else {
                tracing::error!(
                    "Failed to reconnect after {} attempts. Giving up.",
                    failed_attempts
                );
                return Err(ClientError::ReconnectExhausted {
                    attempts: failed_attempts,
                });
            };

            tracing::info!("Reconnecting in {} ms...", delay.as_millis());
            tokio::time::sleep(delay).await;
        }
    }

    /// Open one socket and pump frames until it closes.
    ///
    /// Returns `Err` only if the socket could not be opened.
    async fn run_session(&self, listener: &dyn ConnectionListener) -> Result<(), ClientError> {
        let request = self.request()?;
        let (ws_stream, _response) = connect_async(request)
            .await
            .map_err(|e| ClientError::Connection(e.to_string()))?;

        tracing::info!("Connected to chat server");

        let (mut write, mut read) = ws_stream.split();
        let (tx, mut rx) = mpsc::unbounded_channel::<String>();

        // queued before the slot is published so it is the first frame out
        if let Some(payload) = listener.on_open().await {
            tx.send(payload).ok();
        }
        *self.outbound.lock().await = Some(tx);

        let mut write_task = tokio::spawn(async move {
            while let Some(payload) = rx.recv().await {
                if let Err(e) = write.send(Message::Text(payload.into())).await {
                    tracing::warn!("Failed to send frame: {}", e);
                    break;
                }
            }
        });

        loop {
            tokio::select! {
                message = read.next() => match message {
                    Some(Ok(Message::Text(text))) => listener.on_frame(text.as_str()).await,
                    Some(Ok(Message::Close(_))) | None => {
                        tracing::info!("Server closed the connection");
                        break;
                    }
                    Some(Err(e)) => {
                        tracing::warn!("WebSocket read error: {}", e);
                        break;
                    }
                    Some(Ok(_)) => {}
                },
                _ = &mut write_task => {
                    tracing::warn!("WebSocket writer stopped");
                    break;
                }
            }
        }

        *self.outbound.lock().await = None;
        write_task.abort();

        Ok(())
    }

    fn request(&self) -> Result<Request, ClientError> {
        let mut request = self.url.as_str().into_client_request().map_err(|e| {
            ClientError::Config(format!("invalid WebSocket URL '{}': {}", self.url, e))
        })?;

        if let Some(token) = &self.token {
            let cookie = HeaderValue::from_str(&format!("token={}", token)).map_err(|_| {
                ClientError::Config("token contains characters not allowed in a cookie".into())
            })?;
            request.headers_mut().insert(COOKIE, cookie);
        }

        Ok(request)
    }
}

/// [`FrameSender`] backed by the currently open socket
#[derive(Clone)]
pub struct WebSocketFrameSender {
    outbound: OutboundSlot,
}

impl WebSocketFrameSender {
    pub async fn is_open(&self) -> bool {
        self.outbound.lock().await.is_some()
    }
}

#[async_trait]
impl FrameSender for WebSocketFrameSender {
    async fn push(&self, payload: String) -> Result<(), PushError> {
        let outbound = self.outbound.lock().await;
        match outbound.as_ref() {
            Some(tx) => tx.send(payload).map_err(|_| PushError::NotConnected),
            None => Err(PushError::NotConnected),
        }
    }
}
