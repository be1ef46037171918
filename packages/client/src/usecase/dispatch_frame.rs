//! UseCase: inbound frame dispatch
//!
//! Parses each text frame, routes it by its `type` tag into the session and
//! renders the resulting view updates. Malformed frames and unknown types
//! are dropped without surfacing anything to the user.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    domain::{ChatSession, ChatSurface, ConnectionListener},
    infrastructure::dto::websocket::{InboundFrame, OutboundFrame},
};

use super::render_all;

/// 受信フレーム振り分けのユースケース
pub struct DispatchFrameUseCase {
    session: Arc<Mutex<ChatSession>>,
    surface: Arc<dyn ChatSurface>,
}

impl DispatchFrameUseCase {
    pub fn new(session: Arc<Mutex<ChatSession>>, surface: Arc<dyn ChatSurface>) -> Self {
        Self { session, surface }
    }

    /// Dispatch one inbound text frame.
    pub async fn execute(&self, text: &str) {
        let frame = match serde_json::from_str::<InboundFrame>(text) {
            Ok(frame) => frame,
            Err(e) => {
                tracing::debug!("Dropping malformed frame: {}", e);
                return;
            }
        };

        let Some(event) = frame.into_event() else {
            tracing::debug!("Dropping frame of unhandled type");
            return;
        };

        let updates = self.session.lock().await.apply(event);
        render_all(self.surface.as_ref(), &updates);
    }
}

#[async_trait]
impl ConnectionListener for DispatchFrameUseCase {
    async fn on_open(&self) -> Option<String> {
        let room_id = self.session.lock().await.current_room()?;
        let frame = OutboundFrame::JoinRoom {
            room_id: room_id.value(),
        };
        match frame.to_json() {
            Ok(payload) => Some(payload),
            Err(e) => {
                tracing::error!("Failed to serialize frame: {}", e);
                None
            }
        }
    }

    async fn on_frame(&self, text: &str) {
        self.execute(text).await;
    }
}
