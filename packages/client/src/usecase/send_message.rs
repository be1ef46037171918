//! UseCase: message submission and reactions

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
    domain::{ChatSession, FrameSender, MessageContent, MessageId, event::DEFAULT_REACTION},
    infrastructure::dto::websocket::OutboundFrame,
};

use super::push_frame;

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    session: Arc<Mutex<ChatSession>>,
    sender: Arc<dyn FrameSender>,
}

impl SendMessageUseCase {
    pub fn new(session: Arc<Mutex<ChatSession>>, sender: Arc<dyn FrameSender>) -> Self {
        Self { session, sender }
    }

    /// Submit the input line.
    ///
    /// Sends `MESSAGE` followed by an explicit typing-off. Does nothing when
    /// no room is active or the trimmed content is empty.
    ///
    /// # Returns
    ///
    /// `true` if the frames were built and pushed (pushes to a closed socket
    /// are dropped silently)
    pub async fn execute(&self, raw: &str) -> bool {
        let Some(room_id) = self.session.lock().await.current_room() else {
            tracing::debug!("No active room; message not sent");
            return false;
        };
        let Ok(content) = MessageContent::new(raw) else {
            return false;
        };

        push_frame(
            self.sender.as_ref(),
            &OutboundFrame::Message {
                room_id: room_id.value(),
                content: content.into_string(),
            },
        )
        .await;
        push_frame(
            self.sender.as_ref(),
            &OutboundFrame::Typing {
                room_id: room_id.value(),
                is_typing: false,
            },
        )
        .await;

        true
    }
}

/// リアクション送信のユースケース
pub struct SendReactionUseCase {
    sender: Arc<dyn FrameSender>,
}

impl SendReactionUseCase {
    pub fn new(sender: Arc<dyn FrameSender>) -> Self {
        Self { sender }
    }

    /// React to a message; the emoji defaults to 👍.
    pub async fn execute(&self, message_id: MessageId, emoji: Option<&str>) -> bool {
        let emoji = emoji
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .unwrap_or(DEFAULT_REACTION);

        push_frame(
            self.sender.as_ref(),
            &OutboundFrame::Reaction {
                message_id: message_id.value(),
                emoji: emoji.to_string(),
            },
        )
        .await
    }
}
