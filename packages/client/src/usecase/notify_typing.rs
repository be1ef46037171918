//! UseCase: typing indicator signalling
//!
//! A keystroke is debounced by [`KEYSTROKE_DEBOUNCE`]; when it fires a
//! typing-on frame is sent and a single idle timer is (re-)armed that sends
//! typing-off after [`TYPING_IDLE_TIMEOUT`] without further typing.

use std::{sync::Arc, time::Duration};

use tokio::sync::Mutex;

use crate::{
    domain::{ChatSession, FrameSender},
    infrastructure::dto::websocket::OutboundFrame,
};

use super::{debounce::Debouncer, push_frame};

pub const KEYSTROKE_DEBOUNCE: Duration = Duration::from_millis(400);
pub const TYPING_IDLE_TIMEOUT: Duration = Duration::from_millis(1500);

/// 入力中通知のユースケース
pub struct NotifyTypingUseCase {
    session: Arc<Mutex<ChatSession>>,
    sender: Arc<dyn FrameSender>,
    keystroke: Debouncer,
    idle: Arc<Debouncer>,
}

impl NotifyTypingUseCase {
    pub fn new(session: Arc<Mutex<ChatSession>>, sender: Arc<dyn FrameSender>) -> Self {
        Self {
            session,
            sender,
            keystroke: Debouncer::new(KEYSTROKE_DEBOUNCE),
            idle: Arc::new(Debouncer::new(TYPING_IDLE_TIMEOUT)),
        }
    }

    /// Register a keystroke in the message input.
    pub fn keystroke(&self) {
        let session = self.session.clone();
        let sender = self.sender.clone();
        let idle = self.idle.clone();

        self.keystroke.schedule(async move {
            let Some(room_id) = session.lock().await.current_room() else {
                return;
            };
            let room_id = room_id.value();

            push_frame(
                sender.as_ref(),
                &OutboundFrame::Typing {
                    room_id,
                    is_typing: true,
                },
            )
            .await;

            idle.schedule(async move {
                push_frame(
                    sender.as_ref(),
                    &OutboundFrame::Typing {
                        room_id,
                        is_typing: false,
                    },
                )
                .await;
            });
        });
    }

    /// Whether a typing-off is still pending.
    pub fn is_idle_timer_armed(&self) -> bool {
        self.idle.is_pending()
    }
}
