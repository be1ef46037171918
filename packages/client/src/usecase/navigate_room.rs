//! UseCase: moving between rooms
//!
//! DM and group creation go through the server's form endpoints, which
//! answer with a redirect to the room. Entering a room resets the session
//! view, joins the room over the socket and loads its recent history.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
    domain::{ChatApi, ChatSession, ChatSurface, FrameSender, RoomId, RoomName, UserId},
    error::ClientError,
    infrastructure::dto::websocket::OutboundFrame,
};

use super::{push_frame, render_all};

/// Number of messages loaded when entering a room.
pub const HISTORY_LIMIT: u32 = 50;

/// ルーム移動のユースケース
pub struct NavigateRoomUseCase {
    api: Arc<dyn ChatApi>,
    session: Arc<Mutex<ChatSession>>,
    sender: Arc<dyn FrameSender>,
    surface: Arc<dyn ChatSurface>,
}

impl NavigateRoomUseCase {
    pub fn new(
        api: Arc<dyn ChatApi>,
        session: Arc<Mutex<ChatSession>>,
        sender: Arc<dyn FrameSender>,
        surface: Arc<dyn ChatSurface>,
    ) -> Self {
        Self {
            api,
            session,
            sender,
            surface,
        }
    }

    /// Open (or reuse) the DM room with `target` and enter it.
    pub async fn create_dm(&self, target: UserId) -> Result<RoomId, ClientError> {
        let room_id = self.api.create_dm(target).await?;
        self.enter(room_id).await;
        Ok(room_id)
    }

    /// Create a group room and enter it.
    ///
    /// # Returns
    ///
    /// `Ok(None)` without any request when the name is blank
    pub async fn create_group(&self, raw_name: &str) -> Result<Option<RoomId>, ClientError> {
        let Ok(name) = RoomName::new(raw_name) else {
            return Ok(None);
        };
        let room_id = self.api.create_group_room(&name).await?;
        self.enter(room_id).await;
        Ok(Some(room_id))
    }

    /// Join an existing room and enter it.
    pub async fn join(&self, room_id: RoomId) -> Result<RoomId, ClientError> {
        let room_id = self.api.join_room(room_id).await?;
        self.enter(room_id).await;
        Ok(room_id)
    }

    /// Start a DM with the user listed at `position` (1-based).
    ///
    /// The results are cleared before the request goes out.
    ///
    /// # Returns
    ///
    /// `Ok(None)` when nothing is listed at that position
    pub async fn pick_search_result(&self, position: usize) -> Result<Option<RoomId>, ClientError> {
        let target = {
            let mut session = self.session.lock().await;
            let Some(target) = session.search_result(position).map(|user| user.id) else {
                return Ok(None);
            };
            let updates = session.clear_search_results();
            render_all(self.surface.as_ref(), &updates);
            target
        };

        self.create_dm(target).await.map(Some)
    }

    /// Switch the session to `room_id`.
    pub async fn enter(&self, room_id: RoomId) {
        let updates = self.session.lock().await.navigate(room_id);
        render_all(self.surface.as_ref(), &updates);

        push_frame(
            self.sender.as_ref(),
            &OutboundFrame::JoinRoom {
                room_id: room_id.value(),
            },
        )
        .await;

        self.load_history().await;
    }

    /// Load the recent history of the current room.
    ///
    /// Failures are logged; the room stays usable for live messages.
    pub async fn load_history(&self) {
        let Some(room_id) = self.session.lock().await.current_room() else {
            return;
        };

        match self.api.load_history(room_id, HISTORY_LIMIT).await {
            Ok(history) => {
                let updates = self.session.lock().await.load_history(history);
                render_all(self.surface.as_ref(), &updates);
            }
            Err(e) => tracing::warn!("Failed to load history of room {}: {}", room_id, e),
        }
    }
}
