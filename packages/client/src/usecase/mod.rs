//! UseCase layer: one struct per client operation.

pub mod debounce;
pub mod dispatch_frame;
pub mod list_rooms;
pub mod navigate_room;
pub mod notify_typing;
pub mod search_users;
pub mod send_message;
pub mod toggle_theme;

#[cfg(test)]
pub(crate) mod testing;

pub use debounce::Debouncer;
pub use dispatch_frame::DispatchFrameUseCase;
pub use list_rooms::ListRoomsUseCase;
pub use navigate_room::{HISTORY_LIMIT, NavigateRoomUseCase};
pub use notify_typing::{KEYSTROKE_DEBOUNCE, NotifyTypingUseCase, TYPING_IDLE_TIMEOUT};
pub use search_users::{SEARCH_DEBOUNCE, SearchUsersUseCase};
pub use send_message::{SendMessageUseCase, SendReactionUseCase};
pub use toggle_theme::ToggleThemeUseCase;

use crate::{
    domain::{ChatSurface, FrameSender, ViewUpdate},
    infrastructure::dto::websocket::OutboundFrame,
};

/// Encode and push a frame; frames that cannot be sent are dropped.
///
/// Returns `true` if the frame was handed to an open socket.
pub(crate) async fn push_frame(sender: &dyn FrameSender, frame: &OutboundFrame) -> bool {
    let payload = match frame.to_json() {
        Ok(payload) => payload,
        Err(e) => {
            tracing::error!("Failed to serialize frame: {}", e);
            return false;
        }
    };

    match sender.push(payload).await {
        Ok(()) => true,
        Err(e) => {
            tracing::debug!("Dropping {:?}: {}", frame, e);
            false
        }
    }
}

pub(crate) fn render_all(surface: &dyn ChatSurface, updates: &[ViewUpdate]) {
    for update in updates {
        surface.render(update);
    }
}
