//! Chat events and read models received from the server.

use super::value_object::{MessageId, RoomId, UserId};

/// Emoji used when a reaction arrives without one.
pub const DEFAULT_REACTION: &str = "👍";

/// A chat message as delivered by the server (live or from history).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceivedMessage {
    pub id: MessageId,
    pub room_id: RoomId,
    pub sender_id: UserId,
    pub sender_username: String,
    pub content: String,
    /// Server `createdAt`, kept raw and formatted at render time
    pub created_at: Option<String>,
}

/// Inbound events understood by the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEvent {
    MessageReceived(ReceivedMessage),
    TypingChanged {
        room_id: RoomId,
        user_id: UserId,
        username: String,
        is_typing: bool,
    },
    MessageSeen {
        room_id: RoomId,
        message_id: MessageId,
    },
    ReactionAdded {
        /// The server omits the room on reactions; when present it must match
        room_id: Option<RoomId>,
        message_id: MessageId,
        emoji: String,
    },
    UserStatusChanged {
        user_id: UserId,
        username: String,
        is_online: bool,
    },
}

/// One user search hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSummary {
    pub id: UserId,
    pub username: String,
    pub is_online: bool,
}

/// One entry of the joined-room list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomSummary {
    pub id: RoomId,
    pub name: String,
    /// `DM` or `GROUP`
    pub kind: String,
    pub unread_count: u32,
    pub last_message: Option<String>,
    pub last_message_at: Option<String>,
}
