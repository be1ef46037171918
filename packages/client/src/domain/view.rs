//! View model produced by the session and consumed by a [`ChatSurface`].
//!
//! [`ChatSurface`]: super::port::ChatSurface

use super::{
    event::{RoomSummary, UserSummary},
    theme::Theme,
    value_object::{MessageId, RoomId},
};

/// A rendered chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageNode {
    pub id: MessageId,
    pub sender: String,
    pub content: String,
    pub created_at: Option<String>,
    /// Sent by the current user
    pub own: bool,
    /// Tagged by a read receipt
    pub seen: bool,
    /// Created lazily by the first reaction
    pub reactions: Option<String>,
}

/// A single change to apply to the visible chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewUpdate {
    AppendMessage(MessageNode),
    /// The whole message list, in order; replaces what was shown for the room
    MessagesReplaced(Vec<MessageNode>),
    ScrollToBottom,
    /// `None` clears the indicator
    TypingIndicator(Option<String>),
    MarkSeen(MessageId),
    Reactions {
        message_id: MessageId,
        text: String,
    },
    Toast(String),
    UnreadBadge {
        room_id: RoomId,
        count: u32,
    },
    Title(String),
    Presence {
        username: String,
        is_online: bool,
    },
    /// An empty list clears the results
    SearchResults(Vec<UserSummary>),
    RoomEntered(RoomId),
    Rooms(Vec<RoomSummary>),
    Theme(Theme),
    Notice(String),
}
