//! WebSocket frame DTOs.
//!
//! Every frame is a JSON object tagged by its `type` field.

use serde::{Deserialize, Serialize};

/// Frames sent by the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OutboundFrame {
    #[serde(rename_all = "camelCase")]
    JoinRoom { room_id: i64 },
    #[serde(rename_all = "camelCase")]
    Message { room_id: i64, content: String },
    #[serde(rename_all = "camelCase")]
    Typing { room_id: i64, is_typing: bool },
    #[serde(rename_all = "camelCase")]
    Reaction { message_id: i64, emoji: String },
}

impl OutboundFrame {
    /// Encode as a JSON text frame payload.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Frames received from the server
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InboundFrame {
    Message(MessageFrame),
    Typing(TypingFrame),
    Seen(SeenFrame),
    Reaction(ReactionFrame),
    UserStatus(UserStatusFrame),
    /// Any other `type`; dropped by the dispatcher
    #[serde(other)]
    Unknown,
}

/// New chat message (also the shape of `/messages` history entries)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageFrame {
    pub id: i64,
    pub room_id: i64,
    pub sender_id: i64,
    #[serde(default)]
    pub sender_username: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    /// 0 or absent when the message is not a reply
    #[serde(default)]
    pub reply_to_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypingFrame {
    pub room_id: i64,
    pub user_id: i64,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub is_typing: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeenFrame {
    #[serde(default)]
    pub room_id: i64,
    pub message_id: i64,
    #[serde(default)]
    pub user_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionFrame {
    #[serde(default)]
    pub room_id: Option<i64>,
    pub message_id: i64,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub emoji: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStatusFrame {
    pub user_id: i64,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub is_online: bool,
}
