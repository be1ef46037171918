//! HTTP API response DTOs.

use serde::Deserialize;

/// Entry of `GET /users/search`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSearchHit {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub is_online: bool,
    #[serde(default)]
    pub avatar: Option<String>,
}

/// Entry of `GET /rooms`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomListEntry {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub unread_count: i64,
    #[serde(default)]
    pub last_message: Option<String>,
    #[serde(default)]
    pub last_message_at: Option<String>,
}
