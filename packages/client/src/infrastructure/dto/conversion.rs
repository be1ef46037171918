//! Conversion logic between DTOs and domain types.

use crate::domain::{
    ChatEvent, MessageId, ReceivedMessage, RoomId, RoomSummary, UserId, UserSummary,
    event::DEFAULT_REACTION,
};
use crate::infrastructure::dto::{http as http_dto, websocket as ws_dto};

// ========================================
// DTO → Domain
// ========================================

impl ws_dto::InboundFrame {
    /// Convert into a domain event; `None` for frame types the client ignores.
    pub fn into_event(self) -> Option<ChatEvent> {
        match self {
            Self::Message(frame) => Some(ChatEvent::MessageReceived(frame.into())),
            Self::Typing(frame) => Some(ChatEvent::TypingChanged {
                room_id: RoomId::new(frame.room_id),
                user_id: UserId::new(frame.user_id),
                username: frame.username.unwrap_or_default(),
                is_typing: frame.is_typing,
            }),
            Self::Seen(frame) => Some(ChatEvent::MessageSeen {
                room_id: RoomId::new(frame.room_id),
                message_id: MessageId::new(frame.message_id),
            }),
            Self::Reaction(frame) => Some(ChatEvent::ReactionAdded {
                room_id: frame.room_id.map(RoomId::new),
                message_id: MessageId::new(frame.message_id),
                emoji: frame
                    .emoji
                    .filter(|e| !e.is_empty())
                    .unwrap_or_else(|| DEFAULT_REACTION.to_string()),
            }),
            Self::UserStatus(frame) => Some(ChatEvent::UserStatusChanged {
                user_id: UserId::new(frame.user_id),
                username: frame.username.unwrap_or_default(),
                is_online: frame.is_online,
            }),
            Self::Unknown => None,
        }
    }
}

impl From<ws_dto::MessageFrame> for ReceivedMessage {
    fn from(dto: ws_dto::MessageFrame) -> Self {
        Self {
            id: MessageId::new(dto.id),
            room_id: RoomId::new(dto.room_id),
            sender_id: UserId::new(dto.sender_id),
            sender_username: dto.sender_username.unwrap_or_default(),
            content: dto.content.unwrap_or_default(),
            created_at: dto.created_at,
        }
    }
}

impl From<http_dto::UserSearchHit> for UserSummary {
    fn from(dto: http_dto::UserSearchHit) -> Self {
        Self {
            id: UserId::new(dto.id),
            username: dto.username,
            is_online: dto.is_online,
        }
    }
}

impl From<http_dto::RoomListEntry> for RoomSummary {
    fn from(dto: http_dto::RoomListEntry) -> Self {
        Self {
            id: RoomId::new(dto.id),
            name: dto.name.unwrap_or_default(),
            kind: dto.kind.unwrap_or_default(),
            unread_count: u32::try_from(dto.unread_count).unwrap_or(0),
            last_message: dto.last_message,
            last_message_at: dto.last_message_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_frame_to_domain_defaults_missing_text() {
        // テスト項目: 送信者名や内容が欠けていても空文字として変換される
        // given (前提条件):
        let dto = ws_dto::MessageFrame {
            id: 1,
            room_id: 7,
            sender_id: 2,
            sender_username: None,
            content: None,
            created_at: None,
            reply_to_id: None,
        };

        // when (操作):
        let message: ReceivedMessage = dto.into();

        // then (期待する結果):
        assert_eq!(message.sender_username, "");
        assert_eq!(message.content, "");
        assert_eq!(message.room_id, RoomId::new(7));
    }

    #[test]
    fn test_reaction_without_emoji_defaults_to_thumbs_up() {
        // テスト項目: 絵文字がないリアクションは 👍 になる
        // given (前提条件):
        let frame = ws_dto::InboundFrame::Reaction(ws_dto::ReactionFrame {
            room_id: None,
            message_id: 3,
            user_id: Some(2),
            username: Some("bob".to_string()),
            emoji: None,
        });

        // when (操作):
        let event = frame.into_event();

        // then (期待する結果):
        assert_eq!(
            event,
            Some(ChatEvent::ReactionAdded {
                room_id: None,
                message_id: MessageId::new(3),
                emoji: "👍".to_string(),
            })
        );
    }

    #[test]
    fn test_unknown_frame_has_no_event() {
        // テスト項目: 未知のフレームはイベントに変換されない
        // given (前提条件):
        let frame = ws_dto::InboundFrame::Unknown;

        // when (操作):
        let event = frame.into_event();

        // then (期待する結果):
        assert!(event.is_none());
    }

    #[test]
    fn test_room_list_entry_to_domain() {
        // テスト項目: ルーム一覧の DTO がドメインに変換される
        // given (前提条件):
        let dto = http_dto::RoomListEntry {
            id: 4,
            name: Some("general".to_string()),
            kind: Some("GROUP".to_string()),
            unread_count: 3,
            last_message: Some("bye".to_string()),
            last_message_at: None,
        };

        // when (操作):
        let room: RoomSummary = dto.into();

        // then (期待する結果):
        assert_eq!(room.id, RoomId::new(4));
        assert_eq!(room.name, "general");
        assert_eq!(room.kind, "GROUP");
        assert_eq!(room.unread_count, 3);
    }
}
