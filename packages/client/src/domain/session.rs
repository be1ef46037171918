//! Per-run chat session state.
//!
//! `ChatSession` is the client's stand-in for the chat page: it owns the
//! current room, the rendered message list, the unread counter and the
//! search results, and turns every inbound [`ChatEvent`] into the
//! [`ViewUpdate`]s a surface has to draw. All methods are pure state
//! transitions so they can be tested without any I/O.

use std::collections::HashMap;

use super::{
    event::{ChatEvent, ReceivedMessage, UserSummary},
    value_object::{MessageId, RoomId, UserId},
    view::{MessageNode, ViewUpdate},
};

/// Base window title.
pub const APP_TITLE: &str = "Tuganire";

/// Number of content characters shown in an off-room toast.
pub const TOAST_PREVIEW_CHARS: usize = 50;

#[derive(Debug, Default)]
pub struct ChatSession {
    current_room: Option<RoomId>,
    current_user: Option<UserId>,
    unread_count: u32,
    badges: HashMap<RoomId, u32>,
    messages: Vec<MessageNode>,
    /// message id -> position in `messages` (first occurrence wins)
    index: HashMap<MessageId, usize>,
    typing_indicator: Option<String>,
    search_results: Vec<UserSummary>,
    presence: HashMap<UserId, bool>,
}

impl ChatSession {
    pub fn new(current_room: Option<RoomId>, current_user: Option<UserId>) -> Self {
        Self {
            current_room,
            current_user,
            ..Self::default()
        }
    }

    pub fn current_room(&self) -> Option<RoomId> {
        self.current_room
    }

    pub fn current_user(&self) -> Option<UserId> {
        self.current_user
    }

    pub fn unread_count(&self) -> u32 {
        self.unread_count
    }

    pub fn badge(&self, room_id: RoomId) -> u32 {
        self.badges.get(&room_id).copied().unwrap_or(0)
    }

    pub fn messages(&self) -> &[MessageNode] {
        &self.messages
    }

    pub fn message(&self, id: MessageId) -> Option<&MessageNode> {
        self.index.get(&id).map(|&i| &self.messages[i])
    }

    pub fn typing_indicator(&self) -> Option<&str> {
        self.typing_indicator.as_deref()
    }

    pub fn search_results(&self) -> &[UserSummary] {
        &self.search_results
    }

    /// Search result at a 1-based position, as listed on screen.
    pub fn search_result(&self, position: usize) -> Option<&UserSummary> {
        position
            .checked_sub(1)
            .and_then(|i| self.search_results.get(i))
    }

    pub fn is_online(&self, user_id: UserId) -> Option<bool> {
        self.presence.get(&user_id).copied()
    }

    /// Window title reflecting the unread counter.
    pub fn title(&self) -> String {
        if self.unread_count > 0 {
            format!("({}) {}", self.unread_count, APP_TITLE)
        } else {
            APP_TITLE.to_string()
        }
    }

    /// Apply an inbound event and return what changed on screen.
    pub fn apply(&mut self, event: ChatEvent) -> Vec<ViewUpdate> {
        match event {
            ChatEvent::MessageReceived(message) => self.receive_message(message),
            ChatEvent::TypingChanged {
                room_id,
                user_id,
                username,
                is_typing,
            } => self.change_typing(room_id, user_id, username, is_typing),
            ChatEvent::MessageSeen {
                room_id,
                message_id,
            } => self.mark_seen(room_id, message_id),
            ChatEvent::ReactionAdded {
                room_id,
                message_id,
                emoji,
            } => self.add_reaction(room_id, message_id, &emoji),
            ChatEvent::UserStatusChanged {
                user_id,
                username,
                is_online,
            } => self.change_user_status(user_id, username, is_online),
        }
    }

    /// Switch to another room, resetting everything that belongs to the old one.
    ///
    /// Navigation is the only way the unread counter and the badges are reset.
    pub fn navigate(&mut self, room_id: RoomId) -> Vec<ViewUpdate> {
        self.current_room = Some(room_id);
        self.unread_count = 0;
        self.badges.clear();
        self.messages.clear();
        self.index.clear();
        self.typing_indicator = None;
        self.search_results.clear();

        vec![
            ViewUpdate::RoomEntered(room_id),
            ViewUpdate::TypingIndicator(None),
            ViewUpdate::SearchResults(Vec::new()),
            ViewUpdate::Title(self.title()),
        ]
    }

    /// Render the current room's history as its initial message list.
    ///
    /// Live messages that arrived while the history was being fetched stay
    /// after it, and a message present in both is kept once (the live node,
    /// with its receipts and reactions).
    pub fn load_history(&mut self, history: Vec<ReceivedMessage>) -> Vec<ViewUpdate> {
        let Some(current) = self.current_room else {
            return Vec::new();
        };

        let mut live = std::mem::take(&mut self.messages);
        self.index.clear();
        let had_live = !live.is_empty();

        for message in history.into_iter().filter(|m| m.room_id == current) {
            if self.index.contains_key(&message.id) {
                continue;
            }
            let node = match live.iter().position(|n| n.id == message.id) {
                Some(i) => live.remove(i),
                None => self.node_from(message),
            };
            self.push_node(node);
        }
        for node in live {
            if !self.index.contains_key(&node.id) {
                self.push_node(node);
            }
        }

        if self.messages.is_empty() {
            return Vec::new();
        }

        let mut updates = if had_live {
            vec![ViewUpdate::MessagesReplaced(self.messages.clone())]
        } else {
            self.messages
                .iter()
                .cloned()
                .map(ViewUpdate::AppendMessage)
                .collect()
        };
        updates.push(ViewUpdate::ScrollToBottom);
        updates
    }

    pub fn set_search_results(&mut self, users: Vec<UserSummary>) -> Vec<ViewUpdate> {
        self.search_results = users;
        vec![ViewUpdate::SearchResults(self.search_results.clone())]
    }

    pub fn clear_search_results(&mut self) -> Vec<ViewUpdate> {
        self.search_results.clear();
        vec![ViewUpdate::SearchResults(Vec::new())]
    }

    fn receive_message(&mut self, message: ReceivedMessage) -> Vec<ViewUpdate> {
        if self.current_room == Some(message.room_id) {
            let node = self.node_from(message);
            self.push_node(node.clone());
            return vec![ViewUpdate::AppendMessage(node), ViewUpdate::ScrollToBottom];
        }

        // Off-room messages never enter the visible list; it only holds the
        // current room. They surface as a toast and a badge instead.
        let preview: String = message.content.chars().take(TOAST_PREVIEW_CHARS).collect();
        let toast = format!("{}: {}", message.sender_username, preview);

        self.unread_count += 1;
        let badge = self.badges.entry(message.room_id).or_insert(0);
        *badge += 1;
        let count = *badge;

        vec![
            ViewUpdate::Toast(toast),
            ViewUpdate::UnreadBadge {
                room_id: message.room_id,
                count,
            },
            ViewUpdate::Title(self.title()),
        ]
    }

    fn change_typing(
        &mut self,
        room_id: RoomId,
        user_id: UserId,
        username: String,
        is_typing: bool,
    ) -> Vec<ViewUpdate> {
        if self.current_room != Some(room_id) || self.current_user == Some(user_id) {
            return Vec::new();
        }

        self.typing_indicator = is_typing.then(|| format!("{} is typing...", username));
        vec![ViewUpdate::TypingIndicator(self.typing_indicator.clone())]
    }

    fn mark_seen(&mut self, room_id: RoomId, message_id: MessageId) -> Vec<ViewUpdate> {
        if self.current_room != Some(room_id) {
            return Vec::new();
        }

        match self.index.get(&message_id) {
            Some(&i) => {
                self.messages[i].seen = true;
                vec![ViewUpdate::MarkSeen(message_id)]
            }
            None => Vec::new(),
        }
    }

    fn add_reaction(
        &mut self,
        room_id: Option<RoomId>,
        message_id: MessageId,
        emoji: &str,
    ) -> Vec<ViewUpdate> {
        if self.current_room.is_none() {
            return Vec::new();
        }
        if let Some(room_id) = room_id
            && self.current_room != Some(room_id)
        {
            return Vec::new();
        }

        let Some(&i) = self.index.get(&message_id) else {
            return Vec::new();
        };

        let reactions = self.messages[i].reactions.get_or_insert_with(String::new);
        reactions.push(' ');
        reactions.push_str(emoji);

        vec![ViewUpdate::Reactions {
            message_id,
            text: reactions.clone(),
        }]
    }

    fn change_user_status(
        &mut self,
        user_id: UserId,
        username: String,
        is_online: bool,
    ) -> Vec<ViewUpdate> {
        self.presence.insert(user_id, is_online);

        let mut updates = vec![ViewUpdate::Presence {
            username,
            is_online,
        }];

        let mut listed = false;
        for user in self.search_results.iter_mut().filter(|u| u.id == user_id) {
            user.is_online = is_online;
            listed = true;
        }
        if listed {
            updates.push(ViewUpdate::SearchResults(self.search_results.clone()));
        }

        updates
    }

    fn node_from(&self, message: ReceivedMessage) -> MessageNode {
        MessageNode {
            id: message.id,
            own: self.current_user == Some(message.sender_id),
            sender: message.sender_username,
            content: message.content,
            created_at: message.created_at,
            seen: false,
            reactions: None,
        }
    }

    fn push_node(&mut self, node: MessageNode) {
        self.index.entry(node.id).or_insert(self.messages.len());
        self.messages.push(node);
    }
}
