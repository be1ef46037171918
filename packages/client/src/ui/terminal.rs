//! Terminal implementation of [`ChatSurface`].

use std::{
    io::{self, Write},
    sync::{Mutex, MutexGuard},
};

use crossterm::{
    cursor::MoveToColumn,
    execute, queue,
    style::Print,
    terminal::{Clear, ClearType, SetTitle},
};

use crate::domain::{ChatSurface, Theme, ViewUpdate};

use super::formatter::{MessageFormatter, Palette};

/// Prints view updates above the input prompt
pub struct TerminalSurface {
    prompt: String,
    theme: Mutex<Theme>,
}

impl TerminalSurface {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            theme: Mutex::new(Theme::default()),
        }
    }

    pub fn theme(&self) -> Theme {
        *self.theme_slot()
    }

    /// Text to print for an update; `None` when the update has no visible output.
    ///
    /// A theme update switches the palette before its own line is formatted.
    pub fn format(&self, update: &ViewUpdate) -> Option<String> {
        if let ViewUpdate::Theme(theme) = update {
            *self.theme_slot() = *theme;
        }
        let palette = Palette::for_theme(self.theme());

        match update {
            ViewUpdate::AppendMessage(node) => Some(MessageFormatter::format_message(node, &palette)),
            ViewUpdate::MessagesReplaced(nodes) => Some(MessageFormatter::format_messages(nodes, &palette)),
            // output always lands at the bottom of a terminal
            ViewUpdate::ScrollToBottom => None,
            ViewUpdate::TypingIndicator(text) => {
                MessageFormatter::format_typing(text.as_deref(), &palette)
            }
            ViewUpdate::MarkSeen(message_id) => Some(MessageFormatter::format_seen(*message_id)),
            ViewUpdate::Reactions { message_id, text } => {
                Some(MessageFormatter::format_reactions(*message_id, text))
            }
            ViewUpdate::Toast(text) => Some(MessageFormatter::format_toast(text)),
            ViewUpdate::UnreadBadge { room_id, count } => {
                Some(MessageFormatter::format_unread_badge(*room_id, *count))
            }
            ViewUpdate::Title(_) => None,
            ViewUpdate::Presence {
                username,
                is_online,
            } => Some(MessageFormatter::format_presence(username, *is_online)),
            ViewUpdate::SearchResults(users) => MessageFormatter::format_search_results(users),
            ViewUpdate::RoomEntered(room_id) => Some(MessageFormatter::format_room_entered(*room_id)),
            ViewUpdate::Rooms(rooms) => Some(MessageFormatter::format_rooms(rooms)),
            ViewUpdate::Theme(theme) => Some(MessageFormatter::format_theme(*theme)),
            ViewUpdate::Notice(text) => Some(MessageFormatter::format_notice(text)),
        }
    }

    fn theme_slot(&self) -> MutexGuard<'_, Theme> {
        self.theme.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Print `text` over the prompt line, then bring the prompt back.
    ///
    /// The line editor keeps the terminal in raw mode, so line breaks are
    /// written as `\r\n`.
    pub fn print_above_prompt(&self, out: &mut impl Write, text: &str) -> io::Result<()> {
        queue!(
            out,
            MoveToColumn(0),
            Clear(ClearType::CurrentLine),
            Print(text.replace('\n', "\r\n")),
            Print("\r\n"),
            Print(&self.prompt)
        )?;
        out.flush()
    }
}

impl ChatSurface for TerminalSurface {
    fn render(&self, update: &ViewUpdate) {
        let mut out = io::stdout().lock();

        let result = match update {
            ViewUpdate::Title(title) => {
                execute!(out, SetTitle(MessageFormatter::format_title(title)))
            }
            _ => match self.format(update) {
                Some(text) => self.print_above_prompt(&mut out, &text),
                None => Ok(()),
            },
        };

        if let Err(e) = result {
            tracing::debug!("Failed to write to the terminal: {}", e);
        }
    }
}
