//! Message formatting utilities for terminal display.
//!
//! Every string that originates from the server or another user goes
//! through one of the escaping helpers below before it reaches the
//! terminal.

use crossterm::style::{Color, Stylize};
use tuganire_shared::time::format_clock_time;

use crate::domain::{MessageId, MessageNode, RoomId, RoomSummary, Theme, UserSummary};

const SEPARATOR: &str = "------------------------------------------------------------";

/// Prefix of the continuation lines of a multi-line message.
const CONTINUATION: &str = "\n  | ";

/// Marker shown next to online users.
pub const ONLINE_MARKER: &str = "🟢";

/// Accent colors for a theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub accent: Color,
    pub own: Color,
    pub dim: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                accent: Color::Cyan,
                own: Color::Green,
                dim: Color::DarkGrey,
            },
            Theme::Light => Self {
                accent: Color::DarkBlue,
                own: Color::DarkGreen,
                dim: Color::Grey,
            },
        }
    }

    fn paint(&self, color: Color, text: &str) -> String {
        text.with(color).to_string()
    }
}

fn escape_chars(text: &str, keep: impl Fn(char) -> bool) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_control() && !keep(c) {
            escaped.extend(c.escape_default());
        } else {
            escaped.push(c);
        }
    }
    escaped
}

/// Make untrusted text inert for a terminal.
///
/// Control characters other than `\n` and `\t` (ESC, BEL, CR, ...) are
/// replaced by their escaped form so no ANSI or OSC sequence can be
/// injected. Everything else, including HTML-looking markup, is printed
/// as typed.
pub fn escape_text(text: &str) -> String {
    escape_chars(text, |c| c == '\n' || c == '\t')
}

/// Like [`escape_text`], but line breaks and tabs are escaped too, for
/// values that must stay on one line (names, previews).
pub fn escape_inline(text: &str) -> String {
    escape_chars(text, |_| false)
}

/// Escape message content; continuation lines are indented under the
/// sender so they cannot pass for another message.
pub fn escape_content(text: &str) -> String {
    escape_text(text).replace('\n', CONTINUATION)
}

/// Message formatter for terminal display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format a chat message
    ///
    /// # Arguments
    ///
    /// * `node` - The rendered message
    /// * `palette` - Colors of the active theme
    ///
    /// # Returns
    ///
    /// A formatted block with sender, content, time and message id
    pub fn format_message(node: &MessageNode, palette: &Palette) -> String {
        let sender = escape_inline(&node.sender);
        let sender = if node.own {
            palette.paint(palette.own, &format!("@{} (me)", sender))
        } else {
            palette.paint(palette.accent, &format!("@{}", sender))
        };

        let mut meta = format!("#{}", node.id);
        let time = format_clock_time(node.created_at.as_deref());
        if !time.is_empty() {
            meta.push_str(&format!(" at {}", time));
        }
        if node.seen {
            meta.push_str(" ✓✓");
        }
        if let Some(reactions) = &node.reactions {
            meta.push_str(&format!(" |{}", escape_inline(reactions)));
        }

        format!(
            "{}\n{}: {}\n{}",
            SEPARATOR,
            sender,
            escape_content(&node.content),
            palette.paint(palette.dim, &meta)
        )
    }

    /// Format a whole message list, oldest first
    pub fn format_messages(nodes: &[MessageNode], palette: &Palette) -> String {
        nodes
            .iter()
            .map(|node| Self::format_message(node, palette))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Format the typing indicator line; `None` when the indicator is cleared
    pub fn format_typing(text: Option<&str>, palette: &Palette) -> Option<String> {
        text.map(|t| palette.paint(palette.dim, &format!("... {}", escape_inline(t))))
    }

    pub fn format_seen(message_id: MessageId) -> String {
        format!("✓✓ #{} seen", message_id)
    }

    pub fn format_reactions(message_id: MessageId, reactions: &str) -> String {
        format!("#{} reactions:{}", message_id, escape_inline(reactions))
    }

    /// Format an off-room message notification
    pub fn format_toast(text: &str) -> String {
        format!("🔔 {}", escape_inline(text))
    }

    pub fn format_unread_badge(room_id: RoomId, count: u32) -> String {
        format!("room #{}: {} unread", room_id, count)
    }

    /// Terminal title text
    pub fn format_title(title: &str) -> String {
        escape_inline(title)
    }

    pub fn format_presence(username: &str, is_online: bool) -> String {
        if is_online {
            format!("{} {} is online", ONLINE_MARKER, escape_inline(username))
        } else {
            format!("⚪ {} is offline", escape_inline(username))
        }
    }

    /// Format user search results as a numbered list
    ///
    /// # Returns
    ///
    /// `None` for an empty list, which only clears the results
    pub fn format_search_results(users: &[UserSummary]) -> Option<String> {
        if users.is_empty() {
            return None;
        }

        let mut output = String::from("Users (pick with /dm <n>):");
        for (i, user) in users.iter().enumerate() {
            output.push_str(&format!("\n  {}. {}", i + 1, escape_inline(&user.username)));
            if user.is_online {
                output.push(' ');
                output.push_str(ONLINE_MARKER);
            }
        }
        Some(output)
    }

    pub fn format_room_entered(room_id: RoomId) -> String {
        format!(
            "\n============================================================\n\
             Room #{}\n\
             ============================================================",
            room_id
        )
    }

    /// Format the joined-room list
    pub fn format_rooms(rooms: &[RoomSummary]) -> String {
        if rooms.is_empty() {
            return "(No rooms)".to_string();
        }

        let mut output = String::from("Rooms:");
        for room in rooms {
            output.push_str(&format!(
                "\n  #{} {} [{}]",
                room.id,
                escape_inline(&room.name),
                escape_inline(&room.kind)
            ));
            if room.unread_count > 0 {
                output.push_str(&format!(" ({} unread)", room.unread_count));
            }
            if let Some(last) = &room.last_message {
                let preview: String = last.chars().take(40).collect();
                output.push_str(&format!(" - {}", escape_inline(&preview)));
            }
        }
        output
    }

    pub fn format_theme(theme: Theme) -> String {
        format!("Theme: {} {}", theme.icon(), theme)
    }

    pub fn format_notice(text: &str) -> String {
        format!("* {}", escape_text(text))
    }

    pub fn format_help() -> String {
        [
            "Commands:",
            "  <text>                    send a message to the current room",
            "  /search <query>           search users (live, at least 2 characters)",
            "  /dm <n>                   open a DM with the n-th search result",
            "  /new <name>               create a group room",
            "  /join <roomId>            join a room",
            "  /rooms                    list your rooms",
            "  /react <messageId> [emoji] react to a message (default 👍)",
            "  /theme                    toggle light/dark theme",
            "  /help                     show this help",
            "  /quit                     exit",
        ]
        .join("\n")
    }
}
