//! Parsing of submitted input lines.

use thiserror::Error;

use crate::domain::{MessageId, RoomId, ValueObjectError};

/// A submitted input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Plain text for the current room
    Say(String),
    Search(String),
    /// DM the n-th (1-based) search result
    Dm(usize),
    NewRoom(String),
    Join(RoomId),
    Rooms,
    React {
        message_id: MessageId,
        emoji: Option<String>,
    },
    Theme,
    Help,
    Quit,
}

/// What a live edit of the input line means
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKind<'a> {
    /// Message draft; counts as a keystroke
    Message,
    /// Search input after `/search`
    Search(&'a str),
    /// Any other command being typed
    Command,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command '/{0}'. Type /help for the list of commands")]
    Unknown(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("'{0}' is not a valid position")]
    InvalidPosition(String),

    #[error(transparent)]
    InvalidArgument(#[from] ValueObjectError),
}

impl Command {
    /// Parse a submitted line.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let Some(rest) = line.trim_start().strip_prefix('/') else {
            return Ok(Command::Say(line.to_string()));
        };

        let (name, args) = match rest.split_once(char::is_whitespace) {
            Some((name, args)) => (name, args.trim()),
            None => (rest, ""),
        };

        match name {
            "search" => Ok(Command::Search(args.to_string())),
            "dm" => {
                if args.is_empty() {
                    return Err(CommandError::Usage("/dm <n>"));
                }
                args.parse::<usize>()
                    .ok()
                    .filter(|n| *n > 0)
                    .map(Command::Dm)
                    .ok_or_else(|| CommandError::InvalidPosition(args.to_string()))
            }
            "new" => {
                if args.is_empty() {
                    return Err(CommandError::Usage("/new <name>"));
                }
                Ok(Command::NewRoom(args.to_string()))
            }
            "join" => {
                if args.is_empty() {
                    return Err(CommandError::Usage("/join <roomId>"));
                }
                Ok(Command::Join(args.parse()?))
            }
            "rooms" => Ok(Command::Rooms),
            "react" => {
                let mut parts = args.split_whitespace();
                let Some(id) = parts.next() else {
                    return Err(CommandError::Usage("/react <messageId> [emoji]"));
                };
                Ok(Command::React {
                    message_id: id.parse()?,
                    emoji: parts.next().map(str::to_string),
                })
            }
            "theme" => Ok(Command::Theme),
            "help" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

/// Classify the line currently being edited.
pub fn classify_edit(line: &str) -> EditKind<'_> {
    let Some(rest) = line.trim_start().strip_prefix('/') else {
        return EditKind::Message;
    };

    match rest.strip_prefix("search") {
        Some("") => EditKind::Search(""),
        Some(args) if args.starts_with(char::is_whitespace) => EditKind::Search(args),
        _ => EditKind::Command,
    }
}
