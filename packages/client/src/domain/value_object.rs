//! Value Objects for domain models.
//!
//! Value Objects are immutable objects that represent values in the domain.
//! They are compared by their value, not by identity.

use std::{fmt, str::FromStr};

use super::error::ValueObjectError;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw server identifier.
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Get the raw identifier.
            pub const fn value(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ValueObjectError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim()
                    .parse::<i64>()
                    .map(Self)
                    .map_err(|_| ValueObjectError::InvalidId {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }
    };
}

define_id!(
    /// Room identifier assigned by the server.
    RoomId,
    "room"
);

define_id!(
    /// User identifier assigned by the server.
    UserId,
    "user"
);

define_id!(
    /// Message identifier assigned by the server.
    MessageId,
    "message"
);

/// Outgoing message content.
///
/// Content is trimmed on construction and must not be empty afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageContent(String);

impl MessageContent {
    /// Create a new MessageContent from raw input.
    ///
    /// # Returns
    ///
    /// A Result containing the trimmed content or an error if nothing remains
    pub fn new(raw: &str) -> Result<Self, ValueObjectError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValueObjectError::MessageContentEmpty);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to owned String.
    pub fn into_string(self) -> String {
        self.0
    }
}

/// Name of a group room to create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomName(String);

impl RoomName {
    /// Create a new RoomName from raw input (trimmed, non-empty).
    pub fn new(raw: &str) -> Result<Self, ValueObjectError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValueObjectError::RoomNameEmpty);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// User search term.
///
/// The term is trimmed and must hold at least [`SearchQuery::MIN_CHARS`]
/// characters; shorter input never reaches the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery(String);

impl SearchQuery {
    /// Minimum number of characters before a search is issued.
    pub const MIN_CHARS: usize = 2;

    /// Create a new SearchQuery from raw input.
    pub fn new(raw: &str) -> Result<Self, ValueObjectError> {
        let trimmed = raw.trim();
        let actual = trimmed.chars().count();
        if actual < Self::MIN_CHARS {
            return Err(ValueObjectError::SearchQueryTooShort {
                min: Self::MIN_CHARS,
                actual,
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
