//! Domain layer error definitions.

use thiserror::Error;

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    /// MessageContent validation error
    #[error("MessageContent cannot be empty")]
    MessageContentEmpty,

    /// RoomName validation error
    #[error("RoomName cannot be empty")]
    RoomNameEmpty,

    /// SearchQuery too short error
    #[error("SearchQuery must have at least {min} characters (got {actual})")]
    SearchQueryTooShort { min: usize, actual: usize },

    /// Identifier parse error
    #[error("Invalid {kind} id: {value}")]
    InvalidId { kind: &'static str, value: String },
}
