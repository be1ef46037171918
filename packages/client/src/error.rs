//! Error types for the Tuganire client.

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::ValueObjectError;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),

    /// WebSocket connection error
    #[error("Connection error: {0}")]
    Connection(String),

    /// Reconnection attempts exhausted
    #[error("Failed to reconnect after {attempts} attempts")]
    ReconnectExhausted { attempts: u32 },

    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server rejected the session token
    #[error("Unauthorized: the session token is missing or expired")]
    Unauthorized,

    /// Unexpected HTTP status from the server
    #[error("Unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The server did not redirect to a room after a room operation
    #[error("Server response did not point to a room")]
    MissingRoomRedirect,

    /// JSON (de)serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Preference file could not be read or written
    #[error("Failed to access preferences at {path}: {source}")]
    Storage {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Invalid user input
    #[error(transparent)]
    InvalidInput(#[from] ValueObjectError),

    /// Line editor failure
    #[error("Readline error: {0}")]
    Readline(String),
}
