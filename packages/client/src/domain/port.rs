//! Port traits the use cases depend on.
//!
//! Implementations live in the infrastructure layer (WebSocket, HTTP,
//! preference file) and in the UI layer (terminal surface).

use async_trait::async_trait;
use thiserror::Error;

use crate::error::ClientError;

use super::{
    event::{ReceivedMessage, RoomSummary, UserSummary},
    value_object::{RoomId, RoomName, SearchQuery, UserId},
    view::ViewUpdate,
};

/// Errors that can occur when pushing a frame to the server
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PushError {
    /// No WebSocket is open; the frame was dropped
    #[error("WebSocket is not open")]
    NotConnected,
}

/// Outbound side of the WebSocket connection.
///
/// A push while no socket is open fails with [`PushError::NotConnected`]
/// and the frame is dropped, never queued.
#[async_trait]
pub trait FrameSender: Send + Sync {
    /// Push an already encoded JSON frame.
    async fn push(&self, payload: String) -> Result<(), PushError>;
}

/// HTTP endpoints of the Tuganire server.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatApi: Send + Sync {
    /// `GET /users/search?q=`
    async fn search_users(&self, query: &SearchQuery) -> Result<Vec<UserSummary>, ClientError>;

    /// `POST /rooms` with `type=DM&targetUserId=`; returns the room redirected to
    async fn create_dm(&self, target: UserId) -> Result<RoomId, ClientError>;

    /// `POST /rooms` with `name=`; returns the room redirected to
    async fn create_group_room(&self, name: &RoomName) -> Result<RoomId, ClientError>;

    /// `POST /rooms/{id}/join`
    async fn join_room(&self, room_id: RoomId) -> Result<RoomId, ClientError>;

    /// `GET /rooms`
    async fn list_rooms(&self) -> Result<Vec<RoomSummary>, ClientError>;

    /// `GET /messages?roomId=&limit=`
    async fn load_history(
        &self,
        room_id: RoomId,
        limit: u32,
    ) -> Result<Vec<ReceivedMessage>, ClientError>;
}

/// Where view updates end up (the terminal, or a recorder in tests).
pub trait ChatSurface: Send + Sync {
    fn render(&self, update: &ViewUpdate);
}

/// Small persistent key/value store for client preferences.
pub trait PreferenceStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str) -> Result<(), ClientError>;
}

/// Receives connection lifecycle callbacks from the WebSocket connection.
#[async_trait]
pub trait ConnectionListener: Send + Sync {
    /// Called right after the socket opens; the returned payload is sent
    /// before any other outbound frame.
    async fn on_open(&self) -> Option<String>;

    /// Called for every inbound text frame, in arrival order.
    async fn on_frame(&self, text: &str);
}
