//! Infrastructure layer: wire formats and I/O adapters for the domain ports.

pub mod dto;
pub mod http;
pub mod preference_store;
pub mod websocket;

pub use http::HttpChatApi;
pub use preference_store::FilePreferenceStore;
pub use websocket::{WebSocketConnection, WebSocketFrameSender};
