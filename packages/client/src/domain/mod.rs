//! Domain layer: value objects, chat events, session state and ports.

pub mod error;
pub mod event;
pub mod port;
pub mod reconnect;
pub mod session;
pub mod theme;
pub mod value_object;
pub mod view;

pub use error::ValueObjectError;
pub use event::{ChatEvent, ReceivedMessage, RoomSummary, UserSummary};
pub use port::{
    ChatApi, ChatSurface, ConnectionListener, FrameSender, PreferenceStore, PushError,
};
pub use reconnect::{RECONNECT_DELAY, ReconnectPolicy};
pub use session::{APP_TITLE, ChatSession, TOAST_PREVIEW_CHARS};
pub use theme::{THEME_KEY, Theme};
pub use value_object::{MessageContent, MessageId, RoomId, RoomName, SearchQuery, UserId};
pub use view::{MessageNode, ViewUpdate};
