//! Client configuration.
//!
//! The binary parses its command line with `clap` and hands the raw values
//! to [`ClientConfig::new`], which validates them and derives the endpoints.

use std::path::PathBuf;

use reqwest::Url;

use crate::{
    domain::{RECONNECT_DELAY, ReconnectPolicy, RoomId, UserId},
    error::ClientError,
};

/// WebSocket path below the server's context path.
pub const WS_PATH: &str = "/ws/chat";

/// Validated client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server URL including context path (`http://host:port/<basePath>`)
    pub server_url: Url,
    /// Session JWT (the `token` cookie)
    pub token: Option<String>,
    /// Room opened at startup
    pub room_id: Option<RoomId>,
    /// The logged-in user, used to mark own messages
    pub user_id: Option<UserId>,
    /// Preference file location
    pub preferences_path: PathBuf,
    pub reconnect: ReconnectPolicy,
}

impl ClientConfig {
    /// Build a configuration from raw values.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] if the server URL is not an absolute
    /// `http`/`https` URL.
    pub fn new(
        server: &str,
        token: Option<String>,
        room_id: Option<RoomId>,
        user_id: Option<UserId>,
        preferences_path: PathBuf,
        max_reconnects: Option<u32>,
    ) -> Result<Self, ClientError> {
        let server_url = Url::parse(server)
            .map_err(|e| ClientError::Config(format!("invalid server URL '{}': {}", server, e)))?;

        if !matches!(server_url.scheme(), "http" | "https") {
            return Err(ClientError::Config(format!(
                "server URL must use http or https (got '{}')",
                server_url.scheme()
            )));
        }
        if server_url.host_str().is_none() {
            return Err(ClientError::Config(format!(
                "server URL '{}' has no host",
                server
            )));
        }

        Ok(Self {
            server_url,
            token: token.filter(|t| !t.trim().is_empty()),
            room_id,
            user_id,
            preferences_path,
            reconnect: ReconnectPolicy::new(RECONNECT_DELAY, max_reconnects),
        })
    }

    /// `<ws|wss>://<host>/<basePath>/ws/chat`
    pub fn websocket_url(&self) -> String {
        let scheme = if self.server_url.scheme() == "https" {
            "wss"
        } else {
            "ws"
        };
        let host = self.server_url.host_str().unwrap_or_default();
        let authority = match self.server_url.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        };
        let base_path = self.server_url.path().trim_end_matches('/');

        format!("{}://{}{}{}", scheme, authority, base_path, WS_PATH)
    }
}
