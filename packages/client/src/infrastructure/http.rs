//! HTTP adapter for the Tuganire server endpoints.
//!
//! Every request carries the session cookie and `X-Requested-With:
//! XMLHttpRequest`, so an expired session answers `401` instead of a
//! redirect to the login page. Redirects are never followed: room
//! operations answer with `302 /chat?roomId=N`, and that room id is the
//! result of the call.

use async_trait::async_trait;
use reqwest::{
    Response, StatusCode, Url,
    header::{COOKIE, HeaderMap, HeaderName, HeaderValue, LOCATION},
    redirect,
};
use serde::de::DeserializeOwned;

use crate::{
    domain::{ChatApi, ReceivedMessage, RoomId, RoomName, RoomSummary, SearchQuery, UserId, UserSummary},
    error::ClientError,
    infrastructure::dto::{
        http::{RoomListEntry, UserSearchHit},
        websocket::MessageFrame,
    },
};

const X_REQUESTED_WITH: HeaderName = HeaderName::from_static("x-requested-with");

/// [`ChatApi`] implementation over `reqwest`
pub struct HttpChatApi {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpChatApi {
    /// Create a new HttpChatApi
    ///
    /// # Arguments
    ///
    /// * `base_url` - Server URL including the context path, e.g. `http://host:8080/tuganire`
    /// * `token` - Session JWT sent as the `token` cookie
    pub fn new(base_url: Url, token: Option<&str>) -> Result<Self, ClientError> {
        let mut headers = HeaderMap::new();
        headers.insert(X_REQUESTED_WITH, HeaderValue::from_static("XMLHttpRequest"));
        if let Some(token) = token {
            let cookie = HeaderValue::from_str(&format!("token={}", token)).map_err(|_| {
                ClientError::Config("token contains characters not allowed in a cookie".into())
            })?;
            headers.insert(COOKIE, cookie);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .redirect(redirect::Policy::none())
            .build()?;

        Ok(Self { client, base_url })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(ClientError::Unauthorized);
        }
        if !status.is_success() {
            return Err(ClientError::UnexpectedStatus {
                status: status.as_u16(),
                url: response.url().to_string(),
            });
        }
        Ok(response.json::<T>().await?)
    }

    async fn post_for_room(
        &self,
        url: String,
        form: &[(&str, String)],
    ) -> Result<RoomId, ClientError> {
        let response = self.client.post(&url).form(form).send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            return Err(ClientError::Unauthorized);
        }
        if !status.is_redirection() {
            return Err(ClientError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(ClientError::MissingRoomRedirect)?;

        room_id_from_location(&self.base_url, location).ok_or_else(|| {
            if location.contains("login") {
                ClientError::Unauthorized
            } else {
                ClientError::MissingRoomRedirect
            }
        })
    }
}

/// Extract `roomId` from a redirect target such as `/tuganire/chat?roomId=12`.
pub fn room_id_from_location(base_url: &Url, location: &str) -> Option<RoomId> {
    let target = base_url.join(location).ok()?;
    target
        .query_pairs()
        .find(|(key, _)| key == "roomId")
        .and_then(|(_, value)| value.parse().ok())
}

#[async_trait]
impl ChatApi for HttpChatApi {
    async fn search_users(&self, query: &SearchQuery) -> Result<Vec<UserSummary>, ClientError> {
        let response = self
            .client
            .get(self.endpoint("/users/search"))
            .query(&[("q", query.as_str())])
            .send()
            .await?;

        let hits: Vec<UserSearchHit> = Self::read_json(response).await?;
        Ok(hits.into_iter().map(Into::into).collect())
    }

    async fn create_dm(&self, target: UserId) -> Result<RoomId, ClientError> {
        self.post_for_room(
            self.endpoint("/rooms"),
            &[("type", "DM".to_string()), ("targetUserId", target.to_string())],
        )
        .await
    }

    async fn create_group_room(&self, name: &RoomName) -> Result<RoomId, ClientError> {
        self.post_for_room(self.endpoint("/rooms"), &[("name", name.as_str().to_string())])
            .await
    }

    async fn join_room(&self, room_id: RoomId) -> Result<RoomId, ClientError> {
        self.post_for_room(self.endpoint(&format!("/rooms/{}/join", room_id)), &[])
            .await
    }

    async fn list_rooms(&self) -> Result<Vec<RoomSummary>, ClientError> {
        let response = self.client.get(self.endpoint("/rooms")).send().await?;

        let rooms: Vec<RoomListEntry> = Self::read_json(response).await?;
        Ok(rooms.into_iter().map(Into::into).collect())
    }

    async fn load_history(
        &self,
        room_id: RoomId,
        limit: u32,
    ) -> Result<Vec<ReceivedMessage>, ClientError> {
        let response = self
            .client
            .get(self.endpoint("/messages"))
            .query(&[("roomId", room_id.to_string()), ("limit", limit.to_string())])
            .send()
            .await?;

        let messages: Vec<MessageFrame> = Self::read_json(response).await?;
        Ok(messages.into_iter().map(Into::into).collect())
    }
}
