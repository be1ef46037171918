//! UseCase: joined-room listing

use std::sync::Arc;

use crate::{
    domain::{ChatApi, ChatSurface, ViewUpdate},
    error::ClientError,
};

/// ルーム一覧取得のユースケース
pub struct ListRoomsUseCase {
    api: Arc<dyn ChatApi>,
    surface: Arc<dyn ChatSurface>,
}

impl ListRoomsUseCase {
    pub fn new(api: Arc<dyn ChatApi>, surface: Arc<dyn ChatSurface>) -> Self {
        Self { api, surface }
    }

    /// Fetch the rooms the user belongs to and render them.
    pub async fn execute(&self) -> Result<usize, ClientError> {
        let rooms = self.api.list_rooms().await?;
        let count = rooms.len();
        self.surface.render(&ViewUpdate::Rooms(rooms));
        Ok(count)
    }
}
