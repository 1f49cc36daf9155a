//! UseCase: read a room snapshot without mutation.

use std::sync::Arc;

use crate::domain::{RepositoryError, RoomId, RoomRepository, RoomSnapshot};

pub struct GetSnapshotUseCase {
    repository: Arc<dyn RoomRepository>,
}

impl GetSnapshotUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, room: &RoomId) -> Result<RoomSnapshot, RepositoryError> {
        self.repository.snapshot(room).await
    }
}
