//! UseCase: set the room-wide reveal flag.

use std::sync::Arc;

use crate::domain::{RepositoryError, RoomId, RoomRepository, RoomSnapshot};

pub struct SetRevealUseCase {
    repository: Arc<dyn RoomRepository>,
}

impl SetRevealUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// Execute the flag change. The router broadcasts only the revealed
    /// field of the returned snapshot; votes are not re-sent.
    pub async fn execute(
        &self,
        room: &RoomId,
        revealed: bool,
    ) -> Result<RoomSnapshot, RepositoryError> {
        self.repository.set_revealed(room, revealed).await
    }
}
