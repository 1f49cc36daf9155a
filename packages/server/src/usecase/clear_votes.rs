//! UseCase: clear every vote in a room.

use std::sync::Arc;

use crate::domain::{RepositoryError, RoomId, RoomRepository, RoomSnapshot};

pub struct ClearVotesUseCase {
    repository: Arc<dyn RoomRepository>,
}

impl ClearVotesUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// Execute the clear. All participants lose their vote; members and the
    /// reveal flag stay untouched. The router broadcasts only the votes
    /// field of the returned snapshot.
    pub async fn execute(&self, room: &RoomId) -> Result<RoomSnapshot, RepositoryError> {
        self.repository.clear_votes(room).await
    }
}
