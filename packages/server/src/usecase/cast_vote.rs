//! UseCase: cast or change a vote.

use std::sync::Arc;

use crate::domain::{
    ParticipantName, RepositoryError, RoomId, RoomRepository, RoomSnapshot, Vote,
};

/// Records a vote unconditionally; prior membership is not required, so a
/// vote racing a join never gets lost.
pub struct CastVoteUseCase {
    repository: Arc<dyn RoomRepository>,
}

impl CastVoteUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// Execute the vote. The router broadcasts only the votes field of the
    /// returned snapshot.
    pub async fn execute(
        &self,
        room: &RoomId,
        name: &ParticipantName,
        vote: Vote,
    ) -> Result<RoomSnapshot, RepositoryError> {
        self.repository.set_vote(room, name, vote).await
    }
}
