//! UseCase: join a room.

use std::sync::Arc;

use crate::domain::{
    ConnectionId, MessagePusher, ParticipantName, RepositoryError, RoomId, RoomRepository,
    RoomSnapshot, Vote,
};

/// Subscribes the connection to the room's multicast and adds the
/// participant to the shared member set.
pub struct JoinRoomUseCase {
    repository: Arc<dyn RoomRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl JoinRoomUseCase {
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// Execute the join.
    ///
    /// The subscription happens before the membership write, matching the
    /// broadcast contract: the joiner must receive the updates their own
    /// join triggers. If the store write fails the subscription is rolled
    /// back, so a failed join leaves no trace in the fan-out registry.
    ///
    /// # Returns
    ///
    /// A fresh snapshot on success; the router broadcasts all three fields
    /// from it (members, votes, revealed).
    pub async fn execute(
        &self,
        conn_id: &ConnectionId,
        room: &RoomId,
        name: &ParticipantName,
        vote: Option<Vote>,
    ) -> Result<RoomSnapshot, RepositoryError> {
        self.message_pusher.subscribe(conn_id, room).await;
        match self.repository.add_member(room, name, vote).await {
            Ok(snapshot) => Ok(snapshot),
            Err(e) => {
                self.message_pusher.unsubscribe(conn_id, room).await;
                Err(e)
            }
        }
    }
}
