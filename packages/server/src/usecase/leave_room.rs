//! UseCase: leave a room.
//!
//! One cleanup path serves both the graceful leave and the network-loss
//! disconnect: the router cannot tell them apart, and the shared state must
//! converge the same way in either case.

use std::sync::Arc;

use crate::domain::{
    Association, ConnectionId, MessagePusher, RepositoryError, RoomRepository, RoomSnapshot,
};

pub struct LeaveRoomUseCase {
    repository: Arc<dyn RoomRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl LeaveRoomUseCase {
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// Execute the leave: drop the room subscription first so the leaver
    /// never sees the updates their own departure triggers, then remove the
    /// member and their vote from the shared state.
    ///
    /// # Returns
    ///
    /// A fresh snapshot on success; the router broadcasts its members and
    /// votes fields to the remaining subscribers.
    pub async fn execute(
        &self,
        conn_id: &ConnectionId,
        association: &Association,
    ) -> Result<RoomSnapshot, RepositoryError> {
        self.message_pusher
            .unsubscribe(conn_id, &association.room)
            .await;
        self.repository
            .remove_member(&association.room, &association.name)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ParticipantName, RoomId, Vote};
    use crate::infrastructure::{
        message_pusher::WebSocketMessagePusher, repository::InMemoryRoomRepository,
    };
    use tokio::sync::mpsc;

    fn association(room: &str, name: &str) -> Association {
        Association {
            room: RoomId::new(room.to_string()).unwrap(),
            name: ParticipantName::new(name.to_string()).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_leave_removes_member_vote_and_subscription() {
        // テスト項目: leave でメンバー・投票・購読の全てが片付く
        // given (前提条件):
        let repository = Arc::new(InMemoryRoomRepository::new());
        let pusher = Arc::new(WebSocketMessagePusher::new());
        let usecase = LeaveRoomUseCase::new(repository.clone(), pusher.clone());

        let assoc = association("r1", "bob");
        repository
            .add_member(&assoc.room, &assoc.name, Some(Vote::new("5".to_string())))
            .await
            .unwrap();
        let alice = ParticipantName::new("alice".to_string()).unwrap();
        repository.add_member(&assoc.room, &alice, None).await.unwrap();

        let conn_id = ConnectionId::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        pusher.register_connection(conn_id, tx).await;
        pusher.subscribe(&conn_id, &assoc.room).await;

        // when (操作):
        let snapshot = usecase.execute(&conn_id, &assoc).await.unwrap();

        // then (期待する結果): bob とその投票が消えている
        assert!(!snapshot.members.contains("bob"));
        assert!(!snapshot.votes.contains_key("bob"));
        assert!(snapshot.members.contains("alice"));

        // 購読解除済みなので leave 後のルーム送信は届かない
        pusher.push_to_room(&assoc.room, "update").await.unwrap();
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_leave_for_absent_member_is_noop() {
        // テスト項目: 既に存在しないメンバーの leave も成功する（冪等）
        // given (前提条件):
        let repository = Arc::new(InMemoryRoomRepository::new());
        let pusher = Arc::new(WebSocketMessagePusher::new());
        let usecase = LeaveRoomUseCase::new(repository, pusher);

        // when (操作):
        let result = usecase
            .execute(&ConnectionId::new(), &association("r1", "ghost"))
            .await;

        // then (期待する結果):
        assert!(result.is_ok());
    }
}
