//! Shared application state and the connection association side-table.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::{Association, ConnectionId, MessagePusher};
use crate::usecase::{
    CastVoteUseCase, ClearVotesUseCase, GetSnapshotUseCase, JoinRoomUseCase, LeaveRoomUseCase,
    SetRevealUseCase,
};

/// Shared application state.
pub struct AppState {
    pub join_room_usecase: Arc<JoinRoomUseCase>,
    pub cast_vote_usecase: Arc<CastVoteUseCase>,
    pub set_reveal_usecase: Arc<SetRevealUseCase>,
    pub clear_votes_usecase: Arc<ClearVotesUseCase>,
    pub leave_room_usecase: Arc<LeaveRoomUseCase>,
    pub get_snapshot_usecase: Arc<GetSnapshotUseCase>,
    /// Fan-out registry, used directly by the router for broadcasts and
    /// point-to-point error notifications.
    pub message_pusher: Arc<dyn MessagePusher>,
    /// Which `(room, name)` each live connection acts as.
    pub associations: AssociationTable,
}

/// Explicit side-table from connection id to its room/name association.
///
/// Entries are inserted only after a successful join and removed by the
/// disconnect handler (or replaced on a room switch). This is transient
/// per-process state; it is never written to the shared store, so a crashed
/// process orphans its members until their connections are re-established.
#[derive(Default)]
pub struct AssociationTable {
    entries: Mutex<HashMap<ConnectionId, Association>>,
}

impl AssociationTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, conn_id: ConnectionId, association: Association) {
        let mut entries = self.entries.lock().await;
        entries.insert(conn_id, association);
    }

    pub async fn get(&self, conn_id: &ConnectionId) -> Option<Association> {
        let entries = self.entries.lock().await;
        entries.get(conn_id).cloned()
    }

    /// Remove and return the entry, if any. The disconnect handler uses
    /// this to make cleanup run at most once per association.
    pub async fn remove(&self, conn_id: &ConnectionId) -> Option<Association> {
        let mut entries = self.entries.lock().await;
        entries.remove(conn_id)
    }
}
