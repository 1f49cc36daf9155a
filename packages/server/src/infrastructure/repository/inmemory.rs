//! In-memory RoomRepository implementation.
//!
//! A `HashMap` behind a `tokio::sync::Mutex` stands in for the shared
//! store. Observable semantics match the Redis implementation, including
//! the empty-room cleanup, so use case tests exercise the same contract the
//! production backend provides. Not suitable for multi-process deployments:
//! state is process-local.

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ParticipantName, RepositoryError, RoomId, RoomRepository, RoomSnapshot, Vote,
};

#[derive(Debug, Default, Clone)]
struct RoomEntry {
    members: BTreeSet<String>,
    votes: HashMap<String, String>,
    revealed: bool,
}

impl RoomEntry {
    fn snapshot(&self) -> RoomSnapshot {
        RoomSnapshot {
            members: self.members.clone(),
            votes: self.votes.clone(),
            revealed: self.revealed,
        }
    }
}

/// In-memory RoomRepository implementation.
pub struct InMemoryRoomRepository {
    rooms: Mutex<HashMap<RoomId, RoomEntry>>,
}

impl InMemoryRoomRepository {
    pub fn new() -> Self {
        Self {
            rooms: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryRoomRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn add_member(
        &self,
        room: &RoomId,
        name: &ParticipantName,
        vote: Option<Vote>,
    ) -> Result<RoomSnapshot, RepositoryError> {
        let mut rooms = self.rooms.lock().await;
        let entry = rooms.entry(room.clone()).or_default();
        entry.members.insert(name.as_str().to_string());
        if let Some(vote) = vote {
            entry
                .votes
                .insert(name.as_str().to_string(), vote.as_str().to_string());
        }
        Ok(entry.snapshot())
    }

    async fn remove_member(
        &self,
        room: &RoomId,
        name: &ParticipantName,
    ) -> Result<RoomSnapshot, RepositoryError> {
        let mut rooms = self.rooms.lock().await;
        let Some(entry) = rooms.get_mut(room) else {
            return Ok(RoomSnapshot::default());
        };
        entry.members.remove(name.as_str());
        entry.votes.remove(name.as_str());
        if entry.members.is_empty() {
            // Last member left: drop the whole room so abandoned rooms do
            // not accumulate.
            rooms.remove(room);
            return Ok(RoomSnapshot::default());
        }
        Ok(entry.snapshot())
    }

    async fn set_vote(
        &self,
        room: &RoomId,
        name: &ParticipantName,
        vote: Vote,
    ) -> Result<RoomSnapshot, RepositoryError> {
        let mut rooms = self.rooms.lock().await;
        let entry = rooms.entry(room.clone()).or_default();
        entry
            .votes
            .insert(name.as_str().to_string(), vote.as_str().to_string());
        Ok(entry.snapshot())
    }

    async fn clear_votes(&self, room: &RoomId) -> Result<RoomSnapshot, RepositoryError> {
        let mut rooms = self.rooms.lock().await;
        let Some(entry) = rooms.get_mut(room) else {
            return Ok(RoomSnapshot::default());
        };
        entry.votes.clear();
        Ok(entry.snapshot())
    }

    async fn set_revealed(
        &self,
        room: &RoomId,
        revealed: bool,
    ) -> Result<RoomSnapshot, RepositoryError> {
        let mut rooms = self.rooms.lock().await;
        let entry = rooms.entry(room.clone()).or_default();
        entry.revealed = revealed;
        Ok(entry.snapshot())
    }

    async fn snapshot(&self, room: &RoomId) -> Result<RoomSnapshot, RepositoryError> {
        let rooms = self.rooms.lock().await;
        Ok(rooms
            .get(room)
            .map(RoomEntry::snapshot)
            .unwrap_or_default())
    }
}
