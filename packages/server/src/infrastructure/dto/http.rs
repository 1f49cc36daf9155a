//! HTTP API wire formats.

use std::collections::HashMap;

use serde::Serialize;

use crate::domain::{RoomId, RoomSnapshot};

/// Read-only view of a room, served by `GET /api/rooms/{room_id}`.
#[derive(Debug, Clone, Serialize)]
pub struct RoomSnapshotDto {
    pub room: String,
    pub members: Vec<String>,
    pub votes: HashMap<String, String>,
    pub revealed: bool,
}

impl RoomSnapshotDto {
    pub fn new(room: &RoomId, snapshot: &RoomSnapshot) -> Self {
        Self {
            room: room.as_str().to_string(),
            members: snapshot.members.iter().cloned().collect(),
            votes: snapshot.votes.clone(),
            revealed: snapshot.revealed,
        }
    }
}
