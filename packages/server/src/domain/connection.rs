//! Connection identity and the room/name association.

use std::fmt;

use uuid::Uuid;

use super::room::{ParticipantName, RoomId};

/// Stable identifier of a live transport session, assigned server-side at
/// accept time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The transient binding of a connection to a `(room, participant name)`
/// pair.
///
/// Set only after a successful join, read by the disconnect handler, never
/// written to the shared store. A connection holds at most one association
/// at a time; if it drops without an explicit leave, the disconnect handler
/// is the sole cleanup path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Association {
    pub room: RoomId,
    pub name: ParticipantName,
}
