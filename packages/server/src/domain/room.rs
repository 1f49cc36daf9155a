//! Core value objects and the room snapshot read-model.

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use super::error::DomainError;

/// Maximum accepted length for room ids and participant names.
const MAX_IDENTIFIER_LENGTH: usize = 128;

/// Opaque identifier of a collaborative room.
///
/// A room has no lifecycle record of its own: it exists implicitly as long
/// as at least one of its store keys holds a value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoomId(String);

impl RoomId {
    pub fn new(value: String) -> Result<Self, DomainError> {
        if value.is_empty() || value.len() > MAX_IDENTIFIER_LENGTH {
            return Err(DomainError::InvalidRoomId {
                max: MAX_IDENTIFIER_LENGTH,
            });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RoomId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Name a participant joins a room under. Unique within a room by store-set
/// semantics, not enforced here.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParticipantName(String);

impl ParticipantName {
    pub fn new(value: String) -> Result<Self, DomainError> {
        if value.is_empty() || value.len() > MAX_IDENTIFIER_LENGTH {
            return Err(DomainError::InvalidParticipantName {
                max: MAX_IDENTIFIER_LENGTH,
            });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ParticipantName {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for ParticipantName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A vote value. An opaque token chosen by the client; the server never
/// interprets it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vote(String);

impl Vote {
    pub fn new(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Vote {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Point-in-time assembled view of a room.
///
/// Reconstructed fresh from the store on every mutating operation, never
/// cached. The three fields come from three independent store reads, so the
/// snapshot is not atomic across keys: concurrent handlers for the same room
/// may interleave between reads. Consumers must treat a snapshot as "state
/// as of approximately now".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomSnapshot {
    /// Present participant names. A `BTreeSet` keeps broadcast output
    /// deterministic.
    pub members: BTreeSet<String>,
    /// Cast votes by participant name. Absence of a key means "no vote".
    /// Keys may transiently lag behind `members`.
    pub votes: HashMap<String, String>,
    /// Whether votes are visible to all participants. Absent in the store
    /// means `false`.
    pub revealed: bool,
}
