//! Repository trait: the store interface the domain needs.
//!
//! The use case layer depends on this trait; the infrastructure layer
//! provides the concrete implementations (dependency inversion).

use async_trait::async_trait;

use super::{ParticipantName, RepositoryError, RoomId, RoomSnapshot, Vote};

/// Data access contract for shared room state.
///
/// Every mutating operation performs its store writes, then reconstructs a
/// [`RoomSnapshot`] via three independent reads (members, votes, revealed),
/// never from an in-memory cache. This favors cross-process correctness over
/// atomicity: a snapshot may observe writes from a concurrent handler that
/// interleaved between this handler's own writes and reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// Add `name` to the room's member set; if a vote is given, record it
    /// too. Idempotent on membership: adding an existing member is a no-op
    /// for the set, but a given vote is still applied.
    async fn add_member(
        &self,
        room: &RoomId,
        name: &ParticipantName,
        vote: Option<Vote>,
    ) -> Result<RoomSnapshot, RepositoryError>;

    /// Remove `name` from the member set and delete their vote. Idempotent:
    /// removing an absent member is a no-op.
    async fn remove_member(
        &self,
        room: &RoomId,
        name: &ParticipantName,
    ) -> Result<RoomSnapshot, RepositoryError>;

    /// Set `name`'s vote unconditionally. Prior membership is not required.
    async fn set_vote(
        &self,
        room: &RoomId,
        name: &ParticipantName,
        vote: Vote,
    ) -> Result<RoomSnapshot, RepositoryError>;

    /// Delete the room's entire vote mapping. Members and the reveal flag
    /// are untouched.
    async fn clear_votes(&self, room: &RoomId) -> Result<RoomSnapshot, RepositoryError>;

    /// Set the room-wide reveal flag.
    async fn set_revealed(
        &self,
        room: &RoomId,
        revealed: bool,
    ) -> Result<RoomSnapshot, RepositoryError>;

    /// Read the current snapshot without mutating anything.
    async fn snapshot(&self, room: &RoomId) -> Result<RoomSnapshot, RepositoryError>;
}
