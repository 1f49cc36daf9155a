//! Error types spoken by the domain interfaces.

use thiserror::Error;

/// Validation failures when constructing value objects from raw input.
///
/// These are rejected before any store operation is attempted: a malformed
/// event must never reach the repository.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("room id must be a non-empty string of at most {max} characters")]
    InvalidRoomId { max: usize },

    #[error("participant name must be a non-empty string of at most {max} characters")]
    InvalidParticipantName { max: usize },
}

/// Failures surfaced by a [`RoomRepository`](super::RoomRepository) implementation.
///
/// The repository performs no retry and no compensating rollback: a failed
/// sequence leaves the room in whatever partial condition the store reached,
/// and the error propagates to the caller.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("store operation failed: {0}")]
    Store(String),
}

/// Failures surfaced by a [`MessagePusher`](super::MessagePusher) implementation.
#[derive(Debug, Error)]
pub enum MessagePushError {
    #[error("connection '{0}' not found")]
    ConnectionNotFound(String),

    #[error("failed to push message: {0}")]
    PushFailed(String),
}
