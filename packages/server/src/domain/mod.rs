//! Domain layer: value objects, the room snapshot read-model, and the
//! interfaces the use case layer depends on.
//!
//! Concrete implementations live in the infrastructure layer (dependency
//! inversion): the domain defines what it needs from the store and the
//! transport, never how they work.

mod connection;
mod error;
mod pusher;
mod repository;
mod room;

pub use connection::{Association, ConnectionId};
pub use error::{DomainError, MessagePushError, RepositoryError};
pub use pusher::{MessagePusher, PusherChannel};
#[cfg(test)]
pub use repository::MockRoomRepository;
pub use repository::RoomRepository;
pub use room::{ParticipantName, RoomId, RoomSnapshot, Vote};
