//! RoomRepository implementations.
//!
//! - `redis`: the production backend, shared across server processes.
//! - `inmemory`: a process-local backend with identical observable
//!   semantics, used in tests and single-process development.

pub mod inmemory;
pub mod redis;

pub use inmemory::InMemoryRoomRepository;
pub use redis::{RedisConfig, RedisRoomRepository};
