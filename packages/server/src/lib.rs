//! Room state synchronization server.
//!
//! Maintains shared, ephemeral state for collaborative rooms (planning-poker
//! style sessions): present participants, each participant's current vote,
//! and a room-wide reveal flag. The durable state of every room lives in a
//! shared Redis store, so any number of stateless server processes can serve
//! connections for the same room.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
