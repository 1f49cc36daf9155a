//! Infrastructure layer: concrete implementations of the domain interfaces
//! plus the wire formats (DTOs) spoken over WebSocket and HTTP.

pub mod dto;
pub mod message_pusher;
pub mod repository;
