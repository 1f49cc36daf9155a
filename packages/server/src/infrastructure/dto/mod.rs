//! Wire formats (DTOs) and conversions from domain models.

pub mod conversion;
pub mod http;
pub mod websocket;
