//! Request handlers.

pub mod http;
pub mod websocket;
