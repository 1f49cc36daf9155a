//! MessagePusher implementations.
//!
//! Currently only the WebSocket-backed implementation exists.

pub mod websocket;

pub use websocket::WebSocketMessagePusher;
