//! UI layer: axum router, WebSocket event routing, HTTP endpoints.

mod handler;
mod server;
mod signal;
pub mod state;

pub use server::Server;
