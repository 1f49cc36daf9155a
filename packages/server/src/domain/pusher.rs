//! Message pusher trait: the transport fan-out interface the domain needs.

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{ConnectionId, MessagePushError, RoomId};

/// Channel through which a connection receives outbound payloads.
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// Delivery contract for outbound payloads.
///
/// The use case layer decides *which* payloads go out and to *whom*
/// (room-wide vs. sender-only); the implementation owns physical delivery.
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// Register a connection's outbound channel.
    async fn register_connection(&self, conn_id: ConnectionId, sender: PusherChannel);

    /// Drop a connection's outbound channel and all its room subscriptions.
    async fn unregister_connection(&self, conn_id: &ConnectionId);

    /// Subscribe a connection to a room's multicast.
    async fn subscribe(&self, conn_id: &ConnectionId, room: &RoomId);

    /// Remove a connection from a room's multicast.
    async fn unsubscribe(&self, conn_id: &ConnectionId, room: &RoomId);

    /// Deliver a payload to exactly one connection. Used for error
    /// notifications to the originating connection.
    async fn push_to(
        &self,
        conn_id: &ConnectionId,
        content: &str,
    ) -> Result<(), MessagePushError>;

    /// Deliver a payload to every connection subscribed to the room.
    /// Best-effort: individual send failures are skipped, not surfaced.
    async fn push_to_room(&self, room: &RoomId, content: &str) -> Result<(), MessagePushError>;
}
