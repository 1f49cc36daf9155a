//! WebSocket-backed MessagePusher implementation.
//!
//! Owns two maps: connection id to outbound channel, and room id to the set
//! of subscribed connections. The WebSocket itself is created in the UI
//! layer; this implementation only holds the `UnboundedSender` halves and
//! decides nothing about payload contents.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionId, MessagePushError, MessagePusher, PusherChannel, RoomId};

/// WebSocket-backed MessagePusher implementation.
pub struct WebSocketMessagePusher {
    /// Outbound channel per live connection.
    clients: Mutex<HashMap<ConnectionId, PusherChannel>>,
    /// Connections subscribed to each room's multicast.
    rooms: Mutex<HashMap<RoomId, HashSet<ConnectionId>>>,
}

impl WebSocketMessagePusher {
    pub fn new() -> Self {
        Self {
            clients: Mutex::new(HashMap::new()),
            rooms: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for WebSocketMessagePusher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_connection(&self, conn_id: ConnectionId, sender: PusherChannel) {
        let mut clients = self.clients.lock().await;
        clients.insert(conn_id, sender);
        tracing::debug!("Connection '{}' registered to MessagePusher", conn_id);
    }

    async fn unregister_connection(&self, conn_id: &ConnectionId) {
        {
            let mut rooms = self.rooms.lock().await;
            for subscribers in rooms.values_mut() {
                subscribers.remove(conn_id);
            }
            rooms.retain(|_, subscribers| !subscribers.is_empty());
        }
        let mut clients = self.clients.lock().await;
        clients.remove(conn_id);
        tracing::debug!("Connection '{}' unregistered from MessagePusher", conn_id);
    }

    async fn subscribe(&self, conn_id: &ConnectionId, room: &RoomId) {
        let mut rooms = self.rooms.lock().await;
        rooms.entry(room.clone()).or_default().insert(*conn_id);
        tracing::debug!("Connection '{}' subscribed to room '{}'", conn_id, room);
    }

    async fn unsubscribe(&self, conn_id: &ConnectionId, room: &RoomId) {
        let mut rooms = self.rooms.lock().await;
        if let Some(subscribers) = rooms.get_mut(room) {
            subscribers.remove(conn_id);
            if subscribers.is_empty() {
                rooms.remove(room);
            }
        }
        tracing::debug!("Connection '{}' unsubscribed from room '{}'", conn_id, room);
    }

    async fn push_to(
        &self,
        conn_id: &ConnectionId,
        content: &str,
    ) -> Result<(), MessagePushError> {
        let clients = self.clients.lock().await;
        let Some(sender) = clients.get(conn_id) else {
            return Err(MessagePushError::ConnectionNotFound(conn_id.to_string()));
        };
        sender
            .send(content.to_string())
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
        tracing::debug!("Pushed message to connection '{}'", conn_id);
        Ok(())
    }

    async fn push_to_room(&self, room: &RoomId, content: &str) -> Result<(), MessagePushError> {
        let subscribers: Vec<ConnectionId> = {
            let rooms = self.rooms.lock().await;
            rooms
                .get(room)
                .map(|set| set.iter().copied().collect())
                .unwrap_or_default()
        };

        let clients = self.clients.lock().await;
        for conn_id in subscribers {
            if let Some(sender) = clients.get(&conn_id) {
                // Room multicast tolerates individual send failures.
                if let Err(e) = sender.send(content.to_string()) {
                    tracing::warn!(
                        "Failed to push message to connection '{}': {}",
                        conn_id,
                        e
                    );
                }
            } else {
                tracing::warn!(
                    "Connection '{}' not found during room multicast, skipping",
                    conn_id
                );
            }
        }

        Ok(())
    }
}
