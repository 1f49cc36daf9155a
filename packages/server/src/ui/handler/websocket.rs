//! WebSocket connection handler: the event router.
//!
//! Each inbound event maps to one repository mutation and a fixed set of
//! broadcast payloads. A handler broadcasts only its own fields even though
//! every mutation returns a full snapshot, so unrelated fields never produce
//! spurious updates.
//!
//! | event       | mutation       | broadcast to room        |
//! |-------------|----------------|--------------------------|
//! | join        | add_member     | members, votes, revealed |
//! | vote        | set_vote       | votes                    |
//! | reveal      | set_revealed   | revealed                 |
//! | clear-votes | clear_votes    | votes                    |
//! | disconnect  | remove_member  | members, votes           |
//!
//! Broadcasts fire only after the mutation succeeds; on failure the sender
//! alone receives a point-to-point error and the room sees nothing.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::{
        Association, ConnectionId, ParticipantName, RepositoryError, RoomId, RoomSnapshot, Vote,
    },
    infrastructure::dto::websocket::{
        ClientEvent, ErrorMessage, MembersUpdateMessage, RevealUpdateMessage, VotesUpdateMessage,
    },
    ui::state::AppState,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that drains the connection's outbound channel into the
/// WebSocket sink.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let conn_id = ConnectionId::new();
    let (sender, mut receiver) = socket.split();

    let (tx, rx) = mpsc::unbounded_channel();
    state.message_pusher.register_connection(conn_id, tx).await;
    tracing::info!("Connection '{}' established", conn_id);

    let mut send_task = pusher_loop(rx, sender);

    let recv_state = state.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error on connection '{}': {}", conn_id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => handle_event(&recv_state, conn_id, &text).await,
                Message::Ping(_) => {
                    tracing::debug!("Received ping");
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", conn_id);
                    break;
                }
                _ => {}
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    // Graceful close and network loss both end up here.
    handle_disconnect(&state, conn_id).await;
    state.message_pusher.unregister_connection(&conn_id).await;
    tracing::info!("Connection '{}' closed", conn_id);
}

/// Route one inbound event. Every failure ends as a point-to-point error to
/// the originating connection; nothing here takes down the socket task or
/// disturbs other connections.
async fn handle_event(state: &AppState, conn_id: ConnectionId, text: &str) {
    let event = match serde_json::from_str::<ClientEvent>(text) {
        Ok(event) => event,
        Err(e) => {
            tracing::warn!("Connection '{}' sent malformed event: {}", conn_id, e);
            send_error(state, &conn_id, "Invalid event payload").await;
            return;
        }
    };

    match event {
        ClientEvent::Join { room, name, vote } => {
            handle_join(state, conn_id, room, name, vote).await;
        }
        ClientEvent::Vote { room, name, vote } => {
            handle_vote(state, conn_id, room, name, vote).await;
        }
        ClientEvent::Reveal { room, revealed } => {
            handle_reveal(state, conn_id, room, revealed).await;
        }
        ClientEvent::ClearVotes { room } => {
            handle_clear_votes(state, conn_id, room).await;
        }
    }
}

async fn handle_join(
    state: &AppState,
    conn_id: ConnectionId,
    room: String,
    name: String,
    vote: Option<String>,
) {
    let (room, name) = match (RoomId::new(room), ParticipantName::new(name)) {
        (Ok(room), Ok(name)) => (room, name),
        (room, name) => {
            tracing::warn!(
                "Connection '{}' sent invalid join payload: {:?} / {:?}",
                conn_id,
                room.err(),
                name.err()
            );
            send_error(state, &conn_id, "Failed to join room").await;
            return;
        }
    };

    // A second join while joined is a room switch: the old room gets the
    // full leave treatment before the new join proceeds.
    if let Some(previous) = state.associations.remove(&conn_id).await {
        if let Err(e) = leave_and_notify(state, conn_id, &previous).await {
            tracing::error!(
                "Connection '{}' failed to leave room '{}' during switch: {}",
                conn_id,
                previous.room,
                e
            );
            send_error(state, &conn_id, "Failed to join room").await;
            return;
        }
        tracing::info!(
            "Connection '{}' switched away from room '{}'",
            conn_id,
            previous.room
        );
    }

    match state
        .join_room_usecase
        .execute(&conn_id, &room, &name, vote.map(Vote::new))
        .await
    {
        Ok(snapshot) => {
            state
                .associations
                .insert(
                    conn_id,
                    Association {
                        room: room.clone(),
                        name: name.clone(),
                    },
                )
                .await;
            tracing::info!("Connection '{}' joined room '{}' as '{}'", conn_id, room, name);
            // All three fields, from the one snapshot the join produced.
            broadcast_members(state, &room, &snapshot).await;
            broadcast_votes(state, &room, &snapshot).await;
            broadcast_reveal(state, &room, &snapshot).await;
        }
        Err(e) => {
            tracing::error!("Failed to join '{}' to room '{}': {}", name, room, e);
            send_error(state, &conn_id, "Failed to join room").await;
        }
    }
}

async fn handle_vote(
    state: &AppState,
    conn_id: ConnectionId,
    room: String,
    name: String,
    vote: String,
) {
    if state.associations.get(&conn_id).await.is_none() {
        tracing::warn!("Connection '{}' voted before joining a room", conn_id);
        send_error(state, &conn_id, "Cannot vote before joining a room").await;
        return;
    }

    let (room, name) = match (RoomId::new(room), ParticipantName::new(name)) {
        (Ok(room), Ok(name)) => (room, name),
        _ => {
            send_error(state, &conn_id, "Failed to record vote").await;
            return;
        }
    };

    match state
        .cast_vote_usecase
        .execute(&room, &name, Vote::new(vote))
        .await
    {
        Ok(snapshot) => {
            tracing::info!("'{}' voted in room '{}'", name, room);
            broadcast_votes(state, &room, &snapshot).await;
        }
        Err(e) => {
            tracing::error!(
                "Failed to record vote for '{}' in room '{}': {}",
                name,
                room,
                e
            );
            send_error(state, &conn_id, "Failed to record vote").await;
        }
    }
}

async fn handle_reveal(state: &AppState, conn_id: ConnectionId, room: String, revealed: bool) {
    if state.associations.get(&conn_id).await.is_none() {
        tracing::warn!(
            "Connection '{}' changed reveal state before joining a room",
            conn_id
        );
        send_error(
            state,
            &conn_id,
            "Cannot change reveal state before joining a room",
        )
        .await;
        return;
    }

    let Ok(room) = RoomId::new(room) else {
        send_error(state, &conn_id, "Failed to update reveal flag").await;
        return;
    };

    match state.set_reveal_usecase.execute(&room, revealed).await {
        Ok(snapshot) => {
            tracing::info!("Room '{}' reveal flag set to {}", room, revealed);
            broadcast_reveal(state, &room, &snapshot).await;
        }
        Err(e) => {
            tracing::error!("Failed to update reveal flag for room '{}': {}", room, e);
            send_error(state, &conn_id, "Failed to update reveal flag").await;
        }
    }
}

async fn handle_clear_votes(state: &AppState, conn_id: ConnectionId, room: String) {
    if state.associations.get(&conn_id).await.is_none() {
        tracing::warn!("Connection '{}' cleared votes before joining a room", conn_id);
        send_error(state, &conn_id, "Cannot clear votes before joining a room").await;
        return;
    }

    let Ok(room) = RoomId::new(room) else {
        send_error(state, &conn_id, "Failed to clear votes").await;
        return;
    };

    match state.clear_votes_usecase.execute(&room).await {
        Ok(snapshot) => {
            tracing::info!("Votes cleared in room '{}'", room);
            broadcast_votes(state, &room, &snapshot).await;
        }
        Err(e) => {
            tracing::error!("Failed to clear votes in room '{}': {}", room, e);
            send_error(state, &conn_id, "Failed to clear votes").await;
        }
    }
}

/// Disconnect cleanup. The association table entry is the only record of
/// what this connection was; without one there is nothing to clean up.
async fn handle_disconnect(state: &AppState, conn_id: ConnectionId) {
    let Some(association) = state.associations.remove(&conn_id).await else {
        return;
    };

    if let Err(e) = leave_and_notify(state, conn_id, &association).await {
        tracing::error!(
            "Cleanup failed for connection '{}' in room '{}': {}",
            conn_id,
            association.room,
            e
        );
    } else {
        tracing::info!(
            "Connection '{}' left room '{}' as '{}'",
            conn_id,
            association.room,
            association.name
        );
    }
}

async fn leave_and_notify(
    state: &AppState,
    conn_id: ConnectionId,
    association: &Association,
) -> Result<(), RepositoryError> {
    let snapshot = state.leave_room_usecase.execute(&conn_id, association).await?;
    broadcast_members(state, &association.room, &snapshot).await;
    broadcast_votes(state, &association.room, &snapshot).await;
    Ok(())
}

async fn broadcast_members(state: &AppState, room: &RoomId, snapshot: &RoomSnapshot) {
    let payload = serde_json::to_string(&MembersUpdateMessage::from(snapshot)).unwrap();
    if let Err(e) = state.message_pusher.push_to_room(room, &payload).await {
        tracing::warn!("Failed to broadcast members-update to room '{}': {}", room, e);
    }
}

async fn broadcast_votes(state: &AppState, room: &RoomId, snapshot: &RoomSnapshot) {
    let payload = serde_json::to_string(&VotesUpdateMessage::from(snapshot)).unwrap();
    if let Err(e) = state.message_pusher.push_to_room(room, &payload).await {
        tracing::warn!("Failed to broadcast votes-update to room '{}': {}", room, e);
    }
}

async fn broadcast_reveal(state: &AppState, room: &RoomId, snapshot: &RoomSnapshot) {
    let payload = serde_json::to_string(&RevealUpdateMessage::from(snapshot)).unwrap();
    if let Err(e) = state.message_pusher.push_to_room(room, &payload).await {
        tracing::warn!("Failed to broadcast reveal-update to room '{}': {}", room, e);
    }
}

async fn send_error(state: &AppState, conn_id: &ConnectionId, message: &str) {
    let payload = serde_json::to_string(&ErrorMessage::new(message)).unwrap();
    if let Err(e) = state.message_pusher.push_to(conn_id, &payload).await {
        tracing::warn!("Failed to send error to connection '{}': {}", conn_id, e);
    }
}
