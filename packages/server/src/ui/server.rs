//! Server execution logic.

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::domain::MessagePusher;
use crate::usecase::{
    CastVoteUseCase, ClearVotesUseCase, GetSnapshotUseCase, JoinRoomUseCase, LeaveRoomUseCase,
    SetRevealUseCase,
};

use super::{
    handler::{
        http::{get_room_snapshot, health_check},
        websocket::websocket_handler,
    },
    signal::shutdown_signal,
    state::{AppState, AssociationTable},
};

/// Room synchronization server
///
/// This struct encapsulates the server configuration and provides methods to run the server.
///
/// # Example
///
/// ```ignore
/// let server = Server::new(
///     join_room_usecase,
///     cast_vote_usecase,
///     set_reveal_usecase,
///     clear_votes_usecase,
///     leave_room_usecase,
///     get_snapshot_usecase,
///     message_pusher,
/// );
/// server.run("0.0.0.0".to_string(), 4000).await?;
/// ```
pub struct Server {
    join_room_usecase: Arc<JoinRoomUseCase>,
    cast_vote_usecase: Arc<CastVoteUseCase>,
    set_reveal_usecase: Arc<SetRevealUseCase>,
    clear_votes_usecase: Arc<ClearVotesUseCase>,
    leave_room_usecase: Arc<LeaveRoomUseCase>,
    get_snapshot_usecase: Arc<GetSnapshotUseCase>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl Server {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        join_room_usecase: Arc<JoinRoomUseCase>,
        cast_vote_usecase: Arc<CastVoteUseCase>,
        set_reveal_usecase: Arc<SetRevealUseCase>,
        clear_votes_usecase: Arc<ClearVotesUseCase>,
        leave_room_usecase: Arc<LeaveRoomUseCase>,
        get_snapshot_usecase: Arc<GetSnapshotUseCase>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            join_room_usecase,
            cast_vote_usecase,
            set_reveal_usecase,
            clear_votes_usecase,
            leave_room_usecase,
            get_snapshot_usecase,
            message_pusher,
        }
    }

    /// Run the room synchronization server
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "0.0.0.0")
    /// * `port` - The port number to bind to (e.g., 4000)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let app_state = Arc::new(AppState {
            join_room_usecase: self.join_room_usecase,
            cast_vote_usecase: self.cast_vote_usecase,
            set_reveal_usecase: self.set_reveal_usecase,
            clear_votes_usecase: self.clear_votes_usecase,
            leave_room_usecase: self.leave_room_usecase,
            get_snapshot_usecase: self.get_snapshot_usecase,
            message_pusher: self.message_pusher,
            associations: AssociationTable::new(),
        });

        // Define handlers
        let app = Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/rooms/{room_id}", get(get_room_snapshot))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state);

        // Bind the server to the host and port
        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        // Start the server
        tracing::info!(
            "Room synchronization server listening on {}",
            listener.local_addr()?
        );
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        // Set up graceful shutdown signal handler
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
