//! Room synchronization server backed by a shared Redis store.
//!
//! Accepts WebSocket connections, routes room events (join / vote / reveal /
//! clear-votes) through the shared store, and fans state updates out to every
//! connection in the affected room.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin enza-server
//! cargo run --bin enza-server -- --port 4000 --redis-url redis://localhost:6379
//! ```

use std::sync::Arc;

use clap::Parser;

use enza_server::{
    domain::{MessagePusher, RoomRepository},
    infrastructure::{
        message_pusher::WebSocketMessagePusher,
        repository::{RedisConfig, RedisRoomRepository},
    },
    ui::Server,
    usecase::{
        CastVoteUseCase, ClearVotesUseCase, GetSnapshotUseCase, JoinRoomUseCase, LeaveRoomUseCase,
        SetRevealUseCase,
    },
};
use enza_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "server")]
#[command(about = "Room synchronization server with WebSocket fan-out", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "0.0.0.0")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "PORT", default_value = "4000")]
    port: u16,

    /// Full Redis connection URL; overrides the discrete redis-* options
    #[arg(long, env = "REDIS_URL")]
    redis_url: Option<String>,

    /// Redis host
    #[arg(long, env = "REDIS_HOST", default_value = "localhost")]
    redis_host: String,

    /// Redis port
    #[arg(long, env = "REDIS_PORT", default_value = "6379")]
    redis_port: u16,

    /// Redis username
    #[arg(long, env = "REDIS_USERNAME")]
    redis_username: Option<String>,

    /// Redis password
    #[arg(long, env = "REDIS_PASSWORD")]
    redis_password: Option<String>,

    /// Redis logical database index
    #[arg(long, env = "REDIS_DB")]
    redis_db: Option<u32>,

    /// Connect to Redis over TLS
    #[arg(long, env = "REDIS_SSL", default_value = "false")]
    redis_tls: bool,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. Repository
    // 2. MessagePusher
    // 3. UseCases
    // 4. Server

    // 1. Create Repository (Redis-backed shared store). Without the store
    // the server cannot serve anything, so a connect failure is fatal.
    let redis_config = RedisConfig {
        url: args.redis_url,
        host: args.redis_host,
        port: args.redis_port,
        username: args.redis_username,
        password: args.redis_password,
        db: args.redis_db,
        tls: args.redis_tls,
    };
    let redis_url = redis_config.connection_url();
    let repository: Arc<dyn RoomRepository> = match RedisRoomRepository::connect(&redis_url).await {
        Ok(repository) => {
            tracing::info!("Connected to Redis");
            Arc::new(repository)
        }
        Err(e) => {
            tracing::error!("Failed to connect to Redis: {}", e);
            std::process::exit(1);
        }
    };

    // 2. Create MessagePusher (WebSocket implementation)
    let message_pusher: Arc<dyn MessagePusher> = Arc::new(WebSocketMessagePusher::new());

    // 3. Create UseCases
    let join_room_usecase = Arc::new(JoinRoomUseCase::new(
        repository.clone(),
        message_pusher.clone(),
    ));
    let cast_vote_usecase = Arc::new(CastVoteUseCase::new(repository.clone()));
    let set_reveal_usecase = Arc::new(SetRevealUseCase::new(repository.clone()));
    let clear_votes_usecase = Arc::new(ClearVotesUseCase::new(repository.clone()));
    let leave_room_usecase = Arc::new(LeaveRoomUseCase::new(
        repository.clone(),
        message_pusher.clone(),
    ));
    let get_snapshot_usecase = Arc::new(GetSnapshotUseCase::new(repository.clone()));

    // 4. Create and run the server
    let server = Server::new(
        join_room_usecase,
        cast_vote_usecase,
        set_reveal_usecase,
        clear_votes_usecase,
        leave_room_usecase,
        get_snapshot_usecase,
        message_pusher,
    );
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
