//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{domain::RoomId, infrastructure::dto::http::RoomSnapshotDto, ui::state::AppState};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Read-only room snapshot by id.
pub async fn get_room_snapshot(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
) -> Result<Json<RoomSnapshotDto>, StatusCode> {
    let room = RoomId::new(room_id).map_err(|_| StatusCode::BAD_REQUEST)?;

    match state.get_snapshot_usecase.execute(&room).await {
        Ok(snapshot) => Ok(Json(RoomSnapshotDto::new(&room, &snapshot))),
        Err(e) => {
            tracing::error!("Failed to read snapshot for room '{}': {}", room, e);
            Err(StatusCode::SERVICE_UNAVAILABLE)
        }
    }
}
