use axum::extract::{Path, State};
use axum::Json;

use super::{AppState, CursorRequest};
use crate::domain::{Player, PlayerId};
use crate::engine::Cursor;
use crate::error::AppError;
use crate::orchestration::PlayerInfo;

pub async fn get_player_info(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<PlayerInfo>, AppError> {
    let info = state.service.player_info(PlayerId::new(id)).await?;
    Ok(Json(info))
}

pub async fn players_cursor(
    State(state): State<AppState>,
    Json(request): Json<CursorRequest>,
) -> Result<Json<Cursor<Player>>, AppError> {
    let cursor = state
        .service
        .players_cursor(request.offset, request.count, request.filter)
        .await?;
    Ok(Json(cursor))
}
