use axum::extract::{Path, State};
use axum::Json;

use super::{AppState, CursorRequest};
use crate::domain::{Game, GameId, PlayerGameStats, PlayerId};
use crate::engine::Cursor;
use crate::error::AppError;
use crate::orchestration::GameInfo;

pub async fn get_game_info(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<GameInfo>, AppError> {
    let info = state.service.game_info(GameId::new(id)).await?;
    Ok(Json(info))
}

pub async fn get_player_game_stats(
    Path((game_id, player_id)): Path<(i64, i64)>,
    State(state): State<AppState>,
) -> Result<Json<PlayerGameStats>, AppError> {
    let stats = state
        .service
        .player_game_stats(PlayerId::new(player_id), GameId::new(game_id))
        .await?;
    Ok(Json(stats))
}

pub async fn games_cursor(
    State(state): State<AppState>,
    Json(request): Json<CursorRequest>,
) -> Result<Json<Cursor<Game>>, AppError> {
    tracing::debug!(offset = request.offset, count = request.count, "Games cursor requested");
    let cursor = state
        .service
        .games_cursor(request.offset, request.count, request.filter)
        .await?;
    Ok(Json(cursor))
}
