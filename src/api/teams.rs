use axum::extract::{Path, State};
use axum::Json;

use super::AppState;
use crate::domain::TeamId;
use crate::error::AppError;
use crate::orchestration::TeamInfo;

pub async fn get_team_info(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<TeamInfo>, AppError> {
    let info = state.service.team_info(TeamId::new(id)).await?;
    Ok(Json(info))
}
