use axum::extract::{Path, State};
use axum::Json;

use super::AppState;
use crate::domain::CompetitionId;
use crate::error::AppError;
use crate::orchestration::CompetitionInfo;

pub async fn get_competition_info(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<CompetitionInfo>, AppError> {
    let info = state
        .service
        .competition_info(CompetitionId::new(id))
        .await?;
    Ok(Json(info))
}
