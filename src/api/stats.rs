use axum::extract::State;
use axum::Json;

use super::AppState;
use crate::error::AppError;
use crate::orchestration::{RankedStats, StatsRequest};

pub async fn get_stats(
    State(state): State<AppState>,
    Json(request): Json<StatsRequest>,
) -> Result<Json<Vec<RankedStats>>, AppError> {
    let ranked = state.service.stats(request).await?;
    Ok(Json(ranked))
}
