use axum::extract::{Query, State};
use axum::Json;

use super::AppState;
use crate::error::AppError;
use crate::orchestration::{Metadata, MetadataRequest};

pub async fn get_metadata(
    Query(request): Query<MetadataRequest>,
    State(state): State<AppState>,
) -> Result<Json<Metadata>, AppError> {
    let metadata = state.service.metadata(request).await?;
    Ok(Json(metadata))
}
