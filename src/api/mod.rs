pub mod competitions;
pub mod games;
pub mod health;
pub mod metadata;
pub mod players;
pub mod stats;
pub mod teams;

use crate::orchestration::HeroBall;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<HeroBall>,
}

impl AppState {
    pub fn new(service: Arc<HeroBall>) -> Self {
        Self { service }
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route("/v1/players/cursor", post(players::players_cursor))
        .route("/v1/players/:id", get(players::get_player_info))
        .route("/v1/teams/:id", get(teams::get_team_info))
        .route("/v1/competitions/:id", get(competitions::get_competition_info))
        .route("/v1/games/cursor", post(games::games_cursor))
        .route("/v1/games/:game_id", get(games::get_game_info))
        .route(
            "/v1/games/:game_id/players/:player_id",
            get(games::get_player_game_stats),
        )
        .route("/v1/stats", post(stats::get_stats))
        .route("/v1/metadata", get(metadata::get_metadata))
        .layer(cors)
        .with_state(state)
}

/// Body of the cursor endpoints.
#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CursorRequest {
    #[serde(default)]
    pub offset: i64,
    pub count: i64,
    #[serde(default)]
    pub filter: crate::domain::Filter,
}
