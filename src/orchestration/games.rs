use futures::TryFutureExt;
use serde::Serialize;

use super::{paginate, require_valid, GameListing, HeroBall};
use crate::db::query::{Column, Condition, Predicate};
use crate::domain::{Filter, Game, GameId, PlayerGameStats};
use crate::engine::{Cursor, PageRequest};
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameInfo {
    pub game: Game,
    /// Box scores for both sides, by team and then jersey number.
    pub players: Vec<PlayerGameStats>,
}

impl HeroBall {
    pub async fn games_cursor(
        &self,
        offset: i64,
        count: i64,
        filter: Filter,
    ) -> Result<Cursor<Game>, AppError> {
        let page = PageRequest::new(offset, count)?;
        let predicate = Predicate::for_games(&filter.canonicalize()?);
        let listing = GameListing::new(&self.repo, &self.assembler, predicate);
        paginate(&listing, page, filter).await
    }

    pub async fn game_info(&self, game_id: GameId) -> Result<GameInfo, AppError> {
        let game_id = require_valid(game_id, "gameId")?;
        let game_ids = [game_id];
        let box_scores =
            Predicate::new().and(Condition::Equals(Column::StatsGameId, game_id.as_i64()));

        let (games, players) = futures::try_join!(
            self.assembler.games(&game_ids),
            self.repo
                .player_game_stats(&box_scores)
                .map_err(AppError::from),
        )?;
        let game = games
            .into_iter()
            .next()
            .ok_or_else(|| AppError::NotFound(format!("game {}", game_id)))?;

        Ok(GameInfo { game, players })
    }
}
