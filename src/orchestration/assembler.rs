//! Batched entity assembly.
//!
//! Each method resolves a whole id list with one lookup per entity kind and
//! returns entities in the order the ids were given. Ids with no matching
//! record are dropped.

use std::collections::{BTreeSet, HashMap};
use std::hash::Hash;
use std::sync::Arc;

use tracing::warn;

use crate::db::Repository;
use crate::domain::{
    Competition, CompetitionId, EntityId, Game, GameId, Location, LocationId, Player, PlayerId,
    Team, TeamId,
};
use crate::engine::ResultIndex;
use crate::error::AppError;

#[derive(Clone)]
pub struct Assembler {
    repo: Arc<Repository>,
}

impl Assembler {
    pub fn new(repo: Arc<Repository>) -> Self {
        Self { repo }
    }

    /// Games with teams, location, competition and result resolved. Costs
    /// three round trips per batch of ids, however many games are given.
    pub async fn games(&self, ids: &[GameId]) -> Result<Vec<Game>, AppError> {
        let rows = self.repo.game_rows_by_ids(ids).await?;
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let competition_ids = distinct(rows.iter().map(|row| row.competition_id));
        let (competitions, team_points) = futures::try_join!(
            self.repo.competitions_by_ids(&competition_ids),
            self.repo.team_totals_by_games(ids),
        )?;
        let results = ResultIndex::from_aggregates(&team_points);
        let competitions: HashMap<CompetitionId, Competition> = competitions
            .into_iter()
            .map(|c| (c.competition_id, c))
            .collect();

        let mut games = Vec::with_capacity(rows.len());
        for row in in_order(ids, rows, |row| row.game_id) {
            let Some(competition) = competitions.get(&row.competition_id) else {
                warn!(game_id = %row.game_id, competition_id = %row.competition_id, "Game references missing competition");
                continue;
            };
            let result = results.result_for(
                row.game_id,
                row.home_team.team_id,
                row.away_team.team_id,
            );
            games.push(Game {
                game_id: row.game_id,
                home_team: row.home_team,
                away_team: row.away_team,
                location: row.location,
                competition: competition.clone(),
                game_time: row.game_time,
                result,
            });
        }
        Ok(games)
    }

    pub async fn players(&self, ids: &[PlayerId]) -> Result<Vec<Player>, AppError> {
        let players = self.repo.players_by_ids(ids).await?;
        Ok(in_order(ids, players, |p| p.player_id))
    }

    pub async fn teams(&self, ids: &[TeamId]) -> Result<Vec<Team>, AppError> {
        let teams = self.repo.teams_by_ids(ids).await?;
        Ok(in_order(ids, teams, |t| t.team_id))
    }

    pub async fn competitions(&self, ids: &[CompetitionId]) -> Result<Vec<Competition>, AppError> {
        let competitions = self.repo.competitions_by_ids(ids).await?;
        Ok(in_order(ids, competitions, |c| c.competition_id))
    }

    pub async fn locations(&self, ids: &[LocationId]) -> Result<Vec<Location>, AppError> {
        let locations = self.repo.locations_by_ids(ids).await?;
        Ok(in_order(ids, locations, |l| l.location_id))
    }
}

/// Sorted, deduplicated ids.
pub fn distinct<T: EntityId>(ids: impl IntoIterator<Item = T>) -> Vec<T> {
    ids.into_iter().collect::<BTreeSet<_>>().into_iter().collect()
}

/// Reorder `items` to follow `ids`. Each item is emitted at most once.
fn in_order<K, V>(ids: &[K], items: Vec<V>, key: impl Fn(&V) -> K) -> Vec<V>
where
    K: Eq + Hash + Copy,
{
    let mut by_key: HashMap<K, V> = items.into_iter().map(|item| (key(&item), item)).collect();
    ids.iter().filter_map(|id| by_key.remove(id)).collect()
}
