use futures::TryFutureExt;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

use super::{paginate, require_valid, HeroBall, PlayerListing};
use crate::db::query::{AggregateQuery, Column, Condition, Grouping, Predicate};
use crate::domain::{
    AggregateStats, Competition, CompetitionId, Filter, Game, GameId, GroupKey, Player,
    PlayerGameStats, PlayerId, PlayerProfile, Team, TeamId,
};
use crate::engine::{Cursor, PageRequest};
use crate::error::AppError;
use crate::orchestration::assembler::distinct;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerInfo {
    #[serde(flatten)]
    pub profile: PlayerProfile,
    pub teams: Vec<PlayerTeam>,
    /// All-time totals across every team.
    pub stats: AggregateStats,
    pub recent_games: Cursor<Game>,
}

/// A team the player has appeared for.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerTeam {
    pub team: Team,
    pub competitions: Vec<Competition>,
    pub jersey_numbers: Vec<i64>,
    pub stats: AggregateStats,
}

impl HeroBall {
    pub async fn players_cursor(
        &self,
        offset: i64,
        count: i64,
        filter: Filter,
    ) -> Result<Cursor<Player>, AppError> {
        let page = PageRequest::new(offset, count)?;
        let predicate = Predicate::for_players(&filter.canonicalize()?);
        let listing = PlayerListing::new(&self.repo, &self.assembler, predicate);
        paginate(&listing, page, filter).await
    }

    pub async fn player_info(&self, player_id: PlayerId) -> Result<PlayerInfo, AppError> {
        let player_id = require_valid(player_id, "playerId")?;
        let profile = self
            .repo
            .player_profile(player_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("player {}", player_id)))?;

        let appearances =
            Predicate::new().and(Condition::Equals(Column::StatsPlayerId, player_id.as_i64()));
        let per_team = AggregateQuery::new(appearances.clone(), Grouping::Team);
        let all_time = AggregateQuery::new(appearances, Grouping::None);

        let (memberships, per_team, all_time, recent_games) = futures::try_join!(
            self.repo.player_memberships(player_id).map_err(AppError::from),
            self.repo.aggregate(&per_team).map_err(AppError::from),
            self.repo.aggregate(&all_time).map_err(AppError::from),
            self.recent_games(Filter::for_player(player_id)),
        )?;

        let team_ids = distinct(memberships.iter().map(|m| m.team_id));
        let competition_ids = distinct(memberships.iter().map(|m| m.competition_id));
        let (teams, competitions) = futures::try_join!(
            self.assembler.teams(&team_ids),
            self.assembler.competitions(&competition_ids),
        )?;

        let competitions: HashMap<CompetitionId, Competition> = competitions
            .into_iter()
            .map(|c| (c.competition_id, c))
            .collect();
        let per_team: HashMap<GroupKey, AggregateStats> =
            per_team.into_iter().map(|s| (s.key, s)).collect();

        // Memberships are sorted by team, then competition, then jersey.
        let mut by_team: BTreeMap<TeamId, (Vec<CompetitionId>, Vec<i64>)> = BTreeMap::new();
        for membership in &memberships {
            let (comps, jerseys) = by_team.entry(membership.team_id).or_default();
            if !comps.contains(&membership.competition_id) {
                comps.push(membership.competition_id);
            }
            if !jerseys.contains(&membership.jersey_number) {
                jerseys.push(membership.jersey_number);
            }
        }

        let teams = teams
            .into_iter()
            .map(|team| {
                let key = GroupKey::Team(team.team_id);
                let (comps, jerseys) = by_team.remove(&team.team_id).unwrap_or_default();
                PlayerTeam {
                    competitions: comps
                        .iter()
                        .filter_map(|id| competitions.get(id).cloned())
                        .collect(),
                    jersey_numbers: jerseys,
                    stats: per_team
                        .get(&key)
                        .copied()
                        .unwrap_or_else(|| AggregateStats::empty(key)),
                    team,
                }
            })
            .collect();

        let stats = all_time
            .into_iter()
            .next()
            .unwrap_or_else(|| AggregateStats::empty(GroupKey::All));
        debug!(player_id = %player_id, games = stats.game_count, "Assembled player info");

        Ok(PlayerInfo {
            profile,
            teams,
            stats,
            recent_games,
        })
    }

    pub async fn player_game_stats(
        &self,
        player_id: PlayerId,
        game_id: GameId,
    ) -> Result<PlayerGameStats, AppError> {
        let player_id = require_valid(player_id, "playerId")?;
        let game_id = require_valid(game_id, "gameId")?;

        let predicate = Predicate::new()
            .and(Condition::Equals(Column::StatsPlayerId, player_id.as_i64()))
            .and(Condition::Equals(Column::StatsGameId, game_id.as_i64()));
        self.repo
            .player_game_stats(&predicate)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| {
                AppError::NotFound(format!("player {} in game {}", player_id, game_id))
            })
    }
}
