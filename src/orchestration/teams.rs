use futures::TryFutureExt;
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

use super::leaders::{label_players, LeaderBoard};
use super::{require_valid, HeroBall};
use crate::db::query::{AggregateQuery, Column, Condition, Grouping, Predicate, Ranking};
use crate::domain::{
    AggregateStats, Competition, Filter, Game, GroupKey, Player, PlayerId, Team, TeamId,
};
use crate::engine::{leaders_by_category, Cursor};
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamInfo {
    pub team: Team,
    /// Competition of the team's most recent game.
    pub competition: Option<Competition>,
    pub players: Vec<RosterEntry>,
    pub stats: AggregateStats,
    pub recent_games: Cursor<Game>,
    pub leaders: Vec<LeaderBoard<Player>>,
}

/// A player who has appeared for the team, with their totals for it. The
/// roster is ordered by total points.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterEntry {
    pub player: Player,
    pub stats: AggregateStats,
}

impl HeroBall {
    pub async fn team_info(&self, team_id: TeamId) -> Result<TeamInfo, AppError> {
        let team_id = require_valid(team_id, "teamId")?;
        let team = self
            .assembler
            .teams(&[team_id])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| AppError::NotFound(format!("team {}", team_id)))?;

        let appearances =
            Predicate::new().and(Condition::Equals(Column::StatsTeamId, team_id.as_i64()));
        let roster =
            AggregateQuery::new(appearances.clone(), Grouping::Player).ranked_by(Ranking::Points);
        let totals = AggregateQuery::new(appearances, Grouping::None);

        let (roster, totals, competition_id, recent_games) = futures::try_join!(
            self.repo.aggregate(&roster).map_err(AppError::from),
            self.repo.aggregate(&totals).map_err(AppError::from),
            self.repo
                .latest_competition_for_team(team_id)
                .map_err(AppError::from),
            self.recent_games(Filter::for_team(team_id)),
        )?;

        let player_ids: Vec<PlayerId> = roster
            .iter()
            .filter_map(|s| match s.key {
                GroupKey::Player(id) => Some(id),
                _ => None,
            })
            .collect();
        let competition_ids: Vec<_> = competition_id.into_iter().collect();
        let (players, competitions) = futures::try_join!(
            self.assembler.players(&player_ids),
            self.assembler.competitions(&competition_ids),
        )?;

        let stats = totals
            .into_iter()
            .next()
            .unwrap_or_else(|| AggregateStats::empty(GroupKey::Team(team_id)));
        let min_games = self.leaders.min_games(stats.game_count);
        let boards = leaders_by_category(&roster, min_games, &self.leaders);

        let players: HashMap<PlayerId, Player> =
            players.into_iter().map(|p| (p.player_id, p)).collect();
        let leaders = label_players(boards, &players);
        let roster = roster
            .into_iter()
            .filter_map(|stats| match stats.key {
                GroupKey::Player(id) => players.get(&id).cloned().map(|player| RosterEntry {
                    player,
                    stats,
                }),
                _ => None,
            })
            .collect();
        debug!(team_id = %team_id, games = stats.game_count, min_games, "Assembled team info");

        Ok(TeamInfo {
            team,
            competition: competitions.into_iter().next(),
            players: roster,
            stats,
            recent_games,
            leaders,
        })
    }
}
