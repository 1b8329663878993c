//! Ranked aggregate leaderboards with inclusion and exclusion filters.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

use super::HeroBall;
use crate::db::query::{AggregateQuery, Grouping, Predicate, Ranking};
use crate::domain::{AggregateStats, Filter, GroupKey, Player, PlayerId, Team, TeamId};
use crate::error::AppError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatsGrouping {
    #[default]
    Player,
    Team,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsRequest {
    /// Appearances must match this filter.
    #[serde(rename = "for", default)]
    pub for_filter: Filter,
    /// Appearances must not involve any id listed here.
    #[serde(default)]
    pub against: Filter,
    #[serde(default)]
    pub minimum_games: i64,
    pub count: i64,
    #[serde(default)]
    pub offset: i64,
    #[serde(default)]
    pub group_by: StatsGrouping,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedStats {
    /// 1-based position in the full ranking.
    pub rank: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player: Option<Player>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<Team>,
    pub points_per_game: f64,
    pub stats: AggregateStats,
}

impl StatsRequest {
    fn validate(&self) -> Result<(), AppError> {
        if self.count <= 0 {
            return Err(AppError::InvalidArgument(format!(
                "count must be positive, got {}",
                self.count
            )));
        }
        if self.offset < 0 {
            return Err(AppError::InvalidArgument(format!(
                "offset must be non-negative, got {}",
                self.offset
            )));
        }
        if self.minimum_games < 0 {
            return Err(AppError::InvalidArgument(format!(
                "minimumGames must be non-negative, got {}",
                self.minimum_games
            )));
        }
        Ok(())
    }
}

impl HeroBall {
    pub async fn stats(&self, request: StatsRequest) -> Result<Vec<RankedStats>, AppError> {
        request.validate()?;
        let for_filter = request.for_filter.canonicalize()?;
        let against = request.against.canonicalize()?;
        if against.date.is_some() {
            return Err(AppError::InvalidArgument(
                "against filter does not accept a date".to_string(),
            ));
        }

        let grouping = match request.group_by {
            StatsGrouping::Player => Grouping::Player,
            StatsGrouping::Team => Grouping::Team,
        };
        let predicate = Predicate::for_appearances(&for_filter)
            .merge(Predicate::excluding_appearances(&against));
        let query = AggregateQuery::new(predicate, grouping)
            .min_games(request.minimum_games)
            .ranked_by(Ranking::PointsPerGame)
            .window(request.count, request.offset);

        let rows = self.repo.aggregate(&query).await?;
        debug!(rows = rows.len(), group_by = ?request.group_by, "Ranked stats fetched");

        let player_ids: Vec<PlayerId> = rows
            .iter()
            .filter_map(|s| match s.key {
                GroupKey::Player(id) => Some(id),
                _ => None,
            })
            .collect();
        let team_ids: Vec<TeamId> = rows
            .iter()
            .filter_map(|s| match s.key {
                GroupKey::Team(id) => Some(id),
                _ => None,
            })
            .collect();
        let (players, teams) = futures::try_join!(
            self.assembler.players(&player_ids),
            self.assembler.teams(&team_ids),
        )?;
        let players: HashMap<PlayerId, Player> =
            players.into_iter().map(|p| (p.player_id, p)).collect();
        let teams: HashMap<TeamId, Team> = teams.into_iter().map(|t| (t.team_id, t)).collect();

        Ok(rows
            .into_iter()
            .enumerate()
            .map(|(i, stats)| RankedStats {
                rank: request.offset + i as i64 + 1,
                player: match stats.key {
                    GroupKey::Player(id) => players.get(&id).cloned(),
                    _ => None,
                },
                team: match stats.key {
                    GroupKey::Team(id) => teams.get(&id).cloned(),
                    _ => None,
                },
                points_per_game: stats.points_per_game(),
                stats,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults() {
        let request: StatsRequest = serde_json::from_str(r#"{"count": 5}"#).unwrap();
        assert_eq!(request.offset, 0);
        assert_eq!(request.minimum_games, 0);
        assert_eq!(request.group_by, StatsGrouping::Player);
        assert_eq!(request.for_filter, Filter::default());
    }

    #[test]
    fn test_request_reads_for_and_against() {
        let request: StatsRequest = serde_json::from_str(
            r#"{"for": {"competitionIds": [1]}, "against": {"teamIds": [2]}, "count": 3, "groupBy": "team"}"#,
        )
        .unwrap();
        assert_eq!(request.for_filter.competition_ids, Some(vec![1]));
        assert_eq!(request.against.team_ids, Some(vec![2]));
        assert_eq!(request.group_by, StatsGrouping::Team);
    }

    #[test]
    fn test_validation() {
        let mut request: StatsRequest = serde_json::from_str(r#"{"count": 0}"#).unwrap();
        assert!(matches!(request.validate(), Err(AppError::InvalidArgument(_))));
        request.count = 1;
        request.minimum_games = -1;
        assert!(matches!(request.validate(), Err(AppError::InvalidArgument(_))));
        request.minimum_games = 0;
        assert!(request.validate().is_ok());
    }
}
