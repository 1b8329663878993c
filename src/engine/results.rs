//! Game results derived from per-team box score totals.

use std::collections::HashMap;

use crate::domain::{AggregateStats, GameId, GameResult, GroupKey, TeamId};

/// Points scored by each team in each game, built from
/// [`GroupKey::TeamInGame`] aggregates.
#[derive(Debug, Clone, Default)]
pub struct ResultIndex {
    points: HashMap<(GameId, TeamId), i64>,
}

impl ResultIndex {
    pub fn from_aggregates(rows: &[AggregateStats]) -> Self {
        let mut points = HashMap::with_capacity(rows.len());
        for row in rows {
            if let GroupKey::TeamInGame { game_id, team_id } = row.key {
                *points.entry((game_id, team_id)).or_insert(0) += row.totals.points();
            }
        }
        ResultIndex { points }
    }

    /// The result of a game, or `None` when neither side has a box score.
    /// A side with no box scores scored zero.
    pub fn result_for(&self, game_id: GameId, home: TeamId, away: TeamId) -> Option<GameResult> {
        let home_points = self.points.get(&(game_id, home)).copied();
        let away_points = self.points.get(&(game_id, away)).copied();
        if home_points.is_none() && away_points.is_none() {
            return None;
        }
        Some(GameResult {
            home_team_id: home,
            away_team_id: away,
            home_points: home_points.unwrap_or(0),
            away_points: away_points.unwrap_or(0),
        })
    }
}
