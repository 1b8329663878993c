//! Competition standings folded from game results.

use serde::Serialize;
use std::collections::HashMap;

use crate::domain::{GameResult, TeamId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingRecord {
    pub team_id: TeamId,
    pub won: i64,
    pub lost: i64,
    pub drawn: i64,
}

impl StandingRecord {
    fn new(team_id: TeamId) -> Self {
        StandingRecord {
            team_id,
            won: 0,
            lost: 0,
            drawn: 0,
        }
    }

    pub fn played(&self) -> i64 {
        self.won + self.lost + self.drawn
    }
}

/// Win/loss/draw records keyed by team. Teams may be registered up front so
/// that a team with no played games still gets a zero row.
#[derive(Debug, Clone, Default)]
pub struct StandingsTable {
    records: HashMap<TeamId, StandingRecord>,
}

impl StandingsTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, team_id: TeamId) {
        self.records
            .entry(team_id)
            .or_insert_with(|| StandingRecord::new(team_id));
    }

    pub fn record(&mut self, result: &GameResult) {
        self.register(result.home_team_id);
        self.register(result.away_team_id);

        let (home, away) = match result.home_points.cmp(&result.away_points) {
            std::cmp::Ordering::Greater => (Outcome::Won, Outcome::Lost),
            std::cmp::Ordering::Less => (Outcome::Lost, Outcome::Won),
            std::cmp::Ordering::Equal => (Outcome::Drawn, Outcome::Drawn),
        };
        self.apply(result.home_team_id, home);
        self.apply(result.away_team_id, away);
    }

    fn apply(&mut self, team_id: TeamId, outcome: Outcome) {
        if let Some(record) = self.records.get_mut(&team_id) {
            match outcome {
                Outcome::Won => record.won += 1,
                Outcome::Lost => record.lost += 1,
                Outcome::Drawn => record.drawn += 1,
            }
        }
    }

    /// Most wins first; equal win counts by ascending team id.
    pub fn into_sorted(self) -> Vec<StandingRecord> {
        let mut records: Vec<StandingRecord> = self.records.into_values().collect();
        records.sort_by(|a, b| b.won.cmp(&a.won).then(a.team_id.cmp(&b.team_id)));
        records
    }
}

enum Outcome {
    Won,
    Lost,
    Drawn,
}
