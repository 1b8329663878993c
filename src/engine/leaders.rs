//! Stat leader ranking and the minimum-games qualifier.

use serde::Serialize;

use crate::domain::{AggregateStats, BoxScore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum StatCategory {
    Points,
    Rebounds,
    Assists,
    Steals,
    Blocks,
}

impl StatCategory {
    pub const ALL: [StatCategory; 5] = [
        StatCategory::Points,
        StatCategory::Rebounds,
        StatCategory::Assists,
        StatCategory::Steals,
        StatCategory::Blocks,
    ];

    pub fn total(self, totals: &BoxScore) -> i64 {
        match self {
            StatCategory::Points => totals.points(),
            StatCategory::Rebounds => totals.rebounds(),
            StatCategory::Assists => totals.assists,
            StatCategory::Steals => totals.steals,
            StatCategory::Blocks => totals.blocks,
        }
    }

    pub fn per_game(self, stats: &AggregateStats) -> f64 {
        stats.per_game(self.total(&stats.totals))
    }
}

/// How many leaders to report and who qualifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeaderPolicy {
    pub count: usize,
    pub min_games_divisor: i64,
}

impl LeaderPolicy {
    /// `ceil(schedule / divisor)`: a group must have played roughly that
    /// share of the relevant schedule.
    pub fn min_games(&self, schedule: i64) -> i64 {
        if schedule <= 0 {
            return 0;
        }
        let divisor = self.min_games_divisor.max(1);
        (schedule + divisor - 1) / divisor
    }
}

impl Default for LeaderPolicy {
    fn default() -> Self {
        LeaderPolicy {
            count: 1,
            min_games_divisor: 3,
        }
    }
}

/// Rounds in a competition: average games per participating team.
pub fn competition_rounds(games: i64, teams: i64) -> i64 {
    if teams <= 0 {
        0
    } else {
        2 * games / teams
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Leader {
    pub score: f64,
    pub stats: AggregateStats,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryLeaders {
    pub category: StatCategory,
    pub leaders: Vec<Leader>,
}

/// Top `count` groups by per-game average in `category`, among those with
/// at least `min_games` games. Equal averages go to the lower group key.
pub fn rank(
    aggregates: &[AggregateStats],
    category: StatCategory,
    min_games: i64,
    count: usize,
) -> Vec<Leader> {
    let mut qualified: Vec<Leader> = aggregates
        .iter()
        .filter(|stats| stats.game_count > 0 && stats.game_count >= min_games)
        .map(|stats| Leader {
            score: category.per_game(stats),
            stats: *stats,
        })
        .collect();

    qualified.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.stats.key.cmp(&b.stats.key))
    });
    qualified.truncate(count);
    qualified
}

pub fn leaders_by_category(
    aggregates: &[AggregateStats],
    min_games: i64,
    policy: &LeaderPolicy,
) -> Vec<CategoryLeaders> {
    StatCategory::ALL
        .iter()
        .map(|&category| CategoryLeaders {
            category,
            leaders: rank(aggregates, category, min_games, policy.count),
        })
        .collect()
}
