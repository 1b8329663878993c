//! Box scores and their aggregates.

use serde::Serialize;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

use super::entities::{Player, Team};
use super::primitives::{GameId, PlayerId, TeamId};

/// The sixteen raw counters recorded for one player in one game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxScore {
    pub two_point_fga: i64,
    pub two_point_fgm: i64,
    pub three_point_fga: i64,
    pub three_point_fgm: i64,
    pub free_throws_attempted: i64,
    pub free_throws_made: i64,
    pub offensive_rebounds: i64,
    pub defensive_rebounds: i64,
    pub assists: i64,
    pub blocks: i64,
    pub steals: i64,
    pub turnovers: i64,
    pub regular_fouls_forced: i64,
    pub regular_fouls_committed: i64,
    pub technical_fouls_committed: i64,
    pub minutes_played: i64,
}

impl BoxScore {
    /// Points scored: `3 × threes + 2 × twos + free throws`.
    pub fn points(&self) -> i64 {
        self.three_point_fgm * 3 + self.two_point_fgm * 2 + self.free_throws_made
    }

    pub fn rebounds(&self) -> i64 {
        self.offensive_rebounds + self.defensive_rebounds
    }
}

impl Add for BoxScore {
    type Output = BoxScore;

    fn add(mut self, rhs: BoxScore) -> BoxScore {
        self += rhs;
        self
    }
}

impl AddAssign for BoxScore {
    fn add_assign(&mut self, rhs: BoxScore) {
        self.two_point_fga += rhs.two_point_fga;
        self.two_point_fgm += rhs.two_point_fgm;
        self.three_point_fga += rhs.three_point_fga;
        self.three_point_fgm += rhs.three_point_fgm;
        self.free_throws_attempted += rhs.free_throws_attempted;
        self.free_throws_made += rhs.free_throws_made;
        self.offensive_rebounds += rhs.offensive_rebounds;
        self.defensive_rebounds += rhs.defensive_rebounds;
        self.assists += rhs.assists;
        self.blocks += rhs.blocks;
        self.steals += rhs.steals;
        self.turnovers += rhs.turnovers;
        self.regular_fouls_forced += rhs.regular_fouls_forced;
        self.regular_fouls_committed += rhs.regular_fouls_committed;
        self.technical_fouls_committed += rhs.technical_fouls_committed;
        self.minutes_played += rhs.minutes_played;
    }
}

impl Sum for BoxScore {
    fn sum<I: Iterator<Item = BoxScore>>(iter: I) -> BoxScore {
        iter.fold(BoxScore::default(), Add::add)
    }
}

/// The key an aggregate row was grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GroupKey {
    All,
    Player(PlayerId),
    Team(TeamId),
    TeamInGame { game_id: GameId, team_id: TeamId },
}

/// A box score summed over every appearance matching some predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateStats {
    #[serde(skip)]
    pub key: GroupKey,
    /// Distinct games contributing to `totals`.
    pub game_count: i64,
    pub totals: BoxScore,
}

impl AggregateStats {
    pub fn empty(key: GroupKey) -> Self {
        AggregateStats {
            key,
            game_count: 0,
            totals: BoxScore::default(),
        }
    }

    /// Average of `value` over the contributing games; zero when there are none.
    pub fn per_game(&self, value: i64) -> f64 {
        if self.game_count == 0 {
            0.0
        } else {
            value as f64 / self.game_count as f64
        }
    }

    pub fn points_per_game(&self) -> f64 {
        self.per_game(self.totals.points())
    }
}

/// One player's box score for one game, with the team they played for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerGameStats {
    pub stats_id: i64,
    pub game_id: GameId,
    pub player: Player,
    pub team: Team,
    pub jersey_number: i64,
    pub stats: BoxScore,
}
