//! Read-side projections of the league dataset.

use chrono::NaiveDateTime;
use serde::Serialize;

use super::primitives::{CompetitionId, GameId, LeagueId, LocationId, PlayerId, TeamId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct League {
    pub league_id: LeagueId,
    pub name: String,
    pub division: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Competition {
    pub competition_id: CompetitionId,
    pub league: League,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_competition: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub team_id: TeamId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub location_id: LocationId,
    pub name: String,
}

/// Final score of a game, always derived from the box scores recorded for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameResult {
    pub home_team_id: TeamId,
    pub away_team_id: TeamId,
    pub home_points: i64,
    pub away_points: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub game_id: GameId,
    pub home_team: Team,
    pub away_team: Team,
    pub location: Location,
    pub competition: Competition,
    pub game_time: NaiveDateTime,
    /// `None` until at least one box score has been recorded for the game.
    pub result: Option<GameResult>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub player_id: PlayerId,
    pub name: String,
    pub position: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerProfile {
    #[serde(flatten)]
    pub player: Player,
    pub year_started: Option<i64>,
    pub description: Option<String>,
}
