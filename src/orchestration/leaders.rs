//! Leader boards labelled with the players or teams they rank.

use serde::Serialize;
use std::collections::HashMap;

use crate::domain::{AggregateStats, GroupKey, Player, PlayerId, Team, TeamId};
use crate::engine::{CategoryLeaders, StatCategory};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatLeader<T> {
    #[serde(flatten)]
    pub subject: T,
    pub per_game: f64,
    pub stats: AggregateStats,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderBoard<T> {
    pub category: StatCategory,
    pub leaders: Vec<StatLeader<T>>,
}

pub fn leader_player_ids(boards: &[CategoryLeaders]) -> Vec<PlayerId> {
    boards
        .iter()
        .flat_map(|board| board.leaders.iter())
        .filter_map(|leader| match leader.stats.key {
            GroupKey::Player(id) => Some(id),
            _ => None,
        })
        .collect()
}

pub fn leader_team_ids(boards: &[CategoryLeaders]) -> Vec<TeamId> {
    boards
        .iter()
        .flat_map(|board| board.leaders.iter())
        .filter_map(|leader| match leader.stats.key {
            GroupKey::Team(id) => Some(id),
            _ => None,
        })
        .collect()
}

pub fn label_players(
    boards: Vec<CategoryLeaders>,
    players: &HashMap<PlayerId, Player>,
) -> Vec<LeaderBoard<Player>> {
    label(boards, |key| match key {
        GroupKey::Player(id) => players.get(&id).cloned(),
        _ => None,
    })
}

pub fn label_teams(
    boards: Vec<CategoryLeaders>,
    teams: &HashMap<TeamId, Team>,
) -> Vec<LeaderBoard<Team>> {
    label(boards, |key| match key {
        GroupKey::Team(id) => teams.get(&id).cloned(),
        _ => None,
    })
}

fn label<T>(
    boards: Vec<CategoryLeaders>,
    subject: impl Fn(GroupKey) -> Option<T>,
) -> Vec<LeaderBoard<T>> {
    boards
        .into_iter()
        .map(|board| LeaderBoard {
            category: board.category,
            leaders: board
                .leaders
                .into_iter()
                .filter_map(|leader| {
                    subject(leader.stats.key).map(|subject| StatLeader {
                        subject,
                        per_game: leader.score,
                        stats: leader.stats,
                    })
                })
                .collect(),
        })
        .collect()
}
