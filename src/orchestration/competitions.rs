use futures::TryFutureExt;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

use super::leaders::{
    label_players, label_teams, leader_player_ids, leader_team_ids, LeaderBoard,
};
use super::{require_valid, HeroBall};
use crate::db::query::{AggregateQuery, Column, Condition, Grouping, Predicate};
use crate::domain::{
    Competition, CompetitionId, Filter, Game, Location, Player, PlayerId, Team, TeamId,
};
use crate::engine::{
    competition_rounds, leaders_by_category, Cursor, ResultIndex, StandingsTable,
};
use crate::error::AppError;
use crate::orchestration::assembler::distinct;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitionInfo {
    pub competition: Competition,
    pub locations: Vec<Location>,
    pub standings: Vec<Standing>,
    pub player_leaders: Vec<LeaderBoard<Player>>,
    pub team_leaders: Vec<LeaderBoard<Team>>,
    pub recent_games: Cursor<Game>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Standing {
    pub team: Team,
    pub won: i64,
    pub lost: i64,
    pub drawn: i64,
}

impl HeroBall {
    pub async fn competition_info(
        &self,
        competition_id: CompetitionId,
    ) -> Result<CompetitionInfo, AppError> {
        let competition_id = require_valid(competition_id, "competitionId")?;
        let competition = self
            .assembler
            .competitions(&[competition_id])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| AppError::NotFound(format!("competition {}", competition_id)))?;

        let in_competition = Predicate::new().and(Condition::Equals(
            Column::GameCompetitionId,
            competition_id.as_i64(),
        ));
        let team_points = AggregateQuery::new(in_competition.clone(), Grouping::TeamInGame);
        let per_player = AggregateQuery::new(in_competition.clone(), Grouping::Player);
        let per_team = AggregateQuery::new(in_competition, Grouping::Team);

        let (location_ids, fixtures, team_points, per_player, per_team, recent_games) = futures::try_join!(
            self.repo
                .competition_location_ids(competition_id)
                .map_err(AppError::from),
            self.repo
                .competition_fixtures(competition_id)
                .map_err(AppError::from),
            self.repo.aggregate(&team_points).map_err(AppError::from),
            self.repo.aggregate(&per_player).map_err(AppError::from),
            self.repo.aggregate(&per_team).map_err(AppError::from),
            self.recent_games(Filter::for_competition(competition_id)),
        )?;

        let participants: BTreeSet<TeamId> = fixtures
            .iter()
            .flat_map(|f| [f.home_team_id, f.away_team_id])
            .collect();
        let rounds = competition_rounds(fixtures.len() as i64, participants.len() as i64);
        let min_games = self.leaders.min_games(rounds);

        let results = ResultIndex::from_aggregates(&team_points);
        let mut table = StandingsTable::new();
        for team_id in &participants {
            table.register(*team_id);
        }
        for fixture in &fixtures {
            if let Some(result) =
                results.result_for(fixture.game_id, fixture.home_team_id, fixture.away_team_id)
            {
                table.record(&result);
            }
        }
        let records = table.into_sorted();

        let player_boards = leaders_by_category(&per_player, min_games, &self.leaders);
        let team_boards = leaders_by_category(&per_team, min_games, &self.leaders);

        let player_ids = distinct(leader_player_ids(&player_boards));
        let team_ids = distinct(
            participants
                .iter()
                .copied()
                .chain(leader_team_ids(&team_boards)),
        );
        let (locations, teams, players) = futures::try_join!(
            self.assembler.locations(&location_ids),
            self.assembler.teams(&team_ids),
            self.assembler.players(&player_ids),
        )?;

        let teams: HashMap<TeamId, Team> = teams.into_iter().map(|t| (t.team_id, t)).collect();
        let players: HashMap<PlayerId, Player> =
            players.into_iter().map(|p| (p.player_id, p)).collect();

        let standings = records
            .into_iter()
            .filter_map(|record| {
                teams.get(&record.team_id).cloned().map(|team| Standing {
                    team,
                    won: record.won,
                    lost: record.lost,
                    drawn: record.drawn,
                })
            })
            .collect();
        debug!(
            competition_id = %competition_id,
            games = fixtures.len(),
            rounds,
            min_games,
            "Assembled competition info"
        );

        Ok(CompetitionInfo {
            competition,
            locations,
            standings,
            player_leaders: label_players(player_boards, &players),
            team_leaders: label_teams(team_boards, &teams),
            recent_games,
        })
    }
}
