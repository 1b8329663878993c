//! Batched entity lookups. Every method takes a whole id set and costs one
//! round trip per `ID_BATCH_SIZE` ids; an empty id set costs none.

use chrono::NaiveDateTime;
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite};

use super::{raw_ids, Repository, ID_BATCH_SIZE};
use crate::db::query::{Column, Condition, Predicate};
use crate::db::StoreError;
use crate::domain::{
    Competition, CompetitionId, GameId, League, LeagueId, Location, LocationId, Player, PlayerId,
    PlayerProfile, Team, TeamId,
};

/// A game row with its teams and location resolved. The competition is
/// resolved separately since many games share one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRow {
    pub game_id: GameId,
    pub home_team: Team,
    pub away_team: Team,
    pub location: Location,
    pub competition_id: CompetitionId,
    pub game_time: NaiveDateTime,
}

const SELECT_GAMES: &str = "SELECT Games.GameId AS GameId, \
     Games.CompetitionId AS CompetitionId, Games.GameTime AS GameTime, \
     Home.TeamId AS HomeTeamId, Home.Name AS HomeTeamName, \
     Away.TeamId AS AwayTeamId, Away.Name AS AwayTeamName, \
     Locations.LocationId AS LocationId, Locations.Name AS LocationName \
     FROM Games \
     JOIN Teams AS Home ON Games.HomeTeamId = Home.TeamId \
     JOIN Teams AS Away ON Games.AwayTeamId = Away.TeamId \
     JOIN Locations ON Games.LocationId = Locations.LocationId";

const SELECT_COMPETITIONS: &str = "SELECT Competitions.CompetitionId AS CompetitionId, \
     Competitions.Name AS Name, Competitions.SubCompetition AS SubCompetition, \
     Leagues.LeagueId AS LeagueId, Leagues.Name AS LeagueName, Leagues.Division AS Division \
     FROM Competitions JOIN Leagues ON Competitions.LeagueId = Leagues.LeagueId";

impl Repository {
    pub async fn players_by_ids(&self, ids: &[PlayerId]) -> Result<Vec<Player>, StoreError> {
        let mut players = Vec::with_capacity(ids.len());
        for batch in ids.chunks(ID_BATCH_SIZE) {
            let predicate =
                Predicate::new().and(Condition::AnyOf(Column::PlayerId, raw_ids(batch)));
            players.extend(self.select_players("players_by_ids", predicate).await?);
        }
        Ok(players)
    }

    pub async fn all_players(&self) -> Result<Vec<Player>, StoreError> {
        self.select_players("all_players", Predicate::new()).await
    }

    async fn select_players(
        &self,
        op: &'static str,
        predicate: Predicate,
    ) -> Result<Vec<Player>, StoreError> {
        self.bounded(op, async {
            let mut qb: QueryBuilder<Sqlite> =
                QueryBuilder::new("SELECT PlayerId, Name, Position FROM Players");
            predicate.push_where(&mut qb);
            qb.push(" ORDER BY Players.PlayerId");

            let rows = qb.build().fetch_all(&self.pool).await?;
            rows.iter().map(decode_player).collect::<Result<Vec<_>, sqlx::Error>>()
        })
        .await
    }

    pub async fn player_profile(&self, id: PlayerId) -> Result<Option<PlayerProfile>, StoreError> {
        self.bounded("player_profile", async {
            let row = sqlx::query(
                "SELECT PlayerId, Name, Position, YearStarted, Description \
                 FROM Players WHERE PlayerId = ?",
            )
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await?;

            row.map(|row| -> Result<PlayerProfile, sqlx::Error> {
                Ok(PlayerProfile {
                    player: decode_player(&row)?,
                    year_started: row.try_get("YearStarted")?,
                    description: row.try_get("Description")?,
                })
            })
            .transpose()
        })
        .await
    }

    pub async fn teams_by_ids(&self, ids: &[TeamId]) -> Result<Vec<Team>, StoreError> {
        let mut teams = Vec::with_capacity(ids.len());
        for batch in ids.chunks(ID_BATCH_SIZE) {
            let predicate =
                Predicate::new().and(Condition::AnyOf(Column::TeamId, raw_ids(batch)));
            teams.extend(self.select_teams("teams_by_ids", predicate).await?);
        }
        Ok(teams)
    }

    pub async fn all_teams(&self) -> Result<Vec<Team>, StoreError> {
        self.select_teams("all_teams", Predicate::new()).await
    }

    async fn select_teams(
        &self,
        op: &'static str,
        predicate: Predicate,
    ) -> Result<Vec<Team>, StoreError> {
        self.bounded(op, async {
            let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new("SELECT TeamId, Name FROM Teams");
            predicate.push_where(&mut qb);
            qb.push(" ORDER BY Teams.TeamId");

            let rows = qb.build().fetch_all(&self.pool).await?;
            rows.iter()
                .map(|row| -> Result<Team, sqlx::Error> {
                    Ok(Team {
                        team_id: TeamId::new(row.try_get("TeamId")?),
                        name: row.try_get("Name")?,
                    })
                })
                .collect::<Result<Vec<_>, sqlx::Error>>()
        })
        .await
    }

    pub async fn locations_by_ids(&self, ids: &[LocationId]) -> Result<Vec<Location>, StoreError> {
        let mut locations = Vec::with_capacity(ids.len());
        for batch in ids.chunks(ID_BATCH_SIZE) {
            locations.extend(self.select_locations(batch).await?);
        }
        Ok(locations)
    }

    async fn select_locations(&self, ids: &[LocationId]) -> Result<Vec<Location>, StoreError> {
        self.bounded("locations_by_ids", async {
            let mut qb: QueryBuilder<Sqlite> =
                QueryBuilder::new("SELECT LocationId, Name FROM Locations");
            Predicate::new()
                .and(Condition::AnyOf(Column::LocationId, raw_ids(ids)))
                .push_where(&mut qb);
            qb.push(" ORDER BY Locations.LocationId");

            let rows = qb.build().fetch_all(&self.pool).await?;
            rows.iter()
                .map(|row| -> Result<Location, sqlx::Error> {
                    Ok(Location {
                        location_id: LocationId::new(row.try_get("LocationId")?),
                        name: row.try_get("Name")?,
                    })
                })
                .collect::<Result<Vec<_>, sqlx::Error>>()
        })
        .await
    }

    pub async fn competitions_by_ids(
        &self,
        ids: &[CompetitionId],
    ) -> Result<Vec<Competition>, StoreError> {
        let mut competitions = Vec::with_capacity(ids.len());
        for batch in ids.chunks(ID_BATCH_SIZE) {
            let predicate =
                Predicate::new().and(Condition::AnyOf(Column::CompetitionId, raw_ids(batch)));
            competitions.extend(
                self.select_competitions("competitions_by_ids", predicate)
                    .await?,
            );
        }
        Ok(competitions)
    }

    pub async fn all_competitions(&self) -> Result<Vec<Competition>, StoreError> {
        self.select_competitions("all_competitions", Predicate::new())
            .await
    }

    async fn select_competitions(
        &self,
        op: &'static str,
        predicate: Predicate,
    ) -> Result<Vec<Competition>, StoreError> {
        self.bounded(op, async {
            let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(SELECT_COMPETITIONS);
            predicate.push_where(&mut qb);
            qb.push(" ORDER BY Competitions.CompetitionId");

            let rows = qb.build().fetch_all(&self.pool).await?;
            rows.iter().map(decode_competition).collect::<Result<Vec<_>, sqlx::Error>>()
        })
        .await
    }

    /// Game rows for the given ids, in no particular order.
    pub async fn game_rows_by_ids(&self, ids: &[GameId]) -> Result<Vec<GameRow>, StoreError> {
        let mut games = Vec::with_capacity(ids.len());
        for batch in ids.chunks(ID_BATCH_SIZE) {
            games.extend(self.select_game_rows(batch).await?);
        }
        Ok(games)
    }

    async fn select_game_rows(&self, ids: &[GameId]) -> Result<Vec<GameRow>, StoreError> {
        self.bounded("game_rows_by_ids", async {
            let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(SELECT_GAMES);
            Predicate::new()
                .and(Condition::AnyOf(Column::GameId, raw_ids(ids)))
                .push_where(&mut qb);

            let rows = qb.build().fetch_all(&self.pool).await?;
            rows.iter().map(decode_game_row).collect::<Result<Vec<_>, sqlx::Error>>()
        })
        .await
    }
}

fn decode_player(row: &SqliteRow) -> Result<Player, sqlx::Error> {
    Ok(Player {
        player_id: PlayerId::new(row.try_get("PlayerId")?),
        name: row.try_get("Name")?,
        position: row.try_get("Position")?,
    })
}

fn decode_competition(row: &SqliteRow) -> Result<Competition, sqlx::Error> {
    Ok(Competition {
        competition_id: CompetitionId::new(row.try_get("CompetitionId")?),
        league: League {
            league_id: LeagueId::new(row.try_get("LeagueId")?),
            name: row.try_get("LeagueName")?,
            division: row.try_get("Division")?,
        },
        name: row.try_get("Name")?,
        sub_competition: row.try_get("SubCompetition")?,
    })
}

fn decode_game_row(row: &SqliteRow) -> Result<GameRow, sqlx::Error> {
    Ok(GameRow {
        game_id: GameId::new(row.try_get("GameId")?),
        home_team: Team {
            team_id: TeamId::new(row.try_get("HomeTeamId")?),
            name: row.try_get("HomeTeamName")?,
        },
        away_team: Team {
            team_id: TeamId::new(row.try_get("AwayTeamId")?),
            name: row.try_get("AwayTeamName")?,
        },
        location: Location {
            location_id: LocationId::new(row.try_get("LocationId")?),
            name: row.try_get("LocationName")?,
        },
        competition_id: CompetitionId::new(row.try_get("CompetitionId")?),
        game_time: row.try_get("GameTime")?,
    })
}
