//! Id listings for the cursors and schedule lookups.
//!
//! Counts and fetches for one cursor are always built from the same
//! [`Predicate`], so `total` and the fetched page agree.

use sqlx::{QueryBuilder, Row, Sqlite};

use super::Repository;
use crate::db::query::{Column, Condition, Predicate};
use crate::db::StoreError;
use crate::domain::{CompetitionId, GameId, LocationId, PlayerId, TeamId};

/// Ordering shared by the games cursor and every "recent games" listing.
const GAMES_ORDER: &str = " ORDER BY Games.GameTime DESC, Games.GameId DESC";

const PLAYERS_ORDER: &str = " ORDER BY Players.Name DESC, Players.PlayerId ASC";

/// A scheduled game, played or not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fixture {
    pub game_id: GameId,
    pub home_team_id: TeamId,
    pub away_team_id: TeamId,
}

impl Repository {
    pub async fn count_games(&self, predicate: &Predicate) -> Result<i64, StoreError> {
        self.count("count_games", "Games", predicate).await
    }

    pub async fn game_ids(
        &self,
        predicate: &Predicate,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<GameId>, StoreError> {
        let ids = self
            .page_of_ids(
                "game_ids",
                "SELECT Games.GameId AS Id FROM Games",
                GAMES_ORDER,
                predicate,
                limit,
                offset,
            )
            .await?;
        Ok(ids.into_iter().map(GameId::new).collect())
    }

    pub async fn count_players(&self, predicate: &Predicate) -> Result<i64, StoreError> {
        self.count("count_players", "Players", predicate).await
    }

    pub async fn player_ids(
        &self,
        predicate: &Predicate,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<PlayerId>, StoreError> {
        let ids = self
            .page_of_ids(
                "player_ids",
                "SELECT Players.PlayerId AS Id FROM Players",
                PLAYERS_ORDER,
                predicate,
                limit,
                offset,
            )
            .await?;
        Ok(ids.into_iter().map(PlayerId::new).collect())
    }

    async fn count(
        &self,
        op: &'static str,
        table: &'static str,
        predicate: &Predicate,
    ) -> Result<i64, StoreError> {
        self.bounded(op, async {
            let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new("SELECT COUNT(*) AS Total FROM ");
            qb.push(table);
            predicate.push_where(&mut qb);

            let row = qb.build().fetch_one(&self.pool).await?;
            row.try_get::<i64, _>("Total")
        })
        .await
    }

    async fn page_of_ids(
        &self,
        op: &'static str,
        select: &'static str,
        order: &'static str,
        predicate: &Predicate,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<i64>, StoreError> {
        self.bounded(op, async {
            let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(select);
            predicate.push_where(&mut qb);
            qb.push(order);
            qb.push(" LIMIT ");
            qb.push_bind(limit);
            qb.push(" OFFSET ");
            qb.push_bind(offset);

            let rows = qb.build().fetch_all(&self.pool).await?;
            rows.iter()
                .map(|row| row.try_get::<i64, _>("Id"))
                .collect::<Result<Vec<_>, sqlx::Error>>()
        })
        .await
    }

    /// Every game scheduled in the competition, most recent first.
    pub async fn competition_fixtures(
        &self,
        competition_id: CompetitionId,
    ) -> Result<Vec<Fixture>, StoreError> {
        self.bounded("competition_fixtures", async {
            let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(
                "SELECT Games.GameId AS GameId, Games.HomeTeamId AS HomeTeamId, \
                 Games.AwayTeamId AS AwayTeamId FROM Games",
            );
            Predicate::new()
                .and(Condition::Equals(
                    Column::GameCompetitionId,
                    competition_id.as_i64(),
                ))
                .push_where(&mut qb);
            qb.push(GAMES_ORDER);

            let rows = qb.build().fetch_all(&self.pool).await?;
            rows.iter()
                .map(|row| -> Result<Fixture, sqlx::Error> {
                    Ok(Fixture {
                        game_id: GameId::new(row.try_get("GameId")?),
                        home_team_id: TeamId::new(row.try_get("HomeTeamId")?),
                        away_team_id: TeamId::new(row.try_get("AwayTeamId")?),
                    })
                })
                .collect::<Result<Vec<_>, sqlx::Error>>()
        })
        .await
    }

    /// Distinct venues the competition's games were scheduled at.
    pub async fn competition_location_ids(
        &self,
        competition_id: CompetitionId,
    ) -> Result<Vec<LocationId>, StoreError> {
        self.bounded("competition_location_ids", async {
            let rows = sqlx::query(
                "SELECT DISTINCT LocationId FROM Games WHERE CompetitionId = ? ORDER BY LocationId",
            )
            .bind(competition_id.as_i64())
            .fetch_all(&self.pool)
            .await?;

            rows.iter()
                .map(|row| Ok(LocationId::new(row.try_get("LocationId")?)))
                .collect::<Result<Vec<_>, sqlx::Error>>()
        })
        .await
    }

    /// Competition of the team's most recent scheduled game.
    pub async fn latest_competition_for_team(
        &self,
        team_id: TeamId,
    ) -> Result<Option<CompetitionId>, StoreError> {
        self.bounded("latest_competition_for_team", async {
            let competition_id: Option<i64> = sqlx::query_scalar(
                "SELECT CompetitionId FROM Games WHERE HomeTeamId = ?1 OR AwayTeamId = ?1 \
                 ORDER BY GameTime DESC, GameId DESC LIMIT 1",
            )
            .bind(team_id.as_i64())
            .fetch_optional(&self.pool)
            .await?;

            Ok(competition_id.map(CompetitionId::new))
        })
        .await
    }
}
