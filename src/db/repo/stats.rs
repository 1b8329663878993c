//! Aggregate execution and per-appearance box score reads.

use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite};

use super::{decode_box_score, raw_ids, Repository, ID_BATCH_SIZE};
use crate::db::query::{
    AggregateQuery, Column, Condition, Grouping, Predicate, APPEARANCES, BOX_SCORE_COLUMNS,
};
use crate::db::StoreError;
use crate::domain::{
    AggregateStats, CompetitionId, GameId, GroupKey, Player, PlayerGameStats, PlayerId, Team,
    TeamId,
};

/// One (team, competition, jersey number) a player has appeared under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Membership {
    pub team_id: TeamId,
    pub competition_id: CompetitionId,
    pub jersey_number: i64,
}

impl Repository {
    /// Run an aggregate query. An ungrouped query over no appearances yields
    /// no rows rather than a zero row.
    pub async fn aggregate(&self, query: &AggregateQuery) -> Result<Vec<AggregateStats>, StoreError> {
        let grouping = query.grouping();
        self.bounded("aggregate", async {
            let mut qb = query.build();
            let rows = qb.build().fetch_all(&self.pool).await?;

            let mut stats = Vec::with_capacity(rows.len());
            for row in &rows {
                let aggregate = AggregateStats {
                    key: decode_group_key(row, grouping)?,
                    game_count: row.try_get("GameCount")?,
                    totals: decode_box_score(row)?,
                };
                if aggregate.game_count > 0 {
                    stats.push(aggregate);
                }
            }
            Ok::<_, sqlx::Error>(stats)
        })
        .await
    }

    /// Per-team totals for each of the given games, one round trip per
    /// `ID_BATCH_SIZE` games. Games without box scores have no rows.
    pub async fn team_totals_by_games(
        &self,
        ids: &[GameId],
    ) -> Result<Vec<AggregateStats>, StoreError> {
        let mut totals = Vec::new();
        for batch in ids.chunks(ID_BATCH_SIZE) {
            let query = AggregateQuery::new(
                Predicate::new().and(Condition::AnyOf(Column::StatsGameId, raw_ids(batch))),
                Grouping::TeamInGame,
            );
            totals.extend(self.aggregate(&query).await?);
        }
        Ok(totals)
    }

    /// Box scores matching the predicate with their player and team resolved,
    /// ordered by game, team, jersey number.
    pub async fn player_game_stats(
        &self,
        predicate: &Predicate,
    ) -> Result<Vec<PlayerGameStats>, StoreError> {
        self.bounded("player_game_stats", async {
            let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(
                "SELECT PlayerGameStats.StatsId AS StatsId, PlayerGameStats.GameId AS GameId, \
                 PlayerGameStats.JerseyNumber AS JerseyNumber, \
                 Players.PlayerId AS PlayerId, Players.Name AS PlayerName, \
                 Players.Position AS Position, Teams.TeamId AS TeamId, Teams.Name AS TeamName",
            );
            for column in BOX_SCORE_COLUMNS {
                qb.push(format_args!(", PlayerGameStats.{column} AS {column}"));
            }
            qb.push(" FROM ");
            qb.push(APPEARANCES);
            qb.push(
                " JOIN Players ON PlayerGameStats.PlayerId = Players.PlayerId \
                 JOIN Teams ON PlayerGameStats.TeamId = Teams.TeamId",
            );
            predicate.push_where(&mut qb);
            qb.push(
                " ORDER BY PlayerGameStats.GameId, PlayerGameStats.TeamId, \
                 PlayerGameStats.JerseyNumber, PlayerGameStats.PlayerId",
            );

            let rows = qb.build().fetch_all(&self.pool).await?;
            rows.iter()
                .map(decode_player_game_stats)
                .collect::<Result<Vec<_>, sqlx::Error>>()
        })
        .await
    }

    pub async fn player_memberships(
        &self,
        player_id: PlayerId,
    ) -> Result<Vec<Membership>, StoreError> {
        self.bounded("player_memberships", async {
            let rows = sqlx::query(
                "SELECT DISTINCT PlayerGameStats.TeamId AS TeamId, \
                 Games.CompetitionId AS CompetitionId, \
                 PlayerGameStats.JerseyNumber AS JerseyNumber \
                 FROM PlayerGameStats JOIN Games ON PlayerGameStats.GameId = Games.GameId \
                 WHERE PlayerGameStats.PlayerId = ? \
                 ORDER BY TeamId, CompetitionId, JerseyNumber",
            )
            .bind(player_id.as_i64())
            .fetch_all(&self.pool)
            .await?;

            rows.iter()
                .map(|row| -> Result<Membership, sqlx::Error> {
                    Ok(Membership {
                        team_id: TeamId::new(row.try_get("TeamId")?),
                        competition_id: CompetitionId::new(row.try_get("CompetitionId")?),
                        jersey_number: row.try_get("JerseyNumber")?,
                    })
                })
                .collect::<Result<Vec<_>, sqlx::Error>>()
        })
        .await
    }
}

fn decode_group_key(row: &SqliteRow, grouping: Grouping) -> Result<GroupKey, sqlx::Error> {
    Ok(match grouping {
        Grouping::None => GroupKey::All,
        Grouping::Player => GroupKey::Player(PlayerId::new(row.try_get("GroupKey0")?)),
        Grouping::Team => GroupKey::Team(TeamId::new(row.try_get("GroupKey0")?)),
        Grouping::TeamInGame => GroupKey::TeamInGame {
            game_id: GameId::new(row.try_get("GroupKey0")?),
            team_id: TeamId::new(row.try_get("GroupKey1")?),
        },
    })
}

fn decode_player_game_stats(row: &SqliteRow) -> Result<PlayerGameStats, sqlx::Error> {
    Ok(PlayerGameStats {
        stats_id: row.try_get("StatsId")?,
        game_id: GameId::new(row.try_get("GameId")?),
        player: Player {
            player_id: PlayerId::new(row.try_get("PlayerId")?),
            name: row.try_get("PlayerName")?,
            position: row.try_get("Position")?,
        },
        team: Team {
            team_id: TeamId::new(row.try_get("TeamId")?),
            name: row.try_get("TeamName")?,
        },
        jersey_number: row.try_get("JerseyNumber")?,
        stats: decode_box_score(row)?,
    })
}
