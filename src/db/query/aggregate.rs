//! "Sum box scores, group by key, having, order by, limit/offset" queries.

use sqlx::{QueryBuilder, Sqlite};

use super::predicate::{Column, Predicate, APPEARANCES};

/// Stored box score columns, in `BoxScore` field order.
pub const BOX_SCORE_COLUMNS: [&str; 16] = [
    "TwoPointFGA",
    "TwoPointFGM",
    "ThreePointFGA",
    "ThreePointFGM",
    "FreeThrowsAttempted",
    "FreeThrowsMade",
    "OffensiveRebounds",
    "DefensiveRebounds",
    "Assists",
    "Blocks",
    "Steals",
    "Turnovers",
    "RegularFoulsForced",
    "RegularFoulsCommitted",
    "TechnicalFoulsCommitted",
    "MinutesPlayed",
];

const GAME_COUNT: &str = "COUNT(DISTINCT PlayerGameStats.GameId)";

const POINTS: &str = "(3 * SUM(PlayerGameStats.ThreePointFGM) \
     + 2 * SUM(PlayerGameStats.TwoPointFGM) \
     + SUM(PlayerGameStats.FreeThrowsMade))";

/// What each aggregate row is keyed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grouping {
    /// One row over every matching appearance.
    None,
    Player,
    Team,
    TeamInGame,
}

impl Grouping {
    pub fn key_columns(self) -> &'static [Column] {
        match self {
            Grouping::None => &[],
            Grouping::Player => &[Column::StatsPlayerId],
            Grouping::Team => &[Column::StatsTeamId],
            Grouping::TeamInGame => &[Column::StatsGameId, Column::StatsTeamId],
        }
    }
}

/// Ordering expression for ranked aggregates, always descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ranking {
    Points,
    PointsPerGame,
}

impl Ranking {
    fn as_sql(self) -> String {
        match self {
            Ranking::Points => POINTS.to_string(),
            Ranking::PointsPerGame => format!("({} * 1.0 / {})", POINTS, GAME_COUNT),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateQuery {
    predicate: Predicate,
    grouping: Grouping,
    min_games: Option<i64>,
    ranking: Option<Ranking>,
    window: Option<(i64, i64)>,
}

impl AggregateQuery {
    pub fn new(predicate: Predicate, grouping: Grouping) -> Self {
        AggregateQuery {
            predicate,
            grouping,
            min_games: None,
            ranking: None,
            window: None,
        }
    }

    /// Keep only groups with at least `games` distinct games. Ignored for
    /// [`Grouping::None`], which always yields its single row.
    pub fn min_games(mut self, games: i64) -> Self {
        self.min_games = Some(games);
        self
    }

    pub fn ranked_by(mut self, ranking: Ranking) -> Self {
        self.ranking = Some(ranking);
        self
    }

    pub fn window(mut self, limit: i64, offset: i64) -> Self {
        self.window = Some((limit, offset));
        self
    }

    pub fn grouping(&self) -> Grouping {
        self.grouping
    }

    /// Render the query. Key columns are aliased `GroupKey0..`, the game count
    /// `GameCount`, and every counter by its stored column name.
    pub fn build(&self) -> QueryBuilder<'static, Sqlite> {
        let keys = self.grouping.key_columns();
        let mut qb = QueryBuilder::new("SELECT ");

        for (i, column) in keys.iter().enumerate() {
            qb.push(format_args!("{} AS GroupKey{}, ", column.as_sql(), i));
        }
        qb.push(GAME_COUNT);
        qb.push(" AS GameCount");
        for column in BOX_SCORE_COLUMNS {
            qb.push(format_args!(
                ", COALESCE(SUM(PlayerGameStats.{column}), 0) AS {column}"
            ));
        }

        qb.push(" FROM ");
        qb.push(APPEARANCES);
        self.predicate.push_where(&mut qb);

        if !keys.is_empty() {
            qb.push(" GROUP BY ");
            qb.push(key_list(keys));

            if let Some(min_games) = self.min_games {
                qb.push(" HAVING ");
                qb.push(GAME_COUNT);
                qb.push(" >= ");
                qb.push_bind(min_games);
            }

            qb.push(" ORDER BY ");
            if let Some(ranking) = self.ranking {
                qb.push(ranking.as_sql());
                qb.push(" DESC, ");
            }
            qb.push(key_list(keys));
        }

        if let Some((limit, offset)) = self.window {
            qb.push(" LIMIT ");
            qb.push_bind(limit);
            qb.push(" OFFSET ");
            qb.push_bind(offset);
        }

        qb
    }
}

fn key_list(keys: &[Column]) -> String {
    keys.iter()
        .map(|c| c.as_sql())
        .collect::<Vec<_>>()
        .join(", ")
}
