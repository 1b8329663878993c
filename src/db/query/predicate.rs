//! Composable predicates rendered into parameterized SQL.
//!
//! A [`Predicate`] is a conjunction of [`Condition`]s. Each condition knows
//! whether it restricts anything; unrestricted conditions render nothing, so
//! an empty id list can only ever widen a query.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use sqlx::{QueryBuilder, Sqlite};

use crate::domain::CanonicalFilter;

/// Columns the composer may reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    GameId,
    GameCompetitionId,
    GameHomeTeamId,
    GameAwayTeamId,
    GameTime,
    StatsPlayerId,
    StatsTeamId,
    StatsGameId,
    PlayerId,
    TeamId,
    LocationId,
    CompetitionId,
}

impl Column {
    pub fn as_sql(self) -> &'static str {
        match self {
            Column::GameId => "Games.GameId",
            Column::GameCompetitionId => "Games.CompetitionId",
            Column::GameHomeTeamId => "Games.HomeTeamId",
            Column::GameAwayTeamId => "Games.AwayTeamId",
            Column::GameTime => "Games.GameTime",
            Column::StatsPlayerId => "PlayerGameStats.PlayerId",
            Column::StatsTeamId => "PlayerGameStats.TeamId",
            Column::StatsGameId => "PlayerGameStats.GameId",
            Column::PlayerId => "Players.PlayerId",
            Column::TeamId => "Teams.TeamId",
            Column::LocationId => "Locations.LocationId",
            Column::CompetitionId => "Competitions.CompetitionId",
        }
    }
}

/// Box score rows joined with the game they belong to.
pub const APPEARANCES: &str =
    "PlayerGameStats LEFT JOIN Games ON PlayerGameStats.GameId = Games.GameId";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    Equals(Column, i64),
    /// Member of the set; an empty set does not restrict.
    AnyOf(Column, Vec<i64>),
    /// Not a member of the set; an empty set does not restrict.
    NoneOf(Column, Vec<i64>),
    /// Disjunction; unrestricted as soon as one arm is.
    Either(Vec<Condition>),
    /// Timestamps falling on the given calendar day.
    OnDate(Column, NaiveDate),
    /// `column IN (SELECT select FROM APPEARANCES WHERE predicate)`.
    InAppearances {
        column: Column,
        select: Column,
        predicate: Predicate,
    },
}

impl Condition {
    pub fn is_unrestricted(&self) -> bool {
        match self {
            Condition::Equals(..) | Condition::OnDate(..) => false,
            Condition::AnyOf(_, ids) | Condition::NoneOf(_, ids) => ids.is_empty(),
            Condition::Either(arms) => arms.is_empty() || arms.iter().any(Condition::is_unrestricted),
            Condition::InAppearances { predicate, .. } => predicate.is_unrestricted(),
        }
    }

    fn push_sql(&self, qb: &mut QueryBuilder<'_, Sqlite>) {
        match self {
            Condition::Equals(column, value) => {
                qb.push(column.as_sql());
                qb.push(" = ");
                qb.push_bind(*value);
            }
            Condition::AnyOf(column, ids) => {
                qb.push(column.as_sql());
                qb.push(" IN ");
                push_id_list(qb, ids);
            }
            Condition::NoneOf(column, ids) => {
                qb.push(column.as_sql());
                qb.push(" NOT IN ");
                push_id_list(qb, ids);
            }
            Condition::Either(arms) => {
                qb.push("(");
                for (i, arm) in arms.iter().enumerate() {
                    if i > 0 {
                        qb.push(" OR ");
                    }
                    arm.push_sql(qb);
                }
                qb.push(")");
            }
            Condition::OnDate(column, date) => {
                let start = NaiveDateTime::new(*date, NaiveTime::MIN);
                qb.push(column.as_sql());
                qb.push(" >= ");
                qb.push_bind(start);
                if let Some(next) = date.succ_opt() {
                    qb.push(" AND ");
                    qb.push(column.as_sql());
                    qb.push(" < ");
                    qb.push_bind(NaiveDateTime::new(next, NaiveTime::MIN));
                }
            }
            Condition::InAppearances {
                column,
                select,
                predicate,
            } => {
                qb.push(column.as_sql());
                qb.push(" IN (SELECT ");
                qb.push(select.as_sql());
                qb.push(" FROM ");
                qb.push(APPEARANCES);
                predicate.push_where(qb);
                qb.push(")");
            }
        }
    }
}

fn push_id_list(qb: &mut QueryBuilder<'_, Sqlite>, ids: &[i64]) {
    qb.push("(");
    let mut separated = qb.separated(", ");
    for id in ids {
        separated.push_bind(*id);
    }
    separated.push_unseparated(")");
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Predicate {
    conditions: Vec<Condition>,
}

impl Predicate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn and(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Conjunction of both predicates.
    pub fn merge(mut self, other: Predicate) -> Self {
        self.conditions.extend(other.conditions);
        self
    }

    pub fn is_unrestricted(&self) -> bool {
        self.conditions.iter().all(Condition::is_unrestricted)
    }

    /// Append ` WHERE ...`, or nothing when no condition restricts.
    pub fn push_where(&self, qb: &mut QueryBuilder<'_, Sqlite>) {
        let mut first = true;
        for condition in self.conditions.iter().filter(|c| !c.is_unrestricted()) {
            qb.push(if first { " WHERE " } else { " AND " });
            condition.push_sql(qb);
            first = false;
        }
    }

    /// Games matching the filter.
    pub fn for_games(filter: &CanonicalFilter) -> Self {
        let teams = filter.teams.raw_ids();
        let mut predicate = Predicate::new()
            .and(Condition::AnyOf(
                Column::GameCompetitionId,
                filter.competitions.raw_ids(),
            ))
            .and(Condition::Either(vec![
                Condition::AnyOf(Column::GameHomeTeamId, teams.clone()),
                Condition::AnyOf(Column::GameAwayTeamId, teams),
            ]))
            .and(Condition::InAppearances {
                column: Column::GameId,
                select: Column::StatsGameId,
                predicate: Predicate::new().and(Condition::AnyOf(
                    Column::StatsPlayerId,
                    filter.players.raw_ids(),
                )),
            });
        if let Some(date) = filter.date {
            predicate = predicate.and(Condition::OnDate(Column::GameTime, date));
        }
        predicate
    }

    /// Players matching the filter. Team, competition and date constrain a
    /// single appearance together: "played for team T in competition C".
    pub fn for_players(filter: &CanonicalFilter) -> Self {
        let mut appearance = Predicate::new()
            .and(Condition::AnyOf(Column::StatsTeamId, filter.teams.raw_ids()))
            .and(Condition::AnyOf(
                Column::GameCompetitionId,
                filter.competitions.raw_ids(),
            ));
        if let Some(date) = filter.date {
            appearance = appearance.and(Condition::OnDate(Column::GameTime, date));
        }

        Predicate::new()
            .and(Condition::AnyOf(Column::PlayerId, filter.players.raw_ids()))
            .and(Condition::InAppearances {
                column: Column::PlayerId,
                select: Column::StatsPlayerId,
                predicate: appearance,
            })
    }

    /// Box score rows matching the filter.
    pub fn for_appearances(filter: &CanonicalFilter) -> Self {
        let mut predicate = Predicate::new()
            .and(Condition::AnyOf(Column::StatsPlayerId, filter.players.raw_ids()))
            .and(Condition::AnyOf(Column::StatsTeamId, filter.teams.raw_ids()))
            .and(Condition::AnyOf(
                Column::GameCompetitionId,
                filter.competitions.raw_ids(),
            ));
        if let Some(date) = filter.date {
            predicate = predicate.and(Condition::OnDate(Column::GameTime, date));
        }
        predicate
    }

    /// Box score rows outside every id listed in the filter. Dates are not
    /// an exclusion dimension.
    pub fn excluding_appearances(filter: &CanonicalFilter) -> Self {
        Predicate::new()
            .and(Condition::NoneOf(Column::StatsPlayerId, filter.players.raw_ids()))
            .and(Condition::NoneOf(Column::StatsTeamId, filter.teams.raw_ids()))
            .and(Condition::NoneOf(
                Column::GameCompetitionId,
                filter.competitions.raw_ids(),
            ))
    }
}
