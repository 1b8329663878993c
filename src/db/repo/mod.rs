//! Repository layer for database operations.
//!
//! This module provides the `Repository` struct for every read the engine
//! performs. Methods are organized across submodules by concern:
//! - `entities.rs` - batched entity lookups keyed by id sets
//! - `listing.rs` - count/fetch id queries and schedule lookups
//! - `stats.rs` - aggregate execution and per-appearance box scores
//!
//! Id-set lookups bind at most `ID_BATCH_SIZE` ids per round trip.
//! Every round trip is bounded by the configured query timeout and labelled
//! with the name of the operation, so failures surface as [`StoreError`].

mod entities;
mod listing;
mod stats;

pub use entities::GameRow;
pub use listing::Fixture;
pub use stats::Membership;

use crate::db::query::BOX_SCORE_COLUMNS;
use crate::db::StoreError;
use crate::domain::{BoxScore, EntityId};
use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::Row;
use std::future::Future;
use std::time::Duration;

const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(5);

/// Most ids bound into a single `IN (...)` list. Larger id sets are split
/// across round trips to stay under SQLite's bound-parameter limit.
const ID_BATCH_SIZE: usize = 500;

/// Repository for database operations.
pub struct Repository {
    pool: SqlitePool,
    query_timeout: Duration,
}

impl Repository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Repository {
            pool,
            query_timeout: DEFAULT_QUERY_TIMEOUT,
        }
    }

    pub fn with_query_timeout(mut self, query_timeout: Duration) -> Self {
        self.query_timeout = query_timeout;
        self
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Cheapest possible round trip, for readiness checks.
    pub async fn ping(&self) -> Result<(), StoreError> {
        self.bounded("ping", async {
            sqlx::query("SELECT 1").execute(&self.pool).await?;
            Ok(())
        })
        .await
    }

    /// Run one store round trip under the query deadline.
    async fn bounded<T, F>(&self, op: &'static str, fut: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        match tokio::time::timeout(self.query_timeout, fut).await {
            Err(_) | Ok(Err(sqlx::Error::PoolTimedOut)) => Err(StoreError::Timeout { op }),
            Ok(Err(source)) => Err(StoreError::Query { op, source }),
            Ok(Ok(value)) => Ok(value),
        }
    }
}

fn raw_ids<T: EntityId>(ids: &[T]) -> Vec<i64> {
    ids.iter().map(|id| id.to_i64()).collect()
}

/// Decode the sixteen counters, which every query aliases by column name.
fn decode_box_score(row: &SqliteRow) -> Result<BoxScore, sqlx::Error> {
    let mut counters = [0i64; 16];
    for (slot, column) in counters.iter_mut().zip(BOX_SCORE_COLUMNS) {
        *slot = row.try_get(column)?;
    }

    let [two_point_fga, two_point_fgm, three_point_fga, three_point_fgm, free_throws_attempted, free_throws_made, offensive_rebounds, defensive_rebounds, assists, blocks, steals, turnovers, regular_fouls_forced, regular_fouls_committed, technical_fouls_committed, minutes_played] =
        counters;

    Ok(BoxScore {
        two_point_fga,
        two_point_fgm,
        three_point_fga,
        three_point_fgm,
        free_throws_attempted,
        free_throws_made,
        offensive_rebounds,
        defensive_rebounds,
        assists,
        blocks,
        steals,
        turnovers,
        regular_fouls_forced,
        regular_fouls_committed,
        technical_fouls_committed,
        minutes_played,
    })
}
