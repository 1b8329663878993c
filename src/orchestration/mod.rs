//! Composite read operations over the repository.
//!
//! [`HeroBall`] is the single entry point the HTTP layer talks to. Each
//! operation validates its arguments before any store round trip, fans out
//! independent lookups concurrently, and assembles one response value.

pub mod assembler;
pub mod competitions;
pub mod cursor;
pub mod games;
pub mod leaders;
pub mod metadata;
pub mod players;
pub mod stats;
pub mod teams;

use std::fmt::Display;
use std::sync::Arc;

use crate::config::Config;
use crate::db::query::Predicate;
use crate::db::Repository;
use crate::domain::{EntityId, Filter, Game};
use crate::engine::{Cursor, LeaderPolicy, PageRequest};
use crate::error::AppError;

pub use assembler::Assembler;
pub use competitions::{CompetitionInfo, Standing};
pub use cursor::{paginate, CursorSource, GameListing, PlayerListing};
pub use games::GameInfo;
pub use leaders::{LeaderBoard, StatLeader};
pub use metadata::{Metadata, MetadataRequest};
pub use players::{PlayerInfo, PlayerTeam};
pub use stats::{RankedStats, StatsGrouping, StatsRequest};
pub use teams::{RosterEntry, TeamInfo};

#[derive(Clone)]
pub struct HeroBall {
    repo: Arc<Repository>,
    assembler: Assembler,
    recent_games: i64,
    leaders: LeaderPolicy,
}

impl HeroBall {
    pub fn new(repo: Arc<Repository>, config: &Config) -> Self {
        Self {
            assembler: Assembler::new(repo.clone()),
            repo,
            recent_games: config.recent_games_count,
            leaders: LeaderPolicy {
                count: config.leader_count,
                min_games_divisor: config.leader_min_games_divisor,
            },
        }
    }

    pub fn repo(&self) -> &Repository {
        &self.repo
    }

    /// First page of the most recent games matching `filter`.
    async fn recent_games(&self, filter: Filter) -> Result<Cursor<Game>, AppError> {
        let predicate = Predicate::for_games(&filter.canonicalize()?);
        let listing = GameListing::new(&self.repo, &self.assembler, predicate);
        paginate(&listing, PageRequest::first(self.recent_games)?, filter).await
    }
}

/// Reject non-positive ids before touching the store.
fn require_valid<T: EntityId + Display>(id: T, field: &str) -> Result<T, AppError> {
    if id.to_i64() <= 0 {
        return Err(AppError::InvalidArgument(format!(
            "{} must be positive, got {}",
            field, id
        )));
    }
    Ok(id)
}
