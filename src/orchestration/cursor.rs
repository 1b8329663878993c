//! Two-phase cursor pagination: count, then fetch a bounded id page, then
//! resolve the page into entities.

use async_trait::async_trait;
use tracing::{debug, error};

use crate::db::query::Predicate;
use crate::db::Repository;
use crate::domain::{EntityId, Filter, Game, GameId, Player, PlayerId};
use crate::engine::{next_offset, Cursor, PagePlan, PageRequest};
use crate::error::AppError;
use crate::orchestration::assembler::Assembler;

/// A filtered listing that can be counted and paged by id.
#[async_trait]
pub trait CursorSource: Send + Sync {
    type Id: EntityId;
    type Item: Send;

    fn name(&self) -> &'static str;

    async fn count(&self) -> Result<i64, AppError>;

    async fn fetch_ids(&self, limit: i64, offset: i64) -> Result<Vec<Self::Id>, AppError>;

    async fn resolve(&self, ids: &[Self::Id]) -> Result<Vec<Self::Item>, AppError>;
}

pub async fn paginate<S: CursorSource>(
    source: &S,
    page: PageRequest,
    filter: Filter,
) -> Result<Cursor<S::Item>, AppError> {
    let total = source.count().await?;
    let (offset, limit) = match page.plan(total)? {
        PagePlan::Exhausted { next_offset } => {
            return Ok(Cursor::exhausted(total, next_offset, filter));
        }
        PagePlan::Fetch { offset, limit } => (offset, limit),
    };

    let ids = source.fetch_ids(limit, offset).await?;
    if ids.is_empty() {
        error!(
            listing = source.name(),
            total, offset, "Count and fetch disagree: no rows before total"
        );
        return Err(AppError::Internal(format!(
            "{}: counted {} rows but fetched none at offset {}",
            source.name(),
            total,
            offset
        )));
    }

    let items = source.resolve(&ids).await?;
    let next_offset = next_offset(offset, ids.len(), total);
    debug!(listing = source.name(), total, offset, next_offset, "Cursor page assembled");

    Ok(Cursor {
        total,
        items,
        next_offset,
        filter,
    })
}

pub struct GameListing<'a> {
    repo: &'a Repository,
    assembler: &'a Assembler,
    predicate: Predicate,
}

impl<'a> GameListing<'a> {
    pub fn new(repo: &'a Repository, assembler: &'a Assembler, predicate: Predicate) -> Self {
        Self {
            repo,
            assembler,
            predicate,
        }
    }
}

#[async_trait]
impl<'a> CursorSource for GameListing<'a> {
    type Id = GameId;
    type Item = Game;

    fn name(&self) -> &'static str {
        "games"
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.repo.count_games(&self.predicate).await?)
    }

    async fn fetch_ids(&self, limit: i64, offset: i64) -> Result<Vec<GameId>, AppError> {
        Ok(self.repo.game_ids(&self.predicate, limit, offset).await?)
    }

    async fn resolve(&self, ids: &[GameId]) -> Result<Vec<Game>, AppError> {
        self.assembler.games(ids).await
    }
}

pub struct PlayerListing<'a> {
    repo: &'a Repository,
    assembler: &'a Assembler,
    predicate: Predicate,
}

impl<'a> PlayerListing<'a> {
    pub fn new(repo: &'a Repository, assembler: &'a Assembler, predicate: Predicate) -> Self {
        Self {
            repo,
            assembler,
            predicate,
        }
    }
}

#[async_trait]
impl<'a> CursorSource for PlayerListing<'a> {
    type Id = PlayerId;
    type Item = Player;

    fn name(&self) -> &'static str {
        "players"
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.repo.count_players(&self.predicate).await?)
    }

    async fn fetch_ids(&self, limit: i64, offset: i64) -> Result<Vec<PlayerId>, AppError> {
        Ok(self.repo.player_ids(&self.predicate, limit, offset).await?)
    }

    async fn resolve(&self, ids: &[PlayerId]) -> Result<Vec<Player>, AppError> {
        self.assembler.players(ids).await
    }
}
