pub mod api;
pub mod config;
pub mod db;
pub mod domain;
pub mod engine;
pub mod error;
pub mod orchestration;

pub use config::Config;
pub use db::{init_db, Repository, StoreError};
pub use domain::{
    AggregateStats, BoxScore, Competition, CompetitionId, Filter, Game, GameId, GameResult,
    Player, PlayerId, Team, TeamId,
};
pub use error::AppError;
pub use orchestration::HeroBall;
