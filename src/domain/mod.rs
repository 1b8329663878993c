//! Domain types for the league statistics engine.
//!
//! This module provides:
//! - Typed entity ids
//! - Read-side entity projections (leagues, competitions, teams, games, players)
//! - Box scores and aggregate stats with the points formula
//! - The filter model and its canonical form

pub mod entities;
pub mod filter;
pub mod primitives;
pub mod stats;

pub use entities::{Competition, Game, GameResult, League, Location, Player, PlayerProfile, Team};
pub use filter::{CanonicalFilter, Filter, FilterError, IdSet};
pub use primitives::{CompetitionId, EntityId, GameId, LeagueId, LocationId, PlayerId, TeamId};
pub use stats::{AggregateStats, BoxScore, GroupKey, PlayerGameStats};
