//! Pure computation over values already read from the store.

pub mod leaders;
pub mod pagination;
pub mod results;
pub mod standings;

pub use leaders::{
    competition_rounds, leaders_by_category, rank, CategoryLeaders, Leader, LeaderPolicy,
    StatCategory,
};
pub use pagination::{next_offset, Cursor, PageError, PagePlan, PageRequest};
pub use results::ResultIndex;
pub use standings::{StandingRecord, StandingsTable};
