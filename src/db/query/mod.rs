//! Query composition: filters become predicates, predicates feed aggregate
//! and listing queries. Nothing here touches the pool.

pub mod aggregate;
pub mod predicate;

pub use aggregate::{AggregateQuery, Grouping, Ranking, BOX_SCORE_COLUMNS};
pub use predicate::{Column, Condition, Predicate, APPEARANCES};
