//! Database module for SQLite operations.
//!
//! This module provides:
//! - Database initialization and schema setup
//! - The predicate and aggregate query composer
//! - Repository layer for batched, deadline-bounded reads

pub mod migrations;
pub mod query;
pub mod repo;

use thiserror::Error;

pub use migrations::init_db;
pub use repo::Repository;

/// A failed store round trip, labelled with the repository operation.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{op}: query exceeded its deadline")]
    Timeout { op: &'static str },
    #[error("{op}: {source}")]
    Query {
        op: &'static str,
        #[source]
        source: sqlx::Error,
    },
}
