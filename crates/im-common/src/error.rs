use std::time::Duration;

use deadpool_postgres::PoolError;
use thiserror::Error;
use tokio_postgres::Error as PgError;

/// Failures surfaced by the matching engine and the recommendation service.
///
/// `ProfileNotFound` and `Timeout` are per-call conditions the caller can
/// distinguish from an empty (but successful) recommendation list.
#[derive(Debug, Error)]
pub enum MatchingError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("profile not found: {0}")]
    ProfileNotFound(String),
    #[error("fetch timed out after {}ms", .0.as_millis())]
    Timeout(Duration),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Failures from a profile or listing backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to get postgres connection: {0}")]
    Pool(#[from] PoolError),
    #[error("postgres error: {0}")]
    Postgres(#[from] PgError),
    #[error("failed to map row: {0}")]
    Mapping(String),
}
