//! Repository Module
//!
//! Free async functions over the SQLite pool, one module per table family.
//! Single-statement helpers are generic over [`sqlx::Executor`] so they run
//! against the pool or inside a transaction; multi-statement helpers take
//! `&mut SqliteConnection` and expect the caller to own the transaction.

pub mod attribute;
pub mod binding;
pub mod group;
pub mod media;
pub mod product;
pub mod stock;
pub mod variant;

use thiserror::Error;

/// SQLite caps bound parameters per statement; stay well below it
pub const MAX_BIND_PARAMS: usize = 900;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => RepoError::NotFound("row not found".into()),
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                RepoError::Duplicate(db.message().to_string())
            }
            sqlx::Error::Database(ref db) if db.is_check_violation() => {
                RepoError::Validation(db.message().to_string())
            }
            other => RepoError::Database(other.to_string()),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// `?, ?, ?` for a dynamic `IN (...)` list
pub(crate) fn placeholders(n: usize) -> String {
    vec!["?"; n].join(", ")
}

#[cfg(test)]
pub(crate) mod testing {
    use sqlx::SqlitePool;

    pub async fn test_pool() -> SqlitePool {
        crate::db::DbService::in_memory().await.unwrap().pool
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholders() {
        assert_eq!(placeholders(1), "?");
        assert_eq!(placeholders(3), "?, ?, ?");
    }
}
