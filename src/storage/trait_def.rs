use anyhow::Result;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("alias already exists")]
    AliasExists,
    #[error("url already exists")]
    UrlExists,
    #[error("url not found")]
    NotFound,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Inserts new alias → URL mappings.
#[async_trait]
pub trait UrlSaver: Send + Sync {
    /// Insert a record and return its id. The uniqueness checks on both the alias
    /// and the URL happen in the same atomic write.
    async fn save_url(&self, url: &str, alias: &str) -> StorageResult<i64>;
}

/// Resolves aliases to their stored URL.
#[async_trait]
pub trait UrlGetter: Send + Sync {
    async fn get_url(&self, alias: &str) -> StorageResult<String>;
}

/// Removes mappings by alias.
#[async_trait]
pub trait UrlDeleter: Send + Sync {
    async fn delete_url(&self, alias: &str) -> StorageResult<()>;
}

#[async_trait]
pub trait Storage: UrlSaver + UrlGetter + UrlDeleter {
    /// Initialize the storage (create tables, indexes)
    async fn init(&self) -> Result<()>;
}

/// Map a unique-constraint violation reported by the database to the matching
/// duplicate error. Postgres names the constraint; SQLite only reports the column
/// in the message (`UNIQUE constraint failed: url.alias`).
pub(crate) fn classify_insert_error(err: sqlx::Error) -> StorageError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            let alias_conflict = match db_err.constraint() {
                Some(constraint) => constraint.contains("alias"),
                None => db_err.message().contains("url.alias"),
            };
            return if alias_conflict {
                StorageError::AliasExists
            } else {
                StorageError::UrlExists
            };
        }
    }
    StorageError::Other(err.into())
}
