use crate::storage::trait_def::classify_insert_error;
use crate::storage::{Storage, StorageError, StorageResult, UrlDeleter, UrlGetter, UrlSaver};
use anyhow::Result;
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::sync::Arc;

pub struct PostgresStorage {
    pool: Arc<PgPool>,
}

impl PostgresStorage {
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(Self {
            pool: Arc::new(pool),
        })
    }
}

#[async_trait]
impl Storage for PostgresStorage {
    async fn init(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS url (
                id BIGSERIAL PRIMARY KEY,
                alias TEXT NOT NULL,
                url TEXT NOT NULL,
                CONSTRAINT url_alias_key UNIQUE (alias),
                CONSTRAINT url_url_key UNIQUE (url)
            )
            "#,
        )
        .execute(self.pool.as_ref())
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_alias ON url(alias)")
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }
}

#[async_trait]
impl UrlSaver for PostgresStorage {
    async fn save_url(&self, url: &str, alias: &str) -> StorageResult<i64> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO url (url, alias)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(url)
        .bind(alias)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(classify_insert_error)?;

        Ok(id)
    }
}

#[async_trait]
impl UrlGetter for PostgresStorage {
    async fn get_url(&self, alias: &str) -> StorageResult<String> {
        sqlx::query_scalar::<_, String>("SELECT url FROM url WHERE alias = $1")
            .bind(alias)
            .fetch_optional(self.pool.as_ref())
            .await
            .map_err(|e| StorageError::Other(e.into()))?
            .ok_or(StorageError::NotFound)
    }
}

#[async_trait]
impl UrlDeleter for PostgresStorage {
    async fn delete_url(&self, alias: &str) -> StorageResult<()> {
        let result = sqlx::query("DELETE FROM url WHERE alias = $1")
            .bind(alias)
            .execute(self.pool.as_ref())
            .await
            .map_err(|e| StorageError::Other(e.into()))?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}
