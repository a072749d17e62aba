use crate::models::UrlRecord;
use crate::storage::{Storage, StorageError, StorageResult, UrlDeleter, UrlGetter, UrlSaver};
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Inner {
    next_id: i64,
    by_alias: HashMap<String, UrlRecord>,
    /// url -> alias
    by_url: HashMap<String, String>,
}

/// Process-local store. Both indexes are updated under a single write lock so
/// readers never observe a record that is present in one map but not the other.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    inner: RwLock<Inner>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.by_alias.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn init(&self) -> Result<()> {
        Ok(())
    }
}

#[async_trait]
impl UrlSaver for MemoryStorage {
    async fn save_url(&self, url: &str, alias: &str) -> StorageResult<i64> {
        let mut inner = self.inner.write().await;

        if inner.by_url.contains_key(url) {
            return Err(StorageError::UrlExists);
        }
        if inner.by_alias.contains_key(alias) {
            return Err(StorageError::AliasExists);
        }

        inner.next_id += 1;
        let record = UrlRecord {
            id: inner.next_id,
            alias: alias.to_string(),
            url: url.to_string(),
        };
        inner.by_url.insert(record.url.clone(), record.alias.clone());
        inner.by_alias.insert(record.alias.clone(), record);

        Ok(inner.next_id)
    }
}

#[async_trait]
impl UrlGetter for MemoryStorage {
    async fn get_url(&self, alias: &str) -> StorageResult<String> {
        self.inner
            .read()
            .await
            .by_alias
            .get(alias)
            .map(|record| record.url.clone())
            .ok_or(StorageError::NotFound)
    }
}

#[async_trait]
impl UrlDeleter for MemoryStorage {
    async fn delete_url(&self, alias: &str) -> StorageResult<()> {
        let mut inner = self.inner.write().await;
        let record = inner.by_alias.remove(alias).ok_or(StorageError::NotFound)?;
        inner.by_url.remove(&record.url);
        Ok(())
    }
}
