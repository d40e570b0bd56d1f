use std::collections::HashMap;
use std::sync::Arc;

use sqlx::SqlitePool;
use tokio::sync::RwLock;

use crate::StorageError;

/// String key/value storage, read and written one whole value at a time.
#[async_trait::async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key`.
    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// `kv_store` table backed storage. Survives restarts.
#[derive(Clone)]
pub struct SqliteKvStore {
    pool: SqlitePool,
}

impl SqliteKvStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl KeyValueStore for SqliteKvStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let row: Option<(String,)> = sqlx::query_as("SELECT value FROM kv_store WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|(v,)| v))
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let now = chrono::Utc::now().timestamp();
        sqlx::query(
            "INSERT INTO kv_store (key, value, updated_ts) VALUES (?, ?, ?) \
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_ts = excluded.updated_ts",
        )
        .bind(key)
        .bind(value)
        .bind(now)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

/// In-process storage for tests and throwaway sessions.
#[derive(Clone, Default)]
pub struct MemoryKvStore {
    items: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl KeyValueStore for MemoryKvStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.read().await.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn sqlite_store() -> SqliteKvStore {
        let pool = crate::connect(":memory:").await.unwrap();
        crate::migrate::run(&pool).await.unwrap();
        SqliteKvStore::new(pool)
    }

    #[tokio::test]
    async fn sqlite_set_get_overwrite() {
        let store = sqlite_store().await;
        assert_eq!(store.get_item("k").await.unwrap(), None);

        store.set_item("k", "one").await.unwrap();
        store.set_item("k", "two").await.unwrap();
        assert_eq!(store.get_item("k").await.unwrap().as_deref(), Some("two"));
        assert_eq!(store.get_item("other").await.unwrap(), None);
    }

    #[tokio::test]
    async fn memory_clones_share_items() {
        let a = MemoryKvStore::new();
        let b = a.clone();
        a.set_item("k", "v").await.unwrap();
        assert_eq!(b.get_item("k").await.unwrap().as_deref(), Some("v"));
    }
}
