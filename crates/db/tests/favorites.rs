use cinescope_core::types::Movie;
use cinescope_db::{FavoritesStore, KeyValueStore, SqliteKvStore, StorageError};

async fn sqlite_kv(path: &str) -> SqliteKvStore {
    let pool = cinescope_db::connect(path).await.unwrap();
    cinescope_db::migrate::run(&pool).await.unwrap();
    SqliteKvStore::new(pool)
}

#[tokio::test]
async fn favorites_survive_reopening_the_database() {
    let dir = std::env::temp_dir().join(format!("cinescope_fav_{}", std::process::id()));
    let db_path = dir.join("favorites.db");
    let db_path = db_path.to_str().unwrap();

    {
        let store = FavoritesStore::new(sqlite_kv(db_path).await);
        store.add(&Movie::new(550, "Fight Club")).await;
        store.add(&Movie::new(603, "The Matrix")).await;
    }

    let reopened = FavoritesStore::new(sqlite_kv(db_path).await);
    let ids: Vec<i64> = reopened.list().await.iter().map(|f| f.id).collect();
    assert_eq!(ids, vec![550, 603]);

    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn two_stores_on_one_key_last_writer_wins() {
    let kv = sqlite_kv(":memory:").await;
    let a = FavoritesStore::new(kv.clone());
    let b = FavoritesStore::new(kv);

    a.add(&Movie::new(1, "One")).await;
    // No cache: b sees a's write on its next read.
    assert!(b.contains(1).await);

    b.remove(1).await;
    assert!(!a.contains(1).await);
}

/// Storage that is always unreachable.
struct BrokenStorage;

#[async_trait::async_trait]
impl KeyValueStore for BrokenStorage {
    async fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Sqlx(sqlx::Error::PoolClosed))
    }

    async fn set_item(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Sqlx(sqlx::Error::PoolClosed))
    }
}

#[tokio::test]
async fn storage_failures_are_absorbed() {
    let store = FavoritesStore::new(BrokenStorage);
    let movie = Movie::new(9, "Nine");

    store.add(&movie).await;
    store.remove(9).await;
    assert!(store.list().await.is_empty());
    assert!(!store.contains(9).await);
    assert!(!store.toggle(&movie).await);
}
