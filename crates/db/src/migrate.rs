use sqlx::SqlitePool;
use tracing::{debug, info};

const MIGRATIONS: &[(&str, &str)] = &[(
    "001_kv_store",
    include_str!("../migrations/001_kv_store.sql"),
)];

/// Apply pending forward-only migrations, each in its own transaction, and
/// record them in `_migrations`. Safe to call on every startup.
pub async fn run(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS _migrations (
            name TEXT PRIMARY KEY,
            applied_ts INTEGER NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    let applied: Vec<(String,)> = sqlx::query_as("SELECT name FROM _migrations")
        .fetch_all(pool)
        .await?;

    for (name, sql) in MIGRATIONS {
        if applied.iter().any(|(done,)| done == name) {
            debug!(migration = name, "already applied");
            continue;
        }

        info!(migration = name, "applying migration");
        let mut tx = pool.begin().await?;
        for statement in sql.split(';').map(str::trim).filter(|s| !s.is_empty()) {
            sqlx::query(statement).execute(&mut *tx).await?;
        }
        sqlx::query("INSERT INTO _migrations (name, applied_ts) VALUES (?, ?)")
            .bind(name)
            .bind(chrono::Utc::now().timestamp())
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn migrations_are_idempotent() {
        let pool = crate::connect(":memory:").await.unwrap();
        run(&pool).await.unwrap();
        run(&pool).await.unwrap();

        let applied: Vec<(String,)> = sqlx::query_as("SELECT name FROM _migrations")
            .fetch_all(&pool)
            .await
            .unwrap();
        assert_eq!(applied.len(), MIGRATIONS.len());

        sqlx::query("INSERT INTO kv_store (key, value, updated_ts) VALUES ('k', 'v', 0)")
            .execute(&pool)
            .await
            .unwrap();
    }
}
