//! SQLite-backed `KeyValueStore`.

use super::adapter::KeyValueStore;
use super::pool::DbPool;
use crate::errors::{AppError, AppResult};
use async_trait::async_trait;
use chrono::Local;
use rusqlite::{OptionalExtension, params};
use serde_json::Value;
use tracing::debug;

/// Stores each value as JSON text in the `records` table.
#[derive(Clone)]
pub struct SqliteStore {
    pool: DbPool,
}

impl SqliteStore {
    pub fn open(path: &str) -> AppResult<Self> {
        Ok(Self {
            pool: DbPool::new(path)?,
        })
    }

    pub fn in_memory() -> AppResult<Self> {
        Ok(Self {
            pool: DbPool::in_memory()?,
        })
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    /// Run a blocking closure against the connection on the blocking pool.
    async fn blocking<F, T>(&self, func: F) -> AppResult<T>
    where
        F: FnOnce(&rusqlite::Connection) -> AppResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || pool.with_conn(func)).await?
    }
}

#[async_trait]
impl KeyValueStore for SqliteStore {
    async fn get(&self, key: &str) -> AppResult<Option<Value>> {
        let key = key.to_string();
        let raw: Option<String> = self
            .blocking(move |conn| {
                let mut stmt = conn.prepare_cached("SELECT value FROM records WHERE key = ?1")?;
                Ok(stmt.query_row([&key], |row| row.get(0)).optional()?)
            })
            .await?;

        raw.map(|text| serde_json::from_str(&text).map_err(AppError::from))
            .transpose()
    }

    async fn set(&self, key: &str, value: Value) -> AppResult<()> {
        let key = key.to_string();
        let text = serde_json::to_string(&value)?;
        debug!(%key, bytes = text.len(), "sqlite set");

        self.blocking(move |conn| {
            let now = Local::now().to_rfc3339();
            let mut stmt = conn.prepare_cached(
                "INSERT INTO records (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value,
                                                updated_at = excluded.updated_at",
            )?;
            stmt.execute(params![key, text, now])?;
            Ok(())
        })
        .await
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        let key = key.to_string();
        self.blocking(move |conn| {
            conn.execute("DELETE FROM records WHERE key = ?1", [&key])?;
            Ok(())
        })
        .await
    }

    async fn keys(&self) -> AppResult<Vec<String>> {
        self.blocking(|conn| {
            let mut stmt = conn.prepare_cached("SELECT key FROM records")?;
            let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

            let mut out = Vec::new();
            for r in rows {
                out.push(r?);
            }
            Ok(out)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn values_survive_a_round_trip_through_sqlite() {
        let store = SqliteStore::in_memory().unwrap();

        store
            .set("2025-02-03", json!({ "date": "2025-02-03" }))
            .await
            .unwrap();
        store
            .set("2025-02-03", json!({ "date": "2025-02-03", "internalCompanyTime": 60000 }))
            .await
            .unwrap();

        let got = store.get("2025-02-03").await.unwrap().unwrap();
        assert_eq!(got["internalCompanyTime"], json!(60000));
        assert_eq!(store.keys().await.unwrap(), vec!["2025-02-03".to_string()]);
    }

    #[tokio::test]
    async fn delete_is_idempotent_and_missing_keys_read_as_none() {
        let store = SqliteStore::in_memory().unwrap();
        assert_eq!(store.get("nope").await.unwrap(), None);

        store.set("a", json!(1)).await.unwrap();
        store.delete("a").await.unwrap();
        store.delete("a").await.unwrap();
        assert_eq!(store.get("a").await.unwrap(), None);
        assert!(store.keys().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn corrupted_payload_is_a_serialization_error() {
        let store = SqliteStore::in_memory().unwrap();
        store
            .pool()
            .with_conn(|conn| {
                conn.execute(
                    "INSERT INTO records (key, value) VALUES ('bad', 'not json')",
                    [],
                )?;
                Ok(())
            })
            .unwrap();

        let err = store.get("bad").await.unwrap_err();
        assert!(matches!(err, AppError::Serialization(_)));
    }
}
