//! SQLite key-value store
//!
//! Implements the `KeyValueStore` port over the single `kv_slots` table.
//! Values are stored as serialized JSON text.

use std::sync::Arc;

use application::{error::ApplicationError, ports::KeyValueStore};
use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{OptionalExtension, params};
use serde_json::Value;
use tokio::task;
use tracing::{debug, instrument};

use super::connection::ConnectionPool;

/// SQLite-backed key-value store
#[derive(Debug, Clone)]
pub struct SqliteKeyValueStore {
    pool: Arc<ConnectionPool>,
}

impl SqliteKeyValueStore {
    /// Create a store over an initialized pool
    pub const fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl KeyValueStore for SqliteKeyValueStore {
    #[instrument(skip(self))]
    async fn get(&self, key: &str) -> Result<Option<Value>, ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let key = key.to_string();

        task::spawn_blocking(move || {
            let conn = pool
                .get()
                .map_err(|e| ApplicationError::Persistence(e.to_string()))?;

            let raw: Option<String> = conn
                .query_row(
                    "SELECT value FROM kv_slots WHERE key = ?1",
                    [&key],
                    |row| row.get(0),
                )
                .optional()
                .map_err(|e| ApplicationError::Persistence(e.to_string()))?;

            debug!(found = raw.is_some(), "Read key-value slot");
            raw.map(|text| {
                serde_json::from_str(&text)
                    .map_err(|e| ApplicationError::Persistence(format!("corrupt slot {key}: {e}")))
            })
            .transpose()
        })
        .await
        .map_err(|e| ApplicationError::Internal(e.to_string()))?
    }

    #[instrument(skip(self, value))]
    async fn set(&self, key: &str, value: Value) -> Result<(), ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let key = key.to_string();
        let text = value.to_string();
        let now = Utc::now().to_rfc3339();

        task::spawn_blocking(move || {
            let conn = pool
                .get()
                .map_err(|e| ApplicationError::Persistence(e.to_string()))?;

            conn.execute(
                "INSERT INTO kv_slots (key, value, updated_at)
                 VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET
                     value = excluded.value,
                     updated_at = excluded.updated_at",
                params![key, text, now],
            )
            .map_err(|e| ApplicationError::Persistence(e.to_string()))?;

            debug!("Wrote key-value slot");
            Ok(())
        })
        .await
        .map_err(|e| ApplicationError::Internal(e.to_string()))?
    }

    #[instrument(skip(self))]
    async fn remove(&self, key: &str) -> Result<bool, ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let key = key.to_string();

        task::spawn_blocking(move || {
            let conn = pool
                .get()
                .map_err(|e| ApplicationError::Persistence(e.to_string()))?;

            let affected = conn
                .execute("DELETE FROM kv_slots WHERE key = ?1", [&key])
                .map_err(|e| ApplicationError::Persistence(e.to_string()))?;

            Ok(affected > 0)
        })
        .await
        .map_err(|e| ApplicationError::Internal(e.to_string()))?
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{config::DatabaseConfig, persistence::connection::create_pool};

    fn store() -> SqliteKeyValueStore {
        let config = DatabaseConfig {
            path: ":memory:".to_string(),
            max_connections: 1,
        };
        SqliteKeyValueStore::new(Arc::new(create_pool(&config).unwrap()))
    }

    #[tokio::test]
    async fn missing_key_reads_as_none() {
        let store = store();
        assert!(store.get("absent").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn set_then_get_round_trips() {
        let store = store();
        let value = json!({"applicants": [1, 2, 3]});
        store.set("lekgotla-applicants", value.clone()).await.unwrap();
        assert_eq!(store.get("lekgotla-applicants").await.unwrap(), Some(value));
    }

    #[tokio::test]
    async fn set_replaces_the_previous_value() {
        let store = store();
        store.set("slot", json!("first")).await.unwrap();
        store.set("slot", json!("second")).await.unwrap();
        assert_eq!(store.get("slot").await.unwrap(), Some(json!("second")));
    }

    #[tokio::test]
    async fn slots_are_independent() {
        let store = store();
        store.set("logo", json!("data:image/png;base64,YQ==")).await.unwrap();
        store.set("admin", json!({"username": "admin"})).await.unwrap();

        assert_eq!(
            store.get("logo").await.unwrap(),
            Some(json!("data:image/png;base64,YQ=="))
        );
        assert_eq!(
            store.get("admin").await.unwrap(),
            Some(json!({"username": "admin"}))
        );
    }

    #[tokio::test]
    async fn remove_reports_whether_the_key_existed() {
        let store = store();
        store.set("slot", json!(1)).await.unwrap();
        assert!(store.remove("slot").await.unwrap());
        assert!(!store.remove("slot").await.unwrap());
        assert!(store.get("slot").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn survives_reopening_a_file_backed_store() {
        let dir = tempfile::tempdir().unwrap();
        let config = DatabaseConfig {
            path: dir.path().join("portal.db").to_string_lossy().into_owned(),
            max_connections: 1,
        };

        {
            let store = SqliteKeyValueStore::new(Arc::new(create_pool(&config).unwrap()));
            store.set("slot", json!("persisted")).await.unwrap();
        }

        let reopened = SqliteKeyValueStore::new(Arc::new(create_pool(&config).unwrap()));
        assert_eq!(reopened.get("slot").await.unwrap(), Some(json!("persisted")));
    }
}
