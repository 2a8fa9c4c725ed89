use std::fs;
use std::path::PathBuf;

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::Value;

use crate::repositories::{StateStore, StoreError};

/// Sqlite-backed state store. One table, one row per key, JSON payloads.
#[derive(Clone)]
pub struct SqliteStore {
    path: PathBuf,
}

impl SqliteStore {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let store = Self { path };
        store.init()?;
        Ok(store)
    }

    fn init(&self) -> Result<(), StoreError> {
        let conn = Connection::open(&self.path)?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS app_state (
                state_key TEXT PRIMARY KEY,
                value_json TEXT NOT NULL,
                updated_at INTEGER NOT NULL
            );",
        )?;
        Ok(())
    }
}

impl StateStore for SqliteStore {
    fn load(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let conn = Connection::open(&self.path)?;
        let raw: Option<String> = conn
            .query_row(
                "SELECT value_json FROM app_state WHERE state_key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;

        match raw {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    fn save(&self, key: &str, value: &Value) -> Result<(), StoreError> {
        let conn = Connection::open(&self.path)?;
        let json = serde_json::to_string(value)?;
        conn.execute(
            "INSERT INTO app_state (state_key, value_json, updated_at)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(state_key) DO UPDATE SET
                value_json = excluded.value_json,
                updated_at = excluded.updated_at",
            params![key, json, Utc::now().timestamp()],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let conn = Connection::open(&self.path)?;
        conn.execute("DELETE FROM app_state WHERE state_key = ?1", params![key])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn temp_store() -> (tempfile::TempDir, SqliteStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteStore::new(dir.path().join("state.db")).unwrap();
        (dir, store)
    }

    #[test]
    fn round_trips_values() {
        let (_dir, store) = temp_store();
        store
            .save("wp2.values.teen", &json!({"Integrity": 4}))
            .unwrap();
        assert_eq!(
            store.load("wp2.values.teen").unwrap(),
            Some(json!({"Integrity": 4}))
        );
    }

    #[test]
    fn save_overwrites_existing_key() {
        let (_dir, store) = temp_store();
        store.save("wp2.notes", &json!("draft")).unwrap();
        store.save("wp2.notes", &json!("final")).unwrap();
        assert_eq!(store.load("wp2.notes").unwrap(), Some(json!("final")));
    }

    #[test]
    fn remove_then_load_is_none() {
        let (_dir, store) = temp_store();
        store.save("wp2.time", &json!([1, 2, 3])).unwrap();
        store.remove("wp2.time").unwrap();
        assert_eq!(store.load("wp2.time").unwrap(), None);
    }

    #[test]
    fn state_survives_reopening_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.db");
        {
            let store = SqliteStore::new(path.clone()).unwrap();
            store.save("wp2.track", &json!("conservation")).unwrap();
        }
        let reopened = SqliteStore::new(path).unwrap();
        assert_eq!(
            reopened.load("wp2.track").unwrap(),
            Some(json!("conservation"))
        );
    }
}
