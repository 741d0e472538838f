//! SQLite-backed keyed document store.

use crate::error::{FallbackError, FallbackResult};
use chrono::Utc;
use inteca_types::ResourceKind;
use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Fixed application prefix for the local key space, so the store can share
/// a database file with other client-side state without collisions.
const APP_NAMESPACE: &str = "inteca";

/// Durable keyed document store backed by SQLite.
///
/// Each row holds one JSON document under (kind, key). Kinds mirror the
/// remote tables; keys mirror the remote locale/id key space.
pub struct FallbackStore {
    conn: Arc<Mutex<Connection>>,
}

impl FallbackStore {
    /// Opens (or creates) a fallback store at the given path.
    pub fn open(path: impl AsRef<Path>) -> FallbackResult<Self> {
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Opens an in-memory fallback store (for testing).
    pub fn open_in_memory() -> FallbackResult<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> FallbackResult<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS fallback_documents (
                kind TEXT NOT NULL,
                doc_key TEXT NOT NULL,
                data TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                PRIMARY KEY (kind, doc_key)
            );
            ",
        )?;
        Ok(())
    }

    fn namespaced(kind: ResourceKind) -> String {
        format!("{APP_NAMESPACE}:{kind}")
    }

    /// Writes (or overwrites) the document under (kind, key).
    pub fn put<T: Serialize>(
        &self,
        kind: ResourceKind,
        key: &str,
        value: &T,
    ) -> FallbackResult<()> {
        let data = serde_json::to_string(value)?;
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO fallback_documents (kind, doc_key, data, updated_at)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT (kind, doc_key) DO UPDATE SET data = ?3, updated_at = ?4",
            params![
                Self::namespaced(kind),
                key,
                data,
                Utc::now().to_rfc3339()
            ],
        )?;
        Ok(())
    }

    /// Reads the document under (kind, key), if present.
    pub fn get<T: DeserializeOwned>(
        &self,
        kind: ResourceKind,
        key: &str,
    ) -> FallbackResult<Option<T>> {
        let conn = self.conn.lock().unwrap();
        let data: Option<String> = conn
            .query_row(
                "SELECT data FROM fallback_documents WHERE kind = ?1 AND doc_key = ?2",
                params![Self::namespaced(kind), key],
                |row| row.get(0),
            )
            .optional()?;
        match data {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    /// Removes the document under (kind, key). Returns whether a row existed.
    pub fn remove(&self, kind: ResourceKind, key: &str) -> FallbackResult<bool> {
        let conn = self.conn.lock().unwrap();
        let changed = conn.execute(
            "DELETE FROM fallback_documents WHERE kind = ?1 AND doc_key = ?2",
            params![Self::namespaced(kind), key],
        )?;
        Ok(changed > 0)
    }

    /// Number of documents stored under a kind.
    pub fn count(&self, kind: ResourceKind) -> FallbackResult<usize> {
        let conn = self.conn.lock().unwrap();
        let n: i64 = conn.query_row(
            "SELECT COUNT(*) FROM fallback_documents WHERE kind = ?1",
            params![Self::namespaced(kind)],
            |row| row.get(0),
        )?;
        Ok(n as usize)
    }
}
