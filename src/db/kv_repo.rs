use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};

use crate::error::TasklistError;
use crate::store::KeyValueStore;

use super::connection;

/// Key-value store backed by the `kv` table of a SQLite database.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Open the store of an initialized data directory.
    pub fn open(data_dir: &Path) -> Result<Self, TasklistError> {
        Ok(Self::new(connection::open_db(data_dir)?))
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>, TasklistError> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| row.get(0))
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), TasklistError> {
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = datetime('now')",
            params![key, value],
        )?;
        Ok(())
    }
}
