use std::fs;
use std::path::{Path, PathBuf};

use rusqlite::Connection;

use crate::error::TasklistError;

use super::migrations;

pub const DB_FILE: &str = "tasklist.db";

/// Get the path to the tasklist database inside a data directory.
pub fn db_path(data_dir: &Path) -> PathBuf {
    data_dir.join(DB_FILE)
}

/// Open a connection to the database. Returns error if not initialized.
pub fn open_db(data_dir: &Path) -> Result<Connection, TasklistError> {
    let path = db_path(data_dir);
    if !path.exists() {
        return Err(TasklistError::not_initialized());
    }
    let conn = Connection::open(&path)?;
    configure_connection(&conn)?;
    Ok(conn)
}

/// Initialize the database: create directories, database, and run migrations.
pub fn init_db(data_dir: &Path) -> Result<PathBuf, TasklistError> {
    fs::create_dir_all(data_dir).map_err(|e| TasklistError::persistence(e.to_string()))?;
    let path = db_path(data_dir);
    let conn = Connection::open(&path)?;
    configure_connection(&conn)?;
    migrations::run_migrations(&conn)?;
    Ok(path)
}

fn configure_connection(conn: &Connection) -> Result<(), TasklistError> {
    conn.execute_batch(
        "PRAGMA journal_mode=WAL;
         PRAGMA busy_timeout=5000;",
    )?;
    Ok(())
}
