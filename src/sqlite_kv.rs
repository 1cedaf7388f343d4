// SQLite-backed substrate: a single key/value table

use crate::kv::{KvBackend, validate_key};
use chrono::Utc;
use eyre::{Context, Result};
use rusqlite::{Connection, OptionalExtension};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

const DB_FILE: &str = "focuslist.db";

/// Key-value substrate stored in `focuslist.db` under a directory
pub struct SqliteKv {
    db: Connection,
}

impl SqliteKv {
    /// Open or create the database inside `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let base_path = path.as_ref();

        // Create directory if it doesn't exist
        fs::create_dir_all(base_path).context("Failed to create data directory")?;

        let db_path = base_path.join(DB_FILE);
        let db = Connection::open(&db_path).context("Failed to open SQLite database")?;

        let store = Self { db };
        store.create_schema()?;

        info!(db = %db_path.display(), "Opened SQLite store");
        Ok(store)
    }

    fn create_schema(&self) -> Result<()> {
        debug!("Creating database schema");

        self.db.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at INTEGER NOT NULL
            );
            "#,
        )?;

        Ok(())
    }
}

impl KvBackend for SqliteKv {
    fn get(&self, key: &str) -> Result<Option<String>> {
        validate_key(key)?;

        let value = self
            .db
            .query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| row.get(0))
            .optional()
            .context("Failed to query stored value")?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        validate_key(key)?;

        self.db
            .execute(
                "INSERT OR REPLACE INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)",
                rusqlite::params![key, value, Utc::now().timestamp_millis()],
            )
            .context("Failed to store value")?;

        debug!(key, bytes = value.len(), "Stored value");
        Ok(())
    }
}
