//! SQLite implementation of [`ObjectStore`].
//!
//! [`SqliteStore`] keeps every object as one row of the `objects` table. Writes
//! use `INSERT OR IGNORE`, so storing the same key twice leaves the first row,
//! including its `created_at`, untouched. The connection sits behind a mutex because
//! `rusqlite::Connection` is `Send` but not `Sync`.

use std::sync::{Mutex, MutexGuard};

use rusqlite::{params, Connection, OptionalExtension};

use crate::error::StorageError;
use crate::schema;
use crate::traits::ObjectStore;

/// Durable object store backed by a SQLite file.
#[derive(Debug)]
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Opens (or creates) the database at `path`.
    pub fn new(path: &str) -> Result<Self, StorageError> {
        Ok(SqliteStore {
            conn: Mutex::new(schema::open_database(path)?),
        })
    }

    /// Opens a private in-memory database.
    pub fn in_memory() -> Result<Self, StorageError> {
        Ok(SqliteStore {
            conn: Mutex::new(schema::open_in_memory()?),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, StorageError> {
        self.conn.lock().map_err(|_| StorageError::LockPoisoned)
    }
}

impl ObjectStore for SqliteStore {
    fn put_object(&self, key: &str, body: &[u8]) -> Result<(), StorageError> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT OR IGNORE INTO objects (key, body, size) VALUES (?1, ?2, ?3)",
            params![key, body, body.len() as i64],
        )?;
        Ok(())
    }

    fn get_object(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let conn = self.conn()?;
        let body = conn
            .query_row(
                "SELECT body FROM objects WHERE key = ?1",
                params![key],
                |row| row.get::<_, Vec<u8>>(0),
            )
            .optional()?;
        Ok(body)
    }
}
