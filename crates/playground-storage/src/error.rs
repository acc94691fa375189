//! Storage error types for playground-storage.
//!
//! [`StorageError`] covers the object store backends; [`SnippetError`] is what
//! the snippet repository reports to its callers.

use thiserror::Error;

/// Errors produced by [`ObjectStore`](crate::ObjectStore) backends.
#[derive(Debug, Error)]
pub enum StorageError {
    /// SQLite returned an error.
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Applying schema migrations failed.
    #[error("migration error: {0}")]
    Migration(String),

    /// A thread panicked while holding the connection lock.
    #[error("storage connection lock poisoned")]
    LockPoisoned,
}

/// Errors produced by the snippet repository.
#[derive(Debug, Error)]
pub enum SnippetError {
    /// The canonical serialized snippet exceeds the size cap.
    #[error("snippet is {size} bytes, limit is {limit}")]
    TooLarge { size: usize, limit: usize },

    /// No snippet is stored under the given id.
    #[error("snippet not found: {0}")]
    NotFound(String),

    /// Encoding or decoding the snippet JSON failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The backing store failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}
