//! Application state shared by all handlers.
//!
//! Neither field holds per-request mutable state: the controller is pure
//! configuration, and the repository's only shared resource is its object
//! store, which does its own locking. Handlers therefore take no locks.

use std::sync::Arc;

use playground_sandbox::{ExecutionController, ExecutorConfig};
use playground_storage::{InMemoryStore, SnippetRepository, SqliteStore, StorageError};

use crate::config::ServerConfig;

/// Shared application state for the HTTP server.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Runs submitted source through the toolchain.
    pub controller: Arc<ExecutionController>,
    /// Content-addressed snippet store.
    pub snippets: SnippetRepository,
}

impl AppState {
    /// Creates state backed by the SQLite database named in `config`.
    pub fn new(config: &ServerConfig) -> Result<Self, StorageError> {
        let store = SqliteStore::new(&config.db_path)?;
        Ok(Self::from_parts(
            ExecutionController::new(config.executor.clone()),
            SnippetRepository::new(Arc::new(store)),
        ))
    }

    /// Creates state with an in-memory snippet store (for testing).
    pub fn in_memory(executor: ExecutorConfig) -> Self {
        Self::from_parts(
            ExecutionController::new(executor),
            SnippetRepository::new(Arc::new(InMemoryStore::new())),
        )
    }

    pub fn from_parts(controller: ExecutionController, snippets: SnippetRepository) -> Self {
        AppState {
            controller: Arc::new(controller),
            snippets,
        }
    }
}
