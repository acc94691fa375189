//! Durable, content-addressed storage for shared playground snippets.
//!
//! Provides the [`ObjectStore`] trait that all backends implement, the
//! [`InMemoryStore`] and [`SqliteStore`] backends, and the
//! [`SnippetRepository`] that fingerprints and stores [`Snippet`]s on top of
//! any of them.
//!
//! # Modules
//!
//! - [`error`]: StorageError and SnippetError
//! - [`types`]: the Snippet payload and its canonical encoding
//! - [`fingerprint`]: truncated SHA-256 identifiers
//! - [`traits`]: ObjectStore trait definition
//! - [`memory`]: InMemoryStore implementation
//! - [`schema`]: SQLite connection setup and migrations
//! - [`sqlite`]: SqliteStore implementation
//! - [`repository`]: SnippetRepository

pub mod error;
pub mod fingerprint;
pub mod memory;
pub mod repository;
pub mod schema;
pub mod sqlite;
pub mod traits;
pub mod types;

pub use error::{SnippetError, StorageError};
pub use fingerprint::Fingerprint;
pub use memory::InMemoryStore;
pub use repository::{SnippetRepository, DEFAULT_MAX_SNIPPET_SIZE};
pub use sqlite::SqliteStore;
pub use traits::ObjectStore;
pub use types::Snippet;
