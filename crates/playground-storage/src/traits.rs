//! The [`ObjectStore`] trait: the durable key/value contract behind snippets.
//!
//! Keys are path-like strings (`shared/<id>`) and values are opaque bytes
//! stored verbatim. There are no cross-key operations, so backends need no
//! transactions beyond single-key atomicity.
//!
//! All backends ([`InMemoryStore`](crate::InMemoryStore),
//! [`SqliteStore`](crate::SqliteStore)) implement this trait and are
//! swappable behind `Arc<dyn ObjectStore>`.

use crate::error::StorageError;

/// A shared, durable byte store addressed by key.
///
/// Methods take `&self`: implementations handle their own interior locking so
/// one store can serve concurrent requests.
pub trait ObjectStore: Send + Sync {
    /// Stores `body` under `key` unless an object is already stored there.
    ///
    /// Objects are immutable: the first write under a key wins and later
    /// writes are silently ignored.
    fn put_object(&self, key: &str, body: &[u8]) -> Result<(), StorageError>;

    /// Returns the bytes stored under `key`, or `None` if absent.
    fn get_object(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;
}
