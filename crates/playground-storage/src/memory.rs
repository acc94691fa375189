//! In-memory implementation of [`ObjectStore`].
//!
//! [`InMemoryStore`] is a first-class backend for tests and throwaway servers.
//! It keeps objects in a [`DashMap`] with the same semantics as the SQLite
//! backend.

use dashmap::DashMap;

use crate::error::StorageError;
use crate::traits::ObjectStore;

/// Object store that lives only as long as the process.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    objects: DashMap<String, Vec<u8>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl ObjectStore for InMemoryStore {
    fn put_object(&self, key: &str, body: &[u8]) -> Result<(), StorageError> {
        self.objects
            .entry(key.to_string())
            .or_insert_with(|| body.to_vec());
        Ok(())
    }

    fn get_object(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.objects.get(key).map(|entry| entry.value().clone()))
    }
}
