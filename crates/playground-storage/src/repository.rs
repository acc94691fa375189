//! Content-addressed snippet storage.
//!
//! [`SnippetRepository`] fingerprints the canonical bytes of a [`Snippet`] and
//! stores them under `shared/<fingerprint>`. Because the key is derived from
//! the content, repeated or concurrent shares of the same snippet write the
//! same bytes to the same key and need no coordination.

use std::sync::Arc;

use crate::error::SnippetError;
use crate::fingerprint::Fingerprint;
use crate::traits::ObjectStore;
use crate::types::Snippet;

/// Largest canonical snippet accepted by [`SnippetRepository::put`].
pub const DEFAULT_MAX_SNIPPET_SIZE: usize = 512 * 1024;

/// Stores and retrieves immutable snippets by fingerprint.
#[derive(Clone)]
pub struct SnippetRepository {
    store: Arc<dyn ObjectStore>,
    max_size: usize,
}

impl SnippetRepository {
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        SnippetRepository {
            store,
            max_size: DEFAULT_MAX_SNIPPET_SIZE,
        }
    }

    pub fn with_max_size(mut self, max_size: usize) -> Self {
        self.max_size = max_size;
        self
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Stores `snippet` and returns its fingerprint.
    ///
    /// Idempotent: the same snippet always yields the same id.
    pub fn put(&self, snippet: &Snippet) -> Result<Fingerprint, SnippetError> {
        let bytes = snippet.to_canonical_bytes()?;
        if bytes.len() > self.max_size {
            return Err(SnippetError::TooLarge {
                size: bytes.len(),
                limit: self.max_size,
            });
        }

        let id = Fingerprint::of(&bytes);
        self.store.put_object(&id.storage_key(), &bytes)?;
        tracing::debug!(id = %id, size = bytes.len(), "stored snippet");
        Ok(id)
    }

    /// Returns the stored bytes for `id` exactly as they were written.
    pub fn get_raw(&self, id: &str) -> Result<Vec<u8>, SnippetError> {
        let fingerprint =
            Fingerprint::parse(id).ok_or_else(|| SnippetError::NotFound(id.to_string()))?;
        self.store
            .get_object(&fingerprint.storage_key())?
            .ok_or_else(|| SnippetError::NotFound(id.to_string()))
    }

    /// Returns the decoded snippet stored under `id`.
    pub fn get(&self, id: &str) -> Result<Snippet, SnippetError> {
        let bytes = self.get_raw(id)?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

impl std::fmt::Debug for SnippetRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnippetRepository")
            .field("max_size", &self.max_size)
            .finish_non_exhaustive()
    }
}
