//! Content fingerprints used as public snippet identifiers.
//!
//! A fingerprint is the first [`FINGERPRINT_LEN`] lowercase hex characters of
//! the SHA-256 digest of a snippet's canonical bytes. Identical bytes always
//! give the identical fingerprint; collisions between distinct snippets are
//! outside the supported probability envelope and are not handled.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Number of hex characters kept from the digest.
pub const FINGERPRINT_LEN: usize = 16;

/// Prefix of every snippet key in the object store.
pub const KEY_PREFIX: &str = "shared/";

/// Short content hash identifying a stored snippet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Computes the fingerprint of `bytes`.
    pub fn of(bytes: &[u8]) -> Self {
        let digest = Sha256::digest(bytes);
        let mut hex = format!("{:x}", digest);
        hex.truncate(FINGERPRINT_LEN);
        Fingerprint(hex)
    }

    /// Parses a caller-supplied id.
    ///
    /// Returns `None` unless `id` is exactly [`FINGERPRINT_LEN`] lowercase hex
    /// characters; nothing else can name a stored snippet.
    pub fn parse(id: &str) -> Option<Self> {
        let well_formed = id.len() == FINGERPRINT_LEN
            && id
                .bytes()
                .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));
        well_formed.then(|| Fingerprint(id.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Object store key for this fingerprint (`shared/<id>`).
    pub fn storage_key(&self) -> String {
        format!("{}{}", KEY_PREFIX, self.0)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
