//! Note ID generation for jotter
//!
//! IDs are opaque to every consumer. Two schemes are supported:
//! - `hash` (default): 8 lowercase hex chars (`a1b2c3d4`), lengthened while
//!   they collide with an id already present in the collection
//! - `ulid`: lowercase ULID

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{JotterError, Result};

/// ID generation scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdScheme {
    /// Hash-based IDs (default)
    #[default]
    Hash,
    /// ULID-based IDs
    Ulid,
}

impl FromStr for IdScheme {
    type Err = JotterError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "hash" => Ok(IdScheme::Hash),
            "ulid" => Ok(IdScheme::Ulid),
            other => Err(JotterError::invalid_value("id scheme", other)),
        }
    }
}

/// Opaque note identifier, immutable once assigned
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct NoteId(String);

impl NoteId {
    /// Length of a freshly generated hash id
    pub const HASH_LEN: usize = 8;

    /// Maximum hash length (64 hex chars for SHA256)
    pub const MAX_HASH_LEN: usize = 64;

    /// Wrap an id read back from persisted data or supplied on the command line
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(JotterError::invalid_value("note id", "<empty>"));
        }
        Ok(NoteId(id))
    }

    /// Get the ID string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Generate a new hash-based ID that does not collide with `taken`
    pub fn generate_hash(taken: impl Fn(&str) -> bool) -> Self {
        let input = format!(
            "{}:{}",
            Utc::now().timestamp_nanos_opt().unwrap_or(0),
            next_nonce()
        );

        let mut hasher = Sha256::new();
        hasher.update(input.as_bytes());
        let full_hex = hex::encode(hasher.finalize());

        let mut len = Self::HASH_LEN;
        loop {
            let candidate = &full_hex[..len];
            if !taken(candidate) || len >= Self::MAX_HASH_LEN {
                return NoteId(candidate.to_string());
            }
            len += 1;
        }
    }

    /// Generate a new ULID-based ID
    pub fn generate_ulid() -> Self {
        NoteId(ulid::Ulid::new().to_string().to_lowercase())
    }

    /// Generate a new ID using the specified scheme
    pub fn generate(scheme: IdScheme, taken: impl Fn(&str) -> bool) -> Self {
        match scheme {
            IdScheme::Hash => Self::generate_hash(taken),
            IdScheme::Ulid => Self::generate_ulid(),
        }
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NoteId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::borrow::Borrow<str> for NoteId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for NoteId {
    type Error = JotterError;

    fn try_from(id: String) -> Result<Self> {
        NoteId::new(id)
    }
}

impl From<NoteId> for String {
    fn from(id: NoteId) -> String {
        id.0
    }
}

impl FromStr for NoteId {
    type Err = JotterError;

    fn from_str(s: &str) -> Result<Self> {
        NoteId::new(s)
    }
}

/// Process-local counter mixed into the hash so two ids generated within
/// the same clock tick still differ
fn next_nonce() -> u64 {
    static NONCE: AtomicU64 = AtomicU64::new(0);
    NONCE.fetch_add(1, Ordering::Relaxed)
}
