//! Configuration type definitions

use serde::{Deserialize, Serialize};

use crate::debounce::DebounceConfig;
use crate::id::IdScheme;
use crate::note::DEFAULT_TITLE;

/// Current store format version
pub const STORE_FORMAT_VERSION: u32 = 1;

/// Store configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Store format version for compatibility checking
    #[serde(default = "default_version")]
    pub version: u32,

    /// Name of the medium entry holding the note collection
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Quiet period after an edit before it is persisted
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Longest an edit may stay unpersisted while edits keep arriving
    #[serde(default = "default_max_wait_ms")]
    pub max_wait_ms: u64,

    /// ID generation scheme
    #[serde(default)]
    pub id_scheme: IdScheme,

    /// Title given to new notes
    #[serde(default = "default_title")]
    pub default_title: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            version: STORE_FORMAT_VERSION,
            storage_key: default_storage_key(),
            debounce_ms: default_debounce_ms(),
            max_wait_ms: default_max_wait_ms(),
            id_scheme: IdScheme::default(),
            default_title: default_title(),
        }
    }
}

impl StoreConfig {
    pub fn debounce(&self) -> DebounceConfig {
        DebounceConfig {
            debounce_ms: self.debounce_ms,
            max_wait_ms: self.max_wait_ms,
        }
    }
}

fn default_version() -> u32 {
    STORE_FORMAT_VERSION
}

fn default_storage_key() -> String {
    "notes".to_string()
}

fn default_debounce_ms() -> u64 {
    DebounceConfig::default().debounce_ms
}

fn default_max_wait_ms() -> u64 {
    DebounceConfig::default().max_wait_ms
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}
