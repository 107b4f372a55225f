//! Persisted storage media shared between execution contexts
//!
//! A medium is a whole-blob key-value store: values are read and overwritten
//! in full, with no read-modify-write atomicity. When another context
//! overwrites a key, subscribers of this context receive a [`StorageEvent`];
//! a context never receives its own writes.

mod file;
mod listeners;
mod memory;

pub use file::FileMedium;
pub use listeners::Subscription;
pub use memory::{MemoryContext, MemoryMedium};

use crate::error::{JotterError, Result};

/// Notification that another context overwrote (or removed) a key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageEvent {
    pub key: String,
    /// Full new value; `None` when the entry was removed
    pub new_value: Option<String>,
}

/// Callback invoked for each external change
pub type ChangeHandler = Box<dyn FnMut(&StorageEvent)>;

/// A shared whole-blob key-value store
pub trait StorageMedium {
    /// Read the full value stored under `key`
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite the value stored under `key`
    fn write(&self, key: &str, value: &str) -> Result<()>;

    /// Register a handler for changes made by other contexts. The handler
    /// stays registered until the returned token is dropped.
    fn subscribe(&self, handler: ChangeHandler) -> Subscription;
}

/// Keys become file names, so keep them to a safe alphabet
pub(crate) fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
        && !key.starts_with('.');
    if valid {
        Ok(())
    } else {
        Err(JotterError::InvalidKey {
            key: key.to_string(),
        })
    }
}
