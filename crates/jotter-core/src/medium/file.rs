use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::listeners::{self, ListenerSet, SharedListeners};
use super::{validate_key, ChangeHandler, StorageEvent, StorageMedium, Subscription};
use crate::error::{JotterError, Result};

/// Directory-backed medium: each key is a `<key>.json` file.
///
/// Several processes may share one directory. Changes made by other
/// processes are discovered by [`FileMedium::poll_changes`], which compares
/// the files against what this handle last read or wrote.
pub struct FileMedium {
    dir: PathBuf,
    /// Last value this handle observed per key (`None`: known to be absent)
    seen: RefCell<HashMap<String, Option<String>>>,
    listeners: SharedListeners,
}

impl FileMedium {
    /// Open a medium rooted at `dir`, creating the directory if needed
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .map_err(|e| JotterError::io_operation("create", dir.display(), e))?;
        Ok(Self {
            dir,
            seen: RefCell::new(HashMap::new()),
            listeners: ListenerSet::shared(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `key`
    pub fn key_path(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }

    /// Start tracking `key` so `poll_changes` reports writes to it
    pub fn watch(&self, key: &str) -> Result<()> {
        let current = self.read_file(key)?;
        self.seen.borrow_mut().insert(key.to_string(), current);
        Ok(())
    }

    /// Re-read every tracked key and notify subscribers of the ones another
    /// process changed since this handle last saw them. Returns the number
    /// of events delivered.
    pub fn poll_changes(&self) -> Result<usize> {
        let keys: Vec<String> = self.seen.borrow().keys().cloned().collect();
        let mut events = Vec::new();

        for key in keys {
            let current = self.read_file(&key)?;
            let mut seen = self.seen.borrow_mut();
            if seen.get(&key) != Some(&current) {
                seen.insert(key.clone(), current.clone());
                events.push(StorageEvent {
                    key,
                    new_value: current,
                });
            }
        }

        for event in &events {
            tracing::debug!(
                key = %event.key,
                removed = event.new_value.is_none(),
                "external change"
            );
            listeners::dispatch(&self.listeners, event);
        }
        Ok(events.len())
    }

    fn read_file(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(JotterError::io_operation("read", path.display(), e)),
        }
    }
}

impl StorageMedium for FileMedium {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let value = self.read_file(key)?;
        self.seen.borrow_mut().insert(key.to_string(), value.clone());
        Ok(value)
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let path = self.key_path(key)?;
        // Write-then-rename so readers never observe a half-written blob
        let tmp = self
            .dir
            .join(format!(".{key}.json.{}.tmp", std::process::id()));
        fs::write(&tmp, value).map_err(|e| JotterError::io_operation("write", tmp.display(), e))?;
        fs::rename(&tmp, &path)
            .map_err(|e| JotterError::io_operation("replace", path.display(), e))?;

        self.seen
            .borrow_mut()
            .insert(key.to_string(), Some(value.to_string()));
        tracing::trace!(key, bytes = value.len(), path = %path.display(), "file write");
        Ok(())
    }

    fn subscribe(&self, handler: ChangeHandler) -> Subscription {
        listeners::subscribe(&self.listeners, handler)
    }
}
