//! The note store
//!
//! `NoteStore` is the authoritative in-memory collection for one execution
//! context. Every mutation is applied in memory first and then handed to a
//! debounced writer; a failed write is logged and remembered but never undoes
//! the mutation, so the session stays usable when the medium is not.

pub mod paths;

use std::rc::Rc;
use std::time::Instant;

use crate::clock::{Clock, SystemClock};
use crate::collection::NoteCollection;
use crate::config::StoreConfig;
use crate::debounce::{DebounceConfig, DebouncedWriter};
use crate::error::Result;
use crate::id::{IdScheme, NoteId};
use crate::medium::StorageMedium;
use crate::note::{Note, NotePatch, NoteSummary, DEFAULT_TITLE};
use crate::trace_time;

/// Settings a store is opened with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreOptions {
    pub storage_key: String,
    pub debounce: DebounceConfig,
    pub id_scheme: IdScheme,
    pub default_title: String,
}

impl Default for StoreOptions {
    fn default() -> Self {
        StoreOptions::from(&StoreConfig::default())
    }
}

impl From<&StoreConfig> for StoreOptions {
    fn from(config: &StoreConfig) -> Self {
        StoreOptions {
            storage_key: config.storage_key.clone(),
            debounce: config.debounce(),
            id_scheme: config.id_scheme,
            default_title: if config.default_title.is_empty() {
                DEFAULT_TITLE.to_string()
            } else {
                config.default_title.clone()
            },
        }
    }
}

/// In-memory note collection bound to one entry of a storage medium
pub struct NoteStore<M> {
    medium: M,
    key: String,
    notes: NoteCollection,
    writer: DebouncedWriter,
    clock: Rc<dyn Clock>,
    id_scheme: IdScheme,
    default_title: String,
    last_persist_error: Option<String>,
}

impl<M: StorageMedium> NoteStore<M> {
    /// Load the collection from `medium` using the system clock
    pub fn open(medium: M, options: StoreOptions) -> Result<Self> {
        Self::open_with_clock(medium, options, Rc::new(SystemClock))
    }

    /// Load the collection from `medium`. An absent or malformed entry
    /// loads as an empty collection; only a failing medium is an error.
    #[tracing::instrument(skip_all, fields(key = %options.storage_key))]
    pub fn open_with_clock(
        medium: M,
        options: StoreOptions,
        clock: Rc<dyn Clock>,
    ) -> Result<Self> {
        let start = Instant::now();
        let raw = medium.read(&options.storage_key)?;
        let notes = NoteCollection::from_persisted(raw.as_deref());
        trace_time!(start, "load_collection", notes = notes.len());

        Ok(NoteStore {
            medium,
            key: options.storage_key,
            notes,
            writer: DebouncedWriter::new(options.debounce),
            clock,
            id_scheme: options.id_scheme,
            default_title: options.default_title,
            last_persist_error: None,
        })
    }

    /// Create an empty note with the default title and return its id
    pub fn create(&mut self) -> NoteId {
        let notes = &self.notes;
        let id = NoteId::generate(self.id_scheme, |candidate| notes.contains(candidate));
        let note = Note::new(self.default_title.clone(), self.clock.now_millis());
        self.notes.insert(id.clone(), note);
        tracing::debug!(note_id = %id, "created note");
        self.schedule_persist();
        id
    }

    /// Merge `patch` into the note and stamp it. Unknown ids and empty
    /// patches leave the store untouched; returns whether anything changed.
    pub fn update(&mut self, id: &str, patch: NotePatch) -> bool {
        let now = self.clock.now_millis();
        let Some(note) = self.notes.get_mut(id) else {
            tracing::debug!(note_id = id, "update of unknown note ignored");
            return false;
        };
        if !note.apply(patch, now) {
            return false;
        }
        tracing::trace!(note_id = id, timestamp = now, "updated note");
        self.schedule_persist();
        true
    }

    /// Remove a note. Deleting an absent id is a no-op; returns whether a
    /// note was removed.
    pub fn delete(&mut self, id: &str) -> bool {
        if self.notes.remove(id).is_none() {
            return false;
        }
        tracing::debug!(note_id = id, "deleted note");
        self.schedule_persist();
        true
    }

    /// Snapshot of (id, title, timestamp) rows in insertion order. Empty
    /// titles show the configured default title.
    pub fn list(&self) -> Vec<NoteSummary> {
        self.notes.summaries(&self.default_title)
    }

    /// Full note, including content
    pub fn get(&self, id: &str) -> Option<&Note> {
        self.notes.get(id)
    }

    pub fn collection(&self) -> &NoteCollection {
        &self.notes
    }

    /// Persisted text form of the current in-memory collection
    pub fn serialize(&self) -> String {
        self.notes.serialize()
    }

    /// Swap in a collection produced by reconciliation. Nothing is
    /// scheduled; see [`NoteStore::persist_merged`].
    pub fn replace_collection(&mut self, notes: NoteCollection) {
        self.notes = notes;
    }

    /// Settle the writer after a merge with another context's write.
    ///
    /// When the open note's newer local copy was kept, the merged collection
    /// differs from the medium: a pending write gets the merged payload, or
    /// one is scheduled. Otherwise the merged collection is exactly what the
    /// other context wrote, so a pending pre-merge write is dropped.
    pub fn persist_merged(&mut self, local_kept: bool) {
        if !local_kept {
            if self.writer.cancel() {
                tracing::trace!("dropped pending write superseded by external change");
            }
            return;
        }
        let payload = self.serialize();
        if self.writer.replace_pending(payload) {
            tracing::trace!("pending write now carries merged collection");
        } else {
            self.schedule_persist();
        }
    }

    /// Write the pending payload if its debounce deadline has passed
    pub fn tick(&mut self) -> bool {
        match self.writer.poll(self.clock.now_millis()) {
            Some(payload) => self.write_payload(&payload),
            None => false,
        }
    }

    /// Write the pending payload now, regardless of its deadline
    pub fn flush(&mut self) -> bool {
        match self.writer.flush() {
            Some(payload) => self.write_payload(&payload),
            None => false,
        }
    }

    pub fn has_pending_write(&self) -> bool {
        self.writer.has_pending()
    }

    /// Message of the most recent failed write, cleared by the next success
    pub fn last_persist_error(&self) -> Option<&str> {
        self.last_persist_error.as_deref()
    }

    /// Title given to new notes and shown for notes with an empty title
    pub fn default_title(&self) -> &str {
        &self.default_title
    }

    pub fn storage_key(&self) -> &str {
        &self.key
    }

    pub fn medium(&self) -> &M {
        &self.medium
    }

    pub fn clock(&self) -> &Rc<dyn Clock> {
        &self.clock
    }

    fn schedule_persist(&mut self) {
        let payload = self.serialize();
        self.writer.schedule(payload, self.clock.now_millis());
        self.tick();
    }

    fn write_payload(&mut self, payload: &str) -> bool {
        match self.medium.write(&self.key, payload) {
            Ok(()) => {
                self.last_persist_error = None;
                tracing::trace!(key = %self.key, notes = self.notes.len(), "persisted notes");
                true
            }
            Err(e) => {
                tracing::warn!(
                    key = %self.key,
                    error = %e,
                    "failed to persist notes; keeping in-memory state"
                );
                self.last_persist_error = Some(e.to_string());
                false
            }
        }
    }
}
