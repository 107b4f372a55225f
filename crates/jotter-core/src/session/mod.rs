//! One execution context: a store, the note open in the editor, and the
//! subscription that feeds external changes into reconciliation.
//!
//! The subscription handler only queues events; [`Session::pump`] drains the
//! queue and reconciles, so no store borrow ever happens inside a medium
//! callback. Tearing the session down flushes the pending write and drops
//! the subscription.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::error::Result;
use crate::id::NoteId;
use crate::medium::{StorageEvent, StorageMedium, Subscription};
use crate::note::{NotePatch, NoteSummary};
use crate::store::{NoteStore, StoreOptions};
use crate::sync::{EditorUpdate, SyncReconciler};

/// Fields currently visible in the editor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorState {
    pub title: String,
    pub content: String,
}

type Inbox = Rc<RefCell<VecDeque<StorageEvent>>>;

pub struct Session<M: StorageMedium> {
    store: NoteStore<M>,
    reconciler: SyncReconciler,
    open: Option<NoteId>,
    editor: EditorState,
    inbox: Inbox,
    subscription: Option<Subscription>,
}

impl<M: StorageMedium> Session<M> {
    /// Open the store on `medium` and subscribe to external changes
    pub fn start(medium: M, options: StoreOptions) -> Result<Self> {
        Ok(Self::with_store(NoteStore::open(medium, options)?))
    }

    /// Wrap an already opened store
    pub fn with_store(store: NoteStore<M>) -> Self {
        let inbox: Inbox = Rc::default();
        let queue = inbox.clone();
        let subscription = store.medium().subscribe(Box::new(move |event: &StorageEvent| {
            queue.borrow_mut().push_back(event.clone())
        }));

        Session {
            store,
            reconciler: SyncReconciler,
            open: None,
            editor: EditorState::default(),
            inbox,
            subscription: Some(subscription),
        }
    }

    pub fn store(&self) -> &NoteStore<M> {
        &self.store
    }

    pub fn open_id(&self) -> Option<&NoteId> {
        self.open.as_ref()
    }

    pub fn editor(&self) -> &EditorState {
        &self.editor
    }

    pub fn list(&self) -> Vec<NoteSummary> {
        self.store.list()
    }

    /// Create a note and open it; the editor shows the stored default title
    /// and empty content
    pub fn create(&mut self) -> NoteId {
        let id = self.store.create();
        self.editor = EditorState {
            title: self.store.default_title().to_string(),
            content: String::new(),
        };
        self.open = Some(id.clone());
        id
    }

    /// Load a note into the editor. Returns false for an unknown id.
    pub fn open(&mut self, id: &str) -> bool {
        let Some((key, note)) = self.store.collection().get_entry(id) else {
            return false;
        };
        self.editor = EditorState {
            title: note.title.clone(),
            content: note.content.clone(),
        };
        self.open = Some(key.clone());
        true
    }

    pub fn close(&mut self) {
        self.open = None;
        self.editor = EditorState::default();
    }

    /// Title edit in the editor; persisted to the open note if any
    pub fn edit_title(&mut self, title: impl Into<String>) {
        self.editor.title = title.into();
        self.sync_open_note();
    }

    /// Content edit in the editor; persisted to the open note if any
    pub fn edit_content(&mut self, content: impl Into<String>) {
        self.editor.content = content.into();
        self.sync_open_note();
    }

    /// Delete a note (the caller has confirmed), closing it if open
    pub fn delete(&mut self, id: &str) -> bool {
        let removed = self.store.delete(id);
        if self.open.as_ref().is_some_and(|open| open.as_str() == id) {
            self.close();
        }
        removed
    }

    /// Reconcile every queued external change, applying editor updates.
    /// Returns the updates that changed what the editor shows.
    pub fn pump(&mut self) -> Vec<EditorUpdate> {
        let events: Vec<StorageEvent> = self.inbox.borrow_mut().drain(..).collect();
        let mut applied = Vec::new();

        for event in &events {
            let Some(update) =
                self.reconciler
                    .on_external_change(&mut self.store, event, self.open.as_ref())
            else {
                continue;
            };
            match &update {
                EditorUpdate::Unchanged => continue,
                EditorUpdate::Refresh { title, content } => {
                    self.editor = EditorState {
                        title: title.clone(),
                        content: content.clone(),
                    };
                }
                EditorUpdate::Closed => self.close(),
            }
            applied.push(update);
        }
        applied
    }

    /// Number of external changes waiting for `pump`
    pub fn pending_events(&self) -> usize {
        self.inbox.borrow().len()
    }

    /// Write the pending payload once its debounce deadline has passed
    pub fn tick(&mut self) -> bool {
        self.store.tick()
    }

    /// Tear down: unsubscribe and flush any pending write. Returns whether
    /// a write was flushed.
    pub fn shutdown(mut self) -> bool {
        self.teardown()
    }

    fn teardown(&mut self) -> bool {
        self.subscription.take();
        let flushed = self.store.flush();
        if flushed {
            tracing::debug!("flushed pending write on teardown");
        }
        flushed
    }

    fn sync_open_note(&mut self) {
        let Some(open) = self.open.as_ref() else {
            return;
        };
        let patch = NotePatch::title(self.editor.title.clone())
            .with_content(self.editor.content.clone());
        self.store.update(open.as_str(), patch);
    }
}

impl<M: StorageMedium> Drop for Session<M> {
    fn drop(&mut self) {
        self.teardown();
    }
}
