//! Cross-context reconciliation
//!
//! When another execution context overwrites the shared collection, its
//! write is adopted wholesale, with one exception: the note currently open
//! in this context keeps its local title and content when the local copy is
//! strictly newer than the incoming one. That stops a slow-propagating
//! external write from clobbering an edit the user is in the middle of.
//!
//! The merge is last-write-wins per note and compares wall-clock timestamps
//! from different contexts as-is; clock skew is not corrected for. Fields
//! are never merged individually: one whole note wins.

use crate::collection::NoteCollection;
use crate::id::NoteId;
use crate::medium::{StorageEvent, StorageMedium};
use crate::store::NoteStore;

/// What the editor showing the open note has to do after a merge
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorUpdate {
    /// Visible fields stay as they are
    Unchanged,
    /// Visible fields must show the adopted incoming values
    Refresh { title: String, content: String },
    /// The open note no longer exists
    Closed,
}

impl EditorUpdate {
    pub fn needs_refresh(&self) -> bool {
        matches!(self, EditorUpdate::Refresh { .. })
    }
}

/// Result of merging an incoming collection into the local one
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    pub merged: NoteCollection,
    pub editor: EditorUpdate,
    /// The local copy of the open note won over the incoming one
    pub local_kept: bool,
}

/// Merge `incoming` (another context's write) into `local`
pub fn reconcile(
    mut incoming: NoteCollection,
    local: &NoteCollection,
    open: Option<&NoteId>,
) -> Reconciliation {
    let Some(open) = open else {
        return Reconciliation {
            merged: incoming,
            editor: EditorUpdate::Unchanged,
            local_kept: false,
        };
    };

    let local_note = local.get(open.as_str());
    let incoming_stamp = incoming.get(open.as_str()).map(|note| note.timestamp);

    match (local_note, incoming_stamp) {
        (Some(mine), Some(theirs)) if mine.timestamp > theirs => {
            tracing::debug!(
                note_id = %open,
                local = mine.timestamp,
                incoming = theirs,
                "keeping newer local copy of open note"
            );
            incoming.insert(open.clone(), mine.clone());
            Reconciliation {
                merged: incoming,
                editor: EditorUpdate::Unchanged,
                local_kept: true,
            }
        }
        (_, Some(_)) => {
            let editor = incoming
                .get(open.as_str())
                .map(|theirs| EditorUpdate::Refresh {
                    title: theirs.title.clone(),
                    content: theirs.content.clone(),
                })
                .unwrap_or(EditorUpdate::Unchanged);
            Reconciliation {
                merged: incoming,
                editor,
                local_kept: false,
            }
        }
        (Some(_), None) => {
            tracing::debug!(note_id = %open, "open note was deleted elsewhere");
            Reconciliation {
                merged: incoming,
                editor: EditorUpdate::Closed,
                local_kept: false,
            }
        }
        (None, None) => Reconciliation {
            merged: incoming,
            editor: EditorUpdate::Unchanged,
            local_kept: false,
        },
    }
}

/// Parse an incoming blob and reconcile it. Unparseable input means "no
/// change" and yields `None`.
pub fn reconcile_raw(
    raw: &str,
    local: &NoteCollection,
    open: Option<&NoteId>,
) -> Option<Reconciliation> {
    match NoteCollection::try_deserialize(raw) {
        Ok(incoming) => Some(reconcile(incoming, local, open)),
        Err(e) => {
            tracing::warn!(error = %e, "ignoring malformed external change");
            None
        }
    }
}

/// Applies external change notifications to a store
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncReconciler;

impl SyncReconciler {
    /// Reconcile `event` into `store`. Returns `None` when the event does
    /// not concern the store's entry, carries no value, or is malformed; the
    /// store is untouched in those cases.
    pub fn on_external_change<M: StorageMedium>(
        &self,
        store: &mut NoteStore<M>,
        event: &StorageEvent,
        open: Option<&NoteId>,
    ) -> Option<EditorUpdate> {
        if event.key != store.storage_key() {
            return None;
        }
        let raw = event.new_value.as_deref()?;
        let Reconciliation {
            merged,
            editor,
            local_kept,
        } = reconcile_raw(raw, store.collection(), open)?;

        tracing::debug!(
            notes = merged.len(),
            local_kept,
            refresh = editor.needs_refresh(),
            "reconciled external change"
        );
        store.replace_collection(merged);
        store.persist_merged(local_kept);
        Some(editor)
    }
}
