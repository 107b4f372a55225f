//! Note records
//!
//! A note is a title, an opaque rich-text content payload and the wall-clock
//! millisecond timestamp of its last modification. The timestamp is only an
//! ordering key for last-write-wins reconciliation.

use serde::{Deserialize, Serialize};

use crate::id::NoteId;

/// Title given to new notes and shown for notes whose title is empty
pub const DEFAULT_TITLE: &str = "Untitled";

/// A single note as persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    #[serde(default)]
    pub title: String,
    /// Rich-text payload produced by the editor; never inspected here
    #[serde(default)]
    pub content: String,
    /// Milliseconds since the Unix epoch of the last modification
    #[serde(default)]
    pub timestamp: i64,
}

impl Note {
    /// A fresh note with empty content
    pub fn new(title: impl Into<String>, timestamp: i64) -> Self {
        Self {
            title: title.into(),
            content: String::new(),
            timestamp,
        }
    }

    /// Title for display, falling back to [`DEFAULT_TITLE`] when empty
    pub fn display_title(&self) -> &str {
        self.display_title_or(DEFAULT_TITLE)
    }

    /// Title for display, falling back to `fallback` when empty
    pub fn display_title_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        if self.title.is_empty() {
            fallback
        } else {
            &self.title
        }
    }

    /// Merge a patch into this note and stamp it. Returns false (and leaves
    /// the note untouched) when the patch carries no fields.
    pub fn apply(&mut self, patch: NotePatch, timestamp: i64) -> bool {
        if patch.is_empty() {
            return false;
        }
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        self.timestamp = timestamp;
        true
    }
}

/// Partial update of a note; `None` fields are left as they are
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotePatch {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl NotePatch {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            content: None,
        }
    }

    pub fn content(content: impl Into<String>) -> Self {
        Self {
            title: None,
            content: Some(content.into()),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }
}

/// Row produced by `NoteStore::list`; carries no content
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteSummary {
    pub id: NoteId,
    pub title: String,
    pub timestamp: i64,
}

impl NoteSummary {
    /// Row for `note`; an empty title shows as `default_title`
    pub fn from_note(id: &NoteId, note: &Note, default_title: &str) -> Self {
        Self {
            id: id.clone(),
            title: note.display_title_or(default_title).to_string(),
            timestamp: note.timestamp,
        }
    }
}
