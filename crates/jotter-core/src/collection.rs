//! The note collection and its persisted representation
//!
//! Persisted form is a single JSON object keyed by note id:
//!
//! ```json
//! {"a1b2c3d4": {"title": "Groceries", "content": "<p>milk</p>", "timestamp": 1760000000000}}
//! ```
//!
//! Key order is insertion order (oldest created first), which is also the
//! default display order. There is no version field.

use indexmap::IndexMap;

use crate::error::Result;
use crate::id::NoteId;
use crate::note::{Note, NoteSummary};

/// Insertion-ordered mapping from note id to note
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteCollection {
    notes: IndexMap<NoteId, Note>,
}

impl NoteCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.notes.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&Note> {
        self.notes.get(id)
    }

    /// The stored id together with its note
    pub fn get_entry(&self, id: &str) -> Option<(&NoteId, &Note)> {
        self.notes.get_key_value(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Note> {
        self.notes.get_mut(id)
    }

    /// Insert or replace a note. A replaced note keeps its position.
    pub fn insert(&mut self, id: NoteId, note: Note) -> Option<Note> {
        self.notes.insert(id, note)
    }

    /// Remove a note, preserving the order of the remaining ones
    pub fn remove(&mut self, id: &str) -> Option<Note> {
        self.notes.shift_remove(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NoteId, &Note)> {
        self.notes.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &NoteId> {
        self.notes.keys()
    }

    /// Snapshot of (id, display title, timestamp) rows in insertion order;
    /// empty titles show as `default_title`
    pub fn summaries(&self, default_title: &str) -> Vec<NoteSummary> {
        self.notes
            .iter()
            .map(|(id, note)| NoteSummary::from_note(id, note, default_title))
            .collect()
    }

    /// Serialize the whole collection to its persisted text form
    pub fn serialize(&self) -> String {
        // A map of strings and integers always serializes
        serde_json::to_string(&self.notes).unwrap_or_else(|_| "{}".to_string())
    }

    /// Parse a persisted blob, reporting malformed input as an error.
    /// Entries with a blank id are dropped.
    pub fn try_deserialize(raw: &str) -> Result<Self> {
        let entries: IndexMap<String, Note> = serde_json::from_str(raw)?;
        let notes = entries
            .into_iter()
            .filter_map(|(key, note)| match NoteId::new(key) {
                Ok(id) => Some((id, note)),
                Err(_) => {
                    tracing::warn!("dropping note with blank id");
                    None
                }
            })
            .collect();
        Ok(Self { notes })
    }

    /// Parse a persisted blob; malformed input yields an empty collection
    pub fn deserialize(raw: &str) -> Self {
        match Self::try_deserialize(raw) {
            Ok(collection) => collection,
            Err(e) => {
                tracing::warn!(error = %e, "discarding malformed note collection");
                Self::default()
            }
        }
    }

    /// Load from an optional blob (absent entry → empty collection)
    pub fn from_persisted(raw: Option<&str>) -> Self {
        raw.map(Self::deserialize).unwrap_or_default()
    }
}

impl FromIterator<(NoteId, Note)> for NoteCollection {
    fn from_iter<I: IntoIterator<Item = (NoteId, Note)>>(iter: I) -> Self {
        Self {
            notes: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> NoteId {
        NoteId::new(s).unwrap()
    }

    fn sample() -> NoteCollection {
        [
            (
                id("b2"),
                Note {
                    title: "Second created first".to_string(),
                    content: "<p>x</p>".to_string(),
                    timestamp: 200,
                },
            ),
            (
                id("a1"),
                Note {
                    title: String::new(),
                    content: "<h1>\"quoted\"</h1>\n".to_string(),
                    timestamp: 100,
                },
            ),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_round_trip() {
        let collection = sample();
        let restored = NoteCollection::deserialize(&collection.serialize());
        assert_eq!(restored, collection);
    }

    #[test]
    fn test_serialize_keeps_insertion_order() {
        let raw = sample().serialize();
        let b2 = raw.find("\"b2\"").unwrap();
        let a1 = raw.find("\"a1\"").unwrap();
        assert!(b2 < a1);

        let restored = NoteCollection::deserialize(&raw);
        let ids: Vec<&str> = restored.ids().map(NoteId::as_str).collect();
        assert_eq!(ids, vec!["b2", "a1"]);
    }

    #[test]
    fn test_persisted_layout() {
        let raw = sample().serialize();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["b2"]["title"], "Second created first");
        assert_eq!(value["b2"]["content"], "<p>x</p>");
        assert_eq!(value["b2"]["timestamp"], 200);
    }

    #[test]
    fn test_malformed_input_yields_empty() {
        for raw in ["", "not json", "null", "[1,2]", "{\"a\": 5}", "{\"a\":"] {
            assert!(NoteCollection::deserialize(raw).is_empty(), "{raw:?}");
            assert!(NoteCollection::try_deserialize(raw).is_err(), "{raw:?}");
        }
    }

    #[test]
    fn test_blank_ids_are_dropped() {
        let raw = r#"{"": {"title": "ghost"}, "  ": {}, "kept": {"title": "real"}}"#;
        let collection = NoteCollection::try_deserialize(raw).unwrap();
        assert_eq!(collection.len(), 1);
        assert!(!collection.contains(""));
        assert_eq!(collection.get("kept").unwrap().title, "real");
    }

    #[test]
    fn test_absent_input_yields_empty() {
        assert!(NoteCollection::from_persisted(None).is_empty());
    }

    #[test]
    fn test_missing_fields_default() {
        let collection = NoteCollection::deserialize(r#"{"x": {"content": "body"}}"#);
        let note = collection.get("x").unwrap();
        assert_eq!(note.title, "");
        assert_eq!(note.content, "body");
        assert_eq!(note.timestamp, 0);
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut collection = sample();
        collection.insert(id("c3"), Note::new("third", 300));
        collection.remove("a1");
        let ids: Vec<&str> = collection.ids().map(NoteId::as_str).collect();
        assert_eq!(ids, vec!["b2", "c3"]);
    }

    #[test]
    fn test_summaries_use_display_title() {
        let summaries = sample().summaries("Untitled");
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[1].title, "Untitled");
        assert_eq!(summaries[1].timestamp, 100);
        assert_eq!(sample().summaries("Inbox")[1].title, "Inbox");
    }
}
