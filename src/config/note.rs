//! Note model and collection rules
//!
//! The persisted collection is never empty: removing the last note reinstates
//! a blank note with id `"default"`.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::defaults;

/// A single sticky note as stored in `notes.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hotkey: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_global_hotkey: Option<bool>,
    #[serde(with = "iso_millis", default = "now")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "iso_millis", default = "now")]
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// The blank note reinstated whenever the collection would be empty
    pub fn default_note() -> Self {
        let stamp = now();
        Self {
            id: defaults::note::DEFAULT_ID.to_string(),
            content: String::new(),
            hotkey: Some(String::new()),
            is_global_hotkey: None,
            created_at: stamp,
            updated_at: stamp,
        }
    }

    /// The note's hotkey if it is flagged global and non-empty
    pub fn global_hotkey(&self) -> Option<&str> {
        match (self.hotkey.as_deref(), self.is_global_hotkey) {
            (Some(hotkey), Some(true)) if !hotkey.is_empty() => Some(hotkey),
            _ => None,
        }
    }

    /// Short label for the tab strip: leading characters with newlines flattened
    pub fn preview(&self, max_chars: usize) -> String {
        self.content
            .chars()
            .take(max_chars)
            .map(|c| if c == '\n' { ' ' } else { c })
            .collect()
    }
}

/// Incoming save request; timestamps are always stamped by the store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteUpdate {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hotkey: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_global_hotkey: Option<bool>,
}

impl NoteUpdate {
    /// A fresh, empty note with the given id
    pub fn blank(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: Some(String::new()),
            ..Default::default()
        }
    }

    /// Snapshot of an in-memory note, as the editor sends it on autosave
    pub fn from_note(note: &Note) -> Self {
        Self {
            id: note.id.clone(),
            content: Some(note.content.clone()),
            hotkey: note.hotkey.clone(),
            is_global_hotkey: note.is_global_hotkey,
        }
    }

    /// The combination this save should re-point the registrar at, if any
    pub fn global_hotkey(&self) -> Option<&str> {
        match (self.hotkey.as_deref(), self.is_global_hotkey) {
            (Some(hotkey), Some(true)) if !hotkey.is_empty() => Some(hotkey),
            _ => None,
        }
    }
}

/// Non-empty, ordered note collection
#[derive(Debug, Clone, PartialEq)]
pub struct NoteList(Vec<Note>);

impl NoteList {
    /// Wrap `notes`, reinstating the default note if it is empty
    pub fn new(notes: Vec<Note>) -> Self {
        if notes.is_empty() {
            Self(vec![Note::default_note()])
        } else {
            Self(notes)
        }
    }

    #[cfg(test)]
    pub fn notes(&self) -> &[Note] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<Note> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[cfg(test)]
    pub fn get(&self, id: &str) -> Option<&Note> {
        self.0.iter().find(|n| n.id == id)
    }

    /// Merge into the first note with a matching id, or append a new note
    ///
    /// Returns `true` when an existing note was updated.
    pub fn upsert(&mut self, update: &NoteUpdate, stamp: DateTime<Utc>) -> bool {
        if let Some(existing) = self.0.iter_mut().find(|n| n.id == update.id) {
            if let Some(ref content) = update.content {
                existing.content = content.clone();
            }
            if update.hotkey.is_some() {
                existing.hotkey = update.hotkey.clone();
            }
            if update.is_global_hotkey.is_some() {
                existing.is_global_hotkey = update.is_global_hotkey;
            }
            existing.updated_at = stamp;
            true
        } else {
            self.0.push(Note {
                id: update.id.clone(),
                content: update.content.clone().unwrap_or_default(),
                hotkey: update.hotkey.clone(),
                is_global_hotkey: update.is_global_hotkey,
                created_at: stamp,
                updated_at: stamp,
            });
            false
        }
    }

    /// Remove every note with `id`, returning the first removed note
    ///
    /// Reinstates the default note if the collection became empty.
    pub fn remove(&mut self, id: &str) -> Option<Note> {
        let removed = self.0.iter().position(|n| n.id == id).map(|i| self.0[i].clone());
        self.0.retain(|n| n.id != id);
        if self.0.is_empty() {
            self.0.push(Note::default_note());
        }
        removed
    }

    /// First note (in stored order) that claims a global hotkey
    pub fn first_global_hotkey(&self) -> Option<&str> {
        self.0.iter().find_map(Note::global_hotkey)
    }
}

impl Serialize for NoteList {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for NoteList {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Vec::<Note>::deserialize(deserializer).map(NoteList::new)
    }
}

/// Current time at millisecond precision, matching the stored format
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// ISO-8601 timestamps with millisecond precision (`2024-05-01T10:00:00.000Z`)
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn note(id: &str, content: &str) -> Note {
        let stamp = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        Note {
            id: id.to_string(),
            content: content.to_string(),
            hotkey: None,
            is_global_hotkey: None,
            created_at: stamp,
            updated_at: stamp,
        }
    }

    #[test]
    fn test_default_note_shape() {
        let note = Note::default_note();
        assert_eq!(note.id, "default");
        assert!(note.content.is_empty());
        assert_eq!(note.created_at, note.updated_at);
    }

    #[test]
    fn test_empty_list_reinstates_default() {
        let list = NoteList::new(Vec::new());
        assert_eq!(list.len(), 1);
        assert_eq!(list.notes()[0].id, "default");
    }

    #[test]
    fn test_upsert_merges_in_place() {
        let mut list = NoteList::new(vec![note("a", "old"), note("b", "keep")]);
        let created = list.notes()[0].created_at;
        let stamp = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();

        let updated = list.upsert(
            &NoteUpdate {
                id: "a".to_string(),
                content: Some("new".to_string()),
                ..Default::default()
            },
            stamp,
        );

        assert!(updated);
        assert_eq!(list.len(), 2);
        assert_eq!(list.notes()[0].content, "new");
        assert_eq!(list.notes()[0].created_at, created);
        assert_eq!(list.notes()[0].updated_at, stamp);
        assert_eq!(list.notes()[1].content, "keep");
    }

    #[test]
    fn test_upsert_keeps_unsupplied_fields() {
        let mut existing = note("a", "text");
        existing.hotkey = Some("Alt+1".to_string());
        existing.is_global_hotkey = Some(true);
        let mut list = NoteList::new(vec![existing]);

        list.upsert(
            &NoteUpdate {
                id: "a".to_string(),
                content: Some("changed".to_string()),
                ..Default::default()
            },
            now(),
        );

        assert_eq!(list.notes()[0].hotkey.as_deref(), Some("Alt+1"));
        assert_eq!(list.notes()[0].is_global_hotkey, Some(true));
    }

    #[test]
    fn test_upsert_appends_new_id() {
        let mut list = NoteList::new(vec![note("a", "")]);
        let stamp = now();
        let updated = list.upsert(&NoteUpdate::blank("b"), stamp);
        assert!(!updated);
        assert_eq!(list.len(), 2);
        assert_eq!(list.notes()[1].id, "b");
        assert_eq!(list.notes()[1].created_at, stamp);
        assert_eq!(list.notes()[1].updated_at, stamp);
    }

    #[test]
    fn test_upsert_first_match_wins_on_duplicate_ids() {
        let mut list = NoteList::new(vec![note("dup", "first"), note("dup", "second")]);
        list.upsert(
            &NoteUpdate {
                id: "dup".to_string(),
                content: Some("x".to_string()),
                ..Default::default()
            },
            now(),
        );
        assert_eq!(list.notes()[0].content, "x");
        assert_eq!(list.notes()[1].content, "second");
    }

    #[test]
    fn test_remove_last_note_reinstates_default() {
        let mut list = NoteList::new(vec![note("only", "x")]);
        let removed = list.remove("only");
        assert_eq!(removed.map(|n| n.id), Some("only".to_string()));
        assert_eq!(list.len(), 1);
        assert_eq!(list.notes()[0].id, "default");
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let mut list = NoteList::new(vec![note("a", ""), note("b", "")]);
        assert!(list.remove("zzz").is_none());
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_first_global_hotkey_in_stored_order() {
        let mut a = note("a", "");
        a.hotkey = Some("Alt+A".to_string());
        a.is_global_hotkey = Some(false);
        let mut b = note("b", "");
        b.hotkey = Some("Alt+B".to_string());
        b.is_global_hotkey = Some(true);
        let mut c = note("c", "");
        c.hotkey = Some("Alt+C".to_string());
        c.is_global_hotkey = Some(true);

        let list = NoteList::new(vec![a, b, c]);
        assert_eq!(list.first_global_hotkey(), Some("Alt+B"));
    }

    #[test]
    fn test_global_hotkey_requires_flag_and_value() {
        let update = NoteUpdate {
            id: "x".to_string(),
            hotkey: Some(String::new()),
            is_global_hotkey: Some(true),
            ..Default::default()
        };
        assert_eq!(update.global_hotkey(), None);

        let update = NoteUpdate {
            id: "x".to_string(),
            hotkey: Some("Ctrl+1".to_string()),
            is_global_hotkey: None,
            ..Default::default()
        };
        assert_eq!(update.global_hotkey(), None);
    }

    #[test]
    fn test_timestamp_format_matches_disk_layout() {
        let json = serde_json::to_value(note("a", "")).unwrap();
        assert_eq!(json["createdAt"], "2024-01-01T00:00:00.000Z");
        assert!(json.get("hotkey").is_none());
    }

    #[test]
    fn test_deserialize_ignores_unknown_fields_and_client_timestamps() {
        let json = r#"{"id":"n1","content":"x","updatedAt":"not a date but ignored?"}"#;
        // NoteUpdate has no timestamp fields, so client-supplied ones are dropped
        let update: NoteUpdate = serde_json::from_str(json).unwrap();
        assert_eq!(update.id, "n1");
        assert_eq!(update.content.as_deref(), Some("x"));
    }

    #[test]
    fn test_preview_flattens_newlines() {
        let note = note("a", "ab\ncdefghijk");
        assert_eq!(note.preview(8), "ab cdefg");
    }
}
