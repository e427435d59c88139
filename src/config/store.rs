//! JSON persistence for the window config and the note collection
//!
//! Reads never fail: a missing or unparseable document is replaced by its
//! built-in default. Every write serializes the whole document and overwrites
//! the file. There is no locking; concurrent writers are last-writer-wins.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error, info, warn};

use super::note::{self, Note, NoteList, NoteUpdate};
use super::window_config::{ConfigPatch, WindowConfig};
use crate::constants::config::{APP_DIR, DATA_DIR_ENV, NOTES_FILENAME, WINDOW_CONFIG_FILENAME};

/// Result of removing a note
#[derive(Debug, Clone)]
pub struct DeleteOutcome {
    /// The first note that matched the id, if any
    pub removed: Option<Note>,
    /// Collection after removal (never empty)
    pub notes: NoteList,
    /// Whether the new collection reached disk
    pub persisted: bool,
}

#[derive(Debug, Clone)]
pub struct Store {
    dir: PathBuf,
}

impl Store {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Per-user data directory, honouring the environment override
    pub fn default_dir() -> PathBuf {
        if let Ok(dir) = std::env::var(DATA_DIR_ENV)
            && !dir.is_empty()
        {
            return PathBuf::from(dir);
        }

        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(APP_DIR);
        path
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.join(WINDOW_CONFIG_FILENAME)
    }

    pub fn notes_path(&self) -> PathBuf {
        self.dir.join(NOTES_FILENAME)
    }

    /// Load the window config, falling back to defaults
    pub fn read_config(&self) -> WindowConfig {
        let path = self.config_path();
        match read_document::<WindowConfig>(&path) {
            Ok(Some(config)) => config.sanitized(),
            Ok(None) => {
                debug!(path = %path.display(), "No window config yet, using defaults");
                WindowConfig::default()
            }
            Err(e) => {
                error!(path = %path.display(), error = ?e, "Failed to read window config, using defaults");
                WindowConfig::default()
            }
        }
    }

    /// Overwrite the window config; failures are logged only
    pub fn write_config(&self, config: &WindowConfig) {
        let path = self.config_path();
        if let Err(e) = write_document(&path, config) {
            error!(path = %path.display(), error = ?e, "Failed to save window config");
        }
    }

    /// Read-modify-write: overlay `patch` on a fresh read and write it back
    ///
    /// Returns the config as written (clamped).
    pub fn update_config(&self, patch: &ConfigPatch) -> WindowConfig {
        let config = self.read_config().merged(patch);
        self.write_config(&config);
        config
    }

    /// Load the note collection, falling back to the single default note
    ///
    /// Entries that do not parse as a note are skipped; the rest still load.
    pub fn read_notes(&self) -> NoteList {
        let path = self.notes_path();
        match read_document::<Vec<serde_json::Value>>(&path) {
            Ok(Some(entries)) => {
                let total = entries.len();
                let notes: Vec<Note> = entries
                    .into_iter()
                    .enumerate()
                    .filter_map(|(index, entry)| match serde_json::from_value::<Note>(entry) {
                        Ok(note) => Some(note),
                        Err(e) => {
                            warn!(path = %path.display(), index, error = %e, "Skipping malformed note");
                            None
                        }
                    })
                    .collect();
                if notes.is_empty() {
                    warn!(path = %path.display(), total, "Note collection was empty, reinstating default note");
                }
                NoteList::new(notes)
            }
            Ok(None) => {
                debug!(path = %path.display(), "No notes yet, using default note");
                NoteList::new(Vec::new())
            }
            Err(e) => {
                error!(path = %path.display(), error = ?e, "Failed to read notes, using default note");
                NoteList::new(Vec::new())
            }
        }
    }

    /// Overwrite the note collection; returns `false` if it did not reach disk
    pub fn write_notes(&self, notes: &NoteList) -> bool {
        let path = self.notes_path();
        match write_document(&path, notes) {
            Ok(()) => true,
            Err(e) => {
                error!(path = %path.display(), error = ?e, "Failed to save notes");
                false
            }
        }
    }

    /// Merge `update` into the stored collection (or append it) and persist
    pub fn save_note(&self, update: &NoteUpdate) -> bool {
        let mut notes = self.read_notes();
        let existed = notes.upsert(update, note::now());
        let persisted = self.write_notes(&notes);
        debug!(id = %update.id, existed, persisted, "Saved note");
        persisted
    }

    /// Remove a note by id and persist, keeping the collection non-empty
    pub fn delete_note(&self, id: &str) -> DeleteOutcome {
        let mut notes = self.read_notes();
        let removed = notes.remove(id);
        let persisted = self.write_notes(&notes);
        info!(id = %id, found = removed.is_some(), remaining = notes.len(), "Deleted note");
        DeleteOutcome {
            removed,
            notes,
            persisted,
        }
    }
}

/// `Ok(None)` when the file does not exist
fn read_document<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {:?}", path))?;

    let value = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse JSON from {:?}", path))?;

    Ok(Some(value))
}

fn write_document<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create data directory {:?}", parent))?;
    }

    let json_string =
        serde_json::to_string_pretty(value).context("Failed to serialize document to JSON")?;

    fs::write(path, json_string).with_context(|| format!("Failed to write {:?}", path))?;

    debug!(path = %path.display(), "Wrote document");
    Ok(())
}
