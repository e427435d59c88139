//! Configuration management
//!
//! Handles the two persisted JSON documents (window config and notes) and the
//! key-combination grammar used by hotkey settings.

pub mod hotkey_binding;
pub mod note;
pub mod store;
pub mod window_config;

pub use hotkey_binding::{KeyCombo, KeyComboParseError};
pub use note::{Note, NoteList, NoteUpdate};
pub use store::{DeleteOutcome, Store};
pub use window_config::{ConfigPatch, WindowConfig};
