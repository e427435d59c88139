use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::common::ipc::{RequestId, UiPort};
use crate::config::{Note, WindowConfig};
use crate::constants::editor;
use crate::manager::components::EditorAction;
use crate::manager::key_capture::KeyCapture;

pub mod debounce;
mod messages;
mod notes;
mod settings;

use debounce::Debouncer;

/// What an outstanding request's reply should update
#[derive(Debug, Clone, PartialEq)]
pub enum PendingCall {
    /// Replace the note list, selecting `select` if it is present
    LoadNotes { select: Option<String> },
    LoadConfig,
    LoadHotkey,
    LoadAutoLaunch,
    /// Acknowledged mutation; only logged
    Mutation(&'static str),
}

/// Which hotkey a recording will overwrite
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordTarget {
    Window,
    Note(String),
}

#[derive(Debug)]
pub struct Recording {
    pub target: RecordTarget,
    pub capture: KeyCapture,
}

/// Editor-side mirror of the note collection and settings
///
/// Everything here is a cache of what the control service owns; mutations go
/// out as requests and come back as replies.
pub struct EditorState {
    port: UiPort,
    pending: HashMap<RequestId, PendingCall>,

    notes: Vec<Note>,
    active_id: Option<String>,
    /// Note with edits the autosave timer has not written yet
    dirty_id: Option<String>,
    autosave: Debouncer,

    pub config: WindowConfig,
    /// Window toggle combination as stored (never empty)
    pub window_hotkey: String,
    pub auto_launch: bool,
    pub always_on_top: bool,
    pub show_settings: bool,

    recording: Option<Recording>,
    focus_editor: bool,
    loaded: bool,
    next_seq: u64,
}

impl EditorState {
    pub fn new(port: UiPort) -> Self {
        Self {
            port,
            pending: HashMap::new(),
            notes: Vec::new(),
            active_id: None,
            dirty_id: None,
            autosave: Debouncer::new(Duration::from_millis(editor::AUTOSAVE_DEBOUNCE_MS)),
            config: WindowConfig::default(),
            window_hotkey: WindowConfig::default().hotkey,
            auto_launch: false,
            always_on_top: false,
            show_settings: false,
            recording: None,
            focus_editor: false,
            loaded: false,
            next_seq: 0,
        }
    }

    /// Apply one UI action
    ///
    /// `StartDrag` is native chrome and handled by the host before this point.
    pub fn apply(&mut self, action: EditorAction, now: Instant) {
        match action {
            EditorAction::Minimize => self.minimize(),
            EditorAction::ToggleMaximize => self.toggle_maximize(),
            EditorAction::Close => self.close(),
            EditorAction::StartDrag => {}
            EditorAction::SelectNote(id) => self.select_note(&id),
            EditorAction::CreateNote => self.create_note(),
            EditorAction::DeleteNote(id) => self.delete_note(&id),
            EditorAction::EditContent(content) => self.edit_content(content, now),
            EditorAction::ToggleSettings => self.show_settings = !self.show_settings,
            EditorAction::ToggleAlwaysOnTop => self.toggle_always_on_top(),
            EditorAction::SetOpacity(value) => self.set_opacity(value),
            EditorAction::SetFontSize(value) => self.set_font_size(value),
            EditorAction::SetAutoLaunch(enable) => self.set_auto_launch(enable),
            EditorAction::RecordWindowHotkey => self.start_recording(RecordTarget::Window),
            EditorAction::RecordNoteHotkey => {
                if let Some(id) = self.active_id.clone() {
                    self.start_recording(RecordTarget::Note(id));
                }
            }
            EditorAction::CancelRecording => self.recording = None,
            EditorAction::ClearNoteHotkey => self.clear_note_hotkey(),
            EditorAction::SetNoteGlobal(global) => self.set_note_global(global),
        }
    }

    /// One-shot request from create-note to focus the text area
    pub fn take_focus_request(&mut self) -> bool {
        std::mem::take(&mut self.focus_editor)
    }
}
