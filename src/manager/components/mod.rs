//! Note editor panels
//!
//! Components never mutate editor state directly. Each one pushes the
//! [`EditorAction`]s its widgets produced, and the host applies them after the
//! frame is laid out.

pub mod editor;
pub mod note_tabs;
pub mod settings;
pub mod status_bar;
pub mod title_bar;

/// Something the user asked for this frame
#[derive(Debug, Clone, PartialEq)]
pub enum EditorAction {
    Minimize,
    ToggleMaximize,
    Close,
    /// Title bar pressed; the host starts a native window drag
    StartDrag,
    SelectNote(String),
    CreateNote,
    DeleteNote(String),
    EditContent(String),
    ToggleSettings,
    ToggleAlwaysOnTop,
    SetOpacity(f32),
    SetFontSize(u32),
    SetAutoLaunch(bool),
    RecordWindowHotkey,
    RecordNoteHotkey,
    CancelRecording,
    ClearNoteHotkey,
    SetNoteGlobal(bool),
}

/// Small frameless button used across the chrome
pub(crate) fn chrome_button(
    ui: &mut eframe::egui::Ui,
    text: impl Into<eframe::egui::WidgetText>,
) -> eframe::egui::Response {
    ui.add(eframe::egui::Button::new(text).frame(false).small())
}
