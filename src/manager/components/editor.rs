use eframe::egui;

use super::EditorAction;
use crate::constants::gui::*;
use crate::manager::state::EditorState;

/// Multi-line text area for the active note
pub fn render(ui: &mut egui::Ui, state: &mut EditorState, actions: &mut Vec<EditorAction>) {
    let Some(note) = state.active_note() else {
        return;
    };

    // Keyed per note so cursor and scroll state do not leak between tabs
    let id = ui.id().with(("note_editor", note.id.as_str()));
    let mut content = note.content.clone();
    let font = egui::FontId::proportional(state.config.font_size as f32);

    let response = egui::ScrollArea::vertical()
        .id_salt(("note_scroll", note.id.as_str()))
        .show(ui, |ui| {
            ui.add_sized(
                ui.available_size(),
                egui::TextEdit::multiline(&mut content)
                    .id(id)
                    .font(font)
                    .text_color(TEXT_PRIMARY)
                    .hint_text(egui::RichText::new("Type a note...").color(TEXT_FAINT))
                    .frame(false)
                    .desired_width(f32::INFINITY),
            )
        })
        .inner;

    if state.take_focus_request() {
        response.request_focus();
    }
    if response.changed() {
        actions.push(EditorAction::EditContent(content));
    }
}
