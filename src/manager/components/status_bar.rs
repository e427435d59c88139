use eframe::egui;

use super::{EditorAction, chrome_button};
use crate::constants::gui::*;
use crate::manager::state::EditorState;

fn toggle_text(label: &str, active: bool) -> egui::RichText {
    egui::RichText::new(label)
        .small()
        .color(if active { TEXT_PRIMARY } else { TEXT_FAINT })
}

pub fn render(ui: &mut egui::Ui, state: &EditorState, actions: &mut Vec<EditorAction>) {
    ui.horizontal_centered(|ui| {
        ui.add_space(4.0);

        let settings_label = if state.show_settings { "✕" } else { "⚙" };
        if chrome_button(ui, toggle_text(settings_label, state.show_settings))
            .on_hover_text("Settings")
            .clicked()
        {
            actions.push(EditorAction::ToggleSettings);
        }
        if chrome_button(ui, toggle_text("📌", state.always_on_top))
            .on_hover_text("Always on top")
            .clicked()
        {
            actions.push(EditorAction::ToggleAlwaysOnTop);
        }

        let count = state.notes().len();
        if count > 1 {
            ui.label(
                egui::RichText::new(format!("{count} notes"))
                    .small()
                    .color(TEXT_FAINT),
            );
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.add_space(4.0);
            match state.active_id() {
                Some(id) if state.can_delete() => {
                    if chrome_button(ui, egui::RichText::new("×").color(TEXT_FAINT))
                        .on_hover_text("Delete note")
                        .clicked()
                    {
                        actions.push(EditorAction::DeleteNote(id.to_string()));
                    }
                }
                _ => {
                    if chrome_button(ui, egui::RichText::new("+ New").small().color(TEXT_FAINT))
                        .clicked()
                    {
                        actions.push(EditorAction::CreateNote);
                    }
                }
            }
        });
    });
}
