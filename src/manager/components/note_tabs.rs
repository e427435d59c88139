use eframe::egui;

use super::{EditorAction, chrome_button};
use crate::config::Note;
use crate::config::hotkey_binding::display_accelerator;
use crate::constants::editor::{EMPTY_TAB_LABEL, TAB_PREVIEW_CHARS};
use crate::constants::gui::*;

/// Label shown on a note's tab
pub fn tab_label(note: &Note) -> String {
    let preview = note.preview(TAB_PREVIEW_CHARS);
    if preview.is_empty() {
        EMPTY_TAB_LABEL.to_string()
    } else {
        preview
    }
}

pub fn render(
    ui: &mut egui::Ui,
    notes: &[Note],
    active_id: Option<&str>,
    actions: &mut Vec<EditorAction>,
) {
    egui::ScrollArea::horizontal()
        .id_salt("note_tabs")
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.spacing_mut().item_spacing.x = 4.0;

                for note in notes {
                    let selected = active_id == Some(note.id.as_str());
                    let color = if selected { TEXT_PRIMARY } else { TEXT_MUTED };

                    let mut text = egui::text::LayoutJob::default();
                    egui::RichText::new(tab_label(note))
                        .small()
                        .color(color)
                        .append_to(
                            &mut text,
                            ui.style(),
                            egui::FontSelection::Default,
                            egui::Align::Center,
                        );
                    if let Some(hotkey) = note.hotkey.as_deref().filter(|h| !h.is_empty()) {
                        egui::RichText::new(format!(" {}", display_accelerator(hotkey)))
                            .small()
                            .color(ACCENT_HOTKEY)
                            .append_to(
                                &mut text,
                                ui.style(),
                                egui::FontSelection::Default,
                                egui::Align::Center,
                            );
                    }

                    let tab = egui::Button::new(text)
                        .selected(selected)
                        .fill(if selected {
                            SELECTED_FILL
                        } else {
                            egui::Color32::TRANSPARENT
                        })
                        .small();
                    if ui.add(tab).clicked() && !selected {
                        actions.push(EditorAction::SelectNote(note.id.clone()));
                    }
                }

                if chrome_button(ui, egui::RichText::new("+").color(TEXT_FAINT))
                    .on_hover_text("New note")
                    .clicked()
                {
                    actions.push(EditorAction::CreateNote);
                }
            });
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_label() {
        let mut note = Note::default_note();
        assert_eq!(tab_label(&note), "...");

        note.content = "shopping\nlist".to_string();
        assert_eq!(tab_label(&note), "shopping");

        note.content = "a\nb".to_string();
        assert_eq!(tab_label(&note), "a b");

        note.content = "0123456789".to_string();
        assert_eq!(tab_label(&note), "01234567");
    }
}
