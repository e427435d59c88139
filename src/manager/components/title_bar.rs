use eframe::egui;

use super::{EditorAction, chrome_button};
use crate::config::hotkey_binding::display_accelerator;
use crate::constants::gui::*;

/// Hotkey hint on the left, window buttons on the right; the rest is a drag handle
pub fn render(ui: &mut egui::Ui, window_hotkey: &str, actions: &mut Vec<EditorAction>) {
    let bar = ui.max_rect();
    let drag = ui.interact(bar, ui.id().with("title_drag"), egui::Sense::click_and_drag());
    if drag.drag_started() {
        actions.push(EditorAction::StartDrag);
    }
    if drag.double_clicked() {
        actions.push(EditorAction::ToggleMaximize);
    }

    ui.horizontal_centered(|ui| {
        ui.add_space(6.0);
        ui.label(
            egui::RichText::new(display_accelerator(window_hotkey))
                .small()
                .color(TEXT_MUTED),
        );

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.add_space(4.0);

            // Right -> Left
            let close = chrome_button(ui, egui::RichText::new("×").color(TEXT_MUTED));
            if close.on_hover_text("Close").clicked() {
                actions.push(EditorAction::Close);
            }
            if chrome_button(ui, egui::RichText::new("□").color(TEXT_MUTED))
                .on_hover_text("Maximize")
                .clicked()
            {
                actions.push(EditorAction::ToggleMaximize);
            }
            if chrome_button(ui, egui::RichText::new("−").color(TEXT_MUTED))
                .on_hover_text("Minimize")
                .clicked()
            {
                actions.push(EditorAction::Minimize);
            }
        });
    });
}
