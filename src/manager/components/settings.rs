//! Settings panel shown above the tab strip

use eframe::egui;

use super::EditorAction;
use crate::config::hotkey_binding::display_accelerator;
use crate::constants::defaults::{font, opacity};
use crate::constants::gui::*;
use crate::manager::state::{EditorState, RecordTarget};

const ITEM_SPACING: f32 = 6.0;

pub fn render(ui: &mut egui::Ui, state: &EditorState, actions: &mut Vec<EditorAction>) {
    ui.label(egui::RichText::new("Settings").small().strong().color(TEXT_PRIMARY));
    ui.add_space(ITEM_SPACING);

    // Opacity
    let mut value = state.config.opacity;
    ui.label(
        egui::RichText::new(format!("Opacity: {}%", (value * 100.0).round() as u32))
            .small()
            .color(TEXT_MUTED),
    );
    let slider = egui::Slider::new(&mut value, opacity::MIN..=opacity::MAX)
        .step_by(opacity::STEP)
        .show_value(false);
    if ui.add(slider).changed() {
        actions.push(EditorAction::SetOpacity(value));
    }
    ui.add_space(ITEM_SPACING);

    // Window hotkey
    ui.label(egui::RichText::new("Show / hide hotkey").small().color(TEXT_MUTED));
    hotkey_recorder(
        ui,
        state,
        RecordTarget::Window,
        &state.window_hotkey,
        EditorAction::RecordWindowHotkey,
        actions,
    );
    ui.add_space(ITEM_SPACING);

    // Font size
    let mut size = state.config.font_size;
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new("Font size").small().color(TEXT_MUTED));
        if ui
            .add(egui::Slider::new(&mut size, font::MIN_SIZE..=font::MAX_SIZE).suffix("px"))
            .changed()
        {
            actions.push(EditorAction::SetFontSize(size));
        }
    });
    ui.add_space(ITEM_SPACING);

    let mut auto_launch = state.auto_launch;
    if ui
        .checkbox(
            &mut auto_launch,
            egui::RichText::new("Launch at login").small().color(TEXT_MUTED),
        )
        .changed()
    {
        actions.push(EditorAction::SetAutoLaunch(auto_launch));
    }

    // Active note hotkey
    let Some(note) = state.active_note() else {
        return;
    };
    ui.add_space(ITEM_SPACING);
    ui.separator();
    ui.label(egui::RichText::new("Note hotkey").small().color(TEXT_MUTED));

    let hotkey = note.hotkey.as_deref().unwrap_or_default();
    ui.horizontal(|ui| {
        hotkey_recorder(
            ui,
            state,
            RecordTarget::Note(note.id.clone()),
            hotkey,
            EditorAction::RecordNoteHotkey,
            actions,
        );
        if !hotkey.is_empty()
            && ui
                .add(egui::Button::new(egui::RichText::new("Clear").small().color(DANGER)))
                .clicked()
        {
            actions.push(EditorAction::ClearNoteHotkey);
        }
    });

    let mut global = note.is_global_hotkey.unwrap_or(false);
    if ui
        .checkbox(
            &mut global,
            egui::RichText::new("Global (toggles the window from anywhere)")
                .small()
                .color(TEXT_MUTED),
        )
        .changed()
    {
        actions.push(EditorAction::SetNoteGlobal(global));
    }
}

/// Button showing the stored combination, or the live capture while recording
fn hotkey_recorder(
    ui: &mut egui::Ui,
    state: &EditorState,
    target: RecordTarget,
    current: &str,
    start: EditorAction,
    actions: &mut Vec<EditorAction>,
) {
    let recording = state.recording().filter(|r| r.target == target);

    if let Some(recording) = recording {
        let text = egui::RichText::new(recording.capture.state().description.as_str())
            .small()
            .color(TEXT_PRIMARY);
        let button = egui::Button::new(text).fill(RECORDING);
        if ui.add(button).on_hover_text("Esc to cancel").clicked() {
            actions.push(EditorAction::CancelRecording);
        }
        return;
    }

    let label = if current.is_empty() {
        "None".to_string()
    } else {
        display_accelerator(current)
    };
    if ui
        .add(egui::Button::new(egui::RichText::new(label).small()))
        .on_hover_text("Click, then press a new combination")
        .clicked()
    {
        actions.push(start);
    }
}
