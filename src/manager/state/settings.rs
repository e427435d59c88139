//! Window chrome, settings panel and hotkey recording

use eframe::egui;
use tracing::{debug, info};

use super::{EditorState, PendingCall, RecordTarget, Recording};
use crate::common::ipc::Request;
use crate::config::{Note, NoteUpdate};
use crate::manager::key_capture::{CaptureResult, KeyCapture};

impl EditorState {
    pub fn minimize(&self) {
        self.send(Request::WindowMinimize);
    }

    pub fn toggle_maximize(&self) {
        self.send(Request::WindowMaximize);
    }

    /// Pending edits are written before the window goes away
    pub fn close(&mut self) {
        self.flush();
        self.send(Request::WindowClose);
    }

    /// The new state arrives as a notification
    pub fn toggle_always_on_top(&self) {
        self.send(Request::WindowToggleAlwaysOnTop);
    }

    /// Live slider value; applied and persisted without a reply
    pub fn set_opacity(&mut self, value: f32) {
        self.config.opacity = value;
        self.send(Request::WindowSetOpacity(value as f64));
    }

    pub fn set_font_size(&mut self, value: u32) {
        self.config.font_size = value;
        self.invoke(
            Request::SetFontSize(value as i64),
            PendingCall::Mutation("set-font-size"),
        );
    }

    /// Toggle the login item, then read back what the platform reports
    pub fn set_auto_launch(&mut self, enable: bool) {
        self.auto_launch = enable;
        self.invoke(
            Request::SetAutoLaunch(enable),
            PendingCall::Mutation("set-auto-launch"),
        );
        self.invoke(Request::GetAutoLaunch, PendingCall::LoadAutoLaunch);
    }

    pub fn recording(&self) -> Option<&Recording> {
        self.recording.as_ref()
    }

    pub fn start_recording(&mut self, target: RecordTarget) {
        debug!(?target, "Recording hotkey");
        self.recording = Some(Recording {
            target,
            capture: KeyCapture::new(),
        });
    }

    /// Route this frame's key events to the active recording
    pub fn handle_capture(&mut self, ctx: &egui::Context) {
        let Some(recording) = self.recording.as_mut() else {
            return;
        };
        if let Some(result) = recording.capture.consume_events(ctx) {
            self.finish_recording(result);
        }
    }

    pub fn finish_recording(&mut self, result: CaptureResult) {
        let Some(recording) = self.recording.take() else {
            return;
        };
        let CaptureResult::Captured(combo) = result else {
            return;
        };

        let accelerator = combo.accelerator();
        match recording.target {
            RecordTarget::Window => {
                info!(hotkey = %accelerator, "Window hotkey recorded");
                self.window_hotkey = accelerator.clone();
                self.config.hotkey = accelerator.clone();
                self.invoke(
                    Request::SetGlobalHotkey(accelerator),
                    PendingCall::Mutation("set-global-hotkey"),
                );
            }
            RecordTarget::Note(id) => {
                info!(id = %id, hotkey = %accelerator, "Note hotkey recorded");
                self.update_note_hotkey(&id, |note| note.hotkey = Some(accelerator));
            }
        }
    }

    pub fn clear_note_hotkey(&mut self) {
        if let Some(id) = self.active_id.clone() {
            self.update_note_hotkey(&id, |note| note.hotkey = Some(String::new()));
        }
    }

    pub fn set_note_global(&mut self, global: bool) {
        if let Some(id) = self.active_id.clone() {
            self.update_note_hotkey(&id, |note| note.is_global_hotkey = Some(global));
        }
    }

    /// Apply a hotkey change locally and save the note right away
    fn update_note_hotkey(&mut self, id: &str, change: impl FnOnce(&mut Note)) {
        let Some(note) = self.notes.iter_mut().find(|n| n.id == id) else {
            debug!(id, "Hotkey change for a note that no longer exists");
            return;
        };
        change(note);
        let update = NoteUpdate::from_note(note);

        // The immediate save carries any unsaved content too
        if self.dirty_id.as_deref() == Some(id) {
            self.autosave.cancel();
            self.dirty_id = None;
        }
        self.invoke(Request::SaveNote(update), PendingCall::Mutation("save-note"));
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;
    use crate::common::ipc::{self, ControlPort, Reply};
    use crate::config::KeyCombo;

    fn loaded() -> (EditorState, ControlPort) {
        let (ui, control) = ipc::channel();
        let mut state = EditorState::new(ui);
        let mut a = Note::default_note();
        a.id = "a".to_string();
        state.reload_notes(None);
        let env = control.pending().remove(0);
        control.reply(env.id.unwrap(), Reply::Notes(vec![a]));
        assert!(state.poll());
        (state, control)
    }

    fn requests(control: &ControlPort) -> Vec<Request> {
        control.pending().into_iter().map(|env| env.request).collect()
    }

    #[test]
    fn test_window_chrome_is_fire_and_forget() {
        let (mut state, control) = loaded();
        state.minimize();
        state.toggle_maximize();
        state.toggle_always_on_top();
        state.set_opacity(0.5);

        let pending = control.pending();
        assert!(pending.iter().all(|env| env.id.is_none()));
        assert_eq!(pending[3].request, Request::WindowSetOpacity(0.5));
        assert_eq!(state.config.opacity, 0.5);
    }

    #[test]
    fn test_close_flushes_pending_edit_first() {
        let (mut state, control) = loaded();
        state.edit_content("unsaved".to_string(), Instant::now());
        state.close();

        let sent = requests(&control);
        assert!(matches!(sent[0], Request::SaveNote(ref u) if u.content.as_deref() == Some("unsaved")));
        assert_eq!(sent[1], Request::WindowClose);
    }

    #[test]
    fn test_recording_window_hotkey() {
        let (mut state, control) = loaded();
        state.start_recording(RecordTarget::Window);
        assert!(state.recording().is_some());

        state.finish_recording(CaptureResult::Captured(KeyCombo::new("N", true, true, false, false)));

        assert!(state.recording().is_none());
        assert_eq!(state.window_hotkey, "CommandOrControl+Shift+N");
        assert_eq!(
            requests(&control),
            vec![Request::SetGlobalHotkey("CommandOrControl+Shift+N".to_string())]
        );
    }

    #[test]
    fn test_cancelled_recording_changes_nothing() {
        let (mut state, control) = loaded();
        state.start_recording(RecordTarget::Window);
        state.finish_recording(CaptureResult::Cancelled);

        assert!(state.recording().is_none());
        assert_eq!(state.window_hotkey, "CommandOrControl+\\");
        assert!(control.pending().is_empty());
    }

    #[test]
    fn test_recording_note_hotkey_saves_immediately() {
        let (mut state, control) = loaded();
        state.start_recording(RecordTarget::Note("a".to_string()));
        state.finish_recording(CaptureResult::Captured(KeyCombo::new("1", false, false, true, false)));

        assert_eq!(state.active_note().unwrap().hotkey.as_deref(), Some("Alt+1"));
        let sent = requests(&control);
        assert_eq!(sent.len(), 1);
        let Request::SaveNote(ref update) = sent[0] else {
            panic!("expected save-note");
        };
        assert_eq!(update.hotkey.as_deref(), Some("Alt+1"));
    }

    #[test]
    fn test_global_flag_and_clear() {
        let (mut state, control) = loaded();
        state.set_note_global(true);
        state.clear_note_hotkey();

        let note = state.active_note().unwrap();
        assert_eq!(note.is_global_hotkey, Some(true));
        assert_eq!(note.hotkey.as_deref(), Some(""));

        let sent = requests(&control);
        assert_eq!(sent.len(), 2);
        let Request::SaveNote(ref last) = sent[1] else {
            panic!("expected save-note");
        };
        assert_eq!(last.is_global_hotkey, Some(true));
        assert_eq!(last.hotkey.as_deref(), Some(""));
    }

    #[test]
    fn test_hotkey_save_absorbs_pending_autosave() {
        let (mut state, control) = loaded();
        let now = Instant::now();
        state.edit_content("typed".to_string(), now);
        state.set_note_global(true);

        assert_eq!(state.next_autosave_in(now), None);
        let sent = requests(&control);
        assert_eq!(sent.len(), 1);
        let Request::SaveNote(ref update) = sent[0] else {
            panic!("expected save-note");
        };
        assert_eq!(update.content.as_deref(), Some("typed"));
    }

    #[test]
    fn test_auto_launch_reads_back_state() {
        let (mut state, control) = loaded();
        state.set_auto_launch(true);
        assert_eq!(
            requests(&control),
            vec![Request::SetAutoLaunch(true), Request::GetAutoLaunch]
        );
    }
}
