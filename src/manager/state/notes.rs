//! Note selection, optimistic edits and autosave

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use tracing::{debug, info};

use super::{EditorState, PendingCall};
use crate::common::ipc::Request;
use crate::config::{Note, NoteUpdate};

impl EditorState {
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active_id.as_deref()
    }

    pub fn active_note(&self) -> Option<&Note> {
        let id = self.active_id.as_deref()?;
        self.notes.iter().find(|n| n.id == id)
    }

    pub(super) fn active_note_mut(&mut self) -> Option<&mut Note> {
        let id = self.active_id.as_deref()?;
        self.notes.iter_mut().find(|n| n.id == id)
    }

    /// The delete control is hidden when only one note remains
    pub fn can_delete(&self) -> bool {
        self.notes.len() > 1
    }

    /// Replace the list with a fresh load
    ///
    /// Selection: `select` if present, else the current note if it survived,
    /// else the first note. Unsaved local edits win over the loaded content.
    pub(super) fn apply_notes(&mut self, mut notes: Vec<Note>, select: Option<&str>) {
        if let Some(ref dirty) = self.dirty_id
            && let Some(local) = self.notes.iter().find(|n| &n.id == dirty)
            && let Some(loaded) = notes.iter_mut().find(|n| &n.id == dirty)
        {
            loaded.content = local.content.clone();
        }

        let has = |id: &str| notes.iter().any(|n| n.id == id);
        let active = match (select, self.active_id.as_deref()) {
            (Some(id), _) if has(id) => Some(id.to_string()),
            (_, Some(id)) if has(id) => Some(id.to_string()),
            _ => notes.first().map(|n| n.id.clone()),
        };

        debug!(count = notes.len(), active = ?active, "Notes loaded");
        self.notes = notes;
        self.active_id = active;
    }

    pub fn reload_notes(&mut self, select: Option<String>) {
        self.invoke(Request::GetNotes, PendingCall::LoadNotes { select });
    }

    pub fn select_note(&mut self, id: &str) {
        if self.active_id.as_deref() == Some(id) {
            return;
        }
        // Switching must not drop a pending autosave of the previous note
        self.flush();
        self.active_id = Some(id.to_string());
    }

    /// Optimistic local edit; the write happens when the timer fires
    pub fn edit_content(&mut self, content: String, now: Instant) {
        let Some(note) = self.active_note_mut() else {
            return;
        };
        note.content = content;
        let id = note.id.clone();

        if self.dirty_id.as_ref().is_some_and(|dirty| *dirty != id) {
            self.flush();
        }
        self.dirty_id = Some(id);
        self.autosave.touch(now);
    }

    /// Save the edited note if the debounce delay has passed
    pub fn tick(&mut self, now: Instant) {
        if self.autosave.fire_if_due(now)
            && let Some(id) = self.dirty_id.take()
        {
            self.save_note_now(&id);
        }
    }

    /// Save any pending edit immediately
    pub fn flush(&mut self) {
        self.autosave.cancel();
        if let Some(id) = self.dirty_id.take() {
            self.save_note_now(&id);
        }
    }

    /// Time until the autosave fires, if one is pending
    pub fn next_autosave_in(&self, now: Instant) -> Option<Duration> {
        self.autosave.remaining(now)
    }

    pub(super) fn save_note_now(&mut self, id: &str) {
        let Some(note) = self.notes.iter().find(|n| n.id == id) else {
            return;
        };
        debug!(id, len = note.content.len(), "Saving note");
        let update = NoteUpdate::from_note(note);
        self.invoke(Request::SaveNote(update), PendingCall::Mutation("save-note"));
    }

    pub fn create_note(&mut self) {
        self.flush();
        let id = self.generate_id();
        info!(id = %id, "Creating note");
        self.invoke(
            Request::SaveNote(NoteUpdate::blank(id.clone())),
            PendingCall::Mutation("save-note"),
        );
        self.reload_notes(Some(id));
        self.focus_editor = true;
    }

    pub fn delete_note(&mut self, id: &str) {
        if !self.can_delete() {
            debug!(id, "Refusing to delete the last note");
            return;
        }

        // A pending save would recreate the note after deletion
        if self.dirty_id.as_deref() == Some(id) {
            self.autosave.cancel();
            self.dirty_id = None;
        }

        info!(id, "Deleting note");
        self.invoke(
            Request::DeleteNote(id.to_string()),
            PendingCall::Mutation("delete-note"),
        );
        self.reload_notes(None);
    }

    /// Fresh opaque id: base-36 milliseconds plus a per-session counter
    fn generate_id(&mut self) -> String {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default();
        self.next_seq += 1;
        format!("{}-{}", to_base36(millis), to_base36(self.next_seq))
    }
}

fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::ipc::{self, ControlPort, Envelope, Reply};

    fn note(id: &str, content: &str) -> Note {
        let mut note = Note::default_note();
        note.id = id.to_string();
        note.content = content.to_string();
        note
    }

    /// Editor that already received `notes` as its first load
    fn loaded(notes: Vec<Note>) -> (EditorState, ControlPort) {
        let (ui, control) = ipc::channel();
        let mut state = EditorState::new(ui);
        state.start();
        for Envelope { id, request } in control.pending() {
            let reply = match request {
                Request::GetNotes => Reply::Notes(notes.clone()),
                Request::GetConfig => Reply::Config(Default::default()),
                Request::GetGlobalHotkey => Reply::Hotkey("CommandOrControl+\\".to_string()),
                Request::GetAutoLaunch => Reply::AutoLaunch(false),
                other => panic!("unexpected startup request {other:?}"),
            };
            control.reply(id.unwrap(), reply);
        }
        assert!(state.poll());
        (state, control)
    }

    fn saved(control: &ControlPort) -> Vec<NoteUpdate> {
        control
            .pending()
            .into_iter()
            .filter_map(|env| match env.request {
                Request::SaveNote(update) => Some(update),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_first_load_selects_first_note() {
        let (state, _control) = loaded(vec![note("a", "1"), note("b", "2")]);
        assert_eq!(state.active_id(), Some("a"));
        assert!(state.can_delete());
    }

    #[test]
    fn test_reload_keeps_surviving_selection() {
        let (mut state, _control) = loaded(vec![note("a", ""), note("b", "")]);
        state.select_note("b");
        state.apply_notes(vec![note("a", ""), note("b", ""), note("c", "")], None);
        assert_eq!(state.active_id(), Some("b"));

        state.apply_notes(vec![note("a", ""), note("c", "")], None);
        assert_eq!(state.active_id(), Some("a"));

        state.apply_notes(vec![note("a", ""), note("c", "")], Some("c"));
        assert_eq!(state.active_id(), Some("c"));
    }

    #[test]
    fn test_burst_of_edits_saves_once_with_latest_content() {
        let (mut state, control) = loaded(vec![note("a", "")]);
        let start = Instant::now();

        for (i, text) in ["h", "he", "hel", "hell", "hello"].iter().enumerate() {
            let at = start + Duration::from_millis(i as u64 * 100);
            state.tick(at);
            state.edit_content(text.to_string(), at);
        }
        assert_eq!(state.active_note().unwrap().content, "hello");

        state.tick(start + Duration::from_millis(899));
        assert!(saved(&control).is_empty());

        state.tick(start + Duration::from_millis(900));
        let saves = saved(&control);
        assert_eq!(saves.len(), 1);
        assert_eq!(saves[0].id, "a");
        assert_eq!(saves[0].content.as_deref(), Some("hello"));

        state.tick(start + Duration::from_secs(5));
        assert!(saved(&control).is_empty());
    }

    #[test]
    fn test_switching_notes_flushes_pending_edit() {
        let (mut state, control) = loaded(vec![note("a", ""), note("b", "")]);
        state.edit_content("draft".to_string(), Instant::now());
        state.select_note("b");

        let saves = saved(&control);
        assert_eq!(saves.len(), 1);
        assert_eq!(saves[0].id, "a");
        assert_eq!(state.next_autosave_in(Instant::now()), None);
    }

    #[test]
    fn test_reload_does_not_clobber_unsaved_edit() {
        let (mut state, _control) = loaded(vec![note("a", "old")]);
        state.edit_content("typing".to_string(), Instant::now());
        state.apply_notes(vec![note("a", "old"), note("b", "")], None);
        assert_eq!(state.active_note().unwrap().content, "typing");
    }

    #[test]
    fn test_create_note_saves_then_selects() {
        let (mut state, control) = loaded(vec![note("a", "")]);
        state.create_note();
        assert!(state.take_focus_request());
        assert!(!state.take_focus_request());

        let pending = control.pending();
        assert_eq!(pending.len(), 2);
        let Request::SaveNote(ref update) = pending[0].request else {
            panic!("expected save first");
        };
        assert_eq!(update.content.as_deref(), Some(""));
        assert_eq!(pending[1].request, Request::GetNotes);

        let new_id = update.id.clone();
        control.reply(pending[0].id.unwrap(), Reply::Ack(true));
        control.reply(
            pending[1].id.unwrap(),
            Reply::Notes(vec![note("a", ""), note(&new_id, "")]),
        );
        assert!(!state.poll());
        assert_eq!(state.active_id(), Some(new_id.as_str()));
    }

    #[test]
    fn test_delete_is_refused_for_last_note() {
        let (mut state, control) = loaded(vec![note("a", "")]);
        assert!(!state.can_delete());
        state.delete_note("a");
        assert!(control.pending().is_empty());
    }

    #[test]
    fn test_delete_cancels_pending_save_of_that_note() {
        let (mut state, control) = loaded(vec![note("a", ""), note("b", "")]);
        state.edit_content("doomed".to_string(), Instant::now());
        state.delete_note("a");

        let pending = control.pending();
        assert_eq!(pending[0].request, Request::DeleteNote("a".to_string()));
        assert_eq!(pending[1].request, Request::GetNotes);
        assert!(!pending
            .iter()
            .any(|env| matches!(env.request, Request::SaveNote(_))));
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let (mut state, _control) = loaded(vec![note("a", "")]);
        let first = state.generate_id();
        let second = state.generate_id();
        assert_ne!(first, second);
    }

    #[test]
    fn test_base36() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
    }
}
