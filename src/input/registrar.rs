//! Process-wide global hotkey registration
//!
//! The registrar holds at most one active binding. Every `register` call
//! replaces the whole set, so stale combinations can never keep firing.

use tracing::{debug, info, warn};

use super::backend::{BindingId, HotkeyBackend};
use crate::config::{KeyCombo, Note, NoteList, NoteUpdate};

/// What a fired global hotkey asks the control loop to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotkeyAction {
    /// Restore and focus the main window, or hide it if visible
    ToggleMainWindow,
}

#[derive(Debug)]
pub struct HotkeyRegistrar<B: HotkeyBackend> {
    backend: B,
    active: Option<(KeyCombo, BindingId)>,
}

impl<B: HotkeyBackend> HotkeyRegistrar<B> {
    pub fn new(backend: B) -> Self {
        info!(backend = backend.name(), "Hotkey registrar initialized");
        Self {
            backend,
            active: None,
        }
    }

    /// Replace every binding with `combo` (empty means none)
    ///
    /// Returns whether a binding is active afterwards. Parse and bind failures
    /// are logged and leave nothing registered.
    pub fn register(&mut self, combo: &str) -> bool {
        self.backend.unbind_all();
        self.active = None;

        let parsed = match KeyCombo::parse_optional(combo) {
            Ok(Some(parsed)) => parsed,
            Ok(None) => {
                debug!("Global hotkey cleared");
                return false;
            }
            Err(e) => {
                warn!(hotkey = %combo, error = %e, "Ignoring unparseable hotkey");
                return false;
            }
        };

        match self.backend.bind(&parsed) {
            Ok(id) => {
                info!(hotkey = %parsed, id, "Global hotkey active");
                self.active = Some((parsed, id));
                true
            }
            Err(e) => {
                warn!(hotkey = %parsed, error = %e, "Failed to register global hotkey");
                false
            }
        }
    }

    /// Drop every binding, e.g. on process shutdown
    pub fn unregister_all(&mut self) {
        self.backend.unbind_all();
        self.active = None;
    }

    /// Actions fired since the last poll
    ///
    /// Ids from bindings that were replaced in the meantime are discarded.
    pub fn poll(&mut self) -> Vec<HotkeyAction> {
        let fired = self.backend.drain_fired();
        let Some((_, active_id)) = self.active else {
            return Vec::new();
        };

        fired
            .into_iter()
            .filter(|id| *id == active_id)
            .map(|_| HotkeyAction::ToggleMainWindow)
            .collect()
    }

    /// The combination currently bound, if any
    #[cfg(test)]
    pub fn active(&self) -> Option<&KeyCombo> {
        self.active.as_ref().map(|(combo, _)| combo)
    }

    #[cfg(test)]
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}

/// Combination to re-point the registrar at after a note save, if any
pub fn hotkey_after_save(update: &NoteUpdate) -> Option<&str> {
    update.global_hotkey()
}

/// Combination to fall back to after a note was deleted, if any
///
/// Only a deleted note that owned a global hotkey changes the registration:
/// another global note wins (first in stored order), else the window hotkey.
pub fn hotkey_after_delete(
    removed: Option<&Note>,
    remaining: &NoteList,
    window_hotkey: &str,
) -> Option<String> {
    removed.and_then(Note::global_hotkey)?;

    Some(
        remaining
            .first_global_hotkey()
            .unwrap_or(window_hotkey)
            .to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::backend::fake::FakeBackend;

    fn registrar() -> HotkeyRegistrar<FakeBackend> {
        HotkeyRegistrar::new(FakeBackend::new())
    }

    fn global_note(id: &str, hotkey: &str) -> Note {
        let mut note = Note::default_note();
        note.id = id.to_string();
        note.hotkey = Some(hotkey.to_string());
        note.is_global_hotkey = Some(true);
        note
    }

    #[test]
    fn test_register_replaces_previous_binding() {
        let mut reg = registrar();
        assert!(reg.register("Ctrl+A"));
        assert!(reg.register("Ctrl+B"));

        assert_eq!(reg.backend_mut().bound_count(), 1);
        assert!(!reg.backend_mut().is_bound("Ctrl+A"));

        reg.backend_mut().press("Ctrl+A");
        assert!(reg.poll().is_empty());

        reg.backend_mut().press("Ctrl+B");
        assert_eq!(reg.poll(), vec![HotkeyAction::ToggleMainWindow]);
    }

    #[test]
    fn test_claimed_combo_leaves_nothing_registered() {
        let mut reg = registrar();
        assert!(reg.register("Ctrl+A"));

        let claimed: KeyCombo = "Ctrl+Q".parse().unwrap();
        reg.backend_mut().claimed.insert(claimed);

        assert!(!reg.register("Ctrl+Q"));
        assert!(reg.active().is_none());
        assert_eq!(reg.backend_mut().bound_count(), 0);
    }

    #[test]
    fn test_unparseable_and_empty_combos_clear_bindings() {
        let mut reg = registrar();
        assert!(reg.register("Ctrl+A"));
        assert!(!reg.register("Ctrl+Shift"));
        assert!(reg.active().is_none());

        assert!(reg.register("Ctrl+A"));
        assert!(!reg.register(""));
        assert!(reg.active().is_none());
        assert_eq!(reg.backend_mut().bound_count(), 0);
    }

    #[test]
    fn test_stale_fire_after_reregister_is_ignored() {
        let mut reg = registrar();
        reg.register("Alt+1");
        reg.backend_mut().press("Alt+1");
        // Re-registering the same combo issues a new id
        reg.register("Alt+1");
        assert!(reg.poll().is_empty());
    }

    #[test]
    fn test_save_policy_requires_global_flag() {
        let mut update = NoteUpdate::blank("n1");
        update.hotkey = Some("Alt+N".to_string());
        assert_eq!(hotkey_after_save(&update), None);

        update.is_global_hotkey = Some(true);
        assert_eq!(hotkey_after_save(&update), Some("Alt+N"));
    }

    #[test]
    fn test_delete_policy_prefers_other_global_note() {
        let removed = global_note("a", "Alt+A");
        let remaining = NoteList::new(vec![
            Note::default_note(),
            global_note("b", "Alt+B"),
            global_note("c", "Alt+C"),
        ]);

        assert_eq!(
            hotkey_after_delete(Some(&removed), &remaining, "Ctrl+\\"),
            Some("Alt+B".to_string())
        );
    }

    #[test]
    fn test_delete_policy_falls_back_to_window_hotkey() {
        let removed = global_note("a", "Alt+A");
        let remaining = NoteList::new(Vec::new());

        assert_eq!(
            hotkey_after_delete(Some(&removed), &remaining, "Ctrl+\\"),
            Some("Ctrl+\\".to_string())
        );
    }

    #[test]
    fn test_delete_policy_ignores_plain_notes() {
        let remaining = NoteList::new(vec![global_note("b", "Alt+B")]);
        assert_eq!(
            hotkey_after_delete(Some(&Note::default_note()), &remaining, "Ctrl+\\"),
            None
        );
        assert_eq!(hotkey_after_delete(None, &remaining, "Ctrl+\\"), None);
    }
}
