//! Note collection requests and the hotkey policy that follows them

use tracing::{debug, warn};

use super::super::dispatcher::ControlContext;
use crate::common::ipc::Reply;
use crate::config::NoteUpdate;
use crate::input::HotkeyBackend;
use crate::input::registrar::{hotkey_after_delete, hotkey_after_save};
use crate::window::NativeWindow;

pub fn handle_get_notes<W: NativeWindow, B: HotkeyBackend>(
    ctx: &mut ControlContext<'_, W, B>,
) -> Reply {
    Reply::Notes(ctx.store.read_notes().into_vec())
}

/// Persist the note, then re-point the registrar if it claims a global hotkey
pub fn handle_save_note<W: NativeWindow, B: HotkeyBackend>(
    ctx: &mut ControlContext<'_, W, B>,
    update: NoteUpdate,
) -> Reply {
    if !ctx.store.save_note(&update) {
        warn!(id = %update.id, "Note was not persisted");
    }

    if let Some(hotkey) = hotkey_after_save(&update) {
        debug!(id = %update.id, hotkey, "Note claims the global hotkey");
        ctx.registrar.register(hotkey);
    }

    Reply::Ack(true)
}

/// Remove the note; if it owned the global hotkey, hand it to the next owner
pub fn handle_delete_note<W: NativeWindow, B: HotkeyBackend>(
    ctx: &mut ControlContext<'_, W, B>,
    id: &str,
) -> Reply {
    let outcome = ctx.store.delete_note(id);
    if !outcome.persisted {
        warn!(id, "Note deletion was not persisted");
    }

    let config = ctx.store.read_config();
    if let Some(hotkey) = hotkey_after_delete(outcome.removed.as_ref(), &outcome.notes, &config.hotkey) {
        debug!(id, hotkey = %hotkey, "Deleted note owned the global hotkey, re-registering");
        ctx.registrar.register(&hotkey);
    }

    Reply::Ack(true)
}
