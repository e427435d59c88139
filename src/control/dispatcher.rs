//! Request routing for the control service
//!
//! Dispatcher that routes UI requests to specialized handlers.

use super::autolaunch::AutoLaunch;
use super::handlers;
use crate::common::ipc::{ControlPort, Reply, Request};
use crate::config::Store;
use crate::input::{HotkeyBackend, HotkeyRegistrar};
use crate::window::{NativeWindow, WindowController};

/// Context bundle for request handlers to reduce argument count
pub struct ControlContext<'a, W: NativeWindow, B: HotkeyBackend> {
    pub store: &'a Store,
    pub registrar: &'a mut HotkeyRegistrar<B>,
    pub window: &'a mut WindowController<W>,
    pub autolaunch: &'a AutoLaunch,
    pub port: &'a ControlPort,
}

/// Run one request; `None` for fire-and-forget calls
pub fn handle_request<W: NativeWindow, B: HotkeyBackend>(
    ctx: &mut ControlContext<'_, W, B>,
    request: Request,
) -> Option<Reply> {
    let reply = match request {
        Request::WindowMinimize => {
            handlers::window::handle_minimize(ctx);
            return None;
        }
        Request::WindowMaximize => {
            handlers::window::handle_maximize(ctx);
            return None;
        }
        Request::WindowClose => {
            handlers::window::handle_close(ctx);
            return None;
        }
        Request::WindowToggleAlwaysOnTop => {
            handlers::window::handle_toggle_always_on_top(ctx);
            return None;
        }
        Request::WindowSetOpacity(value) => {
            handlers::window::handle_set_opacity(ctx, value);
            return None;
        }
        Request::GetNotes => handlers::notes::handle_get_notes(ctx),
        Request::SaveNote(update) => handlers::notes::handle_save_note(ctx, update),
        Request::DeleteNote(id) => handlers::notes::handle_delete_note(ctx, &id),
        Request::SetGlobalHotkey(hotkey) => handlers::settings::handle_set_global_hotkey(ctx, hotkey),
        Request::GetGlobalHotkey => handlers::settings::handle_get_global_hotkey(ctx),
        Request::GetConfig => handlers::settings::handle_get_config(ctx),
        Request::SetFontSize(value) => handlers::settings::handle_set_font_size(ctx, value),
        Request::SetOpacity(value) => handlers::settings::handle_set_opacity(ctx, value),
        Request::SetAutoLaunch(enable) => handlers::settings::handle_set_auto_launch(ctx, enable),
        Request::GetAutoLaunch => handlers::settings::handle_get_auto_launch(ctx),
    };
    Some(reply)
}
