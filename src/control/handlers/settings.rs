//! Settings requests: hotkey, font size, opacity, launch at login

use tracing::{info, warn};

use super::super::dispatcher::ControlContext;
use crate::common::ipc::Reply;
use crate::config::ConfigPatch;
use crate::input::HotkeyBackend;
use crate::window::NativeWindow;

/// Re-register the window hotkey and persist it, even if binding failed
pub fn handle_set_global_hotkey<W: NativeWindow, B: HotkeyBackend>(
    ctx: &mut ControlContext<'_, W, B>,
    hotkey: String,
) -> Reply {
    let active = ctx.registrar.register(&hotkey);
    ctx.store.update_config(&ConfigPatch::hotkey(hotkey.as_str()));
    info!(hotkey = %hotkey, active, "Window hotkey changed");
    Reply::Ack(true)
}

pub fn handle_get_global_hotkey<W: NativeWindow, B: HotkeyBackend>(
    ctx: &mut ControlContext<'_, W, B>,
) -> Reply {
    Reply::Hotkey(ctx.store.read_config().effective_hotkey().to_string())
}

pub fn handle_get_config<W: NativeWindow, B: HotkeyBackend>(
    ctx: &mut ControlContext<'_, W, B>,
) -> Reply {
    Reply::Config(ctx.store.read_config())
}

pub fn handle_set_font_size<W: NativeWindow, B: HotkeyBackend>(
    ctx: &mut ControlContext<'_, W, B>,
    value: i64,
) -> Reply {
    ctx.window.set_font_size(value, ctx.store);
    Reply::Ack(true)
}

pub fn handle_set_opacity<W: NativeWindow, B: HotkeyBackend>(
    ctx: &mut ControlContext<'_, W, B>,
    value: f64,
) -> Reply {
    ctx.window.set_opacity(value, ctx.store);
    Reply::Ack(true)
}

/// Update the login item, then persist the flag regardless of the outcome
pub fn handle_set_auto_launch<W: NativeWindow, B: HotkeyBackend>(
    ctx: &mut ControlContext<'_, W, B>,
    enable: bool,
) -> Reply {
    if let Err(e) = ctx.autolaunch.set_enabled(enable) {
        warn!(enable, error = ?e, "Failed to update launch at login");
    }
    ctx.store.update_config(&ConfigPatch::auto_launch(enable));
    Reply::Ack(true)
}

pub fn handle_get_auto_launch<W: NativeWindow, B: HotkeyBackend>(
    ctx: &mut ControlContext<'_, W, B>,
) -> Reply {
    Reply::AutoLaunch(ctx.autolaunch.is_enabled())
}
