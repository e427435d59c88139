//! Window chrome requests (all fire-and-forget)

use tracing::debug;

use super::super::dispatcher::ControlContext;
use crate::common::ipc::Notification;
use crate::input::HotkeyBackend;
use crate::window::NativeWindow;

pub fn handle_minimize<W: NativeWindow, B: HotkeyBackend>(ctx: &mut ControlContext<'_, W, B>) {
    ctx.window.minimize();
}

pub fn handle_maximize<W: NativeWindow, B: HotkeyBackend>(ctx: &mut ControlContext<'_, W, B>) {
    ctx.window.toggle_maximize();
}

/// Only asks the window to close; persistence happens on the close event
pub fn handle_close<W: NativeWindow, B: HotkeyBackend>(ctx: &mut ControlContext<'_, W, B>) {
    ctx.window.close();
}

pub fn handle_toggle_always_on_top<W: NativeWindow, B: HotkeyBackend>(
    ctx: &mut ControlContext<'_, W, B>,
) {
    match ctx.window.toggle_always_on_top() {
        Some(on_top) => {
            debug!(on_top, "Always-on-top toggled");
            ctx.port.notify(Notification::AlwaysOnTopChanged(on_top));
        }
        None => debug!("No window to toggle always-on-top"),
    }
}

/// Slider drag: clamps and persists like `set-opacity`, without a reply
pub fn handle_set_opacity<W: NativeWindow, B: HotkeyBackend>(
    ctx: &mut ControlContext<'_, W, B>,
    value: f64,
) {
    ctx.window.set_opacity(value, ctx.store);
}
