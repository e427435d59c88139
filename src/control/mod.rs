//! Control service: the single loop that owns persistence, hotkeys and the window
//!
//! The editor talks to it only through [`crate::common::ipc`]. The host pumps it
//! on the event-loop thread before and after every frame.

pub mod autolaunch;
pub mod dispatcher;
pub mod handlers;

use tracing::{debug, info, warn};

use self::autolaunch::AutoLaunch;
use self::dispatcher::ControlContext;
use crate::common::ipc::ControlPort;
use crate::config::Store;
use crate::input::{HotkeyAction, HotkeyBackend, HotkeyRegistrar};
use crate::window::{Lifecycle, NativeWindow, WindowController, WindowEvent};

pub struct ControlService<W: NativeWindow, B: HotkeyBackend> {
    store: Store,
    registrar: HotkeyRegistrar<B>,
    window: WindowController<W>,
    autolaunch: AutoLaunch,
    port: ControlPort,
}

impl<W: NativeWindow, B: HotkeyBackend> ControlService<W, B> {
    pub fn new(
        store: Store,
        registrar: HotkeyRegistrar<B>,
        window: WindowController<W>,
        autolaunch: AutoLaunch,
        port: ControlPort,
    ) -> Self {
        Self {
            store,
            registrar,
            window,
            autolaunch,
            port,
        }
    }

    fn context(&mut self) -> ControlContext<'_, W, B> {
        ControlContext {
            store: &self.store,
            registrar: &mut self.registrar,
            window: &mut self.window,
            autolaunch: &self.autolaunch,
            port: &self.port,
        }
    }

    /// Bind the configured window hotkey
    ///
    /// Called before the first frame, so a window started hidden is still
    /// reachable.
    pub fn bind_window_hotkey(&mut self) {
        let config = self.store.read_config();
        self.registrar.register(&config.hotkey);
    }

    /// Process queued requests, then fired hotkeys
    pub fn pump(&mut self) {
        let pending = self.port.pending();
        if !pending.is_empty() {
            let mut ctx = self.context();
            for envelope in pending {
                let channel = envelope.request.channel_name();
                debug!(channel, id = ?envelope.id, "Handling request");

                let reply = dispatcher::handle_request(&mut ctx, envelope.request);
                match (envelope.id, reply) {
                    (Some(id), Some(reply)) => ctx.port.reply(id, reply),
                    (Some(id), None) => {
                        warn!(channel, id, "Fire-and-forget request carried an id, no reply sent");
                    }
                    (None, Some(_)) => {
                        debug!(channel, "Reply discarded for request without id");
                    }
                    (None, None) => {}
                }
            }
        }

        for action in self.registrar.poll() {
            match action {
                HotkeyAction::ToggleMainWindow => self.window.toggle_visibility(&self.store),
            }
        }
    }

    /// Feed a native window event through the controller
    ///
    /// On `Quit` every global hotkey is released before the caller exits.
    pub fn on_window_event(&mut self, event: WindowEvent) -> Lifecycle {
        let lifecycle = self.window.on_event(event, &self.store);
        if lifecycle == Lifecycle::Quit {
            self.registrar.unregister_all();
            info!("Released global hotkeys for shutdown");
        }
        lifecycle
    }

    /// Final geometry write when the event loop ends without a close event
    pub fn shutdown(&mut self) {
        if self.window.is_open() {
            self.window.persist_geometry(&self.store, true);
        }
        self.registrar.unregister_all();
    }

    #[cfg(test)]
    pub fn registrar_mut(&mut self) -> &mut HotkeyRegistrar<B> {
        &mut self.registrar
    }

    #[cfg(test)]
    pub fn window_mut(&mut self) -> &mut WindowController<W> {
        &mut self.window
    }
}
