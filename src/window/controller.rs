//! Window operations, geometry persistence and close/activate lifecycle

use anyhow::Result;
use tracing::{debug, error, info};

use super::registry::WindowRegistry;
use super::{NativeWindow, WindowEvent};
use crate::config::window_config::{clamp_font_size, clamp_opacity};
use crate::config::{ConfigPatch, Store, WindowConfig};

/// Builds a window from the persisted config
pub type WindowFactory<W> = Box<dyn FnMut(&WindowConfig) -> Result<W>>;

/// What the process should do after a window event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Continue,
    /// The last window closed and the process should exit
    Quit,
    /// The last window closed but the process keeps running without one
    StayResident,
}

pub struct WindowController<W: NativeWindow> {
    registry: WindowRegistry<W>,
    factory: WindowFactory<W>,
    stay_resident: bool,
}

impl<W: NativeWindow> WindowController<W> {
    /// `stay_resident` selects the macOS close behaviour
    pub fn new(factory: WindowFactory<W>, stay_resident: bool) -> Self {
        Self {
            registry: WindowRegistry::new(),
            factory,
            stay_resident,
        }
    }

    /// Whether closing the last window keeps the process alive on this platform
    pub fn platform_stays_resident() -> bool {
        cfg!(target_os = "macos")
    }

    /// Register a window that already exists (the one the event loop started with)
    pub fn adopt(&mut self, window: W) {
        self.registry.create(window);
    }

    /// Create the window from `config` via the factory
    pub fn open(&mut self, config: &WindowConfig) -> bool {
        match (self.factory)(config) {
            Ok(window) => {
                self.registry.create(window);
                info!(
                    width = config.width,
                    height = config.height,
                    opacity = config.opacity,
                    "Window created"
                );
                true
            }
            Err(e) => {
                error!(error = ?e, "Failed to create window");
                false
            }
        }
    }

    pub fn is_open(&self) -> bool {
        self.registry.is_open()
    }

    #[cfg(test)]
    pub fn window(&self) -> Option<&W> {
        self.registry.get()
    }

    #[cfg(test)]
    pub fn window_mut(&mut self) -> Option<&mut W> {
        self.registry.get_mut()
    }

    /// Run `f` against the window, ignoring a missing or stale handle
    fn with_window<T>(&mut self, op: &'static str, f: impl FnOnce(&mut W) -> Result<T>) -> Option<T> {
        let window = self.registry.get_mut()?;
        match f(window) {
            Ok(value) => Some(value),
            Err(e) => {
                debug!(op, error = %e, "Window call failed, handle is stale");
                None
            }
        }
    }

    pub fn minimize(&mut self) {
        self.with_window("minimize", |w| w.minimize());
    }

    pub fn toggle_maximize(&mut self) {
        self.with_window("toggle_maximize", |w| {
            let maximized = w.is_maximized()?;
            w.set_maximized(!maximized)
        });
    }

    pub fn close(&mut self) {
        self.with_window("close", |w| w.close());
    }

    /// Flip always-on-top, returning the new state if a window exists
    pub fn toggle_always_on_top(&mut self) -> Option<bool> {
        self.with_window("toggle_always_on_top", |w| {
            let on_top = !w.is_always_on_top()?;
            w.set_always_on_top(on_top)?;
            Ok(on_top)
        })
    }

    /// Clamp, apply to the window if any, and persist
    pub fn set_opacity(&mut self, value: f64, store: &Store) -> f32 {
        let opacity = clamp_opacity(value);
        self.with_window("set_opacity", |w| w.set_opacity(opacity));
        store.update_config(&ConfigPatch::opacity(opacity));
        debug!(requested = value, opacity, "Opacity updated");
        opacity
    }

    /// Clamp and persist; the size only affects the editor
    pub fn set_font_size(&mut self, value: i64, store: &Store) -> u32 {
        let font_size = clamp_font_size(value);
        store.update_config(&ConfigPatch::font_size(font_size));
        debug!(requested = value, font_size, "Font size updated");
        font_size
    }

    /// Hotkey action: hide a visible window, otherwise bring it back
    pub fn toggle_visibility(&mut self, store: &Store) {
        if !self.registry.is_open() {
            self.activate(store);
            return;
        }

        self.with_window("toggle_visibility", |w| {
            if w.is_visible()? {
                return w.hide();
            }
            if w.is_minimized()? {
                w.restore()?;
            }
            w.show()?;
            w.focus()
        });
    }

    /// App-level activation: recreate the window if none is open
    pub fn activate(&mut self, store: &Store) {
        if self.registry.is_open() {
            self.with_window("activate", |w| {
                w.show()?;
                w.focus()
            });
            return;
        }

        info!("Activated with no window, recreating");
        self.open(&store.read_config());
    }

    pub fn on_event(&mut self, event: WindowEvent, store: &Store) -> Lifecycle {
        match event {
            WindowEvent::Moved | WindowEvent::Resized => {
                self.persist_geometry(store, false);
                Lifecycle::Continue
            }
            WindowEvent::CloseRequested => {
                self.persist_geometry(store, true);

                if self.stay_resident {
                    self.with_window("hide", |w| w.hide());
                }
                self.registry.destroy();

                if self.stay_resident {
                    info!("Window closed, staying resident");
                    Lifecycle::StayResident
                } else {
                    info!("Last window closed, quitting");
                    Lifecycle::Quit
                }
            }
        }
    }

    /// Capture position, size and opacity into the config
    ///
    /// Skipped while minimized or maximized unless `force`. Returns whether
    /// anything was written.
    pub fn persist_geometry(&mut self, store: &Store, force: bool) -> bool {
        let patch = self
            .with_window("read_geometry", |w| {
                if !force && (w.is_minimized()? || w.is_maximized()?) {
                    return Ok(None);
                }
                let (width, height) = w.inner_size()?;
                Ok(Some(ConfigPatch {
                    position: w.outer_position()?,
                    width: Some(width),
                    height: Some(height),
                    opacity: Some(w.opacity()?),
                    ..Default::default()
                }))
            })
            .flatten();

        match patch {
            Some(patch) => {
                store.update_config(&patch);
                true
            }
            None => false,
        }
    }
}
