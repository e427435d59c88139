//! Single-instance holder for the main window

use tracing::{debug, warn};

/// Holds at most one window for the lifetime of the process
#[derive(Debug)]
pub struct WindowRegistry<W> {
    current: Option<W>,
}

impl<W> Default for WindowRegistry<W> {
    fn default() -> Self {
        Self { current: None }
    }
}

impl<W> WindowRegistry<W> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a freshly created window
    ///
    /// A window that is still registered is dropped first; the process never
    /// tracks two.
    pub fn create(&mut self, window: W) -> &mut W {
        if self.current.is_some() {
            warn!("Replacing a window that was never destroyed");
        }
        debug!("Window registered");
        self.current.insert(window)
    }

    /// Forget the current window, returning it if there was one
    pub fn destroy(&mut self) -> Option<W> {
        let window = self.current.take();
        if window.is_some() {
            debug!("Window destroyed");
        }
        window
    }

    pub fn get(&self) -> Option<&W> {
        self.current.as_ref()
    }

    pub fn get_mut(&mut self) -> Option<&mut W> {
        self.current.as_mut()
    }

    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }
}
