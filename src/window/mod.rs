//! Main window lifecycle
//!
//! The native window is reached only through [`NativeWindow`], so the
//! controller can run against the egui viewport in production and a fake in
//! tests. Every call may fail once the native handle is gone.

pub mod controller;
pub mod egui_host;
pub mod registry;

use anyhow::Result;

pub use controller::{Lifecycle, WindowController};
pub use egui_host::{EguiWindow, GeometryTracker};
pub use registry::WindowRegistry;

/// Native window operations the controller relies on
pub trait NativeWindow {
    fn is_visible(&self) -> Result<bool>;
    fn is_minimized(&self) -> Result<bool>;
    fn is_maximized(&self) -> Result<bool>;
    fn is_always_on_top(&self) -> Result<bool>;

    /// Outer position in screen coordinates, when the platform reports it
    fn outer_position(&self) -> Result<Option<(i32, i32)>>;
    fn inner_size(&self) -> Result<(u32, u32)>;
    fn opacity(&self) -> Result<f32>;

    fn show(&mut self) -> Result<()>;
    fn hide(&mut self) -> Result<()>;
    fn focus(&mut self) -> Result<()>;

    /// Undo a minimize
    fn restore(&mut self) -> Result<()>;
    fn minimize(&mut self) -> Result<()>;
    fn set_maximized(&mut self, maximized: bool) -> Result<()>;

    /// Ask the window to close; the close itself arrives as an event
    fn close(&mut self) -> Result<()>;
    fn set_always_on_top(&mut self, on_top: bool) -> Result<()>;
    fn set_opacity(&mut self, opacity: f32) -> Result<()>;
}

/// Window notifications the controller reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    Moved,
    Resized,
    CloseRequested,
}

#[cfg(test)]
pub mod fake {
    //! Scriptable window used by controller and control-service tests

    use anyhow::{Result, bail};

    use super::NativeWindow;

    #[derive(Debug, Clone, PartialEq)]
    pub struct FakeWindow {
        pub visible: bool,
        pub minimized: bool,
        pub maximized: bool,
        pub on_top: bool,
        pub position: Option<(i32, i32)>,
        pub size: (u32, u32),
        pub opacity: f32,
        pub focused: bool,
        pub close_requested: bool,
        /// Simulates a destroyed native handle
        pub destroyed: bool,
    }

    impl FakeWindow {
        pub fn new(position: Option<(i32, i32)>, size: (u32, u32), opacity: f32) -> Self {
            Self {
                visible: true,
                minimized: false,
                maximized: false,
                on_top: false,
                position,
                size,
                opacity,
                focused: false,
                close_requested: false,
                destroyed: false,
            }
        }

        fn alive(&self) -> Result<()> {
            if self.destroyed {
                bail!("window has been destroyed");
            }
            Ok(())
        }
    }

    impl NativeWindow for FakeWindow {
        fn is_visible(&self) -> Result<bool> {
            self.alive()?;
            Ok(self.visible)
        }

        fn is_minimized(&self) -> Result<bool> {
            self.alive()?;
            Ok(self.minimized)
        }

        fn is_maximized(&self) -> Result<bool> {
            self.alive()?;
            Ok(self.maximized)
        }

        fn is_always_on_top(&self) -> Result<bool> {
            self.alive()?;
            Ok(self.on_top)
        }

        fn outer_position(&self) -> Result<Option<(i32, i32)>> {
            self.alive()?;
            Ok(self.position)
        }

        fn inner_size(&self) -> Result<(u32, u32)> {
            self.alive()?;
            Ok(self.size)
        }

        fn opacity(&self) -> Result<f32> {
            self.alive()?;
            Ok(self.opacity)
        }

        fn show(&mut self) -> Result<()> {
            self.alive()?;
            self.visible = true;
            Ok(())
        }

        fn hide(&mut self) -> Result<()> {
            self.alive()?;
            self.visible = false;
            self.focused = false;
            Ok(())
        }

        fn focus(&mut self) -> Result<()> {
            self.alive()?;
            self.focused = true;
            Ok(())
        }

        fn restore(&mut self) -> Result<()> {
            self.alive()?;
            self.minimized = false;
            Ok(())
        }

        fn minimize(&mut self) -> Result<()> {
            self.alive()?;
            self.minimized = true;
            Ok(())
        }

        fn set_maximized(&mut self, maximized: bool) -> Result<()> {
            self.alive()?;
            self.maximized = maximized;
            Ok(())
        }

        fn close(&mut self) -> Result<()> {
            self.alive()?;
            self.close_requested = true;
            Ok(())
        }

        fn set_always_on_top(&mut self, on_top: bool) -> Result<()> {
            self.alive()?;
            self.on_top = on_top;
            Ok(())
        }

        fn set_opacity(&mut self, opacity: f32) -> Result<()> {
            self.alive()?;
            self.opacity = opacity;
            Ok(())
        }
    }
}
