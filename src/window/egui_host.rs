//! `NativeWindow` over the eframe root viewport
//!
//! Commands go out as `ViewportCommand`s and take effect on the next frame.
//! Minimized/maximized state and geometry are read back from the viewport info;
//! visibility and always-on-top are tracked here because winit does not report
//! them. egui has no per-window opacity, so the value is kept in context memory
//! and applied when painting the background.

use anyhow::{Result, bail};
use eframe::egui::{self, Id, ViewportCommand, ViewportInfo, WindowLevel};

use super::{NativeWindow, WindowEvent};
use crate::config::WindowConfig;
use crate::constants::defaults;

fn opacity_id() -> Id {
    Id::new("sticky_notes_window_opacity")
}

/// Opacity the background should be painted with
pub fn current_opacity(ctx: &egui::Context) -> f32 {
    ctx.data(|d| d.get_temp::<f32>(opacity_id()))
        .unwrap_or(defaults::opacity::DEFAULT)
}

pub struct EguiWindow {
    ctx: egui::Context,
    visible: bool,
    on_top: bool,
    /// Set once a close was issued; further commands would target a dying viewport
    closing: bool,
}

impl EguiWindow {
    /// Wrap the viewport eframe already created from the persisted config
    pub fn attach(ctx: egui::Context, config: &WindowConfig, visible: bool) -> Self {
        ctx.data_mut(|d| d.insert_temp(opacity_id(), config.opacity));
        Self {
            ctx,
            visible,
            on_top: false,
            closing: false,
        }
    }

    /// Re-show the root viewport with the persisted geometry
    pub fn recreate(ctx: egui::Context, config: &WindowConfig) -> Self {
        if let (Some(x), Some(y)) = (config.x, config.y) {
            ctx.send_viewport_cmd(ViewportCommand::OuterPosition(egui::pos2(x as f32, y as f32)));
        }
        ctx.send_viewport_cmd(ViewportCommand::InnerSize(egui::vec2(
            config.width as f32,
            config.height as f32,
        )));
        ctx.send_viewport_cmd(ViewportCommand::WindowLevel(WindowLevel::Normal));
        ctx.send_viewport_cmd(ViewportCommand::Visible(true));
        ctx.send_viewport_cmd(ViewportCommand::Focus);
        Self::attach(ctx, config, true)
    }

    fn viewport(&self) -> ViewportInfo {
        self.ctx.input(|i| i.viewport().clone())
    }

    fn send(&self, cmd: ViewportCommand) -> Result<()> {
        if self.closing {
            bail!("viewport is closing");
        }
        self.ctx.send_viewport_cmd(cmd);
        Ok(())
    }
}

impl NativeWindow for EguiWindow {
    fn is_visible(&self) -> Result<bool> {
        Ok(self.visible)
    }

    fn is_minimized(&self) -> Result<bool> {
        Ok(self.viewport().minimized.unwrap_or(false))
    }

    fn is_maximized(&self) -> Result<bool> {
        Ok(self.viewport().maximized.unwrap_or(false))
    }

    fn is_always_on_top(&self) -> Result<bool> {
        Ok(self.on_top)
    }

    fn outer_position(&self) -> Result<Option<(i32, i32)>> {
        Ok(self
            .viewport()
            .outer_rect
            .map(|rect| (rect.min.x.round() as i32, rect.min.y.round() as i32)))
    }

    fn inner_size(&self) -> Result<(u32, u32)> {
        // Wayland may not report inner_rect; fall back to the content rect
        let rect = self
            .viewport()
            .inner_rect
            .unwrap_or_else(|| self.ctx.content_rect());
        if rect.width() <= 0.0 || rect.height() <= 0.0 {
            bail!("viewport reported an empty size");
        }
        Ok((rect.width().round() as u32, rect.height().round() as u32))
    }

    fn opacity(&self) -> Result<f32> {
        Ok(current_opacity(&self.ctx))
    }

    fn show(&mut self) -> Result<()> {
        self.send(ViewportCommand::Visible(true))?;
        self.visible = true;
        Ok(())
    }

    fn hide(&mut self) -> Result<()> {
        // Still valid while a close is pending: a cancelled close leaves the viewport alive
        self.ctx.send_viewport_cmd(ViewportCommand::Visible(false));
        self.visible = false;
        Ok(())
    }

    fn focus(&mut self) -> Result<()> {
        self.send(ViewportCommand::Focus)
    }

    fn restore(&mut self) -> Result<()> {
        self.send(ViewportCommand::Minimized(false))
    }

    fn minimize(&mut self) -> Result<()> {
        self.send(ViewportCommand::Minimized(true))
    }

    fn set_maximized(&mut self, maximized: bool) -> Result<()> {
        self.send(ViewportCommand::Maximized(maximized))
    }

    fn close(&mut self) -> Result<()> {
        self.send(ViewportCommand::Close)?;
        self.closing = true;
        Ok(())
    }

    fn set_always_on_top(&mut self, on_top: bool) -> Result<()> {
        let level = if on_top {
            WindowLevel::AlwaysOnTop
        } else {
            WindowLevel::Normal
        };
        self.send(ViewportCommand::WindowLevel(level))?;
        self.on_top = on_top;
        Ok(())
    }

    fn set_opacity(&mut self, opacity: f32) -> Result<()> {
        if self.closing {
            bail!("viewport is closing");
        }
        self.ctx.data_mut(|d| d.insert_temp(opacity_id(), opacity));
        self.ctx.request_repaint();
        Ok(())
    }
}

/// Turns per-frame viewport info into move/resize/close events
#[derive(Debug, Default)]
pub struct GeometryTracker {
    last_position: Option<egui::Pos2>,
    last_size: Option<egui::Vec2>,
}

impl GeometryTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compare against the previous frame; the first observation only sets a baseline
    pub fn update(&mut self, info: &ViewportInfo) -> Vec<WindowEvent> {
        let mut events = Vec::new();

        if let Some(rect) = info.outer_rect {
            let position = rect.min;
            if self.last_position.is_some_and(|last| last != position) {
                events.push(WindowEvent::Moved);
            }
            self.last_position = Some(position);
        }

        if let Some(rect) = info.inner_rect {
            let size = rect.size();
            if self.last_size.is_some_and(|last| last != size) {
                events.push(WindowEvent::Resized);
            }
            self.last_size = Some(size);
        }

        if info.close_requested() {
            events.push(WindowEvent::CloseRequested);
        }

        events
    }
}
