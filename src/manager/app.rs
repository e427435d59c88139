//! Sticky notes window implemented with egui/eframe

use std::time::{Duration, Instant};

use anyhow::{Result, anyhow};
use eframe::{NativeOptions, egui};
use tracing::info;

use super::components::{self, EditorAction};
use super::state::EditorState;
use crate::common::ipc;
use crate::config::{Store, WindowConfig};
use crate::constants::{defaults, editor::REPAINT_INTERVAL_MS, gui::*};
use crate::control::ControlService;
use crate::control::autolaunch::AutoLaunch;
use crate::input::{GlobalBackend, HotkeyRegistrar};
use crate::window::controller::WindowFactory;
use crate::window::egui_host::current_opacity;
use crate::window::{EguiWindow, GeometryTracker, Lifecycle, WindowController};

struct StickyApp {
    control: ControlService<EguiWindow, GlobalBackend>,
    editor: EditorState,
    tracker: GeometryTracker,
}

impl StickyApp {
    fn new(cc: &eframe::CreationContext<'_>, store: Store, config: &WindowConfig, hidden: bool) -> Self {
        info!(hidden, "Initializing sticky notes window");
        let ctx = cc.egui_ctx.clone();

        let wake_ctx = ctx.clone();
        let backend = GlobalBackend::new(move || wake_ctx.request_repaint());

        let factory_ctx = ctx.clone();
        let factory: WindowFactory<EguiWindow> =
            Box::new(move |config: &WindowConfig| -> Result<EguiWindow> {
                Ok(EguiWindow::recreate(factory_ctx.clone(), config))
            });
        let mut window =
            WindowController::new(factory, WindowController::<EguiWindow>::platform_stays_resident());
        window.adopt(EguiWindow::attach(ctx, config, !hidden));

        let (ui_port, control_port) = ipc::channel();
        let mut control = ControlService::new(
            store,
            HotkeyRegistrar::new(backend),
            window,
            AutoLaunch::for_platform(),
            control_port,
        );
        control.bind_window_hotkey();

        let mut editor = EditorState::new(ui_port);
        editor.start();

        Self {
            control,
            editor,
            tracker: GeometryTracker::new(),
        }
    }

    /// Run queued requests, then hand replies to the editor
    fn sync(&mut self) {
        self.control.pump();
        if self.editor.poll() {
            info!(notes = self.editor.notes().len(), "Notes loaded");
        }
    }

    fn handle_window_events(&mut self, ctx: &egui::Context) {
        let info = ctx.input(|i| i.viewport().clone());

        // Unsaved text goes out before the window is torn down
        if info.close_requested() {
            self.editor.flush();
            self.sync();
        }

        for event in self.tracker.update(&info) {
            match self.control.on_window_event(event) {
                Lifecycle::StayResident => ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose),
                Lifecycle::Quit | Lifecycle::Continue => {}
            }
        }
    }

    fn paint_background(ctx: &egui::Context) {
        let alpha = (current_opacity(ctx) * 255.0).round() as u8;
        ctx.layer_painter(egui::LayerId::background()).rect_filled(
            ctx.content_rect(),
            0.0,
            egui::Color32::from_black_alpha(alpha),
        );
    }
}

impl eframe::App for StickyApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_window_events(ctx);
        self.sync();

        let now = Instant::now();
        self.editor.tick(now);

        // Recording swallows key events before the text area sees them
        self.editor.handle_capture(ctx);

        Self::paint_background(ctx);
        let mut actions: Vec<EditorAction> = Vec::new();

        egui::TopBottomPanel::top("title_bar")
            .exact_height(TITLE_BAR_HEIGHT)
            .frame(egui::Frame::NONE)
            .show_separator_line(false)
            .show(ctx, |ui| {
                components::title_bar::render(ui, &self.editor.window_hotkey, &mut actions);
            });

        if self.editor.show_settings {
            egui::TopBottomPanel::top("settings")
                .frame(egui::Frame::NONE.fill(SETTINGS_FILL).inner_margin(10.0))
                .show(ctx, |ui| {
                    components::settings::render(ui, &self.editor, &mut actions);
                });
        }

        if !self.editor.notes().is_empty() {
            egui::TopBottomPanel::top("note_tabs")
                .frame(egui::Frame::NONE.inner_margin(egui::Margin::symmetric(8, 2)))
                .show(ctx, |ui| {
                    components::note_tabs::render(
                        ui,
                        self.editor.notes(),
                        self.editor.active_id(),
                        &mut actions,
                    );
                });
        }

        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(STATUS_BAR_HEIGHT)
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                components::status_bar::render(ui, &self.editor, &mut actions);
            });

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.inner_margin(12.0))
            .show(ctx, |ui| {
                components::editor::render(ui, &mut self.editor, &mut actions);
            });

        for action in actions {
            match action {
                EditorAction::StartDrag => ctx.send_viewport_cmd(egui::ViewportCommand::StartDrag),
                action => self.editor.apply(action, now),
            }
        }
        self.sync();

        let idle = Duration::from_millis(REPAINT_INTERVAL_MS);
        let next = self
            .editor
            .next_autosave_in(Instant::now())
            .map_or(idle, |remaining| remaining.min(idle));
        ctx.request_repaint_after(next);
    }

    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        egui::Rgba::TRANSPARENT.to_array()
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.editor.flush();
        self.sync();
        self.control.shutdown();
        info!("Sticky notes exiting");
    }
}

pub fn run_gui(store: Store, hidden: bool) -> Result<()> {
    let config = store.read_config();

    let mut viewport_builder = egui::ViewportBuilder::default()
        .with_title(defaults::window::TITLE)
        .with_inner_size([config.width as f32, config.height as f32])
        .with_min_inner_size([
            defaults::window::MIN_WIDTH as f32,
            defaults::window::MIN_HEIGHT as f32,
        ])
        .with_decorations(false)
        .with_transparent(true)
        .with_resizable(true)
        .with_visible(!hidden);

    if let (Some(x), Some(y)) = (config.x, config.y) {
        viewport_builder = viewport_builder.with_position([x as f32, y as f32]);
    }

    let options = NativeOptions {
        viewport: viewport_builder,
        ..Default::default()
    };

    eframe::run_native(
        defaults::window::TITLE,
        options,
        Box::new(move |cc| Ok(Box::new(StickyApp::new(cc, store, &config, hidden)))),
    )
    .map_err(|err| anyhow!("Failed to launch sticky notes window: {err}"))
}
