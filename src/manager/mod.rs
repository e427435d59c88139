//! Note editor: egui front end talking to the control service over the ipc channel

mod app;
pub mod components;
mod key_capture;
pub mod state;

pub use app::run_gui;
