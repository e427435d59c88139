//! Global hotkey registration and OS backends

pub mod backend;
pub mod global_backend;
pub mod registrar;

pub use backend::HotkeyBackend;
pub use global_backend::GlobalBackend;
pub use registrar::{HotkeyAction, HotkeyRegistrar};
