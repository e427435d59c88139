//! Request handlers grouped by concern

pub mod notes;
pub mod settings;
pub mod window;
