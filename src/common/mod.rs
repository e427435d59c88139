//! Shared utilities used by the control service and the editor

pub mod debug;
pub mod ipc;
