//! Application-wide constants
//!
//! This module contains all magic numbers and string literals used throughout
//! the application, providing a single source of truth for constant values.

/// Persisted document locations
pub mod config {
    /// Directory name under the per-user config directory
    pub const APP_DIR: &str = "sticky-notes";

    /// Window configuration document
    pub const WINDOW_CONFIG_FILENAME: &str = "window-config.json";

    /// Note collection document
    pub const NOTES_FILENAME: &str = "notes.json";

    /// Environment variable overriding the data directory
    pub const DATA_DIR_ENV: &str = "STICKY_NOTES_DATA_DIR";
}

/// Default values and limits for the window configuration
pub mod defaults {
    pub mod window {
        pub const WIDTH: u32 = 300;
        pub const HEIGHT: u32 = 400;
        pub const MIN_WIDTH: u32 = 200;
        pub const MIN_HEIGHT: u32 = 150;
        pub const TITLE: &str = "Sticky Notes";
    }

    pub mod opacity {
        pub const DEFAULT: f32 = 0.8;
        pub const MIN: f32 = 0.3;
        pub const MAX: f32 = 1.0;
        /// Slider granularity in the settings panel
        pub const STEP: f64 = 0.05;
    }

    pub mod font {
        pub const DEFAULT_SIZE: u32 = 14;
        pub const MIN_SIZE: u32 = 12;
        pub const MAX_SIZE: u32 = 24;
    }

    pub mod hotkey {
        /// Window-level toggle combination used until the user records another one
        pub const WINDOW_TOGGLE: &str = "CommandOrControl+\\";
    }

    pub mod note {
        /// Id of the note reinstated when the collection would become empty
        pub const DEFAULT_ID: &str = "default";
    }
}

/// Note editor timing and layout
pub mod editor {
    /// Autosave delay after the last keystroke
    pub const AUTOSAVE_DEBOUNCE_MS: u64 = 500;

    /// Characters of note content shown on a tab
    pub const TAB_PREVIEW_CHARS: usize = 8;

    /// Placeholder tab label for empty notes
    pub const EMPTY_TAB_LABEL: &str = "...";

    /// Idle repaint interval so timers and hotkey events get serviced
    pub const REPAINT_INTERVAL_MS: u64 = 100;
}

/// Login-item integration
pub mod autolaunch {
    /// Name of the XDG autostart entry
    pub const DESKTOP_ENTRY_FILENAME: &str = "sticky-notes.desktop";

    /// Autostart directory under the per-user config directory
    pub const AUTOSTART_DIR: &str = "autostart";

    /// Per-user Run key under HKEY_CURRENT_USER
    #[cfg(windows)]
    pub const RUN_KEY: &str = r"Software\Microsoft\Windows\CurrentVersion\Run";

    #[cfg(windows)]
    pub const RUN_VALUE_NAME: &str = "Sticky Notes";
}

/// UI colours
pub mod gui {
    use eframe::egui::Color32;

    pub const TEXT_PRIMARY: Color32 = Color32::WHITE;
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(156, 163, 175);
    pub const TEXT_FAINT: Color32 = Color32::from_rgb(107, 114, 128);
    pub const ACCENT_HOTKEY: Color32 = Color32::from_rgb(96, 165, 250);
    pub const RECORDING: Color32 = Color32::from_rgb(202, 138, 4);
    pub const DANGER: Color32 = Color32::from_rgb(248, 113, 113);
    pub const SELECTED_FILL: Color32 = Color32::from_rgba_premultiplied(26, 26, 26, 26);
    pub const SETTINGS_FILL: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 128);

    pub const TITLE_BAR_HEIGHT: f32 = 24.0;
    pub const STATUS_BAR_HEIGHT: f32 = 20.0;
}
