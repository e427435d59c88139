//! Persisted window configuration
//!
//! One JSON object holding window geometry, opacity, font size, the window-level
//! toggle hotkey and the launch-at-login flag. Fields missing from an older or
//! hand-edited document fall back to their defaults individually.

use serde::{Deserialize, Serialize};

use crate::constants::defaults;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WindowConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<i32>,
    pub width: u32,
    pub height: u32,
    pub hotkey: String,
    pub opacity: f32,
    pub font_size: u32,
    pub auto_launch: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            x: None,
            y: None,
            width: defaults::window::WIDTH,
            height: defaults::window::HEIGHT,
            hotkey: defaults::hotkey::WINDOW_TOGGLE.to_string(),
            opacity: defaults::opacity::DEFAULT,
            font_size: defaults::font::DEFAULT_SIZE,
            auto_launch: false,
        }
    }
}

impl WindowConfig {
    /// Clamp every bounded field into its valid range
    pub fn sanitized(mut self) -> Self {
        self.width = self.width.max(defaults::window::MIN_WIDTH);
        self.height = self.height.max(defaults::window::MIN_HEIGHT);
        self.opacity = clamp_opacity(self.opacity as f64);
        self.font_size = clamp_font_size(self.font_size as i64);
        self
    }

    /// Overlay the supplied fields of `patch` onto this config
    pub fn merged(mut self, patch: &ConfigPatch) -> Self {
        if let Some((x, y)) = patch.position {
            self.x = Some(x);
            self.y = Some(y);
        }
        if let Some(width) = patch.width {
            self.width = width;
        }
        if let Some(height) = patch.height {
            self.height = height;
        }
        if let Some(ref hotkey) = patch.hotkey {
            self.hotkey = hotkey.clone();
        }
        if let Some(opacity) = patch.opacity {
            self.opacity = opacity;
        }
        if let Some(font_size) = patch.font_size {
            self.font_size = font_size;
        }
        if let Some(auto_launch) = patch.auto_launch {
            self.auto_launch = auto_launch;
        }
        self.sanitized()
    }

    /// Window toggle hotkey, substituting the default when none is stored
    pub fn effective_hotkey(&self) -> &str {
        if self.hotkey.is_empty() {
            defaults::hotkey::WINDOW_TOGGLE
        } else {
            &self.hotkey
        }
    }
}

/// A partial config update; `None` fields keep their persisted value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigPatch {
    pub position: Option<(i32, i32)>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub hotkey: Option<String>,
    pub opacity: Option<f32>,
    pub font_size: Option<u32>,
    pub auto_launch: Option<bool>,
}

impl ConfigPatch {
    pub fn hotkey(hotkey: impl Into<String>) -> Self {
        Self {
            hotkey: Some(hotkey.into()),
            ..Default::default()
        }
    }

    pub fn opacity(opacity: f32) -> Self {
        Self {
            opacity: Some(opacity),
            ..Default::default()
        }
    }

    pub fn font_size(font_size: u32) -> Self {
        Self {
            font_size: Some(font_size),
            ..Default::default()
        }
    }

    pub fn auto_launch(enable: bool) -> Self {
        Self {
            auto_launch: Some(enable),
            ..Default::default()
        }
    }
}

/// Clamp an opacity request into `[0.3, 1.0]`; non-finite input yields the default
pub fn clamp_opacity(value: f64) -> f32 {
    if !value.is_finite() {
        return defaults::opacity::DEFAULT;
    }
    (value as f32).clamp(defaults::opacity::MIN, defaults::opacity::MAX)
}

/// Clamp a font size request into `[12, 24]`
pub fn clamp_font_size(value: i64) -> u32 {
    value.clamp(
        defaults::font::MIN_SIZE as i64,
        defaults::font::MAX_SIZE as i64,
    ) as u32
}
