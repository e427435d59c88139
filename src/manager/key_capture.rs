//! Key capture for interactive hotkey recording
//!
//! Driven by egui key events while the window has focus. Modifiers accumulate
//! from the held state, the first non-modifier key press completes the
//! combination, and the following key release commits it. A bare Escape
//! cancels.

use eframe::egui::{self, Key, Modifiers};
use tracing::{debug, info};

use crate::config::KeyCombo;

/// Result of a key capture operation
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureResult {
    /// Combination was recorded and the key released
    Captured(KeyCombo),
    /// User pressed Escape to cancel
    Cancelled,
}

/// Key capture state for GUI display
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureState {
    /// Currently detected modifiers (live feedback)
    pub primary: bool,
    pub shift: bool,
    pub alt: bool,
    /// The main key that was pressed (None until a non-modifier key is pressed)
    pub key: Option<&'static str>,
    /// Human-readable description of what's being detected
    pub description: String,
}

impl CaptureState {
    pub fn new() -> Self {
        Self {
            primary: false,
            shift: false,
            alt: false,
            key: None,
            description: "Press a key...".to_string(),
        }
    }

    fn set_modifiers(&mut self, modifiers: Modifiers) {
        self.primary = modifiers.ctrl || modifiers.mac_cmd || modifiers.command;
        self.shift = modifiers.shift;
        self.alt = modifiers.alt;
    }

    fn combo(&self) -> Option<KeyCombo> {
        self.key
            .map(|key| KeyCombo::new(key, self.primary, self.shift, self.alt, false))
    }

    /// Update description based on current state
    pub fn update_description(&mut self) {
        if let Some(combo) = self.combo() {
            self.description = combo.display_name();
            return;
        }

        // Still waiting for main key
        let mut parts = Vec::new();
        if self.primary {
            parts.push(if cfg!(target_os = "macos") { "Cmd" } else { "Ctrl" });
        }
        if self.shift {
            parts.push("Shift");
        }
        if self.alt {
            parts.push("Alt");
        }

        self.description = if parts.is_empty() {
            "Press a key...".to_string()
        } else {
            format!("{}+?", parts.join("+"))
        };
    }
}

impl Default for CaptureState {
    fn default() -> Self {
        Self::new()
    }
}

/// In-progress recording
#[derive(Debug, Default)]
pub struct KeyCapture {
    state: CaptureState,
}

impl KeyCapture {
    pub fn new() -> Self {
        info!("Hotkey recording started");
        Self::default()
    }

    pub fn state(&self) -> &CaptureState {
        &self.state
    }

    /// Reflect held modifiers before a key has been pressed
    pub fn observe_modifiers(&mut self, modifiers: Modifiers) {
        if self.state.key.is_none() {
            self.state.set_modifiers(modifiers);
            self.state.update_description();
        }
    }

    /// Feed one key event; returns the outcome once recording ends
    pub fn handle_key(
        &mut self,
        key: Key,
        pressed: bool,
        modifiers: Modifiers,
    ) -> Option<CaptureResult> {
        if pressed {
            if key == Key::Escape && !modifiers.any() {
                info!("Hotkey recording cancelled");
                return Some(CaptureResult::Cancelled);
            }

            let Some(token) = key_token(key) else {
                debug!(?key, "Key cannot be used in a hotkey, ignoring");
                return None;
            };

            // The first completed combination wins until release
            if self.state.key.is_none() {
                self.state.set_modifiers(modifiers);
                self.state.key = Some(token);
                self.state.update_description();
            }
            return None;
        }

        let combo = self.state.combo()?;
        info!(hotkey = %combo, "Hotkey recorded");
        Some(CaptureResult::Captured(combo))
    }

    /// Pull this frame's key events out of egui so focused widgets never see them
    ///
    /// Returns the recording outcome if one of the events ended it.
    pub fn consume_events(&mut self, ctx: &egui::Context) -> Option<CaptureResult> {
        let (keys, modifiers) = ctx.input_mut(|i| {
            let mut keys = Vec::new();
            i.events.retain(|event| match event {
                egui::Event::Key {
                    key,
                    physical_key,
                    pressed,
                    repeat,
                    modifiers,
                    ..
                } => {
                    if !repeat {
                        keys.push((physical_key.unwrap_or(*key), *pressed, *modifiers));
                    }
                    false
                }
                egui::Event::Text(_) => false,
                _ => true,
            });
            (keys, i.modifiers)
        });

        self.observe_modifiers(modifiers);
        keys.into_iter()
            .find_map(|(key, pressed, modifiers)| self.handle_key(key, pressed, modifiers))
    }
}

/// Canonical combination token for an egui key
pub fn key_token(key: Key) -> Option<&'static str> {
    let token = match key {
        Key::A => "A",
        Key::B => "B",
        Key::C => "C",
        Key::D => "D",
        Key::E => "E",
        Key::F => "F",
        Key::G => "G",
        Key::H => "H",
        Key::I => "I",
        Key::J => "J",
        Key::K => "K",
        Key::L => "L",
        Key::M => "M",
        Key::N => "N",
        Key::O => "O",
        Key::P => "P",
        Key::Q => "Q",
        Key::R => "R",
        Key::S => "S",
        Key::T => "T",
        Key::U => "U",
        Key::V => "V",
        Key::W => "W",
        Key::X => "X",
        Key::Y => "Y",
        Key::Z => "Z",
        Key::Num0 => "0",
        Key::Num1 => "1",
        Key::Num2 => "2",
        Key::Num3 => "3",
        Key::Num4 => "4",
        Key::Num5 => "5",
        Key::Num6 => "6",
        Key::Num7 => "7",
        Key::Num8 => "8",
        Key::Num9 => "9",
        Key::F1 => "F1",
        Key::F2 => "F2",
        Key::F3 => "F3",
        Key::F4 => "F4",
        Key::F5 => "F5",
        Key::F6 => "F6",
        Key::F7 => "F7",
        Key::F8 => "F8",
        Key::F9 => "F9",
        Key::F10 => "F10",
        Key::F11 => "F11",
        Key::F12 => "F12",
        Key::F13 => "F13",
        Key::F14 => "F14",
        Key::F15 => "F15",
        Key::F16 => "F16",
        Key::F17 => "F17",
        Key::F18 => "F18",
        Key::F19 => "F19",
        Key::F20 => "F20",
        Key::F21 => "F21",
        Key::F22 => "F22",
        Key::F23 => "F23",
        Key::F24 => "F24",
        Key::Space => "Space",
        Key::Tab => "Tab",
        Key::Enter => "Enter",
        Key::Escape => "Escape",
        Key::Backspace => "Backspace",
        Key::Delete => "Delete",
        Key::Insert => "Insert",
        Key::Home => "Home",
        Key::End => "End",
        Key::PageUp => "PageUp",
        Key::PageDown => "PageDown",
        Key::ArrowUp => "Up",
        Key::ArrowDown => "Down",
        Key::ArrowLeft => "Left",
        Key::ArrowRight => "Right",
        Key::Backtick => "`",
        Key::Minus => "-",
        Key::Equals => "=",
        Key::OpenBracket => "[",
        Key::CloseBracket => "]",
        Key::Backslash => "\\",
        Key::Semicolon => ";",
        Key::Quote => "'",
        Key::Comma => ",",
        Key::Period => ".",
        Key::Slash => "/",
        _ => return None,
    };
    Some(token)
}
