//! OS global hotkey backend built on the `global-hotkey` crate
//!
//! The manager must be created on the thread that runs the native event loop.
//! Press events arrive on a crate-global channel; a forwarding thread moves
//! them into our own channel and wakes the event loop so a hidden window still
//! gets serviced.
//!
//! Limitations:
//! - Wayland sessions without XWayland cannot grab global keys
//! - A combination already grabbed by another application fails to register

use std::sync::mpsc::{self, Receiver};
use std::thread;

use anyhow::{Result, anyhow};
use global_hotkey::hotkey::{Code, HotKey, Modifiers};
use global_hotkey::{Error as HotkeyError, GlobalHotKeyEvent, GlobalHotKeyManager, HotKeyState};
use tracing::{debug, error, info, warn};

use super::backend::{BindingId, HotkeyBackend};
use crate::config::KeyCombo;

pub struct GlobalBackend {
    manager: Option<GlobalHotKeyManager>,
    registered: Vec<HotKey>,
    fired_rx: Receiver<BindingId>,
}

impl GlobalBackend {
    /// Create the OS hotkey manager; `wake` is invoked after every press
    ///
    /// If the OS service is unavailable the backend still constructs, and every
    /// `bind` fails with a logged error.
    pub fn new(wake: impl Fn() + Send + 'static) -> Self {
        let (fired_tx, fired_rx) = mpsc::channel();

        let manager = match GlobalHotKeyManager::new() {
            Ok(manager) => Some(manager),
            Err(e) => {
                error!(error = %e, "Failed to create global hotkey manager, hotkeys disabled");
                None
            }
        };

        if manager.is_some() {
            let spawned = thread::Builder::new()
                .name("hotkey-events".to_string())
                .spawn(move || {
                    let receiver = GlobalHotKeyEvent::receiver();
                    while let Ok(event) = receiver.recv() {
                        // Only respond to key press, not release
                        if event.state != HotKeyState::Pressed {
                            continue;
                        }
                        debug!(id = event.id, "Global hotkey pressed");
                        if fired_tx.send(event.id).is_err() {
                            break;
                        }
                        wake();
                    }
                });

            if let Err(e) = spawned {
                error!(error = %e, "Failed to spawn hotkey event thread");
            }
        }

        Self {
            manager,
            registered: Vec::new(),
            fired_rx,
        }
    }
}

impl HotkeyBackend for GlobalBackend {
    fn bind(&mut self, combo: &KeyCombo) -> Result<BindingId> {
        let manager = self
            .manager
            .as_ref()
            .ok_or_else(|| anyhow!("Global hotkey manager is unavailable"))?;

        let hotkey = to_hotkey(combo)?;

        if let Err(e) = manager.register(hotkey) {
            return Err(match e {
                HotkeyError::AlreadyRegistered(hk) => anyhow!(
                    "Hotkey '{}' is already registered (id {})",
                    combo,
                    hk.id()
                ),
                HotkeyError::FailedToRegister(msg) => anyhow!(
                    "System rejected hotkey '{}': {}. It may be claimed by another application",
                    combo,
                    msg
                ),
                other => anyhow!("Failed to register hotkey '{}': {}", combo, other),
            });
        }

        self.registered.push(hotkey);
        info!(hotkey = %combo, id = hotkey.id(), "Registered global hotkey");
        Ok(hotkey.id())
    }

    fn unbind_all(&mut self) {
        let Some(ref manager) = self.manager else {
            self.registered.clear();
            return;
        };

        for hotkey in self.registered.drain(..) {
            if let Err(e) = manager.unregister(hotkey) {
                // Internal tracking is already cleared, continue with the rest
                warn!(id = hotkey.id(), error = %e, "Failed to unregister hotkey");
            }
        }
    }

    fn drain_fired(&mut self) -> Vec<BindingId> {
        self.fired_rx.try_iter().collect()
    }

    fn name(&self) -> &'static str {
        "global-hotkey"
    }
}

impl Drop for GlobalBackend {
    fn drop(&mut self) {
        self.unbind_all();
    }
}

/// Translate a parsed combination into the crate's hotkey type
fn to_hotkey(combo: &KeyCombo) -> Result<HotKey> {
    let code = key_code(&combo.key)
        .ok_or_else(|| anyhow!("Key '{}' cannot be used as a global hotkey", combo.key))?;

    let mut mods = Modifiers::empty();
    if combo.primary {
        mods |= primary_modifier();
    }
    if combo.shift {
        mods |= Modifiers::SHIFT;
    }
    if combo.alt {
        mods |= Modifiers::ALT;
    }
    if combo.super_key {
        mods |= Modifiers::SUPER;
    }

    let mods = if mods.is_empty() { None } else { Some(mods) };
    Ok(HotKey::new(mods, code))
}

fn primary_modifier() -> Modifiers {
    if cfg!(target_os = "macos") {
        Modifiers::META
    } else {
        Modifiers::CONTROL
    }
}

/// Map a canonical key token to a physical key code
fn key_code(key: &str) -> Option<Code> {
    let code = match key {
        "A" => Code::KeyA,
        "B" => Code::KeyB,
        "C" => Code::KeyC,
        "D" => Code::KeyD,
        "E" => Code::KeyE,
        "F" => Code::KeyF,
        "G" => Code::KeyG,
        "H" => Code::KeyH,
        "I" => Code::KeyI,
        "J" => Code::KeyJ,
        "K" => Code::KeyK,
        "L" => Code::KeyL,
        "M" => Code::KeyM,
        "N" => Code::KeyN,
        "O" => Code::KeyO,
        "P" => Code::KeyP,
        "Q" => Code::KeyQ,
        "R" => Code::KeyR,
        "S" => Code::KeyS,
        "T" => Code::KeyT,
        "U" => Code::KeyU,
        "V" => Code::KeyV,
        "W" => Code::KeyW,
        "X" => Code::KeyX,
        "Y" => Code::KeyY,
        "Z" => Code::KeyZ,
        "0" => Code::Digit0,
        "1" => Code::Digit1,
        "2" => Code::Digit2,
        "3" => Code::Digit3,
        "4" => Code::Digit4,
        "5" => Code::Digit5,
        "6" => Code::Digit6,
        "7" => Code::Digit7,
        "8" => Code::Digit8,
        "9" => Code::Digit9,
        "F1" => Code::F1,
        "F2" => Code::F2,
        "F3" => Code::F3,
        "F4" => Code::F4,
        "F5" => Code::F5,
        "F6" => Code::F6,
        "F7" => Code::F7,
        "F8" => Code::F8,
        "F9" => Code::F9,
        "F10" => Code::F10,
        "F11" => Code::F11,
        "F12" => Code::F12,
        "F13" => Code::F13,
        "F14" => Code::F14,
        "F15" => Code::F15,
        "F16" => Code::F16,
        "F17" => Code::F17,
        "F18" => Code::F18,
        "F19" => Code::F19,
        "F20" => Code::F20,
        "F21" => Code::F21,
        "F22" => Code::F22,
        "F23" => Code::F23,
        "F24" => Code::F24,
        "Space" => Code::Space,
        "Tab" => Code::Tab,
        "Enter" => Code::Enter,
        "Escape" => Code::Escape,
        "Backspace" => Code::Backspace,
        "Delete" => Code::Delete,
        "Insert" => Code::Insert,
        "Home" => Code::Home,
        "End" => Code::End,
        "PageUp" => Code::PageUp,
        "PageDown" => Code::PageDown,
        "Up" => Code::ArrowUp,
        "Down" => Code::ArrowDown,
        "Left" => Code::ArrowLeft,
        "Right" => Code::ArrowRight,
        "`" => Code::Backquote,
        "-" => Code::Minus,
        "=" => Code::Equal,
        "[" => Code::BracketLeft,
        "]" => Code::BracketRight,
        "\\" => Code::Backslash,
        ";" => Code::Semicolon,
        "'" => Code::Quote,
        "," => Code::Comma,
        "." => Code::Period,
        "/" => Code::Slash,
        _ => return None,
    };
    Some(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_hotkey_translates() {
        let combo: KeyCombo = "CommandOrControl+\\".parse().unwrap();
        let hotkey = to_hotkey(&combo).unwrap();
        assert_eq!(hotkey, HotKey::new(Some(primary_modifier()), Code::Backslash));
    }

    #[test]
    fn test_modifier_flags_translate() {
        let combo: KeyCombo = "Shift+Alt+Super+F5".parse().unwrap();
        let hotkey = to_hotkey(&combo).unwrap();
        assert_eq!(
            hotkey,
            HotKey::new(
                Some(Modifiers::SHIFT | Modifiers::ALT | Modifiers::SUPER),
                Code::F5
            )
        );
    }

    #[test]
    fn test_every_canonical_key_has_a_code() {
        let mut keys: Vec<String> = ('A'..='Z').map(|c| c.to_string()).collect();
        keys.extend(('0'..='9').map(|c| c.to_string()));
        keys.extend((1..=24).map(|n| format!("F{n}")));
        for named in [
            "Space", "Tab", "Enter", "Escape", "Backspace", "Delete", "Insert", "Home", "End",
            "PageUp", "PageDown", "Up", "Down", "Left", "Right", "`", "-", "=", "[", "]", "\\",
            ";", "'", ",", ".", "/",
        ] {
            keys.push(named.to_string());
        }

        for key in keys {
            assert!(key_code(&key).is_some(), "no code for {key}");
        }
    }
}
