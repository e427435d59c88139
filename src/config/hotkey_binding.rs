//! Key-combination grammar and key name mapping
//!
//! A combination is written as `+`-joined tokens, e.g. `CommandOrControl+Shift+N`.
//! Modifier names are case-insensitive; exactly one non-modifier key is required.
//! The empty string means "no hotkey" and is handled by callers before parsing.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Errors produced while parsing a combination string
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyComboParseError {
    #[error("key combination is empty")]
    Empty,
    #[error("empty token in key combination '{0}'")]
    EmptyToken(String),
    #[error("key combination '{0}' has no key, only modifiers")]
    MissingKey(String),
    #[error("key combination has more than one key ('{first}' and '{second}')")]
    MultipleKeys { first: String, second: String },
    #[error("unknown key '{0}'")]
    UnknownKey(String),
}

/// A parsed global key combination
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyCombo {
    /// Platform accelerator: Cmd on macOS, Ctrl elsewhere
    pub primary: bool,

    pub shift: bool,

    pub alt: bool,

    /// Super/Windows/Meta key
    pub super_key: bool,

    /// Canonical key token (see [`canonical_key`])
    pub key: String,
}

impl KeyCombo {
    /// Build a combination from a canonical key and modifier flags
    pub fn new(key: impl Into<String>, primary: bool, shift: bool, alt: bool, super_key: bool) -> Self {
        Self {
            primary,
            shift,
            alt,
            super_key,
            key: key.into(),
        }
    }

    /// Parse an optional combination: empty or whitespace-only means "none"
    pub fn parse_optional(raw: &str) -> Result<Option<Self>, KeyComboParseError> {
        if raw.trim().is_empty() {
            return Ok(None);
        }
        raw.parse().map(Some)
    }

    /// Storage form, e.g. `CommandOrControl+Shift+A`
    pub fn accelerator(&self) -> String {
        let mut parts: Vec<&str> = Vec::with_capacity(5);
        if self.primary {
            parts.push("CommandOrControl");
        }
        if self.shift {
            parts.push("Shift");
        }
        if self.alt {
            parts.push("Alt");
        }
        if self.super_key {
            parts.push("Super");
        }
        parts.push(&self.key);
        parts.join("+")
    }

    /// Human-readable form for the UI, e.g. `Ctrl+Shift+A`
    pub fn display_name(&self) -> String {
        let mut parts: Vec<&str> = Vec::with_capacity(5);
        if self.primary {
            parts.push(primary_label());
        }
        if self.shift {
            parts.push("Shift");
        }
        if self.alt {
            parts.push("Alt");
        }
        if self.super_key {
            parts.push(super_label());
        }
        parts.push(&self.key);
        parts.join("+")
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.accelerator())
    }
}

impl FromStr for KeyCombo {
    type Err = KeyComboParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if raw.trim().is_empty() {
            return Err(KeyComboParseError::Empty);
        }

        let mut combo = KeyCombo::new(String::new(), false, false, false, false);
        let mut main_key: Option<String> = None;

        for token in raw.split('+').map(str::trim) {
            if token.is_empty() {
                return Err(KeyComboParseError::EmptyToken(raw.to_string()));
            }

            match token.to_ascii_lowercase().as_str() {
                "commandorcontrol" | "cmdorctrl" | "cmdorcontrol" | "commandorctrl" | "ctrl"
                | "control" | "cmd" | "command" => combo.primary = true,
                "shift" => combo.shift = true,
                "alt" | "option" => combo.alt = true,
                "super" | "meta" | "win" => combo.super_key = true,
                _ => {
                    let key = canonical_key(token)
                        .ok_or_else(|| KeyComboParseError::UnknownKey(token.to_string()))?;
                    if let Some(first) = main_key {
                        return Err(KeyComboParseError::MultipleKeys { first, second: key });
                    }
                    main_key = Some(key);
                }
            }
        }

        combo.key = main_key.ok_or_else(|| KeyComboParseError::MissingKey(raw.to_string()))?;
        Ok(combo)
    }
}

/// Format a stored combination for display; unparseable strings are shown as-is
pub fn display_accelerator(raw: &str) -> String {
    match KeyCombo::parse_optional(raw) {
        Ok(Some(combo)) => combo.display_name(),
        Ok(None) => String::new(),
        Err(_) => raw.to_string(),
    }
}

fn primary_label() -> &'static str {
    if cfg!(target_os = "macos") { "Cmd" } else { "Ctrl" }
}

fn super_label() -> &'static str {
    if cfg!(target_os = "windows") { "Win" } else { "Super" }
}

/// Named keys: (canonical token, accepted spellings in lowercase)
const NAMED_KEYS: &[(&str, &[&str])] = &[
    ("Space", &["space"]),
    ("Tab", &["tab"]),
    ("Enter", &["enter", "return"]),
    ("Escape", &["escape", "esc"]),
    ("Backspace", &["backspace"]),
    ("Delete", &["delete", "del"]),
    ("Insert", &["insert", "ins"]),
    ("Home", &["home"]),
    ("End", &["end"]),
    ("PageUp", &["pageup", "pgup"]),
    ("PageDown", &["pagedown", "pgdn"]),
    ("Up", &["up", "arrowup"]),
    ("Down", &["down", "arrowdown"]),
    ("Left", &["left", "arrowleft"]),
    ("Right", &["right", "arrowright"]),
    ("`", &["`", "backquote", "backtick", "grave"]),
    ("-", &["-", "minus"]),
    ("=", &["=", "equal", "equals"]),
    ("[", &["[", "bracketleft", "openbracket"]),
    ("]", &["]", "bracketright", "closebracket"]),
    ("\\", &["\\", "backslash"]),
    (";", &[";", "semicolon"]),
    ("'", &["'", "quote"]),
    (",", &[",", "comma"]),
    (".", &[".", "period"]),
    ("/", &["/", "slash"]),
];

/// Normalize a key token to its canonical spelling
///
/// Letters become uppercase, digits stay as-is, function keys are `F1`..`F24`,
/// punctuation uses the literal character and named keys use the spellings in
/// [`NAMED_KEYS`].
pub fn canonical_key(token: &str) -> Option<String> {
    let mut chars = token.chars();
    if let (Some(c), None) = (chars.next(), chars.next())
        && c.is_ascii_alphanumeric()
    {
        return Some(c.to_ascii_uppercase().to_string());
    }

    let lower = token.to_ascii_lowercase();

    if let Some(num) = lower.strip_prefix('f')
        && let Ok(n) = num.parse::<u8>()
        && (1..=24).contains(&n)
        && !num.starts_with('0')
    {
        return Some(format!("F{n}"));
    }

    NAMED_KEYS
        .iter()
        .find(|(_, spellings)| spellings.contains(&lower.as_str()))
        .map(|(canonical, _)| canonical.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_default_window_hotkey() {
        let combo: KeyCombo = "CommandOrControl+\\".parse().unwrap();
        assert!(combo.primary);
        assert!(!combo.shift);
        assert_eq!(combo.key, "\\");
        assert_eq!(combo.accelerator(), "CommandOrControl+\\");
    }

    #[test]
    fn test_modifiers_are_case_insensitive() {
        let combo: KeyCombo = "ctrl+SHIFT+alt+Super+k".parse().unwrap();
        assert_eq!(combo, KeyCombo::new("K", true, true, true, true));
    }

    #[test]
    fn test_accelerator_orders_modifiers() {
        let combo: KeyCombo = "Alt + Shift + CmdOrCtrl + f5".parse().unwrap();
        assert_eq!(combo.accelerator(), "CommandOrControl+Shift+Alt+F5");
    }

    #[test]
    fn test_named_key_aliases() {
        assert_eq!("Ctrl+ArrowUp".parse::<KeyCombo>().unwrap().key, "Up");
        assert_eq!("Ctrl+Return".parse::<KeyCombo>().unwrap().key, "Enter");
        assert_eq!("Ctrl+Esc".parse::<KeyCombo>().unwrap().key, "Escape");
        assert_eq!("Ctrl+Backslash".parse::<KeyCombo>().unwrap().key, "\\");
        assert_eq!("Ctrl+`".parse::<KeyCombo>().unwrap().key, "`");
    }

    #[test]
    fn test_bare_key_without_modifiers() {
        let combo: KeyCombo = "F12".parse().unwrap();
        assert_eq!(combo, KeyCombo::new("F12", false, false, false, false));
    }

    #[test]
    fn test_rejects_modifier_only() {
        assert_eq!(
            "Ctrl+Shift".parse::<KeyCombo>(),
            Err(KeyComboParseError::MissingKey("Ctrl+Shift".to_string()))
        );
    }

    #[test]
    fn test_rejects_two_keys() {
        assert!(matches!(
            "Ctrl+A+B".parse::<KeyCombo>(),
            Err(KeyComboParseError::MultipleKeys { .. })
        ));
    }

    #[test]
    fn test_rejects_unknown_and_empty_tokens() {
        assert_eq!(
            "Ctrl+Banana".parse::<KeyCombo>(),
            Err(KeyComboParseError::UnknownKey("Banana".to_string()))
        );
        assert!(matches!(
            "Ctrl++A".parse::<KeyCombo>(),
            Err(KeyComboParseError::EmptyToken(_))
        ));
        assert_eq!("".parse::<KeyCombo>(), Err(KeyComboParseError::Empty));
    }

    #[test]
    fn test_parse_optional_empty_means_none() {
        assert_eq!(KeyCombo::parse_optional("").unwrap(), None);
        assert_eq!(KeyCombo::parse_optional("   ").unwrap(), None);
        assert!(KeyCombo::parse_optional("Ctrl+A").unwrap().is_some());
    }

    #[test]
    fn test_function_key_range() {
        assert_eq!(canonical_key("f1"), Some("F1".to_string()));
        assert_eq!(canonical_key("F24"), Some("F24".to_string()));
        assert_eq!(canonical_key("F25"), None);
        assert_eq!(canonical_key("F0"), None);
        assert_eq!(canonical_key("F01"), None);
    }

    #[test]
    fn test_display_name() {
        let combo = KeyCombo::new("N", true, true, false, false);
        let expected = if cfg!(target_os = "macos") {
            "Cmd+Shift+N"
        } else {
            "Ctrl+Shift+N"
        };
        assert_eq!(combo.display_name(), expected);
    }

    #[test]
    fn test_display_accelerator_falls_back_to_raw() {
        assert_eq!(display_accelerator(""), "");
        assert_eq!(display_accelerator("Ctrl+Nope"), "Ctrl+Nope");
    }
}
