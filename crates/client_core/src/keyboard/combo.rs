use std::{fmt, str::FromStr};

use thiserror::Error;

use super::target::KeyboardEvent;

const NAMED_KEYS: &[(&str, &str)] = &[
    ("escape", "Escape"),
    ("esc", "Escape"),
    ("enter", "Enter"),
    ("return", "Enter"),
    ("tab", "Tab"),
    ("space", " "),
    ("backspace", "Backspace"),
    ("delete", "Delete"),
    ("del", "Delete"),
    ("up", "ArrowUp"),
    ("down", "ArrowDown"),
    ("left", "ArrowLeft"),
    ("right", "ArrowRight"),
    ("home", "Home"),
    ("end", "End"),
    ("pageup", "PageUp"),
    ("pagedown", "PageDown"),
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyComboParseError {
    #[error("empty key combination")]
    Empty,
    #[error("unknown modifier `{0}`")]
    UnknownModifier(String),
    #[error("modifier `{0}` given more than once")]
    DuplicateModifier(String),
    #[error("unknown key `{0}`")]
    UnknownKey(String),
}

/// A key plus the exact set of modifiers that must be held, written like
/// `ctrl+s` or `ctrl+shift+k`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyCombo {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    pub meta: bool,
    /// Key value, compared ASCII case-insensitively.
    pub key: String,
}

impl KeyCombo {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            ctrl: false,
            shift: false,
            alt: false,
            meta: false,
            key: key.into(),
        }
    }

    pub fn ctrl_s() -> Self {
        Self {
            ctrl: true,
            ..Self::new("s")
        }
    }

    pub fn escape() -> Self {
        Self::new("Escape")
    }

    pub fn matches(&self, event: &KeyboardEvent) -> bool {
        event.ctrl_key == self.ctrl
            && event.shift_key == self.shift
            && event.alt_key == self.alt
            && event.meta_key == self.meta
            && event.key.eq_ignore_ascii_case(&self.key)
    }

    /// The keydown event a user pressing this combination produces.
    pub fn key_down_event(&self) -> KeyboardEvent {
        let mut event = KeyboardEvent::key_down(self.key.clone());
        event.ctrl_key = self.ctrl;
        event.shift_key = self.shift;
        event.alt_key = self.alt;
        event.meta_key = self.meta;
        event
    }
}

fn normalize_key(raw: &str) -> Result<String, KeyComboParseError> {
    let lower = raw.to_ascii_lowercase();
    if let Some((_, key)) = NAMED_KEYS.iter().find(|(name, _)| *name == lower) {
        return Ok((*key).to_string());
    }

    let mut chars = lower.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_graphic() => return Ok(c.to_string()),
        _ => {}
    }

    // f1 .. f12
    if let Some(n) = lower.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
        if (1..=12).contains(&n) {
            return Ok(format!("F{n}"));
        }
    }

    Err(KeyComboParseError::UnknownKey(raw.to_string()))
}

impl FromStr for KeyCombo {
    type Err = KeyComboParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('+').map(str::trim).collect();
        let Some((key, modifiers)) = parts.split_last() else {
            return Err(KeyComboParseError::Empty);
        };
        if key.is_empty() {
            return Err(KeyComboParseError::Empty);
        }

        let mut combo = KeyCombo::new(normalize_key(key)?);
        for modifier in modifiers {
            let flag = match modifier.to_ascii_lowercase().as_str() {
                "ctrl" | "control" => &mut combo.ctrl,
                "shift" => &mut combo.shift,
                "alt" | "option" => &mut combo.alt,
                "meta" | "cmd" | "super" => &mut combo.meta,
                _ => return Err(KeyComboParseError::UnknownModifier(modifier.to_string())),
            };
            if *flag {
                return Err(KeyComboParseError::DuplicateModifier(modifier.to_string()));
            }
            *flag = true;
        }
        Ok(combo)
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (held, name) in [
            (self.ctrl, "ctrl"),
            (self.shift, "shift"),
            (self.alt, "alt"),
            (self.meta, "meta"),
        ] {
            if held {
                write!(f, "{name}+")?;
            }
        }
        match self.key.as_str() {
            " " => f.write_str("space"),
            key => f.write_str(&key.to_ascii_lowercase()),
        }
    }
}
