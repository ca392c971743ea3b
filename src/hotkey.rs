//! Hotkey Chords
//!
//! Parses chord strings such as `"Ctrl+H"` and matches them against key
//! presses. A match requires the exact modifier set.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChordError {
    #[error("empty hotkey")]
    Empty,
    #[error("hotkey has no key")]
    MissingKey,
    #[error("hotkey has more than one key: {0}")]
    ExtraKey(String),
    #[error("unsupported hotkey token: {0}")]
    UnknownToken(String),
}

/// Keys accepted by name, stored in their normalized form
const NAMED_KEYS: &[&str] = &[
    "space", "enter", "tab", "escape", "backspace", "delete", "insert", "home", "end",
    "pageup", "pagedown", "arrowup", "arrowdown", "arrowleft", "arrowright",
];

/// A parsed key chord
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chord {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    pub meta: bool,
    /// Normalized lowercase key name
    pub key: String,
}

/// One key-down as seen by the UI
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyPress {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    pub meta: bool,
    pub key: String,
}

impl KeyPress {
    pub fn from_event(ev: &web_sys::KeyboardEvent) -> Self {
        Self {
            ctrl: ev.ctrl_key(),
            shift: ev.shift_key(),
            alt: ev.alt_key(),
            meta: ev.meta_key(),
            key: ev.key(),
        }
    }

    pub fn is_escape(&self) -> bool {
        normalize_key(&self.key) == "escape"
    }
}

/// Map browser key values and user aliases onto one spelling
fn normalize_key(key: &str) -> String {
    if key == " " {
        return "space".to_string();
    }
    let lower = key.trim().to_lowercase();
    match lower.as_str() {
        "esc" => "escape".to_string(),
        "del" => "delete".to_string(),
        "return" => "enter".to_string(),
        "up" => "arrowup".to_string(),
        "down" => "arrowdown".to_string(),
        "left" => "arrowleft".to_string(),
        "right" => "arrowright".to_string(),
        _ => lower,
    }
}

fn is_valid_key(key: &str) -> bool {
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => c.is_ascii_alphanumeric(),
        _ => {
            if let Some(num) = key.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
                return (1..=12).contains(&num);
            }
            NAMED_KEYS.contains(&key)
        }
    }
}

impl FromStr for Chord {
    type Err = ChordError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = text
            .split('+')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();
        if parts.is_empty() {
            return Err(ChordError::Empty);
        }

        let mut chord = Chord {
            ctrl: false,
            shift: false,
            alt: false,
            meta: false,
            key: String::new(),
        };
        for part in parts {
            match part.to_uppercase().as_str() {
                "CTRL" | "CONTROL" => chord.ctrl = true,
                "SHIFT" => chord.shift = true,
                "ALT" => chord.alt = true,
                "WIN" | "META" | "CMD" | "SUPER" => chord.meta = true,
                _ => {
                    let key = normalize_key(part);
                    if !is_valid_key(&key) {
                        return Err(ChordError::UnknownToken(part.to_string()));
                    }
                    if !chord.key.is_empty() {
                        return Err(ChordError::ExtraKey(part.to_string()));
                    }
                    chord.key = key;
                }
            }
        }
        if chord.key.is_empty() {
            return Err(ChordError::MissingKey);
        }
        Ok(chord)
    }
}

impl Chord {
    pub fn matches(&self, press: &KeyPress) -> bool {
        self.ctrl == press.ctrl
            && self.shift == press.shift
            && self.alt == press.alt
            && self.meta == press.meta
            && self.key == normalize_key(&press.key)
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("Ctrl".to_string());
        }
        if self.shift {
            parts.push("Shift".to_string());
        }
        if self.alt {
            parts.push("Alt".to_string());
        }
        if self.meta {
            parts.push("Meta".to_string());
        }
        let key = if self.key.chars().count() == 1 {
            self.key.to_uppercase()
        } else {
            let mut chars = self.key.chars();
            chars
                .next()
                .map(|c| c.to_uppercase().collect::<String>() + chars.as_str())
                .unwrap_or_default()
        };
        parts.push(key);
        write!(f, "{}", parts.join("+"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(ctrl: bool, shift: bool, alt: bool, meta: bool, key: &str) -> KeyPress {
        KeyPress { ctrl, shift, alt, meta, key: key.to_string() }
    }

    #[test]
    fn test_ctrl_h_matches_only_exact_modifiers() {
        let chord: Chord = "Ctrl+H".parse().unwrap();
        assert!(chord.matches(&press(true, false, false, false, "h")));
        assert!(chord.matches(&press(true, false, false, false, "H")));

        assert!(!chord.matches(&press(true, true, false, false, "h")));
        assert!(!chord.matches(&press(true, false, true, false, "h")));
        assert!(!chord.matches(&press(true, false, false, true, "h")));
        assert!(!chord.matches(&press(false, false, false, false, "h")));
        assert!(!chord.matches(&press(true, false, false, false, "j")));
    }

    #[test]
    fn test_parse_accepts_spacing_and_aliases() {
        let chord: Chord = " control + shift + f5 ".parse().unwrap();
        assert!(chord.ctrl && chord.shift && !chord.alt);
        assert_eq!(chord.key, "f5");

        let space: Chord = "Alt+Space".parse().unwrap();
        assert!(space.matches(&press(false, false, true, false, " ")));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<Chord>(), Err(ChordError::Empty));
        assert_eq!("Ctrl+Shift".parse::<Chord>(), Err(ChordError::MissingKey));
        assert_eq!("Ctrl+F13".parse::<Chord>(), Err(ChordError::UnknownToken("F13".into())));
        assert_eq!("Ctrl+A+B".parse::<Chord>(), Err(ChordError::ExtraKey("B".into())));
    }

    #[test]
    fn test_display_round_trip() {
        let chord: Chord = "shift+ctrl+k".parse().unwrap();
        assert_eq!(chord.to_string(), "Ctrl+Shift+K");
        assert_eq!(chord.to_string().parse::<Chord>().unwrap(), chord);
    }

    #[test]
    fn test_escape_detection() {
        assert!(press(false, false, false, false, "Escape").is_escape());
        assert!(!press(false, false, false, false, "Enter").is_escape());
    }
}
