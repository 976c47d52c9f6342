//! Keyboard shortcuts for interactive front-ends.

use moodreel_models::Mood;
use std::fmt;
use std::str::FromStr;

pub const RANDOM_KEY: char = 'r';
pub const FOCUS_MOODS_KEY: char = 'm';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Char(char),
    /// Modifier (ctrl/cmd) plus a letter.
    Ctrl(char),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Escape => write!(f, "esc"),
            Key::Char(c) => write!(f, "{}", c),
            Key::Ctrl(c) => write!(f, "ctrl+{}", c),
        }
    }
}

impl FromStr for Key {
    type Err = String;

    /// Accepts `esc`, `escape`, `ctrl+m`, `cmd+m`, `^m` and single characters.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        if lower == "esc" || lower == "escape" {
            return Ok(Key::Escape);
        }
        let modified = lower
            .strip_prefix("ctrl+")
            .or_else(|| lower.strip_prefix("cmd+"))
            .or_else(|| lower.strip_prefix('^'));
        if let Some(rest) = modified {
            return single_char(rest).map(Key::Ctrl).ok_or_else(|| format!("Unknown key: {}", s));
        }
        single_char(&lower).map(Key::Char).ok_or_else(|| format!("Unknown key: {}", s))
    }
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

/// Where focus is when the key arrives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyContext {
    pub text_input_focused: bool,
    pub detail_open: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    CloseDetail,
    SelectMood(Mood),
    RandomPick,
    FocusMoods,
}

/// Map a key to a shortcut. Every shortcut is off while a text input has focus.
pub fn resolve(key: Key, ctx: KeyContext) -> Option<Shortcut> {
    if ctx.text_input_focused {
        return None;
    }
    match key {
        Key::Escape if ctx.detail_open => Some(Shortcut::CloseDetail),
        Key::Escape => None,
        Key::Ctrl(c) if c.eq_ignore_ascii_case(&FOCUS_MOODS_KEY) => Some(Shortcut::FocusMoods),
        Key::Ctrl(_) => None,
        Key::Char(c) if c.eq_ignore_ascii_case(&RANDOM_KEY) => Some(Shortcut::RandomPick),
        Key::Char(c) => c
            .to_digit(10)
            .and_then(|d| Mood::from_position(d as usize))
            .map(Shortcut::SelectMood),
    }
}
