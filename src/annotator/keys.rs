// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Keyboard shortcuts.
//!
//! | key        | action                          |
//! |------------|---------------------------------|
//! | `z`        | undo last label                 |
//! | `s`        | save labeled image              |
//! | `r` / `t`  | rotate counter-clockwise / clockwise |
//! | `o` / `p`  | label mode / remove mode        |
//! | `c`        | clear all labels                |
//! | `1`..`9`   | font size 8, 16, … 72           |
//! | `-` / `=`  | index down / up by one          |
//!
//! With Ctrl or Alt held only `z` and `s` are recognised.

use super::{Command, Mode, Rotation};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyModifiers {
    pub ctrl: bool,
    pub alt: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub key: char,
    pub modifiers: KeyModifiers,
}

impl KeyPress {
    pub fn plain(key: char) -> Self {
        Self {
            key,
            modifiers: KeyModifiers::default(),
        }
    }
}

/// Map a key press to the command it triggers, if any.
pub fn command_for_key(press: KeyPress) -> Option<Command> {
    if press.modifiers.ctrl || press.modifiers.alt {
        return match press.key.to_ascii_lowercase() {
            'z' => Some(Command::Undo),
            's' => Some(Command::Save),
            _ => None,
        };
    }

    match press.key {
        'z' => Some(Command::Undo),
        's' => Some(Command::Save),
        'r' => Some(Command::Rotate(Rotation::CounterClockwise)),
        't' => Some(Command::Rotate(Rotation::Clockwise)),
        'o' => Some(Command::SetMode(Mode::Label)),
        'p' => Some(Command::SetMode(Mode::Remove)),
        'c' => Some(Command::Clear),
        '-' => Some(Command::StepIndex(-1)),
        '=' => Some(Command::StepIndex(1)),
        '1'..='9' => press
            .key
            .to_digit(10)
            .map(|n| Command::FontPreset(n as u8)),
        _ => None,
    }
}

/// Font size selected by preset key `n` (1-based).
pub fn font_preset_size(n: u8) -> u32 {
    8 + 8 * (n.clamp(1, 9) as u32 - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctrl(key: char) -> KeyPress {
        KeyPress {
            key,
            modifiers: KeyModifiers {
                ctrl: true,
                ..KeyModifiers::default()
            },
        }
    }

    #[test]
    fn test_plain_shortcuts() {
        let cases = [
            ('z', Command::Undo),
            ('s', Command::Save),
            ('r', Command::Rotate(Rotation::CounterClockwise)),
            ('t', Command::Rotate(Rotation::Clockwise)),
            ('o', Command::SetMode(Mode::Label)),
            ('p', Command::SetMode(Mode::Remove)),
            ('c', Command::Clear),
            ('-', Command::StepIndex(-1)),
            ('=', Command::StepIndex(1)),
            ('1', Command::FontPreset(1)),
            ('9', Command::FontPreset(9)),
        ];
        for (key, expected) in cases {
            assert_eq!(command_for_key(KeyPress::plain(key)), Some(expected), "key {key:?}");
        }
    }

    #[test]
    fn test_unmapped_keys() {
        for key in ['0', 'a', 'Z', ' ', 'q'] {
            assert_eq!(command_for_key(KeyPress::plain(key)), None, "key {key:?}");
        }
    }

    #[test]
    fn test_modified_keys() {
        assert_eq!(command_for_key(ctrl('z')), Some(Command::Undo));
        assert_eq!(command_for_key(ctrl('S')), Some(Command::Save));
        assert_eq!(command_for_key(ctrl('c')), None);
        assert_eq!(command_for_key(ctrl('1')), None);
    }

    #[test]
    fn test_font_presets() {
        assert_eq!(font_preset_size(1), 8);
        assert_eq!(font_preset_size(4), 32);
        assert_eq!(font_preset_size(9), 72);
    }
}
