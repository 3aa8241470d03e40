// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Label styling: colours, numbering formats and the style snapshot.
//!
//! A [`StyleSnapshot`] is copied into every label at creation time, so
//! later edits to the live style never touch labels already placed.

use crate::error::{LabelerError, Result};
use std::fmt;

/// A colour as typed by the user, together with its parsed RGBA value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Color {
    name: String,
    rgba: [u8; 4],
}

const NAMED_COLORS: &[(&str, [u8; 4])] = &[
    ("black", [0, 0, 0, 255]),
    ("white", [255, 255, 255, 255]),
    ("red", [255, 0, 0, 255]),
    ("green", [0, 128, 0, 255]),
    ("lime", [0, 255, 0, 255]),
    ("blue", [0, 0, 255, 255]),
    ("yellow", [255, 255, 0, 255]),
    ("cyan", [0, 255, 255, 255]),
    ("aqua", [0, 255, 255, 255]),
    ("magenta", [255, 0, 255, 255]),
    ("fuchsia", [255, 0, 255, 255]),
    ("orange", [255, 165, 0, 255]),
    ("purple", [128, 0, 128, 255]),
    ("gray", [128, 128, 128, 255]),
    ("grey", [128, 128, 128, 255]),
    ("silver", [192, 192, 192, 255]),
    ("maroon", [128, 0, 0, 255]),
    ("navy", [0, 0, 128, 255]),
    ("olive", [128, 128, 0, 255]),
    ("teal", [0, 128, 128, 255]),
    ("pink", [255, 192, 203, 255]),
    ("brown", [165, 42, 42, 255]),
    ("gold", [255, 215, 0, 255]),
    ("transparent", [0, 0, 0, 0]),
];

impl Color {
    /// Parse a colour name or a `#rgb`, `#rrggbb` or `#rrggbbaa` hex string.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let rgba = match trimmed.strip_prefix('#') {
            Some(hex) => parse_hex(hex),
            None => {
                let lower = trimmed.to_ascii_lowercase();
                NAMED_COLORS
                    .iter()
                    .find(|(name, _)| *name == lower)
                    .map(|(_, rgba)| *rgba)
            }
        }
        .ok_or_else(|| {
            LabelerError::ConfigValidation(format!("unrecognised colour {:?}", input))
        })?;

        Ok(Self {
            name: trimmed.to_string(),
            rgba,
        })
    }

    /// The colour string as entered.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rgba(&self) -> [u8; 4] {
        self.rgba
    }
}

fn parse_hex(hex: &str) -> Option<[u8; 4]> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    match hex.len() {
        3 => {
            let mut out = [255u8; 4];
            for (slot, c) in out.iter_mut().zip(hex.chars()) {
                let v = c.to_digit(16)? as u8;
                *slot = v * 17;
            }
            Some(out)
        }
        6 => Some([byte(0)?, byte(2)?, byte(4)?, 255]),
        8 => Some([byte(0)?, byte(2)?, byte(4)?, byte(6)?]),
        _ => None,
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Radix used when printing the label index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Radix {
    Decimal,
    LowerHex,
    UpperHex,
    Octal,
    Binary,
}

/// Parsed numbering format: `[0][width][type]`, e.g. `02d`, `3d`, `x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberFormat {
    zero_pad: bool,
    width: usize,
    radix: Radix,
}

/// Widths beyond this are rejected rather than allocated.
const MAX_WIDTH: usize = 32;

impl NumberFormat {
    pub fn parse(spec: &str) -> Result<Self> {
        let invalid =
            || LabelerError::ConfigValidation(format!("invalid number format {:?}", spec));

        let (zero_pad, rest) = match spec.strip_prefix('0') {
            Some(rest) => (true, rest),
            None => (false, spec),
        };

        let digits_end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        let (digits, kind) = rest.split_at(digits_end);

        let width = if digits.is_empty() {
            0
        } else {
            digits.parse::<usize>().map_err(|_| invalid())?
        };
        if width > MAX_WIDTH {
            return Err(invalid());
        }

        let radix = match kind {
            "" | "d" => Radix::Decimal,
            "x" => Radix::LowerHex,
            "X" => Radix::UpperHex,
            "o" => Radix::Octal,
            "b" => Radix::Binary,
            _ => return Err(invalid()),
        };

        Ok(Self {
            zero_pad,
            width,
            radix,
        })
    }

    pub fn format(&self, value: u32) -> String {
        let digits = match self.radix {
            Radix::Decimal => value.to_string(),
            Radix::LowerHex => format!("{:x}", value),
            Radix::UpperHex => format!("{:X}", value),
            Radix::Octal => format!("{:o}", value),
            Radix::Binary => format!("{:b}", value),
        };
        let width = self.width;
        if self.zero_pad {
            format!("{:0>width$}", digits)
        } else {
            format!("{:>width$}", digits)
        }
    }
}

/// Style options bound to a label when it is created.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleSnapshot {
    pub font_size: u32,
    pub fill_color: Color,
    pub stroke_color: Color,
    pub prefix: String,
    /// Kept unparsed; validated when a label text is formatted.
    pub number_format: String,
}

impl StyleSnapshot {
    /// Build the display text for `index`: prefix followed by the padded number.
    pub fn format_label(&self, index: u32) -> Result<String> {
        let format = NumberFormat::parse(&self.number_format)?;
        Ok(format!("{}{}", self.prefix, format.format(index)))
    }
}

impl Default for StyleSnapshot {
    fn default() -> Self {
        Self {
            font_size: 32,
            fill_color: Color {
                name: "red".to_string(),
                rgba: [255, 0, 0, 255],
            },
            stroke_color: Color {
                name: "yellow".to_string(),
                rgba: [255, 255, 0, 255],
            },
            prefix: "A".to_string(),
            number_format: "02d".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_names_and_hex() {
        assert_eq!(Color::parse("red").unwrap().rgba(), [255, 0, 0, 255]);
        assert_eq!(Color::parse("Yellow").unwrap().rgba(), [255, 255, 0, 255]);
        assert_eq!(Color::parse("#0f0").unwrap().rgba(), [0, 255, 0, 255]);
        assert_eq!(Color::parse("#102030").unwrap().rgba(), [16, 32, 48, 255]);
        assert_eq!(Color::parse("#10203080").unwrap().rgba(), [16, 32, 48, 128]);
        assert_eq!(Color::parse(" navy ").unwrap().name(), "navy");
    }

    #[test]
    fn test_color_rejects_garbage() {
        for bad in ["", "reddish", "#12", "#12345", "#ggg", "#ü12"] {
            assert!(
                matches!(Color::parse(bad), Err(LabelerError::ConfigValidation(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_number_format_padding() {
        assert_eq!(NumberFormat::parse("02d").unwrap().format(7), "07");
        assert_eq!(NumberFormat::parse("02d").unwrap().format(123), "123");
        assert_eq!(NumberFormat::parse("03").unwrap().format(5), "005");
        assert_eq!(NumberFormat::parse("3d").unwrap().format(7), "  7");
        assert_eq!(NumberFormat::parse("d").unwrap().format(42), "42");
        assert_eq!(NumberFormat::parse("").unwrap().format(42), "42");
    }

    #[test]
    fn test_number_format_radix() {
        assert_eq!(NumberFormat::parse("x").unwrap().format(255), "ff");
        assert_eq!(NumberFormat::parse("04X").unwrap().format(255), "00FF");
        assert_eq!(NumberFormat::parse("o").unwrap().format(8), "10");
        assert_eq!(NumberFormat::parse("08b").unwrap().format(5), "00000101");
    }

    #[test]
    fn test_number_format_rejects_malformed() {
        for bad in ["02q", "d2", "abc", "2.5f", "999d", "-2d"] {
            assert!(
                matches!(NumberFormat::parse(bad), Err(LabelerError::ConfigValidation(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_format_label_uses_prefix() {
        let style = StyleSnapshot::default();
        assert_eq!(style.format_label(1).unwrap(), "A01");

        let style = StyleSnapshot {
            prefix: "D".to_string(),
            number_format: "03d".to_string(),
            ..StyleSnapshot::default()
        };
        assert_eq!(style.format_label(12).unwrap(), "D012");
    }
}
