//! Slot colours and player colour identities

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// A 24-bit RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(0xff, 0xff, 0xff);
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse exactly six hex digits (no leading `#`)
    pub fn from_hex(hex: &str) -> Option<Self> {
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
        Some(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    /// Lower-case six digit hex, the snapshot wire form
    pub fn to_hex(&self) -> String {
        format!("{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// CSS colour string (`#rrggbb`)
    pub fn to_css(&self) -> String {
        format!("#{}", self.to_hex())
    }

    /// Scale every channel, clamped to [0, 255]
    pub fn brightness(&self, factor: f32) -> Self {
        let scale = |c: u8| (c as f32 * factor).clamp(0.0, 255.0) as u8;
        Self {
            r: scale(self.r),
            g: scale(self.g),
            b: scale(self.b),
        }
    }

    /// Channel-wise integer average of this colour and `others`
    pub fn mean(&self, others: &[Rgb]) -> Self {
        let n = others.len() as u32 + 1;
        let sum = others.iter().fold(
            (self.r as u32, self.g as u32, self.b as u32),
            |(r, g, b), o| (r + o.r as u32, g + o.g as u32, b + o.b as u32),
        );
        Self {
            r: (sum.0 / n) as u8,
            g: (sum.1 / n) as u8,
            b: (sum.2 / n) as u8,
        }
    }

    /// Position on a three-segment colour wheel (0..192), white past the end
    pub fn from_hue(hue: u8) -> Self {
        let bright = hue % 64;
        let (one, two) = (192 + bright, 255 - bright);
        match hue / 64 {
            0 => Self::new(one, two, 0),
            1 => Self::new(0, one, two),
            2 => Self::new(two, 0, one),
            _ => Self::WHITE,
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.to_hex())
    }
}

/// Colour a player is identified by on the wire (`c=<name>`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorIdentity {
    Red,
    Green,
    Blue,
    Yellow,
    Cyan,
    Magenta,
}

impl ColorIdentity {
    pub const ALL: [ColorIdentity; 6] = [
        ColorIdentity::Red,
        ColorIdentity::Green,
        ColorIdentity::Blue,
        ColorIdentity::Yellow,
        ColorIdentity::Cyan,
        ColorIdentity::Magenta,
    ];

    /// Name sent in form bodies and used in page paths
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorIdentity::Red => "Red",
            ColorIdentity::Green => "Green",
            ColorIdentity::Blue => "Blue",
            ColorIdentity::Yellow => "Yellow",
            ColorIdentity::Cyan => "Cyan",
            ColorIdentity::Magenta => "Magenta",
        }
    }

    /// Label shown on the colour picker
    pub fn label(&self) -> &'static str {
        match self {
            ColorIdentity::Red => "Rouge",
            ColorIdentity::Green => "Vert",
            ColorIdentity::Blue => "Bleue",
            ColorIdentity::Yellow => "Jaune",
            ColorIdentity::Cyan => "Cyan",
            ColorIdentity::Magenta => "Rose",
        }
    }

    /// Saturated colour painted on the ring
    pub fn rgb(&self) -> Rgb {
        match self {
            ColorIdentity::Red => Rgb::new(0xff, 0x44, 0x44),
            ColorIdentity::Green => Rgb::new(0x44, 0xff, 0x44),
            ColorIdentity::Blue => Rgb::new(0x44, 0x44, 0xff),
            ColorIdentity::Yellow => Rgb::new(0xff, 0xff, 0x44),
            ColorIdentity::Cyan => Rgb::new(0x44, 0xff, 0xff),
            ColorIdentity::Magenta => Rgb::new(0xff, 0x44, 0xff),
        }
    }

    /// Softer variant used for the avatar control and picker
    pub fn pastel(&self) -> Rgb {
        match self {
            ColorIdentity::Red => Rgb::new(0xff, 0x88, 0x88),
            ColorIdentity::Green => Rgb::new(0x88, 0xff, 0x88),
            ColorIdentity::Blue => Rgb::new(0x88, 0x88, 0xff),
            ColorIdentity::Yellow => Rgb::new(0xff, 0xff, 0x88),
            ColorIdentity::Cyan => Rgb::new(0x88, 0xff, 0xff),
            ColorIdentity::Magenta => Rgb::new(0xff, 0x88, 0xff),
        }
    }
}

impl FromStr for ColorIdentity {
    type Err = ConfigError;

    /// Case-insensitive wire name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ConfigError::UnknownColor(s.to_string()))
    }
}

impl fmt::Display for ColorIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
