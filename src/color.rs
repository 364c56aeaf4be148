//! RGBA colors and their textual forms.
//!
//! Colors appear in configuration files and the scene DSL either as
//! `#rrggbb` / `#rrggbbaa` hex strings or as a small set of names.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// RGBA color with 8-bit components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
#[repr(C)]
pub struct Rgba {
    /// Red component (0-255).
    pub r: u8,
    /// Green component (0-255).
    pub g: u8,
    /// Blue component (0-255).
    pub b: u8,
    /// Alpha component (0-255, 255 = fully opaque).
    pub a: u8,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    /// Opaque red.
    pub const RED: Self = Self::new(255, 0, 0, 255);
    /// Opaque green.
    pub const GREEN: Self = Self::new(0, 255, 0, 255);
    /// Opaque blue.
    pub const BLUE: Self = Self::new(0, 0, 255, 255);
    /// Default clear color of the render host.
    pub const VIOLET: Self = Self::rgb(0x99, 0x4b, 0xd6);

    /// Create a new RGBA color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque RGB color (alpha = 255).
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Convert to array representation.
    #[must_use]
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Create from array representation.
    #[must_use]
    pub const fn from_array(arr: [u8; 4]) -> Self {
        Self::new(arr[0], arr[1], arr[2], arr[3])
    }

    /// ITU-R BT.709 relative luminance in 0..=255.
    #[must_use]
    pub fn luminance(self) -> f32 {
        0.2126 * f32::from(self.r) + 0.7152 * f32::from(self.g) + 0.0722 * f32::from(self.b)
    }

    /// Hex form, `#rrggbb` when opaque and `#rrggbbaa` otherwise.
    #[must_use]
    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgba {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_color(s)
    }
}

impl TryFrom<String> for Rgba {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        parse_color(&s)
    }
}

impl From<Rgba> for String {
    fn from(c: Rgba) -> Self {
        c.to_hex()
    }
}

/// Parse a named or hex color.
///
/// # Errors
///
/// Returns [`Error::InputParse`] for unknown names or malformed hex.
pub fn parse_color(s: &str) -> Result<Rgba> {
    let s = s.trim().to_lowercase();
    match s.as_str() {
        "red" => Ok(Rgba::RED),
        "green" => Ok(Rgba::GREEN),
        "blue" => Ok(Rgba::BLUE),
        "black" => Ok(Rgba::BLACK),
        "white" => Ok(Rgba::WHITE),
        "violet" => Ok(Rgba::VIOLET),
        "yellow" => Ok(Rgba::rgb(255, 255, 0)),
        "cyan" => Ok(Rgba::rgb(0, 255, 255)),
        "magenta" => Ok(Rgba::rgb(255, 0, 255)),
        "orange" => Ok(Rgba::rgb(255, 165, 0)),
        "gray" | "grey" => Ok(Rgba::rgb(128, 128, 128)),
        _ => match s.strip_prefix('#') {
            Some(hex) if hex.len() == 6 || hex.len() == 8 => {
                let channel = |i: usize| {
                    hex.get(i..i + 2)
                        .and_then(|h| u8::from_str_radix(h, 16).ok())
                        .ok_or_else(|| Error::parse(format!("invalid hex color '{s}'")))
                };
                let a = if hex.len() == 8 { channel(6)? } else { 255 };
                Ok(Rgba::new(channel(0)?, channel(2)?, channel(4)?, a))
            }
            _ => Err(Error::parse(format!("unknown color '{s}'"))),
        },
    }
}
