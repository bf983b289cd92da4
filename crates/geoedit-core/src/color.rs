//! RGBA colors and the default editing palette.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 8-bit RGBA color, serialized as `[r, g, b, a]`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba(pub [u8; 4]);

pub const DEFAULT_LINE_COLOR: Rgba = Rgba([0x00, 0x00, 0x00, 0xff]);
pub const DEFAULT_FILL_COLOR: Rgba = Rgba([0x00, 0x00, 0x00, 0x90]);
pub const DEFAULT_SELECTED_LINE_COLOR: Rgba = Rgba([0x90, 0x90, 0x90, 0xff]);
pub const DEFAULT_SELECTED_FILL_COLOR: Rgba = Rgba([0x90, 0x90, 0x90, 0x90]);
pub const DEFAULT_EDITING_EXISTING_POINT_COLOR: Rgba = Rgba([0xc0, 0x00, 0x00, 0xff]);
pub const DEFAULT_EDITING_INTERMEDIATE_POINT_COLOR: Rgba = Rgba([0x00, 0x00, 0x00, 0x80]);

fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self([r, g, b, a])
    }

    pub const fn alpha(&self) -> u8 {
        self.0[3]
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA`. The leading `#` is optional.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let bytes = hex.as_bytes();
        let byte = |i: usize| Some(hex_val(bytes[i])? << 4 | hex_val(bytes[i + 1])?);

        match bytes.len() {
            6 => Some(Self::new(byte(0)?, byte(2)?, byte(4)?, 0xff)),
            8 => Some(Self::new(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => None,
        }
    }

    /// Emit as `#RRGGBB` when opaque, `#RRGGBBAA` otherwise.
    pub fn to_hex(&self) -> String {
        let [r, g, b, a] = self.0;
        if a == 0xff {
            format!("#{r:02X}{g:02X}{b:02X}")
        } else {
            format!("#{r:02X}{g:02X}{b:02X}{a:02X}")
        }
    }
}

impl fmt::Debug for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_parse_with_and_without_alpha() {
        assert_eq!(Rgba::from_hex("#C00000"), Some(DEFAULT_EDITING_EXISTING_POINT_COLOR));
        assert_eq!(Rgba::from_hex("00000080"), Some(DEFAULT_EDITING_INTERMEDIATE_POINT_COLOR));
        assert_eq!(Rgba::from_hex("#12345"), None);
        assert_eq!(Rgba::from_hex("#GG0000"), None);
    }

    #[test]
    fn hex_emit_is_shortest_form() {
        assert_eq!(DEFAULT_SELECTED_LINE_COLOR.to_hex(), "#909090");
        assert_eq!(DEFAULT_SELECTED_FILL_COLOR.to_hex(), "#90909090");
    }
}
