//! Deterministic per-rule colours.
//!
//! Each channel is an independent odd multiple of the rule index reduced modulo 128 and lifted
//! into the upper half of the channel range, so neighbouring rules land far apart and every
//! colour stays light enough for black label text.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Fill for states that no rule owns.
pub const UNOWNED_FILL: Rgb = Rgb::new(121, 97, 75);

const RED_MULTIPLIER: usize = 7;
const GREEN_MULTIPLIER: usize = 31;
const BLUE_MULTIPLIER: usize = 53;

fn channel(index: usize, multiplier: usize) -> u8 {
    // (i * m) % 128 == ((i % 128) * m) % 128, and the right side cannot overflow.
    ((index % 128) * multiplier % 128 + 128) as u8
}

/// Base colour for the rule at `index`. Indices 128 apart share a colour.
pub fn color_for_rule(index: usize) -> Rgb {
    Rgb::new(
        channel(index, RED_MULTIPLIER),
        channel(index, GREEN_MULTIPLIER),
        channel(index, BLUE_MULTIPLIER),
    )
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Half-brightness variant, used for edge strokes.
    pub fn dark(self) -> Self {
        Self::new(self.r / 2, self.g / 2, self.b / 2)
    }

    /// Variant a quarter of the way from white, used for cluster backgrounds.
    pub fn light(self) -> Self {
        fn lift(c: u8) -> u8 {
            255 - (255 - c) / 4
        }
        Self::new(lift(self.r), lift(self.g), lift(self.b))
    }

    /// `#rrggbb`, lowercase.
    pub fn to_hex(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}
