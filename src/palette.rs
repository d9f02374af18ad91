//! Colors and palettes
//!
//! A palette is an ordered, non-empty list of colors, typically ranked by
//! pixel frequency from a reference image. Ranking itself happens upstream.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::MAX_PALETTE;
use crate::error::{SubstrateError, SubstrateResult};

/// Opaque RGB color. Alpha is supplied per draw call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn gray(v: u8) -> Self {
        Self { r: v, g: v, b: v }
    }
}

impl FromStr for Color {
    type Err = SubstrateError;

    /// Parse `#rrggbb` (leading `#` optional)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(SubstrateError::InvalidColor(s.to_string()));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16)
                .map_err(|_| SubstrateError::InvalidColor(s.to_string()))
        };
        Ok(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl TryFrom<String> for Color {
    type Error = SubstrateError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Ordered, non-empty color palette
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Color>", into = "Vec<Color>")]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    /// Build a palette, rejecting an empty color list
    pub fn new(colors: Vec<Color>) -> SubstrateResult<Self> {
        if colors.is_empty() {
            return Err(SubstrateError::EmptyPalette);
        }
        Ok(Self { colors })
    }

    /// Build from a frequency-ranked list, keeping at most `max` colors
    pub fn from_ranked(mut colors: Vec<Color>, max: usize) -> SubstrateResult<Self> {
        colors.truncate(max.min(MAX_PALETTE));
        Self::new(colors)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false for a constructed palette
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Draw one color uniformly (consumes one RNG value)
    pub fn pick(&self, rng: &mut Pcg32) -> Color {
        self.colors[rng.random_range(0..self.colors.len())]
    }
}

impl TryFrom<Vec<Color>> for Palette {
    type Error = SubstrateError;

    fn try_from(colors: Vec<Color>) -> Result<Self, Self::Error> {
        Self::new(colors)
    }
}

impl From<Palette> for Vec<Color> {
    fn from(p: Palette) -> Self {
        p.colors
    }
}
