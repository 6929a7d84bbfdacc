//! Text rendering: glyph sources and the quad-per-glyph Text renderable
//!
//! A `Font` supplies per-character metrics and an atlas texture; `Text` turns
//! a string into a quad stream against that atlas. `AtlasFont` is the shipped
//! bitmap-atlas implementation.

pub mod atlas;
mod text;

pub use atlas::{AtlasDesc, AtlasError, AtlasFont, GlyphDesc};
pub use text::Text;

use std::ops::BitOr;

use macroquad::texture::Texture2D;
use serde::{Deserialize, Serialize};

use crate::render::{IntRect, Rect};

/// Rendering metadata for one character at a given size/style
///
/// `bounds` is relative to the baseline pen position (top is negative for
/// ascending glyphs); `uv` addresses the atlas texture in texels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Glyph {
    /// Horizontal pen advance after this glyph
    pub advance: f32,
    /// Quad extents relative to the pen, baseline at y = 0
    pub bounds: Rect,
    /// Atlas sub-rectangle holding the glyph image
    pub uv: IntRect,
}

/// Text style bitmask
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Style(u32);

impl Style {
    pub const REGULAR: Style = Style(0);
    pub const BOLD: Style = Style(1 << 0);
    pub const ITALIC: Style = Style(1 << 1);
    pub const UNDERLINED: Style = Style(1 << 2);

    /// Check if every bit of `other` is set
    pub fn contains(self, other: Style) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for Style {
    type Output = Style;
    fn bitor(self, other: Style) -> Style {
        Style(self.0 | other.0)
    }
}

/// A font/glyph source keyed by (character, size, boldness).
///
/// Implementations answer metric queries for any requested pixel size and
/// expose the atlas texture the glyph uv rectangles index into. A character
/// the font does not carry yields the zero `Glyph` (invisible, no advance).
pub trait Font {
    /// Metrics and atlas cell for one character
    fn glyph(&self, ch: char, size: u32, bold: bool) -> Glyph;

    /// Horizontal adjustment for the pair (prev, cur), usually negative
    fn kerning(&self, prev: char, cur: char, size: u32) -> f32;

    /// Baseline-to-baseline distance
    fn line_spacing(&self, size: u32) -> f32;

    /// Current atlas texture for the given size, if the font carries one
    fn page(&self, size: u32) -> Option<Texture2D>;
}
