//! Bitmap-atlas font: glyph metrics described in RON, pixels in a texture
//!
//! An atlas description carries per-character metrics and kerning pairs
//! measured at one native size; queries at any other size scale linearly.
//! The texture page lives next to the description and is supplied by the
//! caller (texture loading is the windowing library's job).

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use macroquad::texture::Texture2D;
use serde::{Deserialize, Serialize};

use super::{Font, Glyph};
use crate::render::{IntRect, Rect};

/// Error type for atlas-description loading
#[derive(Debug)]
pub enum AtlasError {
    IoError(std::io::Error),
    ParseError(ron::error::SpannedError),
    TextureError(String),
}

impl From<std::io::Error> for AtlasError {
    fn from(e: std::io::Error) -> Self {
        AtlasError::IoError(e)
    }
}

impl From<ron::error::SpannedError> for AtlasError {
    fn from(e: ron::error::SpannedError) -> Self {
        AtlasError::ParseError(e)
    }
}

impl std::fmt::Display for AtlasError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AtlasError::IoError(e) => write!(f, "IO error: {}", e),
            AtlasError::ParseError(e) => write!(f, "Parse error: {}", e),
            AtlasError::TextureError(e) => write!(f, "Texture error: {}", e),
        }
    }
}

impl std::error::Error for AtlasError {}

/// One character entry in an atlas description
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlyphDesc {
    pub ch: char,
    /// Pen advance at the native size
    pub advance: f32,
    /// Quad extents relative to the pen, baseline at y = 0
    pub bounds: Rect,
    /// Atlas cell in texels
    pub uv: IntRect,
    /// Entry for the bold variant; regular entries double as bold fallback
    #[serde(default)]
    pub bold: bool,
}

/// Serializable atlas-font description (RON)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtlasDesc {
    /// Pixel size the metrics were measured at
    pub native_size: u32,
    /// Baseline-to-baseline distance at the native size
    pub line_spacing: f32,
    pub glyphs: Vec<GlyphDesc>,
    /// (previous, current, offset) adjustments at the native size
    #[serde(default)]
    pub kerning: Vec<(char, char, f32)>,
}

/// A `Font` backed by a single texture page and a metrics table
pub struct AtlasFont {
    native_size: u32,
    line_spacing: f32,
    glyphs: HashMap<(char, bool), Glyph>,
    kerning: HashMap<(char, char), f32>,
    page: Option<Texture2D>,
}

impl AtlasFont {
    /// Build a font from an in-memory description
    pub fn from_desc(desc: AtlasDesc, page: Option<Texture2D>) -> Self {
        let mut glyphs = HashMap::with_capacity(desc.glyphs.len());
        for g in desc.glyphs {
            glyphs.insert(
                (g.ch, g.bold),
                Glyph {
                    advance: g.advance,
                    bounds: g.bounds,
                    uv: g.uv,
                },
            );
        }
        let kerning = desc
            .kerning
            .into_iter()
            .map(|(prev, cur, offset)| ((prev, cur), offset))
            .collect();
        Self {
            native_size: desc.native_size.max(1),
            line_spacing: desc.line_spacing,
            glyphs,
            kerning,
            page,
        }
    }

    /// Load a RON description from disk
    pub fn load(path: impl AsRef<Path>, page: Option<Texture2D>) -> Result<Self, AtlasError> {
        let contents = fs::read_to_string(path)?;
        let desc: AtlasDesc = ron::from_str(&contents)?;
        Ok(Self::from_desc(desc, page))
    }

    fn scale(&self, size: u32) -> f32 {
        size as f32 / self.native_size as f32
    }
}

impl Font for AtlasFont {
    fn glyph(&self, ch: char, size: u32, bold: bool) -> Glyph {
        let entry = self
            .glyphs
            .get(&(ch, bold))
            .or_else(|| self.glyphs.get(&(ch, false)));
        let g = match entry {
            Some(g) => g,
            None => return Glyph::default(),
        };
        let s = self.scale(size);
        Glyph {
            advance: g.advance * s,
            bounds: Rect::new(g.bounds.x * s, g.bounds.y * s, g.bounds.w * s, g.bounds.h * s),
            uv: g.uv,
        }
    }

    fn kerning(&self, prev: char, cur: char, size: u32) -> f32 {
        match self.kerning.get(&(prev, cur)) {
            Some(offset) => offset * self.scale(size),
            None => 0.0,
        }
    }

    fn line_spacing(&self, size: u32) -> f32 {
        self.line_spacing * self.scale(size)
    }

    fn page(&self, _size: u32) -> Option<Texture2D> {
        self.page.clone()
    }
}
