//! The Text renderable: one quad per glyph, laid out against a Font
//!
//! Geometry is recomputed synchronously whenever the string, font, size or
//! style changes; drawing submits the cached quads with the font's atlas
//! page bound.

use std::rc::Rc;

use super::{Font, Style};
use crate::render::{
    Color, Primitive, Rect, RenderStates, RenderTarget, Transformable, Vec2, Vertex, VertexBuffer,
};

/// Italic shear factor, about 12 degrees
const ITALIC_SHEAR: f32 = 0.208;

/// A string rendered as textured glyph quads
pub struct Text {
    string: String,
    font: Option<Rc<dyn Font>>,
    character_size: u32,
    style: Style,
    color: Color,
    /// Placement of the text in its parent coordinate system
    pub transformable: Transformable,
    vertices: VertexBuffer,
    bounds: Rect,
}

impl Text {
    /// Empty text: no font, size 30, regular style, white
    pub fn new() -> Self {
        Self {
            string: String::new(),
            font: None,
            character_size: 30,
            style: Style::REGULAR,
            color: Color::WHITE,
            transformable: Transformable::IDENTITY,
            vertices: VertexBuffer::new(Primitive::Quads),
            bounds: Rect::default(),
        }
    }

    /// Text with a string, font and size, geometry ready
    pub fn with_font(string: impl Into<String>, font: Rc<dyn Font>, character_size: u32) -> Self {
        let mut text = Self::new();
        text.string = string.into();
        text.font = Some(font);
        text.character_size = character_size;
        text.update_geometry();
        text
    }

    pub fn set_string(&mut self, string: impl Into<String>) {
        self.string = string.into();
        self.update_geometry();
    }

    pub fn set_font(&mut self, font: Rc<dyn Font>) {
        let same = match &self.font {
            Some(old) => Rc::ptr_eq(old, &font),
            None => false,
        };
        if !same {
            self.font = Some(font);
            self.update_geometry();
        }
    }

    pub fn set_character_size(&mut self, size: u32) {
        if self.character_size != size {
            self.character_size = size;
            self.update_geometry();
        }
    }

    pub fn set_style(&mut self, style: Style) {
        if self.style != style {
            self.style = style;
            self.update_geometry();
        }
    }

    /// Recolor the cached vertices in place; no geometry pass
    pub fn set_color(&mut self, color: Color) {
        if color != self.color {
            self.color = color;
            self.vertices.recolor(color);
        }
    }

    pub fn string(&self) -> &str {
        &self.string
    }

    pub fn font(&self) -> Option<&Rc<dyn Font>> {
        self.font.as_ref()
    }

    pub fn character_size(&self) -> u32 {
        self.character_size
    }

    pub fn style(&self) -> Style {
        self.style
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// The cached quad stream (4 vertices per glyph or underline)
    pub fn vertices(&self) -> &VertexBuffer {
        &self.vertices
    }

    /// Position of the `index`-th character in global coordinates.
    ///
    /// An index past the end clamps to the string length, i.e. it answers
    /// with the pen position just after the final character. Without a font
    /// the origin is returned.
    pub fn find_character_pos(&self, index: usize) -> Vec2 {
        let font = match &self.font {
            Some(f) => f,
            None => return Vec2::ZERO,
        };

        let chars: Vec<char> = self.string.chars().collect();
        let index = index.min(chars.len());

        let bold = self.style.contains(Style::BOLD);
        let hspace = font.glyph(' ', self.character_size, bold).advance;
        let vspace = font.line_spacing(self.character_size);

        let mut position = Vec2::ZERO;
        let mut prev = '\0';
        for &cur in &chars[..index] {
            position.x += font.kerning(prev, cur, self.character_size);
            prev = cur;

            match cur {
                ' ' => {
                    position.x += hspace;
                    continue;
                }
                '\t' => {
                    position.x += hspace * 4.0;
                    continue;
                }
                '\n' => {
                    position.y += vspace;
                    position.x = 0.0;
                    continue;
                }
                '\x0B' => {
                    position.y += vspace * 4.0;
                    continue;
                }
                _ => {}
            }

            position.x += font.glyph(cur, self.character_size, bold).advance;
        }

        self.transformable.transform().transform_point(position)
    }

    /// Bounds of the quads in text-local coordinates
    pub fn local_bounds(&self) -> Rect {
        self.bounds
    }

    /// Local bounds mapped through the entity transform
    pub fn global_bounds(&self) -> Rect {
        self.transformable.transform().transform_rect(self.bounds)
    }

    /// Submit the cached quads with the font's atlas page bound.
    ///
    /// No font means nothing to draw.
    pub fn draw(&self, target: &mut dyn RenderTarget, states: &RenderStates) {
        let font = match &self.font {
            Some(f) => f,
            None => return,
        };
        let states = RenderStates {
            transform: states.transform.combine(&self.transformable.transform()),
            texture: font.page(self.character_size),
        };
        target.draw(&self.vertices, &states);
    }

    fn update_geometry(&mut self) {
        self.vertices.clear();
        self.bounds = Rect::default();

        let font = match &self.font {
            Some(f) => f.clone(),
            None => return,
        };
        if self.string.is_empty() {
            return;
        }

        let size = self.character_size;
        let bold = self.style.contains(Style::BOLD);
        let underlined = self.style.contains(Style::UNDERLINED);
        let italic = if self.style.contains(Style::ITALIC) {
            ITALIC_SHEAR
        } else {
            0.0
        };
        let underline_offset = size as f32 * 0.1;
        let underline_thickness = size as f32 * if bold { 0.1 } else { 0.07 };

        let hspace = font.glyph(' ', size, bold).advance;
        let vspace = font.line_spacing(size);
        let mut x = 0.0f32;
        let mut y = size as f32;

        let chars: Vec<char> = self.string.chars().collect();
        let mut prev = '\0';
        for cur in chars {
            // Kerning against the previous character, before placement
            x += font.kerning(prev, cur, size);
            prev = cur;

            // Underline the finished line before the pen wraps
            if underlined && cur == '\n' {
                self.append_underline(x, y, underline_offset, underline_thickness);
            }

            // Whitespace moves the pen without emitting a glyph
            match cur {
                ' ' => {
                    x += hspace;
                    continue;
                }
                '\t' => {
                    x += hspace * 4.0;
                    continue;
                }
                '\n' => {
                    y += vspace;
                    x = 0.0;
                    continue;
                }
                '\x0B' => {
                    y += vspace * 4.0;
                    continue;
                }
                _ => {}
            }

            let glyph = font.glyph(cur, size, bold);

            let left = glyph.bounds.x;
            let top = glyph.bounds.y;
            let right = glyph.bounds.right();
            let bottom = glyph.bounds.bottom();

            let u1 = glyph.uv.x as f32;
            let v1 = glyph.uv.y as f32;
            let u2 = glyph.uv.right() as f32;
            let v2 = glyph.uv.bottom() as f32;

            // One quad per glyph; italic shears x by the corner's height
            self.vertices.push(Vertex::new(
                Vec2::new(x + left - italic * top, y + top),
                Vec2::new(u1, v1),
                self.color,
            ));
            self.vertices.push(Vertex::new(
                Vec2::new(x + right - italic * top, y + top),
                Vec2::new(u2, v1),
                self.color,
            ));
            self.vertices.push(Vertex::new(
                Vec2::new(x + right - italic * bottom, y + bottom),
                Vec2::new(u2, v2),
                self.color,
            ));
            self.vertices.push(Vertex::new(
                Vec2::new(x + left - italic * bottom, y + bottom),
                Vec2::new(u1, v2),
                self.color,
            ));

            x += glyph.advance;
        }

        // Last line's underline
        if underlined {
            self.append_underline(x, y, underline_offset, underline_thickness);
        }

        self.bounds = self.vertices.bounds();
    }

    /// Full-width underline quad for the line ending at pen (x, y).
    ///
    /// uv is pinned to atlas texel (1,1), which atlas fonts keep opaque.
    fn append_underline(&mut self, x: f32, y: f32, offset: f32, thickness: f32) {
        let top = y + offset;
        let bottom = top + thickness;
        let uv = Vec2::new(1.0, 1.0);

        self.vertices
            .push(Vertex::new(Vec2::new(0.0, top), uv, self.color));
        self.vertices
            .push(Vertex::new(Vec2::new(x, top), uv, self.color));
        self.vertices
            .push(Vertex::new(Vec2::new(x, bottom), uv, self.color));
        self.vertices
            .push(Vertex::new(Vec2::new(0.0, bottom), uv, self.color));
    }
}

impl Default for Text {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::IntRect;
    use crate::text::Glyph;

    /// Fixed-metrics font: every glyph advances by `advance`, fills the
    /// em box, and the pair ('A', 'V') kerns by `kern`.
    struct FakeFont {
        advance: f32,
        line: f32,
        kern: f32,
    }

    impl FakeFont {
        fn plain() -> Self {
            Self {
                advance: 10.0,
                line: 16.0,
                kern: 0.0,
            }
        }
    }

    impl Font for FakeFont {
        fn glyph(&self, _ch: char, size: u32, bold: bool) -> Glyph {
            let w = self.advance + if bold { 2.0 } else { 0.0 };
            Glyph {
                advance: w,
                bounds: Rect::new(0.0, -(size as f32), w, size as f32),
                uv: IntRect::new(0, 0, 8, 8),
            }
        }

        fn kerning(&self, prev: char, cur: char, _size: u32) -> f32 {
            if (prev, cur) == ('A', 'V') {
                self.kern
            } else {
                0.0
            }
        }

        fn line_spacing(&self, _size: u32) -> f32 {
            self.line
        }

        fn page(&self, _size: u32) -> Option<macroquad::texture::Texture2D> {
            None
        }
    }

    fn text_with(string: &str, font: FakeFont) -> Text {
        Text::with_font(string, Rc::new(font), 16)
    }

    #[test]
    fn test_empty_string_no_geometry() {
        let text = text_with("", FakeFont::plain());
        assert!(text.vertices().is_empty());
        assert_eq!(text.local_bounds(), Rect::default());
    }

    #[test]
    fn test_no_font_no_geometry() {
        let mut text = Text::new();
        text.set_string("hello");
        assert!(text.vertices().is_empty());
        assert_eq!(text.local_bounds(), Rect::default());
        assert_eq!(text.find_character_pos(3), Vec2::ZERO);
    }

    #[test]
    fn test_one_quad_per_visible_char() {
        let text = text_with("ab c", FakeFont::plain());
        // 'a', 'b', 'c' emit quads; the space does not
        assert_eq!(text.vertices().len(), 12);
    }

    #[test]
    fn test_whitespace_advances_without_glyphs() {
        let font = FakeFont::plain();
        let (hspace, vspace) = (font.advance, font.line);
        let text = text_with(" \t\x0B", font);
        assert!(text.vertices().is_empty());
        assert_eq!(text.local_bounds(), Rect::default());

        // Pen motion: space = hspace, tab = 4 * hspace, vtab = 4 * vspace
        let after_space = text.find_character_pos(1);
        assert!((after_space.x - hspace).abs() < 0.001);
        let after_tab = text.find_character_pos(2);
        assert!((after_tab.x - hspace * 5.0).abs() < 0.001);
        let after_vtab = text.find_character_pos(3);
        assert!((after_vtab.x - hspace * 5.0).abs() < 0.001);
        assert!((after_vtab.y - vspace * 4.0).abs() < 0.001);
    }

    #[test]
    fn test_newline_wraps_pen() {
        let font = FakeFont::plain();
        let vspace = font.line;
        let text = text_with("a\nb", font);
        let after_newline = text.find_character_pos(2);
        assert!((after_newline.x - 0.0).abs() < 0.001);
        assert!((after_newline.y - vspace).abs() < 0.001);
    }

    #[test]
    fn test_kerning_applied_before_placement() {
        let font = FakeFont {
            advance: 10.0,
            line: 16.0,
            kern: -3.0,
        };
        let text = text_with("AV", font);
        // Second quad starts at advance + kern
        assert!((text.vertices().verts[4].pos.x - 7.0).abs() < 0.001);
        // And the pen after both characters includes the kern once
        let end = text.find_character_pos(2);
        assert!((end.x - 17.0).abs() < 0.001);
    }

    #[test]
    fn test_bounds_are_union_of_quads() {
        let text = text_with("AV\nAVA", FakeFont::plain());
        let mut probe = VertexBuffer::new(Primitive::Quads);
        for v in &text.vertices().verts {
            probe.push(*v);
        }
        assert_eq!(text.local_bounds(), probe.bounds());
        // Three glyphs on the second line: widest line rules the width
        assert!((text.local_bounds().w - 30.0).abs() < 0.001);
    }

    #[test]
    fn test_character_pos_clamps_past_end() {
        let text = text_with("abc", FakeFont::plain());
        assert_eq!(text.find_character_pos(3), text.find_character_pos(100));
    }

    #[test]
    fn test_character_pos_in_global_coordinates() {
        let mut text = text_with("ab", FakeFont::plain());
        text.transformable.position = Vec2::new(50.0, 20.0);
        let p = text.find_character_pos(1);
        assert!((p.x - 60.0).abs() < 0.001);
        assert!((p.y - 20.0).abs() < 0.001);
    }

    #[test]
    fn test_underline_spans_each_line() {
        let font = FakeFont::plain();
        let size = 16.0f32;
        let mut text = Text::with_font("ab\ncd", Rc::new(font), 16);
        text.set_style(Style::UNDERLINED);
        // 4 glyph quads + 2 underline quads
        assert_eq!(text.vertices().len(), 24);

        // First underline sits just under the first baseline
        let verts = &text.vertices().verts;
        let first_underline = &verts[8..12];
        let top = size + size * 0.1;
        assert!((first_underline[0].pos.y - top).abs() < 0.001);
        assert!((first_underline[2].pos.y - (top + size * 0.07)).abs() < 0.001);
        // It spans from the line start to the pen
        assert!((first_underline[0].pos.x - 0.0).abs() < 0.001);
        assert!((first_underline[1].pos.x - 20.0).abs() < 0.001);
    }

    #[test]
    fn test_italic_shears_top_corners() {
        let mut text = text_with("a", FakeFont::plain());
        text.set_style(Style::ITALIC);
        let verts = &text.vertices().verts;
        // top = -size, so the top edge shifts right by shear * size
        let shift = 0.208 * 16.0;
        assert!((verts[0].pos.x - shift).abs() < 0.001);
        // bottom = 0: unsheared
        assert!((verts[3].pos.x - 0.0).abs() < 0.001);
    }

    #[test]
    fn test_set_color_recolors_in_place() {
        let mut text = text_with("ab", FakeFont::plain());
        let before: Vec<Vec2> = text.vertices().verts.iter().map(|v| v.pos).collect();
        text.set_color(Color::RED);
        let after: Vec<Vec2> = text.vertices().verts.iter().map(|v| v.pos).collect();
        assert_eq!(before, after);
        assert!(text.vertices().verts.iter().all(|v| v.color == Color::RED));
    }

    #[test]
    fn test_set_character_size_regenerates() {
        let mut text = text_with("a", FakeFont::plain());
        text.set_character_size(32);
        // Baseline moved down to the new size
        assert!((text.vertices().verts[3].pos.y - 32.0).abs() < 0.001);
    }

    #[test]
    fn test_bold_widens_quads() {
        let mut text = text_with("a", FakeFont::plain());
        text.set_style(Style::BOLD);
        assert!((text.vertices().verts[1].pos.x - 12.0).abs() < 0.001);
    }
}
