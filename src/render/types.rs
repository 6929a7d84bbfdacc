//! Vertex streams: the output format of every renderable
//!
//! A renderable recomputes its `VertexBuffer` synchronously on mutation and
//! hands it to a `RenderTarget` on each frame's draw pass. Texture
//! coordinates are stored in texel space; the target normalizes them against
//! whatever texture the draw binds.

use super::color::Color;
use super::math::{Rect, Vec2};

/// How consecutive vertices of a buffer form triangles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    /// Groups of 4 vertices, one quad each (glyphs, underlines)
    Quads,
    /// First vertex is the hub, remaining vertices fan around it (shape fill)
    TriangleFan,
    /// Each vertex after the second closes a triangle (shape outline)
    TriangleStrip,
}

/// One drawable point: position, texture coordinate, color
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vertex {
    pub pos: Vec2,
    pub uv: Vec2,
    pub color: Color,
}

impl Vertex {
    pub const fn new(pos: Vec2, uv: Vec2, color: Color) -> Self {
        Self { pos, uv, color }
    }
}

/// An ordered vertex stream with its primitive interpretation
#[derive(Debug, Clone)]
pub struct VertexBuffer {
    pub primitive: Primitive,
    pub verts: Vec<Vertex>,
}

impl VertexBuffer {
    pub fn new(primitive: Primitive) -> Self {
        Self {
            primitive,
            verts: Vec::new(),
        }
    }

    pub fn clear(&mut self) {
        self.verts.clear();
    }

    pub fn push(&mut self, v: Vertex) {
        self.verts.push(v);
    }

    pub fn is_empty(&self) -> bool {
        self.verts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.verts.len()
    }

    /// Exact union of all vertex positions.
    ///
    /// Returns the empty rectangle at the origin for an empty buffer.
    pub fn bounds(&self) -> Rect {
        let mut iter = self.verts.iter();
        let first = match iter.next() {
            Some(v) => v.pos,
            None => return Rect::default(),
        };
        let (mut min_x, mut min_y) = (first.x, first.y);
        let (mut max_x, mut max_y) = (first.x, first.y);
        for v in iter {
            min_x = min_x.min(v.pos.x);
            min_y = min_y.min(v.pos.y);
            max_x = max_x.max(v.pos.x);
            max_y = max_y.max(v.pos.y);
        }
        Rect::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }

    /// Overwrite the color of every vertex, leaving geometry untouched
    pub fn recolor(&mut self, color: Color) {
        for v in &mut self.verts {
            v.color = color;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_empty() {
        let buf = VertexBuffer::new(Primitive::Quads);
        assert_eq!(buf.bounds(), Rect::default());
    }

    #[test]
    fn test_bounds_union_of_positions() {
        let mut buf = VertexBuffer::new(Primitive::Quads);
        for p in [
            Vec2::new(2.0, 3.0),
            Vec2::new(-1.0, 5.0),
            Vec2::new(4.0, -2.0),
        ] {
            buf.push(Vertex::new(p, Vec2::ZERO, Color::WHITE));
        }
        assert_eq!(buf.bounds(), Rect::new(-1.0, -2.0, 5.0, 7.0));
    }

    #[test]
    fn test_recolor_keeps_positions() {
        let mut buf = VertexBuffer::new(Primitive::TriangleFan);
        buf.push(Vertex::new(Vec2::new(1.0, 2.0), Vec2::ZERO, Color::WHITE));
        buf.recolor(Color::RED);
        assert_eq!(buf.verts[0].color, Color::RED);
        assert_eq!(buf.verts[0].pos, Vec2::new(1.0, 2.0));
    }
}
