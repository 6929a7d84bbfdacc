//! Textured polygonal shapes with outlines
//!
//! A `Shape` owns a polygonal silhouette and tessellates it into a triangle
//! fan (fill) plus a miter-extruded triangle strip (outline). Geometry is
//! recomputed synchronously when the silhouette or outline thickness
//! changes; color and texture-rect changes patch the cached vertices.

use macroquad::texture::Texture2D;

use crate::render::{
    Color, IntRect, Primitive, Rect, RenderStates, RenderTarget, Transformable, Vec2, Vertex,
    VertexBuffer,
};

/// Outward unit normal of the edge p1 -> p2
fn edge_normal(p1: Vec2, p2: Vec2) -> Vec2 {
    (p2 - p1).perp().normalize()
}

/// A convex or star-shaped polygon with fill, texture and outline
pub struct Shape {
    points: Vec<Vec2>,
    texture: Option<Texture2D>,
    texture_rect: IntRect,
    fill_color: Color,
    outline_color: Color,
    outline_thickness: f32,
    /// Placement of the shape in its parent coordinate system
    pub transformable: Transformable,
    fill: VertexBuffer,
    outline: VertexBuffer,
    inside_bounds: Rect,
    bounds: Rect,
}

impl Shape {
    /// Shape over an explicit silhouette
    pub fn polygon(points: Vec<Vec2>) -> Self {
        let mut shape = Self {
            points,
            texture: None,
            texture_rect: IntRect::default(),
            fill_color: Color::WHITE,
            outline_color: Color::WHITE,
            outline_thickness: 0.0,
            transformable: Transformable::IDENTITY,
            fill: VertexBuffer::new(Primitive::TriangleFan),
            outline: VertexBuffer::new(Primitive::TriangleStrip),
            inside_bounds: Rect::default(),
            bounds: Rect::default(),
        };
        shape.update();
        shape
    }

    /// Axis-aligned rectangle with its top-left corner at the local origin
    pub fn rectangle(size: Vec2) -> Self {
        Self::polygon(vec![
            Vec2::ZERO,
            Vec2::new(size.x, 0.0),
            size,
            Vec2::new(0.0, size.y),
        ])
    }

    /// Regular polygon approximating a circle, first point at the top.
    ///
    /// The local origin is the circle's bounding-box corner, so the center
    /// sits at (radius, radius).
    pub fn circle(radius: f32, point_count: usize) -> Self {
        let points = (0..point_count)
            .map(|i| {
                let angle =
                    i as f32 * 2.0 * std::f32::consts::PI / point_count as f32 - std::f32::consts::FRAC_PI_2;
                Vec2::new(radius + angle.cos() * radius, radius + angle.sin() * radius)
            })
            .collect();
        Self::polygon(points)
    }

    /// Replace the silhouette and retessellate
    pub fn set_points(&mut self, points: Vec<Vec2>) {
        self.points = points;
        self.update();
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    /// Change the source texture.
    ///
    /// With `reset_rect`, or when no texture rect was ever set, the texture
    /// rect snaps to the full texture.
    pub fn set_texture(&mut self, texture: Option<Texture2D>, reset_rect: bool) {
        if let Some(tex) = &texture {
            if reset_rect || (self.texture.is_none() && self.texture_rect == IntRect::default()) {
                let full = IntRect::new(0, 0, tex.width() as i32, tex.height() as i32);
                self.set_texture_rect(full);
            }
        }
        self.texture = texture;
    }

    pub fn texture(&self) -> Option<&Texture2D> {
        self.texture.as_ref()
    }

    /// Select the sub-rectangle of the texture mapped over the fill
    pub fn set_texture_rect(&mut self, rect: IntRect) {
        self.texture_rect = rect;
        self.update_tex_coords();
    }

    pub fn texture_rect(&self) -> IntRect {
        self.texture_rect
    }

    pub fn set_fill_color(&mut self, color: Color) {
        if color != self.fill_color {
            self.fill_color = color;
            self.fill.recolor(color);
        }
    }

    pub fn fill_color(&self) -> Color {
        self.fill_color
    }

    pub fn set_outline_color(&mut self, color: Color) {
        if color != self.outline_color {
            self.outline_color = color;
            self.outline.recolor(color);
        }
    }

    pub fn outline_color(&self) -> Color {
        self.outline_color
    }

    /// Signed outline thickness: positive grows outward, negative inward,
    /// zero disables the outline
    pub fn set_outline_thickness(&mut self, thickness: f32) {
        if thickness != self.outline_thickness {
            self.outline_thickness = thickness;
            self.update();
        }
    }

    pub fn outline_thickness(&self) -> f32 {
        self.outline_thickness
    }

    /// The cached fill fan
    pub fn fill_vertices(&self) -> &VertexBuffer {
        &self.fill
    }

    /// The cached outline strip (empty when thickness is zero)
    pub fn outline_vertices(&self) -> &VertexBuffer {
        &self.outline
    }

    /// Bounds in shape-local coordinates (outline included when present)
    pub fn local_bounds(&self) -> Rect {
        self.bounds
    }

    /// Local bounds mapped through the entity transform
    pub fn global_bounds(&self) -> Rect {
        self.transformable.transform().transform_rect(self.bounds)
    }

    /// Submit fill then outline
    pub fn draw(&self, target: &mut dyn RenderTarget, states: &RenderStates) {
        if self.fill.is_empty() {
            return;
        }
        let transform = states.transform.combine(&self.transformable.transform());
        target.draw(
            &self.fill,
            &RenderStates {
                transform,
                texture: self.texture.clone(),
            },
        );
        if self.outline_thickness != 0.0 {
            target.draw(
                &self.outline,
                &RenderStates {
                    transform,
                    texture: None,
                },
            );
        }
    }

    /// Retessellate fill and outline from the silhouette
    fn update(&mut self) {
        let count = self.points.len();
        if count < 3 {
            self.fill.clear();
            self.outline.clear();
            self.inside_bounds = Rect::default();
            self.bounds = Rect::default();
            return;
        }

        // Fan: hub placeholder, the silhouette, first point repeated
        self.fill.clear();
        self.fill
            .push(Vertex::new(Vec2::ZERO, Vec2::ZERO, self.fill_color));
        for &p in &self.points {
            self.fill.push(Vertex::new(p, Vec2::ZERO, self.fill_color));
        }
        self.fill
            .push(Vertex::new(self.points[0], Vec2::ZERO, self.fill_color));

        // Park the hub on the first point so bounds() sees the silhouette
        // alone, then move it to the center of the inside bounds
        self.fill.verts[0].pos = self.points[0];
        self.inside_bounds = self.fill.bounds();
        self.fill.verts[0].pos = self.inside_bounds.center();

        self.update_tex_coords();
        self.update_outline();
    }

    /// Map each fill vertex's relative position inside the inside bounds
    /// onto the texture sub-rectangle
    fn update_tex_coords(&mut self) {
        let ib = self.inside_bounds;
        let rect = self.texture_rect;
        for v in &mut self.fill.verts {
            let xratio = if ib.w > 0.0 { (v.pos.x - ib.x) / ib.w } else { 0.0 };
            let yratio = if ib.h > 0.0 { (v.pos.y - ib.y) / ib.h } else { 0.0 };
            v.uv = Vec2::new(
                rect.x as f32 + rect.w as f32 * xratio,
                rect.y as f32 + rect.h as f32 * yratio,
            );
        }
    }

    /// Extrude the silhouette along averaged edge normals (miter joints)
    fn update_outline(&mut self) {
        self.outline.clear();
        if self.outline_thickness == 0.0 {
            self.bounds = self.inside_bounds;
            return;
        }

        let count = self.fill.verts.len() - 2;
        let center = self.fill.verts[0].pos;
        for i in 0..count {
            let index = i + 1;
            // Previous point wraps to the end of the silhouette
            let p0 = if i == 0 {
                self.fill.verts[count].pos
            } else {
                self.fill.verts[index - 1].pos
            };
            let p1 = self.fill.verts[index].pos;
            let p2 = self.fill.verts[index + 1].pos;

            // Adjacent edge normals, flipped to face away from the center
            let mut n1 = edge_normal(p0, p1);
            let mut n2 = edge_normal(p1, p2);
            if n1.dot(center - p1) > 0.0 {
                n1 = -n1;
            }
            if n2.dot(center - p1) > 0.0 {
                n2 = -n2;
            }

            // Miter: averaged normal scaled to preserve edge distance
            let factor = 1.0 + n1.dot(n2);
            let normal = (n1 + n2).scale(1.0 / factor);

            self.outline
                .push(Vertex::new(p1, Vec2::ZERO, self.outline_color));
            self.outline.push(Vertex::new(
                p1 + normal * self.outline_thickness,
                Vec2::ZERO,
                self.outline_color,
            ));
        }

        // Duplicate the first pair to close the loop
        let first = self.outline.verts[0];
        let second = self.outline.verts[1];
        self.outline.push(first);
        self.outline.push(second);

        self.bounds = self.outline.bounds();
    }
}
