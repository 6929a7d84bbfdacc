//! Draw sinks: where vertex streams end up
//!
//! Renderables stay backend-agnostic by drawing into a `RenderTarget`. The
//! shipped `ScreenTarget` submits to macroquad; tests substitute recording
//! targets.

use macroquad::color::Color as MqColor;
use macroquad::models::{draw_mesh, Mesh, Vertex as MeshVertex};
use macroquad::texture::Texture2D;

use super::transform::Transform;
use super::types::{Primitive, VertexBuffer};

/// Parameters applied to one draw call
#[derive(Debug, Clone, Default)]
pub struct RenderStates {
    /// Entity-to-target transform, applied to every vertex position
    pub transform: Transform,
    /// Texture the vertex uv coordinates index into (texel space)
    pub texture: Option<Texture2D>,
}

impl RenderStates {
    pub fn with_transform(transform: Transform) -> Self {
        Self {
            transform,
            texture: None,
        }
    }
}

/// A caller-owned sink for vertex streams
pub trait RenderTarget {
    fn draw(&mut self, buffer: &VertexBuffer, states: &RenderStates);
}

/// The macroquad-backed screen sink.
///
/// Quads, fans and strips are expanded into plain triangle lists and
/// submitted as meshes, chunked to stay inside 16-bit index range.
pub struct ScreenTarget;

/// Triangles per submitted mesh (3 vertices each, u16 indices)
const MAX_TRIS_PER_MESH: usize = u16::MAX as usize / 3;

impl RenderTarget for ScreenTarget {
    fn draw(&mut self, buffer: &VertexBuffer, states: &RenderStates) {
        let tris = triangulate(buffer);
        if tris.is_empty() {
            return;
        }

        // uv is stored in texels; meshes want it normalized
        let (tex_w, tex_h) = match &states.texture {
            Some(t) => (t.width().max(1.0), t.height().max(1.0)),
            None => (1.0, 1.0),
        };

        for chunk in tris.chunks(MAX_TRIS_PER_MESH) {
            let mut vertices = Vec::with_capacity(chunk.len() * 3);
            let mut indices = Vec::with_capacity(chunk.len() * 3);
            for tri in chunk {
                for &i in tri {
                    let v = &buffer.verts[i];
                    let p = states.transform.transform_point(v.pos);
                    let c = MqColor::from_rgba(v.color.r, v.color.g, v.color.b, v.color.a);
                    indices.push(vertices.len() as u16);
                    vertices.push(MeshVertex::new(
                        p.x,
                        p.y,
                        0.0,
                        v.uv.x / tex_w,
                        v.uv.y / tex_h,
                        c,
                    ));
                }
            }
            draw_mesh(&Mesh {
                vertices,
                indices,
                texture: states.texture.clone(),
            });
        }
    }
}

/// Expand a vertex stream into triangle index triples.
///
/// Quads of 4n vertices yield 2n triangles; fans and strips of n >= 3
/// vertices yield n - 2. Trailing vertices that do not complete a primitive
/// are ignored.
fn triangulate(buffer: &VertexBuffer) -> Vec<[usize; 3]> {
    let n = buffer.verts.len();
    match buffer.primitive {
        Primitive::Quads => (0..n / 4)
            .flat_map(|q| {
                let b = q * 4;
                [[b, b + 1, b + 2], [b, b + 2, b + 3]]
            })
            .collect(),
        Primitive::TriangleFan => {
            if n < 3 {
                return Vec::new();
            }
            (1..n - 1).map(|i| [0, i, i + 1]).collect()
        }
        Primitive::TriangleStrip => {
            if n < 3 {
                return Vec::new();
            }
            (0..n - 2).map(|i| [i, i + 1, i + 2]).collect()
        }
    }
}
