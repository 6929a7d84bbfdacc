//! marquee: a small 2D scene-engine scaffold
//!
//! Three layers on top of macroquad:
//! - `render` - vertex streams, transforms, and the RenderTarget sink
//! - `text` / `shape` - renderable primitives that tessellate themselves:
//!   glyph-quad text with kerning, underline and italic synthesis, and
//!   polygonal shapes with miter-extruded outlines
//! - `scene` / `app` - scene lifecycle stack and the owning frame loop
//!
//! Geometry recomputes synchronously on mutation; drawing submits cached
//! vertex buffers to a caller-owned `RenderTarget` each frame.

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod app;
pub mod render;
pub mod scene;
pub mod shape;
pub mod strutil;
pub mod text;

pub use app::{App, AppConfig};
pub use render::{
    Color, IntRect, Primitive, Rect, RenderStates, RenderTarget, ScreenTarget, Transform,
    Transformable, Vec2, Vertex, VertexBuffer,
};
pub use scene::{Scene, SceneAction, SceneManager};
pub use shape::Shape;
pub use text::{AtlasDesc, AtlasFont, Font, Glyph, GlyphDesc, Style, Text};
