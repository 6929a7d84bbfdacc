//! Rendering foundation: math, colors, vertex streams, transforms, targets
//!
//! # Module Organization
//!
//! - `math` - Vec2, Rect, IntRect
//! - `color` - RGBA color
//! - `types` - Vertex, Primitive, VertexBuffer
//! - `transform` - 2D affine Transform and the Transformable component
//! - `target` - RenderStates, the RenderTarget trait, the macroquad sink

pub mod color;
pub mod math;
pub mod target;
pub mod transform;
pub mod types;

pub use color::Color;
pub use math::{IntRect, Rect, Vec2};
pub use target::{RenderStates, RenderTarget, ScreenTarget};
pub use transform::{Transform, Transformable};
pub use types::{Primitive, Vertex, VertexBuffer};
