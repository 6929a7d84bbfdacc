//! 2D affine transforms and the position/rotation/scale/origin component
//! carried by every renderable

use serde::{Deserialize, Serialize};

use super::math::{Rect, Vec2};

/// Row-major 3x3 affine matrix
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    m: [[f32; 3]; 3],
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        m: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
    };

    /// Pure translation
    pub fn translation(offset: Vec2) -> Self {
        Self {
            m: [
                [1.0, 0.0, offset.x],
                [0.0, 1.0, offset.y],
                [0.0, 0.0, 1.0],
            ],
        }
    }

    /// Rotation about the origin, in degrees.
    ///
    /// With the y-down screen convention a positive angle turns clockwise.
    pub fn rotation(degrees: f32) -> Self {
        let rad = degrees.to_radians();
        let (s, c) = rad.sin_cos();
        Self {
            m: [[c, -s, 0.0], [s, c, 0.0], [0.0, 0.0, 1.0]],
        }
    }

    /// Non-uniform scale about the origin
    pub fn scaling(factors: Vec2) -> Self {
        Self {
            m: [
                [factors.x, 0.0, 0.0],
                [0.0, factors.y, 0.0],
                [0.0, 0.0, 1.0],
            ],
        }
    }

    /// Matrix product `self * other`: `other` is applied first
    pub fn combine(&self, other: &Transform) -> Transform {
        let mut out = [[0.0f32; 3]; 3];
        for (i, row) in out.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = (0..3).map(|k| self.m[i][k] * other.m[k][j]).sum();
            }
        }
        Transform { m: out }
    }

    /// Map a point through the transform
    pub fn transform_point(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            self.m[0][0] * p.x + self.m[0][1] * p.y + self.m[0][2],
            self.m[1][0] * p.x + self.m[1][1] * p.y + self.m[1][2],
        )
    }

    /// Axis-aligned bounding box of the four transformed corners
    pub fn transform_rect(&self, r: Rect) -> Rect {
        let corners = [
            self.transform_point(Vec2::new(r.x, r.y)),
            self.transform_point(Vec2::new(r.right(), r.y)),
            self.transform_point(Vec2::new(r.x, r.bottom())),
            self.transform_point(Vec2::new(r.right(), r.bottom())),
        ];
        let (mut min_x, mut min_y) = (corners[0].x, corners[0].y);
        let (mut max_x, mut max_y) = (corners[0].x, corners[0].y);
        for c in &corners[1..] {
            min_x = min_x.min(c.x);
            min_y = min_y.min(c.y);
            max_x = max_x.max(c.x);
            max_y = max_y.max(c.y);
        }
        Rect::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Position / rotation / scale / origin carried by renderable entities.
///
/// The origin is the local pivot: rotation and scale are applied around it,
/// and `position` places it in the parent coordinate system.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Transformable {
    /// Position of the origin in parent coordinates
    pub position: Vec2,
    /// Rotation around the origin, degrees
    pub rotation: f32,
    /// Per-axis scale factor
    pub scale: Vec2,
    /// Local pivot point
    pub origin: Vec2,
}

impl Transformable {
    pub const IDENTITY: Transformable = Transformable {
        position: Vec2::ZERO,
        rotation: 0.0,
        scale: Vec2::ONE,
        origin: Vec2::ZERO,
    };

    /// Compose the entity transform: translate to `position`, rotate and
    /// scale around `origin`.
    pub fn transform(&self) -> Transform {
        Transform::translation(self.position)
            .combine(&Transform::rotation(self.rotation))
            .combine(&Transform::scaling(self.scale))
            .combine(&Transform::translation(-self.origin))
    }
}

impl Default for Transformable {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_vec2_eq(a: Vec2, b: Vec2) {
        assert!((a.x - b.x).abs() < 0.001, "{:?} != {:?}", a, b);
        assert!((a.y - b.y).abs() < 0.001, "{:?} != {:?}", a, b);
    }

    #[test]
    fn test_identity_is_noop() {
        let p = Vec2::new(3.0, -7.0);
        assert_vec2_eq(Transform::IDENTITY.transform_point(p), p);
    }

    #[test]
    fn test_translation() {
        let t = Transform::translation(Vec2::new(10.0, 20.0));
        assert_vec2_eq(t.transform_point(Vec2::new(1.0, 2.0)), Vec2::new(11.0, 22.0));
    }

    #[test]
    fn test_rotation_quarter_turn() {
        // y-down convention: +90 degrees maps +x onto +y
        let t = Transform::rotation(90.0);
        assert_vec2_eq(t.transform_point(Vec2::new(1.0, 0.0)), Vec2::new(0.0, 1.0));
    }

    #[test]
    fn test_combine_applies_right_operand_first() {
        let t = Transform::translation(Vec2::new(5.0, 0.0)).combine(&Transform::rotation(90.0));
        // Rotate (1,0) -> (0,1), then translate -> (5,1)
        assert_vec2_eq(t.transform_point(Vec2::new(1.0, 0.0)), Vec2::new(5.0, 1.0));
    }

    #[test]
    fn test_transform_rect_rotated() {
        let t = Transform::rotation(90.0);
        let r = t.transform_rect(Rect::new(0.0, 0.0, 2.0, 1.0));
        // Rectangle rotates onto the (-1..0, 0..2) region
        assert!((r.x - -1.0).abs() < 0.001);
        assert!((r.y - 0.0).abs() < 0.001);
        assert!((r.w - 1.0).abs() < 0.001);
        assert!((r.h - 2.0).abs() < 0.001);
    }

    #[test]
    fn test_transform_rect_empty_stays_empty() {
        let t = Transform::translation(Vec2::new(4.0, 4.0));
        let r = t.transform_rect(Rect::default());
        assert_eq!(r, Rect::new(4.0, 4.0, 0.0, 0.0));
    }

    #[test]
    fn test_transformable_origin_pivot() {
        let xf = Transformable {
            position: Vec2::new(100.0, 0.0),
            rotation: 180.0,
            scale: Vec2::ONE,
            origin: Vec2::new(10.0, 0.0),
        };
        // The origin lands exactly on `position`; the local point (0,0)
        // is 10 units before the origin, flipped to 10 units after it.
        assert_vec2_eq(xf.transform().transform_point(Vec2::new(10.0, 0.0)), Vec2::new(100.0, 0.0));
        assert_vec2_eq(xf.transform().transform_point(Vec2::ZERO), Vec2::new(110.0, 0.0));
    }
}
