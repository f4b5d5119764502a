//! Group transforms and their 2D affine matrices

use serde::Serialize;

/// Transform of a group relative to its parent.
///
/// Applied to a point as scale, then horizontal skew, then rotation, then
/// translation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Transform {
    pub translate: [f32; 2],
    pub scale: [f32; 2],
    /// Degrees, clockwise on screen (y grows downwards)
    pub rotate: f32,
    /// Horizontal skew in degrees
    pub skew_x: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform { translate: [0.0, 0.0], scale: [1.0, 1.0], rotate: 0.0, skew_x: 0.0 };

    pub fn translate(x: f32, y: f32) -> Self {
        Transform { translate: [x, y], ..Self::IDENTITY }
    }

    pub fn scaled(factor: f32) -> Self {
        Transform { scale: [factor, factor], ..Self::IDENTITY }
    }

    pub fn with_scale(mut self, sx: f32, sy: f32) -> Self {
        self.scale = [sx, sy];
        self
    }

    pub fn with_rotation(mut self, degrees: f32) -> Self {
        self.rotate = degrees;
        self
    }

    pub fn with_skew_x(mut self, degrees: f32) -> Self {
        self.skew_x = degrees;
        self
    }

    pub fn to_affine(&self) -> Affine {
        Affine::translation(self.translate[0], self.translate[1])
            .then(&Affine::rotation(self.rotate))
            .then(&Affine::skew_x(self.skew_x))
            .then(&Affine::scaling(self.scale[0], self.scale[1]))
    }
}

/// Column-major 2D affine matrix:
/// `x' = a*x + c*y + e`, `y' = b*x + d*y + f`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub e: f32,
    pub f: f32,
}

impl Affine {
    pub const IDENTITY: Affine = Affine { a: 1.0, b: 0.0, c: 0.0, d: 1.0, e: 0.0, f: 0.0 };

    pub fn translation(x: f32, y: f32) -> Self {
        Affine { e: x, f: y, ..Self::IDENTITY }
    }

    pub fn scaling(sx: f32, sy: f32) -> Self {
        Affine { a: sx, d: sy, ..Self::IDENTITY }
    }

    pub fn rotation(degrees: f32) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Affine { a: cos, b: sin, c: -sin, d: cos, e: 0.0, f: 0.0 }
    }

    pub fn skew_x(degrees: f32) -> Self {
        Affine { c: degrees.to_radians().tan(), ..Self::IDENTITY }
    }

    /// `self * other`: the result applies `other` first, then `self`.
    pub fn then(&self, other: &Affine) -> Affine {
        Affine {
            a: self.a * other.a + self.c * other.b,
            b: self.b * other.a + self.d * other.b,
            c: self.a * other.c + self.c * other.d,
            d: self.b * other.c + self.d * other.d,
            e: self.a * other.e + self.c * other.f + self.e,
            f: self.b * other.e + self.d * other.f + self.f,
        }
    }

    pub fn apply(&self, [x, y]: [f32; 2]) -> [f32; 2] {
        [self.a * x + self.c * y + self.e, self.b * x + self.d * y + self.f]
    }

    /// Inverse matrix, `None` when the transform collapses an axis.
    pub fn invert(&self) -> Option<Affine> {
        let det = self.a * self.d - self.b * self.c;
        if det.abs() < f32::EPSILON || !det.is_finite() {
            return None;
        }
        let (a, b, c, d) = (self.d / det, -self.b / det, -self.c / det, self.a / det);
        Some(Affine { a, b, c, d, e: -(a * self.e + c * self.f), f: -(b * self.e + d * self.f) })
    }

    /// Length of the transformed unit axes.
    pub fn scale_factors(&self) -> [f32; 2] {
        [(self.a * self.a + self.b * self.b).sqrt(), (self.c * self.c + self.d * self.d).sqrt()]
    }

    /// Geometric mean of the axis scales, used to size strokes.
    pub fn mean_scale(&self) -> f32 {
        (self.a * self.d - self.b * self.c).abs().sqrt()
    }
}
