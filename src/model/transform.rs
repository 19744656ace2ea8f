//! Affine transformations.
//!
//! Composition follows function notation: `a * b` applies `b` first, then `a`.

use std::ops::Mul;

use super::geometry::Geometry;

/// 2D affine transformation.
///
/// Maps `(x, y)` to `(xx * x + xy * y + x0, yx * x + yy * y + y0)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transformation {
    pub xx: f64,
    pub yx: f64,
    pub xy: f64,
    pub yy: f64,
    pub x0: f64,
    pub y0: f64,
}

impl Default for Transformation {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transformation {
    pub const IDENTITY: Transformation = Transformation {
        xx: 1.0,
        yx: 0.0,
        xy: 0.0,
        yy: 1.0,
        x0: 0.0,
        y0: 0.0,
    };

    pub const fn new(xx: f64, yx: f64, xy: f64, yy: f64, x0: f64, y0: f64) -> Self {
        Self { xx, yx, xy, yy, x0, y0 }
    }

    pub fn translate(dx: f64, dy: f64) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, dx, dy)
    }

    pub fn scale(sx: f64, sy: f64) -> Self {
        Self::new(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    /// Rotation by `angle` radians.
    pub fn rotate(angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::new(cos, sin, -sin, cos, 0.0, 0.0)
    }

    /// Mirror horizontally and/or vertically about the origin.
    pub fn flip(horizontal: bool, vertical: bool) -> Self {
        Self::scale(
            if horizontal { -1.0 } else { 1.0 },
            if vertical { -1.0 } else { 1.0 },
        )
    }

    /// Skew by the given angles (radians) along the x and y axes.
    pub fn shear(x_angle: f64, y_angle: f64) -> Self {
        Self::new(1.0, y_angle.tan(), x_angle.tan(), 1.0, 0.0, 0.0)
    }

    /// Move the center of a `width` × `height` box to the origin.
    pub fn center(width: f64, height: f64) -> Self {
        Self::translate(-width / 2.0, -height / 2.0)
    }

    /// Inverse of [`Transformation::center`].
    pub fn decenter(width: f64, height: f64) -> Self {
        Self::translate(width / 2.0, height / 2.0)
    }

    /// Transformation placing a shape described by `geometry` on the page.
    ///
    /// Order: center, shear, flip, rotate, decenter, translate.
    pub fn from_geometry(geometry: &Geometry) -> Self {
        let size = geometry.natural_size.or(geometry.size).unwrap_or_default();
        let (w, h) = (size.width, size.height);

        let mut tr = Self::center(w, h);
        let shear_x = geometry.shear_x_angle.unwrap_or(0.0);
        let shear_y = geometry.shear_y_angle.unwrap_or(0.0);
        if shear_x != 0.0 || shear_y != 0.0 {
            tr = Self::shear(shear_x.to_radians(), shear_y.to_radians()) * tr;
        }
        let (hflip, vflip) = (
            geometry.horizontal_flip.unwrap_or(false),
            geometry.vertical_flip.unwrap_or(false),
        );
        if hflip || vflip {
            tr = Self::flip(hflip, vflip) * tr;
        }
        if let Some(angle) = geometry.angle.filter(|a| *a != 0.0) {
            // Stored counter-clockwise; the page y axis points down
            tr = Self::rotate(-angle.to_radians()) * tr;
        }
        tr = Self::decenter(w, h) * tr;
        if let Some(position) = geometry.position {
            tr = Self::translate(position.x, position.y) * tr;
        }
        tr
    }

    /// Apply to a point.
    #[inline]
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.xx * x + self.xy * y + self.x0,
            self.yx * x + self.yy * y + self.y0,
        )
    }

    /// Whether this transformation keeps axis-aligned rectangles axis-aligned.
    pub fn is_axis_aligned(&self) -> bool {
        self.xy.abs() < 1e-12 && self.yx.abs() < 1e-12
    }

    /// Component-wise comparison with an absolute tolerance.
    pub fn approx_eq(&self, other: &Self, eps: f64) -> bool {
        [
            (self.xx, other.xx),
            (self.yx, other.yx),
            (self.xy, other.xy),
            (self.yy, other.yy),
            (self.x0, other.x0),
            (self.y0, other.y0),
        ]
        .iter()
        .all(|(a, b)| (a - b).abs() <= eps)
    }
}

impl Mul for Transformation {
    type Output = Transformation;

    /// `self * rhs` applies `rhs` first.
    fn mul(self, rhs: Transformation) -> Transformation {
        Transformation {
            xx: self.xx * rhs.xx + self.xy * rhs.yx,
            yx: self.yx * rhs.xx + self.yy * rhs.yx,
            xy: self.xx * rhs.xy + self.xy * rhs.yy,
            yy: self.yx * rhs.xy + self.yy * rhs.yy,
            x0: self.xx * rhs.x0 + self.xy * rhs.y0 + self.x0,
            y0: self.yx * rhs.x0 + self.yy * rhs.y0 + self.y0,
        }
    }
}
