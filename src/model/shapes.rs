//! Path factories for the shape archetypes.
//!
//! Every factory builds its path in a local coordinate space spanning
//! `(0, 0)` to `(width, height)`. Page placement happens later, through the
//! geometry transformation, whichever factory produced the path.

use std::f64::consts::PI;

use super::geometry::{Position, Size};
use super::path::Path;

/// Control point distance of a quarter circle approximated by a cubic curve.
const KAPPA: f64 = 0.552_284_749_8;

/// Snap values within rounding noise of an integer.
fn snap(value: f64) -> f64 {
    let nearest = value.round();
    if (value - nearest).abs() < 1e-9 { nearest } else { value }
}

/// Point on the ellipse inscribed in `size`, `angle` radians clockwise from the top.
fn on_ellipse(size: Size, radius: f64, angle: f64) -> (f64, f64) {
    let (rx, ry) = (size.width / 2.0, size.height / 2.0);
    (
        snap(rx + rx * radius * angle.sin()),
        snap(ry - ry * radius * angle.cos()),
    )
}

/// Regular polygon with `edges` corners, the first one at the top center,
/// continuing clockwise. Each corner is computed from its own index.
pub fn make_polygon_path(size: Size, edges: u32) -> Path {
    let edges = edges.max(3);
    let mut path = Path::new();
    for i in 0..edges {
        let (x, y) = on_ellipse(size, 1.0, 2.0 * PI * f64::from(i) / f64::from(edges));
        if i == 0 {
            path.move_to(x, y);
        } else {
            path.line_to(x, y);
        }
    }
    path.close_path();
    path
}

/// Star with `points` outer tips; `inner_radius` is relative to the outer radius.
pub fn make_star_path(size: Size, points: u32, inner_radius: f64) -> Path {
    let points = points.max(3);
    let inner_radius = inner_radius.clamp(0.0, 1.0);
    let mut path = Path::new();
    for i in 0..points * 2 {
        let radius = if i % 2 == 0 { 1.0 } else { inner_radius };
        let (x, y) = on_ellipse(size, radius, PI * f64::from(i) / f64::from(points));
        if i == 0 {
            path.move_to(x, y);
        } else {
            path.line_to(x, y);
        }
    }
    path.close_path();
    path
}

fn append_rounded_rectangle(path: &mut Path, origin: Position, size: Size, radius: f64) {
    let (x, y, w, h) = (origin.x, origin.y, size.width, size.height);
    let r = radius.clamp(0.0, w.min(h) / 2.0);
    if r == 0.0 {
        path.move_to(x, y);
        path.line_to(x + w, y);
        path.line_to(x + w, y + h);
        path.line_to(x, y + h);
        path.close_path();
        return;
    }
    let k = r * KAPPA;
    path.move_to(x + r, y);
    path.line_to(x + w - r, y);
    path.curve_to(x + w - r + k, y, x + w, y + r - k, x + w, y + r);
    path.line_to(x + w, y + h - r);
    path.curve_to(x + w, y + h - r + k, x + w - r + k, y + h, x + w - r, y + h);
    path.line_to(x + r, y + h);
    path.curve_to(x + r - k, y + h, x, y + h - r + k, x, y + h - r);
    path.line_to(x, y + r);
    path.curve_to(x, y + r - k, x + r - k, y, x + r, y);
    path.close_path();
}

/// Rectangle with quarter-circle corners of `radius`, clamped to half the shorter side.
pub fn make_rounded_rectangle_path(size: Size, radius: f64) -> Path {
    let mut path = Path::new();
    append_rounded_rectangle(&mut path, Position::default(), size, radius);
    path
}

/// Right-pointing arrow. `head_width` is the horizontal extent of the head;
/// `stem_thickness` is the stem height relative to the full height.
pub fn make_arrow_path(size: Size, head_width: f64, stem_thickness: f64) -> Path {
    let (w, h) = (size.width, size.height);
    let head = head_width.clamp(0.0, w);
    let t = stem_thickness.clamp(0.0, 1.0);
    let (top, bottom) = (h * (1.0 - t) / 2.0, h * (1.0 + t) / 2.0);

    let mut path = Path::new();
    path.move_to(0.0, top);
    path.line_to(w - head, top);
    path.line_to(w - head, 0.0);
    path.line_to(w, h / 2.0);
    path.line_to(w - head, h);
    path.line_to(w - head, bottom);
    path.line_to(0.0, bottom);
    path.close_path();
    path
}

/// Arrow with a head on both ends; parameters as for [`make_arrow_path`].
pub fn make_double_arrow_path(size: Size, head_width: f64, stem_thickness: f64) -> Path {
    let (w, h) = (size.width, size.height);
    let head = head_width.clamp(0.0, w / 2.0);
    let t = stem_thickness.clamp(0.0, 1.0);
    let (top, bottom) = (h * (1.0 - t) / 2.0, h * (1.0 + t) / 2.0);

    let mut path = Path::new();
    path.move_to(0.0, h / 2.0);
    path.line_to(head, 0.0);
    path.line_to(head, top);
    path.line_to(w - head, top);
    path.line_to(w - head, 0.0);
    path.line_to(w, h / 2.0);
    path.line_to(w - head, h);
    path.line_to(w - head, bottom);
    path.line_to(head, bottom);
    path.line_to(head, h);
    path.close_path();
    path
}

/// Open connector curve from the top-left to the bottom-right corner, bent
/// towards `middle`. The quadratic curve is expressed as a cubic one.
pub fn make_connection_path(size: Size, middle: Position) -> Path {
    let (w, h) = (size.width, size.height);
    let mut path = Path::new();
    path.move_to(0.0, 0.0);
    path.curve_to(
        2.0 / 3.0 * middle.x,
        2.0 / 3.0 * middle.y,
        w + 2.0 / 3.0 * (middle.x - w),
        h + 2.0 / 3.0 * (middle.y - h),
        w,
        h,
    );
    path
}

/// Parameters of a speech bubble.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Callout {
    pub corner_radius: f64,
    /// Tip of the tail, in the local coordinate space
    pub tail: Position,
    /// Width of the tail at its base
    pub tail_size: f64,
    /// Start the tail at the center of the body instead of its edge
    pub tail_at_center: bool,
}

/// Rounded body plus a triangular tail pointing at `callout.tail`.
pub fn make_callout_path(size: Size, callout: &Callout) -> Path {
    let mut path = Path::new();
    append_rounded_rectangle(&mut path, Position::default(), size, callout.corner_radius);

    let (w, h) = (size.width, size.height);
    let base = if callout.tail_at_center {
        Position::new(w / 2.0, h / 2.0)
    } else {
        Position::new(callout.tail.x.clamp(0.0, w), callout.tail.y.clamp(0.0, h))
    };
    let half = callout.tail_size.max(0.0) / 2.0;
    path.move_to(base.x - half, base.y);
    path.line_to(callout.tail.x, callout.tail.y);
    path.line_to(base.x + half, base.y);
    path.close_path();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::path::PathElement;

    #[test]
    fn test_polygon_diamond_is_exact() {
        let path = make_polygon_path(Size::new(100.0, 100.0), 4);
        assert_eq!(
            path.elements(),
            &[
                PathElement::MoveTo { x: 50.0, y: 0.0 },
                PathElement::LineTo { x: 100.0, y: 50.0 },
                PathElement::LineTo { x: 50.0, y: 100.0 },
                PathElement::LineTo { x: 0.0, y: 50.0 },
                PathElement::ClosePath,
            ]
        );
    }

    #[test]
    fn test_polygon_triangle() {
        let path = make_polygon_path(Size::new(100.0, 100.0), 3);
        assert_eq!(path.len(), 4);
        assert_eq!(path.elements()[0], PathElement::MoveTo { x: 50.0, y: 0.0 });
        assert!(path.is_closed());
    }

    #[test]
    fn test_star_alternates_radii() {
        let path = make_star_path(Size::new(100.0, 100.0), 5, 0.5);
        assert_eq!(path.len(), 11);
        assert_eq!(path.elements()[0], PathElement::MoveTo { x: 50.0, y: 0.0 });
        // Opposite the first tip, halfway in: an inner vertex
        assert!(path.elements()[5].approx_eq(&PathElement::LineTo { x: 50.0, y: 75.0 }, 1e-9));
    }

    #[test]
    fn test_rounded_rectangle() {
        let sharp = make_rounded_rectangle_path(Size::new(10.0, 20.0), 0.0);
        assert_eq!(sharp.to_string(), "M 0 0 L 10 0 L 10 20 L 0 20 Z");

        let round = make_rounded_rectangle_path(Size::new(10.0, 20.0), 100.0);
        assert_eq!(round.len(), 10);
        // Radius clamped to half the shorter side
        assert_eq!(round.elements()[0], PathElement::MoveTo { x: 5.0, y: 0.0 });
    }

    #[test]
    fn test_arrows() {
        let arrow = make_arrow_path(Size::new(100.0, 40.0), 30.0, 0.5);
        assert_eq!(arrow.to_string(), "M 0 10 L 70 10 L 70 0 L 100 20 L 70 40 L 70 30 L 0 30 Z");

        let double = make_double_arrow_path(Size::new(100.0, 40.0), 30.0, 0.5);
        assert_eq!(double.len(), 11);
        assert_eq!(double.elements()[0], PathElement::MoveTo { x: 0.0, y: 20.0 });
    }

    #[test]
    fn test_connection_is_open() {
        let path = make_connection_path(Size::new(90.0, 30.0), Position::new(45.0, 0.0));
        assert!(!path.is_closed());
        assert_eq!(path.to_string(), "M 0 0 C 30 0 60 10 90 30");
    }

    #[test]
    fn test_callout_has_body_and_tail() {
        let callout = Callout {
            corner_radius: 0.0,
            tail: Position::new(50.0, 80.0),
            tail_size: 10.0,
            tail_at_center: false,
        };
        let path = make_callout_path(Size::new(100.0, 50.0), &callout);
        assert_eq!(
            path.to_string(),
            "M 0 0 L 100 0 L 100 50 L 0 50 Z M 45 50 L 50 80 L 55 50 Z"
        );
    }
}
