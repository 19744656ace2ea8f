//! Shape placement records.

/// Width and height.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Top-left corner on the page.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Placement of a drawable. Every field is independently optional; missing
/// values are filled by the version's [`Defaults`](super::Defaults).
///
/// Angles are in degrees.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Geometry {
    pub natural_size: Option<Size>,
    pub size: Option<Size>,
    pub position: Option<Position>,
    pub angle: Option<f64>,
    pub shear_x_angle: Option<f64>,
    pub shear_y_angle: Option<f64>,
    pub horizontal_flip: Option<bool>,
    pub vertical_flip: Option<bool>,
    pub aspect_ratio_locked: Option<bool>,
    pub sizes_locked: Option<bool>,
}

impl Geometry {
    /// Size the shape is drawn at: the natural size, else the explicit size.
    pub fn extent(&self) -> Size {
        self.natural_size.or(self.size).unwrap_or_default()
    }
}
