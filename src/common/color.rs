use std::fmt;

/// RGBA color with floating-point components.
///
/// The format stores calibrated colors as components in `0.0..=1.0`;
/// values outside that range are clamped on construction.
///
/// # Examples
///
/// ```rust
/// use apxl::common::Color;
///
/// let red = Color::new(1.0, 0.0, 0.0, 1.0);
/// assert_eq!(red.to_hex(), "FF0000");
///
/// let grey = Color::grey(0.5, 1.0);
/// assert_eq!(grey.to_hex(), "808080");
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl Color {
    pub const BLACK: Color = Color {
        red: 0.0,
        green: 0.0,
        blue: 0.0,
        alpha: 1.0,
    };

    pub const WHITE: Color = Color {
        red: 1.0,
        green: 1.0,
        blue: 1.0,
        alpha: 1.0,
    };

    /// Create a new color, clamping every component to `0.0..=1.0`.
    #[inline]
    pub fn new(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red: red.clamp(0.0, 1.0),
            green: green.clamp(0.0, 1.0),
            blue: blue.clamp(0.0, 1.0),
            alpha: alpha.clamp(0.0, 1.0),
        }
    }

    /// Create a grey level color (`sfa:w` white component).
    #[inline]
    pub fn grey(white: f64, alpha: f64) -> Self {
        Self::new(white, white, white, alpha)
    }

    #[inline]
    fn channel(value: f64) -> u8 {
        (value * 255.0).round() as u8
    }

    /// Convert to a hex string without the `#` prefix.
    pub fn to_hex(&self) -> String {
        format!(
            "{:02X}{:02X}{:02X}",
            Self::channel(self.red),
            Self::channel(self.green),
            Self::channel(self.blue)
        )
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.to_hex())
    }
}
