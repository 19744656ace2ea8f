//! Document model: styles, geometry, drawables and the shared dictionary.
//!
//! Both collector passes write into one [`Dictionary`]. Styles link to their
//! parents through the [`Stylesheet`] chain; drawables carry their own
//! geometry and draw themselves through an [`Output`](crate::output::Output)
//! context.

pub mod defaults;
pub mod dictionary;
pub mod geometry;
pub mod layer;
pub mod object;
pub mod path;
pub mod shapes;
pub mod style;
pub mod stylesheet;
pub mod text;
pub mod transform;

pub use defaults::{Defaults, LegacyDefaults, ModernDefaults};
pub use dictionary::{Dictionary, ObjectKind};
pub use geometry::{Geometry, Position, Size};
pub use layer::{Layer, LayerContent};
pub use object::{Data, Group, Image, Line, Media, Object, Shape, TextBody};
pub use path::{Path, PathElement};
pub use shapes::{
    Callout, make_arrow_path, make_callout_path, make_connection_path, make_double_arrow_path,
    make_polygon_path, make_rounded_rectangle_path, make_star_path,
};
pub use style::{Property, PropertyMap, Stroke, Style, StyleContext, StyleKind};
pub use stylesheet::Stylesheet;
pub use text::{Inline, Paragraph, Text};
pub use transform::Transformation;
