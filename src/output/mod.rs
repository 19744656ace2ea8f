//! Drawing protocol between the decoder and a rendering backend.
//!
//! The content pass emits its draw calls to a [`Painter`] in document and
//! z-order: layers in collection order, the objects of a layer in collection
//! order, group children before the siblings of the group. A style-setting
//! call always precedes the drawing call it affects.
//!
//! [`SvgPainter`] is the bundled backend; it produces one standalone SVG
//! document per page.

pub mod context;
pub mod property;
pub mod svg;

#[cfg(test)]
pub(crate) mod recorder;

pub use context::Output;
pub use property::{PropertyList, PropertyValue, keys};
pub use svg::SvgPainter;

use crate::model::PathElement;

/// Consumer of draw calls.
///
/// Every call receives its arguments as a [`PropertyList`] (see [`keys`] for
/// the names in use) or as plain coordinates already in page space.
pub trait Painter {
    fn start_document(&mut self, props: &PropertyList);
    fn end_document(&mut self);

    /// Start a page. `props` carries the page size.
    fn start_graphics(&mut self, props: &PropertyList);
    fn end_graphics(&mut self);

    fn start_layer(&mut self, props: &PropertyList);
    fn end_layer(&mut self);

    /// Graphic style of the drawing calls that follow.
    fn set_style(&mut self, props: &PropertyList);

    fn draw_rectangle(&mut self, props: &PropertyList);
    fn draw_ellipse(&mut self, props: &PropertyList);
    fn draw_polyline(&mut self, points: &[(f64, f64)]);
    fn draw_polygon(&mut self, points: &[(f64, f64)]);
    fn draw_path(&mut self, path: &[PathElement]);

    /// Embedded image or media frame.
    fn draw_graphic_object(&mut self, props: &PropertyList);

    fn start_text_object(&mut self, props: &PropertyList);
    fn end_text_object(&mut self);
    fn open_paragraph(&mut self, props: &PropertyList);
    fn close_paragraph(&mut self);
    fn open_span(&mut self, props: &PropertyList);
    fn close_span(&mut self);
    fn insert_text(&mut self, text: &str);
    fn insert_tab(&mut self);
    fn insert_line_break(&mut self);
}
