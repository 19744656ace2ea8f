//! Collectors: the sinks the grammar walkers feed.
//!
//! A parse runs two passes over the same document. The [`ThemeCollector`]
//! honors capture calls only between `start_themes` and `end_themes` and
//! files master layers and styles into the [`Dictionary`]. The
//! [`ContentCollector`] then honors capture calls only between
//! `start_slides` and `end_slides`, resolves slide content against the
//! complete dictionary and draws it.
//!
//! Both realize the [`Collector`] trait by delegating to a
//! [`CollectorBase`]; they differ at the pass boundaries, at page
//! boundaries and on layer collection.
//!
//! Calling the structural operations out of order (`end_group` without an
//! open group, text outside a paragraph) is a bug in the grammar walker and
//! panics.
//!
//! [`Dictionary`]: crate::model::Dictionary

pub mod base;
pub mod content;
pub mod theme;

#[cfg(test)]
mod tests;

pub use base::CollectorBase;
pub use content::ContentCollector;
pub use theme::ThemeCollector;

use crate::model::{
    Callout, Data, Geometry, Path, Position, Size, Style, StyleKind, make_arrow_path, make_callout_path,
    make_connection_path, make_double_arrow_path, make_polygon_path, make_rounded_rectangle_path,
    make_star_path,
};

/// Sink of parsed entities.
pub trait Collector {
    fn base(&mut self) -> &mut CollectorBase;

    fn start_themes(&mut self);
    fn end_themes(&mut self);
    fn start_slides(&mut self);
    fn end_slides(&mut self);

    /// One master slide or slide.
    fn start_page(&mut self);
    fn end_page(&mut self);

    /// Take the layer closed last, or resolve a master layer reference.
    fn collect_layer(&mut self, id: Option<&str>, is_reference: bool);

    /// A master slide or slide is about to be walked, stylesheet first.
    fn start_slide(&mut self) {
        self.base().start_slide();
    }

    fn collect_page(&mut self, id: Option<&str>) {
        self.base().end_slide();
        tracing::trace!(id, "page collected");
    }

    fn collect_presentation(&mut self, size: Option<Size>) {
        self.base().collect_presentation(size);
    }

    fn collect_style(&mut self, kind: StyleKind, id: Option<&str>, style: Style) {
        self.base().collect_style(kind, id, style);
    }

    fn collect_stylesheet(&mut self, id: Option<&str>, parent: Option<&str>) {
        self.base().collect_stylesheet(id, parent);
    }

    fn collect_geometry(&mut self, id: Option<&str>, geometry: Option<Geometry>, is_reference: bool) {
        self.base().collect_geometry(id, geometry, is_reference);
    }

    fn collect_bezier(&mut self, id: Option<&str>, path: Option<Path>, is_reference: bool) {
        self.base().collect_bezier(id, path, is_reference);
    }

    fn collect_path(&mut self, path: Path) {
        self.base().collect_path(path);
    }

    fn collect_polygon_path(&mut self, size: Size, edges: u32) {
        self.collect_path(make_polygon_path(size, edges));
    }

    fn collect_rounded_rectangle_path(&mut self, size: Size, radius: f64) {
        self.collect_path(make_rounded_rectangle_path(size, radius));
    }

    fn collect_arrow_path(&mut self, size: Size, head_width: f64, stem_thickness: f64, double: bool) {
        let path = if double {
            make_double_arrow_path(size, head_width, stem_thickness)
        } else {
            make_arrow_path(size, head_width, stem_thickness)
        };
        self.collect_path(path);
    }

    fn collect_star_path(&mut self, size: Size, points: u32, inner_radius: f64) {
        self.collect_path(make_star_path(size, points, inner_radius));
    }

    fn collect_connection_path(&mut self, size: Size, middle: Position) {
        self.collect_path(make_connection_path(size, middle));
    }

    fn collect_callout_path(&mut self, size: Size, callout: &Callout) {
        self.collect_path(make_callout_path(size, callout));
    }

    fn collect_data(&mut self, id: Option<&str>, data: Option<Data>, is_reference: bool) {
        self.base().collect_data(id, data, is_reference);
    }

    fn collect_shape(&mut self, id: Option<&str>, style: Option<&str>) {
        self.base().collect_shape(id, style);
    }

    fn collect_image(&mut self, id: Option<&str>, style: Option<&str>, is_reference: bool) {
        self.base().collect_image(id, style, is_reference);
    }

    fn collect_line(
        &mut self,
        id: Option<&str>,
        ends: Option<(Position, Position)>,
        style: Option<&str>,
        is_reference: bool,
    ) {
        self.base().collect_line(id, ends, style, is_reference);
    }

    fn collect_media(&mut self, id: Option<&str>, style: Option<&str>, is_reference: bool) {
        self.base().collect_media(id, style, is_reference);
    }

    fn collect_text_body(&mut self, id: Option<&str>, style: Option<&str>, is_reference: bool) {
        self.base().collect_text_body(id, style, is_reference);
    }

    fn start_group(&mut self) {
        self.base().start_group();
    }

    fn end_group(&mut self) {
        self.base().end_group();
    }

    fn collect_group(&mut self, id: Option<&str>, is_reference: bool) {
        self.base().collect_group(id, is_reference);
    }

    fn start_layer(&mut self) {
        self.base().start_layer();
    }

    fn end_layer(&mut self) {
        self.base().end_layer();
    }

    fn start_text_layout(&mut self, style: Option<&str>) {
        self.base().start_text_layout(style);
    }

    fn end_text_layout(&mut self) {
        self.base().end_text_layout();
    }

    fn start_paragraph(&mut self, style: Option<&str>) {
        self.base().start_paragraph(style);
    }

    fn end_paragraph(&mut self) {
        self.base().end_paragraph();
    }

    fn collect_text(&mut self, style: Option<&str>, text: &str) {
        self.base().collect_text(style, text);
    }

    fn collect_tab(&mut self) {
        self.base().collect_tab();
    }

    fn collect_line_break(&mut self) {
        self.base().collect_line_break();
    }
}
