//! Painter recording its calls as text, for tests.

use crate::model::PathElement;

use super::{Painter, PropertyList};

#[derive(Debug, Default)]
pub(crate) struct RecordingPainter {
    pub calls: Vec<String>,
}

impl RecordingPainter {
    fn push(&mut self, name: &str, props: &PropertyList) {
        if props.is_empty() {
            self.calls.push(name.to_string());
        } else {
            self.calls.push(format!("{}({})", name, props));
        }
    }

    /// Calls whose name starts with `prefix`.
    pub fn calls_named(&self, prefix: &str) -> Vec<&str> {
        self.calls
            .iter()
            .map(String::as_str)
            .filter(|c| c.starts_with(prefix))
            .collect()
    }
}

fn points(points: &[(f64, f64)]) -> String {
    points
        .iter()
        .map(|(x, y)| format!("{} {}", crate::common::number::fmt_num(*x), crate::common::number::fmt_num(*y)))
        .collect::<Vec<_>>()
        .join(", ")
}

impl Painter for RecordingPainter {
    fn start_document(&mut self, props: &PropertyList) {
        self.push("start_document", props);
    }

    fn end_document(&mut self) {
        self.calls.push("end_document".into());
    }

    fn start_graphics(&mut self, props: &PropertyList) {
        self.push("start_graphics", props);
    }

    fn end_graphics(&mut self) {
        self.calls.push("end_graphics".into());
    }

    fn start_layer(&mut self, props: &PropertyList) {
        self.push("start_layer", props);
    }

    fn end_layer(&mut self) {
        self.calls.push("end_layer".into());
    }

    fn set_style(&mut self, props: &PropertyList) {
        self.push("set_style", props);
    }

    fn draw_rectangle(&mut self, props: &PropertyList) {
        self.push("draw_rectangle", props);
    }

    fn draw_ellipse(&mut self, props: &PropertyList) {
        self.push("draw_ellipse", props);
    }

    fn draw_polyline(&mut self, pts: &[(f64, f64)]) {
        self.calls.push(format!("draw_polyline({})", points(pts)));
    }

    fn draw_polygon(&mut self, pts: &[(f64, f64)]) {
        self.calls.push(format!("draw_polygon({})", points(pts)));
    }

    fn draw_path(&mut self, path: &[PathElement]) {
        let path = crate::model::Path::from(path.to_vec());
        self.calls.push(format!("draw_path({})", path));
    }

    fn draw_graphic_object(&mut self, props: &PropertyList) {
        self.push("draw_graphic_object", props);
    }

    fn start_text_object(&mut self, props: &PropertyList) {
        self.push("start_text_object", props);
    }

    fn end_text_object(&mut self) {
        self.calls.push("end_text_object".into());
    }

    fn open_paragraph(&mut self, props: &PropertyList) {
        self.push("open_paragraph", props);
    }

    fn close_paragraph(&mut self) {
        self.calls.push("close_paragraph".into());
    }

    fn open_span(&mut self, props: &PropertyList) {
        self.push("open_span", props);
    }

    fn close_span(&mut self) {
        self.calls.push("close_span".into());
    }

    fn insert_text(&mut self, text: &str) {
        self.calls.push(format!("insert_text({})", text));
    }

    fn insert_tab(&mut self) {
        self.calls.push("insert_tab".into());
    }

    fn insert_line_break(&mut self) {
        self.calls.push("insert_line_break".into());
    }
}
