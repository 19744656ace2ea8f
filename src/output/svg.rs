//! SVG backend: one standalone SVG document per page.
//!
//! Output is written straight into a `String` buffer; numbers go through
//! [`write_num`] so integers print without a fraction and everything else
//! with at most four decimals.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use quick_xml::escape::escape;

use crate::common::number::write_num;
use crate::model::PathElement;

use super::{Painter, PropertyList, PropertyValue, keys};

const SVG_HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>"#;

#[derive(Debug, Default, Clone)]
struct GraphicState {
    fill: Option<String>,
    stroke: Option<String>,
    stroke_width: Option<f64>,
    opacity: Option<f64>,
}

#[derive(Debug, Default, Clone, Copy)]
struct TextFrame {
    x: f64,
    y: f64,
    line: u32,
}

/// [`Painter`] serializing every page to SVG.
#[derive(Debug, Default)]
pub struct SvgPainter {
    pages: Vec<String>,
    page: Option<String>,
    state: GraphicState,
    text: Option<TextFrame>,
}

impl SvgPainter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pages finished so far.
    pub fn pages(&self) -> &[String] {
        &self.pages
    }

    pub fn into_pages(self) -> Vec<String> {
        self.pages
    }

    fn out(&mut self) -> Option<&mut String> {
        self.page.as_mut()
    }

    fn write_attr_num(out: &mut String, name: &str, value: f64) {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        write_num(out, value);
        out.push('"');
    }

    fn write_attr(out: &mut String, name: &str, value: &str) {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&escape(value));
        out.push('"');
    }

    fn write_paint(&mut self) {
        let state = self.state.clone();
        let Some(out) = self.out() else {
            return;
        };
        Self::write_attr(out, "fill", state.fill.as_deref().unwrap_or("none"));
        Self::write_attr(out, "stroke", state.stroke.as_deref().unwrap_or("none"));
        if state.stroke.is_some() {
            Self::write_attr_num(out, "stroke-width", state.stroke_width.unwrap_or(1.0));
        }
        if let Some(opacity) = state.opacity {
            Self::write_attr_num(out, "opacity", opacity);
        }
    }

    fn write_frame(out: &mut String, props: &PropertyList) {
        for (key, name) in [(keys::X, "x"), (keys::Y, "y"), (keys::WIDTH, "width"), (keys::HEIGHT, "height")] {
            Self::write_attr_num(out, name, props.get_number(key).unwrap_or(0.0));
        }
        if let Some(transform) = props.get_str(keys::TRANSFORM) {
            Self::write_attr(out, "transform", transform);
        }
    }

    fn write_points(&mut self, element: &str, points: &[(f64, f64)]) {
        let Some(out) = self.out() else {
            return;
        };
        out.push('<');
        out.push_str(element);
        out.push_str(" points=\"");
        for (i, (x, y)) in points.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            write_num(out, *x);
            out.push(',');
            write_num(out, *y);
        }
        out.push('"');
        self.write_paint();
        if let Some(out) = self.out() {
            out.push_str("/>\n");
        }
    }
}

impl Painter for SvgPainter {
    fn start_document(&mut self, _props: &PropertyList) {
        self.pages.clear();
    }

    fn end_document(&mut self) {}

    fn start_graphics(&mut self, props: &PropertyList) {
        let width = props.get_number(keys::WIDTH).unwrap_or(0.0);
        let height = props.get_number(keys::HEIGHT).unwrap_or(0.0);
        let mut out = String::with_capacity(4096);
        out.push_str(SVG_HEADER);
        out.push('\n');
        out.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink""#);
        Self::write_attr_num(&mut out, "width", width);
        Self::write_attr_num(&mut out, "height", height);
        out.push_str(" viewBox=\"0 0 ");
        write_num(&mut out, width);
        out.push(' ');
        write_num(&mut out, height);
        out.push_str("\">\n");
        self.page = Some(out);
        self.state = GraphicState::default();
    }

    fn end_graphics(&mut self) {
        if let Some(mut out) = self.page.take() {
            out.push_str("</svg>\n");
            self.pages.push(out);
        }
    }

    fn start_layer(&mut self, props: &PropertyList) {
        let Some(out) = self.out() else {
            return;
        };
        out.push_str("<g");
        if let Some(id) = props.get_str(keys::LAYER) {
            Self::write_attr(out, "id", id);
        }
        out.push_str(">\n");
    }

    fn end_layer(&mut self) {
        if let Some(out) = self.out() {
            out.push_str("</g>\n");
        }
    }

    fn set_style(&mut self, props: &PropertyList) {
        let mut state = GraphicState::default();
        if props.get_str(keys::FILL) == Some("solid") {
            state.fill = props.get_str(keys::FILL_COLOR).map(str::to_string);
        }
        if props.get_str(keys::STROKE) == Some("solid") {
            state.stroke = props.get_str(keys::STROKE_COLOR).map(str::to_string);
            state.stroke_width = props.get_number(keys::STROKE_WIDTH);
        }
        state.opacity = props.get_number(keys::OPACITY);
        self.state = state;
    }

    fn draw_rectangle(&mut self, props: &PropertyList) {
        let Some(out) = self.out() else {
            return;
        };
        out.push_str("<rect");
        Self::write_frame(out, props);
        self.write_paint();
        if let Some(out) = self.out() {
            out.push_str("/>\n");
        }
    }

    fn draw_ellipse(&mut self, props: &PropertyList) {
        let Some(out) = self.out() else {
            return;
        };
        let (x, y) = (props.get_number(keys::X).unwrap_or(0.0), props.get_number(keys::Y).unwrap_or(0.0));
        let (rx, ry) = (
            props.get_number(keys::WIDTH).unwrap_or(0.0) / 2.0,
            props.get_number(keys::HEIGHT).unwrap_or(0.0) / 2.0,
        );
        out.push_str("<ellipse");
        Self::write_attr_num(out, "cx", x + rx);
        Self::write_attr_num(out, "cy", y + ry);
        Self::write_attr_num(out, "rx", rx);
        Self::write_attr_num(out, "ry", ry);
        if let Some(transform) = props.get_str(keys::TRANSFORM) {
            Self::write_attr(out, "transform", transform);
        }
        self.write_paint();
        if let Some(out) = self.out() {
            out.push_str("/>\n");
        }
    }

    fn draw_polyline(&mut self, points: &[(f64, f64)]) {
        self.write_points("polyline", points);
    }

    fn draw_polygon(&mut self, points: &[(f64, f64)]) {
        self.write_points("polygon", points);
    }

    fn draw_path(&mut self, path: &[PathElement]) {
        let Some(out) = self.out() else {
            return;
        };
        out.push_str("<path d=\"");
        let path = crate::model::Path::from(path.to_vec());
        path.write_to(out);
        out.push('"');
        self.write_paint();
        if let Some(out) = self.out() {
            out.push_str("/>\n");
        }
    }

    fn draw_graphic_object(&mut self, props: &PropertyList) {
        let Some(out) = self.out() else {
            return;
        };
        let href = match props.get(keys::BINARY_DATA) {
            Some(PropertyValue::Binary(data)) => {
                let mime = props.get_str(keys::MIME_TYPE).unwrap_or("application/octet-stream");
                format!("data:{};base64,{}", mime, STANDARD.encode(data))
            },
            _ => props.get_str(keys::MEMBER).unwrap_or_default().to_string(),
        };
        out.push_str("<image");
        Self::write_frame(out, props);
        Self::write_attr(out, "xlink:href", &href);
        out.push_str("/>\n");
    }

    fn start_text_object(&mut self, props: &PropertyList) {
        let frame = TextFrame {
            x: props.get_number(keys::X).unwrap_or(0.0),
            y: props.get_number(keys::Y).unwrap_or(0.0),
            line: 0,
        };
        self.text = Some(frame);
        let Some(out) = self.out() else {
            return;
        };
        out.push_str("<text xml:space=\"preserve\"");
        Self::write_attr_num(out, "x", frame.x);
        Self::write_attr_num(out, "y", frame.y);
        if let Some(transform) = props.get_str(keys::TRANSFORM) {
            Self::write_attr(out, "transform", transform);
        }
        out.push_str(">\n");
    }

    fn end_text_object(&mut self) {
        self.text = None;
        if let Some(out) = self.out() {
            out.push_str("</text>\n");
        }
    }

    fn open_paragraph(&mut self, props: &PropertyList) {
        let Some(mut frame) = self.text else {
            return;
        };
        frame.line += 1;
        self.text = Some(frame);
        let Some(out) = self.out() else {
            return;
        };
        out.push_str("<tspan");
        Self::write_attr_num(out, "x", frame.x);
        out.push_str(" dy=\"1.2em\"");
        if let Some(align) = props.get_str(keys::TEXT_ALIGN) {
            let anchor = match align {
                "center" => "middle",
                "end" => "end",
                _ => "start",
            };
            Self::write_attr(out, "text-anchor", anchor);
        }
        out.push('>');
    }

    fn close_paragraph(&mut self) {
        if self.text.is_some()
            && let Some(out) = self.out()
        {
            out.push_str("</tspan>\n");
        }
    }

    fn open_span(&mut self, props: &PropertyList) {
        let Some(out) = self.out() else {
            return;
        };
        out.push_str("<tspan");
        if let Some(size) = props.get_number(keys::FONT_SIZE) {
            Self::write_attr_num(out, "font-size", size);
        }
        if let Some(name) = props.get_str(keys::FONT_NAME) {
            Self::write_attr(out, "font-family", name);
        }
        if let Some(weight) = props.get_str(keys::FONT_WEIGHT) {
            Self::write_attr(out, "font-weight", weight);
        }
        if let Some(style) = props.get_str(keys::FONT_STYLE) {
            Self::write_attr(out, "font-style", style);
        }
        if props.get_str(keys::UNDERLINE) == Some("single") {
            Self::write_attr(out, "text-decoration", "underline");
        }
        if let Some(color) = props.get_str(keys::COLOR) {
            Self::write_attr(out, "fill", color);
        }
        out.push('>');
    }

    fn close_span(&mut self) {
        if let Some(out) = self.out() {
            out.push_str("</tspan>");
        }
    }

    fn insert_text(&mut self, text: &str) {
        if let Some(out) = self.out() {
            out.push_str(&escape(text));
        }
    }

    fn insert_tab(&mut self) {
        if let Some(out) = self.out() {
            out.push('\t');
        }
    }

    fn insert_line_break(&mut self) {
        let Some(frame) = self.text else {
            return;
        };
        if let Some(out) = self.out() {
            out.push_str("<tspan");
            Self::write_attr_num(out, "x", frame.x);
            out.push_str(" dy=\"1.2em\"/>");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    fn page(painter: &mut SvgPainter, width: f64, height: f64) {
        painter.start_graphics(&PropertyList::new().with(keys::WIDTH, width).with(keys::HEIGHT, height));
    }

    #[test]
    fn test_one_document_per_page() {
        let mut painter = SvgPainter::new();
        painter.start_document(&PropertyList::new());
        page(&mut painter, 1024.0, 768.0);
        painter.end_graphics();
        page(&mut painter, 800.0, 600.5);
        painter.end_graphics();
        painter.end_document();

        let pages = painter.into_pages();
        assert_eq!(pages.len(), 2);
        assert!(pages[0].starts_with(SVG_HEADER));
        assert!(pages[0].contains(r#"width="1024" height="768" viewBox="0 0 1024 768""#));
        assert!(pages[1].contains(r#"height="600.5""#));
        assert!(pages[1].trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_styled_polygon() {
        let mut painter = SvgPainter::new();
        page(&mut painter, 100.0, 100.0);
        painter.set_style(
            &PropertyList::new()
                .with(keys::FILL, "solid")
                .with(keys::FILL_COLOR, "#FF0000")
                .with(keys::STROKE, "solid")
                .with(keys::STROKE_COLOR, "#000000")
                .with(keys::STROKE_WIDTH, 0.5),
        );
        painter.draw_polygon(&[(50.0, 0.0), (100.0, 50.0), (50.0, 100.0), (0.0, 50.0)]);
        painter.end_graphics();
        let svg = &painter.pages()[0];
        assert!(
            svg.contains(r##"<polygon points="50,0 100,50 50,100 0,50" fill="#FF0000" stroke="#000000" stroke-width="0.5"/>"##),
            "{}",
            svg
        );
    }

    #[test]
    fn test_path_and_ellipse() {
        let mut painter = SvgPainter::new();
        page(&mut painter, 10.0, 10.0);
        painter.set_style(&PropertyList::new());
        painter.draw_path(&[
            PathElement::MoveTo { x: 0.0, y: 0.0 },
            PathElement::CurveTo { x1: 1.0, y1: 2.0, x2: 3.0, y2: 4.0, x: 5.0, y: 6.0 },
            PathElement::ClosePath,
        ]);
        painter.draw_ellipse(
            &PropertyList::new()
                .with(keys::X, 0.0)
                .with(keys::Y, 0.0)
                .with(keys::WIDTH, 4.0)
                .with(keys::HEIGHT, 2.0),
        );
        painter.end_graphics();
        let svg = &painter.pages()[0];
        assert!(svg.contains(r#"<path d="M 0 0 C 1 2 3 4 5 6 Z" fill="none" stroke="none"/>"#));
        assert!(svg.contains(r#"<ellipse cx="2" cy="1" rx="2" ry="1""#));
    }

    #[test]
    fn test_embedded_image_is_base64() {
        let mut painter = SvgPainter::new();
        page(&mut painter, 10.0, 10.0);
        painter.draw_graphic_object(
            &PropertyList::new()
                .with(keys::X, 1.0)
                .with(keys::Y, 2.0)
                .with(keys::WIDTH, 3.0)
                .with(keys::HEIGHT, 4.0)
                .with(keys::MIME_TYPE, "image/png")
                .with(keys::BINARY_DATA, Rc::<[u8]>::from(&b"abc"[..])),
        );
        painter.end_graphics();
        assert!(painter.pages()[0].contains(
            r#"<image x="1" y="2" width="3" height="4" xlink:href="data:image/png;base64,YWJj"/>"#
        ));
    }

    #[test]
    fn test_text_is_escaped() {
        let mut painter = SvgPainter::new();
        page(&mut painter, 10.0, 10.0);
        painter.start_text_object(&PropertyList::new().with(keys::X, 5.0).with(keys::Y, 6.0));
        painter.open_paragraph(&PropertyList::new());
        painter.open_span(&PropertyList::new().with(keys::FONT_WEIGHT, "bold"));
        painter.insert_text("a < b & c");
        painter.close_span();
        painter.insert_line_break();
        painter.close_paragraph();
        painter.end_text_object();
        painter.end_graphics();
        let svg = &painter.pages()[0];
        assert!(svg.contains(r#"<tspan font-weight="bold">a &lt; b &amp; c</tspan>"#), "{}", svg);
        assert!(svg.contains(r#"<tspan x="5" dy="1.2em"/>"#));
    }

    #[test]
    fn test_calls_outside_a_page_are_ignored() {
        let mut painter = SvgPainter::new();
        painter.draw_polyline(&[(0.0, 0.0), (1.0, 1.0)]);
        painter.end_graphics();
        assert!(painter.pages().is_empty());
    }
}
