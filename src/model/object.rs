//! Drawable objects and how they draw themselves.

use std::fmt::Write as _;
use std::rc::Rc;

use crate::common::Id;
use crate::common::number::write_num;
use crate::output::{Output, PropertyList, keys};

use super::geometry::{Geometry, Position, Size};
use super::path::{Path, PathElement};
use super::style::{Property, Style, StyleContext, names};
use super::text::{Inline, Text};
use super::transform::Transformation;

/// Binary payload of an image or media object.
#[derive(Debug, Clone, Default)]
pub struct Data {
    pub id: Option<Id>,
    /// Container member holding the bytes
    pub path: Option<String>,
    pub display_name: Option<String>,
    pub hfs_type: Option<u32>,
    /// Bytes, when the container could supply them
    pub bytes: Option<Rc<[u8]>>,
}

impl Data {
    /// MIME type from the leading bytes, else from the file extension.
    pub fn mime_type(&self) -> &'static str {
        if let Some(bytes) = self.bytes.as_deref() {
            if let Some(mime) = sniff_mime(bytes) {
                return mime;
            }
        }
        let extension = self
            .path
            .as_deref()
            .or(self.display_name.as_deref())
            .and_then(|p| p.rsplit_once('.'))
            .map(|(_, ext)| ext.to_ascii_lowercase());
        match extension.as_deref() {
            Some("png") => "image/png",
            Some("jpg" | "jpeg") => "image/jpeg",
            Some("gif") => "image/gif",
            Some("tif" | "tiff") => "image/tiff",
            Some("pdf") => "application/pdf",
            Some("mov") => "video/quicktime",
            Some("mp3") => "audio/mpeg",
            _ => "application/octet-stream",
        }
    }
}

fn sniff_mime(bytes: &[u8]) -> Option<&'static str> {
    const SIGNATURES: &[(&[u8], &str)] = &[
        (b"\x89PNG\r\n\x1a\n", "image/png"),
        (b"\xff\xd8\xff", "image/jpeg"),
        (b"GIF8", "image/gif"),
        (b"II*\0", "image/tiff"),
        (b"MM\0*", "image/tiff"),
        (b"%PDF", "application/pdf"),
    ];
    SIGNATURES
        .iter()
        .find(|(magic, _)| bytes.starts_with(magic))
        .map(|(_, mime)| *mime)
}

#[derive(Debug, Clone)]
pub struct Shape {
    pub id: Option<Id>,
    /// Outline in local coordinates
    pub path: Path,
    pub geometry: Geometry,
    pub style: Option<Rc<Style>>,
    pub text: Option<Text>,
}

#[derive(Debug, Clone)]
pub struct Image {
    pub id: Option<Id>,
    pub geometry: Geometry,
    pub style: Option<Rc<Style>>,
    pub data: Option<Rc<Data>>,
}

/// Straight connector between two page points.
#[derive(Debug, Clone)]
pub struct Line {
    pub id: Option<Id>,
    pub head: Position,
    pub tail: Position,
    pub style: Option<Rc<Style>>,
}

#[derive(Debug, Clone)]
pub struct Media {
    pub id: Option<Id>,
    pub geometry: Geometry,
    pub style: Option<Rc<Style>>,
    pub data: Option<Rc<Data>>,
}

/// Children are placed in the coordinate space of the group geometry.
#[derive(Debug, Clone)]
pub struct Group {
    pub id: Option<Id>,
    pub geometry: Option<Geometry>,
    pub objects: Vec<Rc<Object>>,
}

/// Free text, such as the title and body placeholders.
#[derive(Debug, Clone)]
pub struct TextBody {
    pub id: Option<Id>,
    pub geometry: Geometry,
    pub style: Option<Rc<Style>>,
    pub text: Text,
}

/// Anything that can sit on a layer.
#[derive(Debug, Clone)]
pub enum Object {
    Shape(Shape),
    Image(Image),
    Line(Line),
    Media(Media),
    Group(Group),
    TextBody(TextBody),
}

impl Object {
    pub fn id(&self) -> Option<&Id> {
        match self {
            Self::Shape(s) => s.id.as_ref(),
            Self::Image(i) => i.id.as_ref(),
            Self::Line(l) => l.id.as_ref(),
            Self::Media(m) => m.id.as_ref(),
            Self::Group(g) => g.id.as_ref(),
            Self::TextBody(t) => t.id.as_ref(),
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Shape(_) => "shape",
            Self::Image(_) => "image",
            Self::Line(_) => "line",
            Self::Media(_) => "media",
            Self::Group(_) => "group",
            Self::TextBody(_) => "text body",
        }
    }

    /// Emit the draw calls of this object.
    pub fn draw(&self, output: &mut Output<'_>) {
        match self {
            Self::Shape(shape) => draw_shape(shape, output),
            Self::Image(image) => {
                let tr = output.transformation() * Transformation::from_geometry(&image.geometry);
                let mut props = frame_props(&tr, image.geometry.extent());
                if let Some(data) = &image.data {
                    props.insert(keys::MIME_TYPE, data.mime_type());
                    if let Some(bytes) = &data.bytes {
                        props.insert(keys::BINARY_DATA, Rc::clone(bytes));
                    } else if let Some(path) = &data.path {
                        props.insert(keys::MEMBER, path.as_str());
                    }
                    if let Some(name) = &data.display_name {
                        props.insert(keys::DISPLAY_NAME, name.as_str());
                    }
                }
                let style = graphic_props(image.style.as_deref());
                let painter = output.painter();
                painter.set_style(&style);
                painter.draw_graphic_object(&props);
            },
            Self::Line(line) => {
                let tr = output.transformation();
                let points = [tr.apply(line.head.x, line.head.y), tr.apply(line.tail.x, line.tail.y)];
                let style = graphic_props(line.style.as_deref());
                let painter = output.painter();
                painter.set_style(&style);
                painter.draw_polyline(&points);
            },
            Self::Media(media) => {
                let tr = output.transformation() * Transformation::from_geometry(&media.geometry);
                let props = frame_props(&tr, media.geometry.extent());
                let style = graphic_props(media.style.as_deref());
                let painter = output.painter();
                painter.set_style(&style);
                painter.draw_rectangle(&props);
            },
            Self::Group(group) => {
                let tr = group
                    .geometry
                    .as_ref()
                    .map_or(Transformation::IDENTITY, Transformation::from_geometry);
                let mut nested = output.nested(tr);
                for object in &group.objects {
                    object.draw(&mut nested);
                }
            },
            Self::TextBody(body) => {
                let tr = output.transformation() * Transformation::from_geometry(&body.geometry);
                if let Some(style) = &body.style {
                    output.push_style(Rc::clone(style));
                }
                draw_text(&body.text, &tr, body.geometry.extent(), output);
                if body.style.is_some() {
                    output.pop_style();
                }
            },
        }
    }
}

fn draw_shape(shape: &Shape, output: &mut Output<'_>) {
    let tr = output.transformation() * Transformation::from_geometry(&shape.geometry);
    let path = shape.path.transformed(&tr);
    let style = graphic_props(shape.style.as_deref());

    let painter = output.painter();
    painter.set_style(&style);
    match polygon_points(&path) {
        Some((points, true)) => painter.draw_polygon(&points),
        Some((points, false)) => painter.draw_polyline(&points),
        None => painter.draw_path(path.elements()),
    }

    if let Some(text) = shape.text.as_ref().filter(|t| !t.is_empty()) {
        draw_text(text, &tr, shape.geometry.extent(), output);
    }
}

/// Corner points of a path made of a single run of straight segments, and
/// whether it is closed.
fn polygon_points(path: &Path) -> Option<(Vec<(f64, f64)>, bool)> {
    let mut elements = path.elements().iter();
    let mut points = match elements.next()? {
        PathElement::MoveTo { x, y } => vec![(*x, *y)],
        _ => return None,
    };
    let mut closed = false;
    for element in elements {
        match element {
            PathElement::LineTo { x, y } if !closed => points.push((*x, *y)),
            PathElement::ClosePath if !closed => closed = true,
            _ => return None,
        }
    }
    (points.len() >= 2).then_some((points, closed))
}

/// Placement of a `size` box drawn through `tr`.
fn frame_props(tr: &Transformation, size: Size) -> PropertyList {
    let mut props = PropertyList::new();
    if tr.is_axis_aligned() {
        let (x1, y1) = tr.apply(0.0, 0.0);
        let (x2, y2) = tr.apply(size.width, size.height);
        props.insert(keys::X, x1.min(x2));
        props.insert(keys::Y, y1.min(y2));
        props.insert(keys::WIDTH, (x2 - x1).abs());
        props.insert(keys::HEIGHT, (y2 - y1).abs());
    } else {
        props.insert(keys::X, 0.0);
        props.insert(keys::Y, 0.0);
        props.insert(keys::WIDTH, size.width);
        props.insert(keys::HEIGHT, size.height);
        props.insert(keys::TRANSFORM, matrix(tr));
    }
    props
}

fn matrix(tr: &Transformation) -> String {
    let mut out = String::from("matrix(");
    for (i, v) in [tr.xx, tr.yx, tr.xy, tr.yy, tr.x0, tr.y0].into_iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        write_num(&mut out, v);
    }
    out.push(')');
    out
}

/// Fill, stroke and opacity of a graphic style, resolved through its parents.
pub(crate) fn graphic_props(style: Option<&Style>) -> PropertyList {
    let mut props = PropertyList::new();
    let Some(style) = style else {
        return props;
    };

    match style.property(names::FILL, true) {
        Some(Property::Color(color)) => {
            props.insert(keys::FILL, "solid");
            props.insert(keys::FILL_COLOR, color.to_string());
        },
        Some(Property::None) => props.insert(keys::FILL, "none"),
        _ => {},
    }
    match style.property(names::STROKE, true) {
        Some(Property::Stroke(stroke)) => {
            props.insert(keys::STROKE, "solid");
            props.insert(keys::STROKE_COLOR, stroke.color.to_string());
            props.insert(keys::STROKE_WIDTH, stroke.width);
        },
        Some(Property::None) => props.insert(keys::STROKE, "none"),
        _ => {},
    }
    if let Some(opacity) = style.property(names::OPACITY, true).and_then(|p| p.as_number()) {
        props.insert(keys::OPACITY, opacity);
    }
    props
}

fn paragraph_props(styles: &StyleContext) -> PropertyList {
    let mut props = PropertyList::new();
    if let Some(alignment) = styles.find(names::ALIGNMENT, true).and_then(|p| p.as_number()) {
        let align = match alignment as i64 {
            1 => "end",
            2 => "center",
            3 => "justify",
            _ => "start",
        };
        props.insert(keys::TEXT_ALIGN, align);
    }
    if let Some(indent) = styles.find(names::FIRST_LINE_INDENT, true).and_then(|p| p.as_number()) {
        props.insert(keys::TEXT_INDENT, indent);
    }
    props
}

fn span_props(styles: &StyleContext) -> PropertyList {
    let mut props = PropertyList::new();
    if let Some(size) = styles.find(names::FONT_SIZE, true).and_then(|p| p.as_number()) {
        props.insert(keys::FONT_SIZE, size);
    }
    if let Some(Property::Str(name)) = styles.find(names::FONT_NAME, true) {
        props.insert(keys::FONT_NAME, name);
    }
    if let Some(bold) = styles.find(names::BOLD, true).and_then(|p| p.as_bool()) {
        props.insert(keys::FONT_WEIGHT, if bold { "bold" } else { "normal" });
    }
    if let Some(italic) = styles.find(names::ITALIC, true).and_then(|p| p.as_bool()) {
        props.insert(keys::FONT_STYLE, if italic { "italic" } else { "normal" });
    }
    if let Some(underline) = styles.find(names::UNDERLINE, true).and_then(|p| p.as_bool()) {
        props.insert(keys::UNDERLINE, if underline { "single" } else { "none" });
    }
    if let Some(color) = styles.find(names::FONT_COLOR, true).and_then(|p| p.as_color()) {
        props.insert(keys::COLOR, color.to_string());
    }
    props
}

fn draw_text(text: &Text, tr: &Transformation, size: Size, output: &mut Output<'_>) {
    let frame = frame_props(tr, size);
    output.painter().start_text_object(&frame);

    for paragraph in text.paragraphs() {
        if let Some(style) = &paragraph.layout {
            output.push_style(Rc::clone(style));
        }
        if let Some(style) = &paragraph.style {
            output.push_style(Rc::clone(style));
        }
        let props = paragraph_props(output.styles());
        output.painter().open_paragraph(&props);

        for inline in &paragraph.inlines {
            match inline {
                Inline::Span { style, text } => {
                    if let Some(style) = style {
                        output.push_style(Rc::clone(style));
                    }
                    let props = span_props(output.styles());
                    let painter = output.painter();
                    painter.open_span(&props);
                    painter.insert_text(text);
                    painter.close_span();
                    if style.is_some() {
                        output.pop_style();
                    }
                },
                Inline::Tab => output.painter().insert_tab(),
                Inline::LineBreak { count } => {
                    for _ in 0..*count {
                        output.painter().insert_line_break();
                    }
                },
            }
        }

        output.painter().close_paragraph();
        if paragraph.style.is_some() {
            output.pop_style();
        }
        if paragraph.layout.is_some() {
            output.pop_style();
        }
    }
    output.painter().end_text_object();
}

/// Describe an object for log output.
pub(crate) fn describe(object: &Object) -> String {
    let mut out = String::from(object.kind_name());
    if let Some(id) = object.id() {
        let _ = write!(out, " '{}'", id);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Color;
    use crate::model::dictionary::Dictionary;
    use crate::model::style::{PropertyMap, Stroke, StyleKind};
    use crate::output::recorder::RecordingPainter;

    fn filled(color: Color) -> Rc<Style> {
        let mut props = PropertyMap::new();
        props.set(names::FILL, color);
        props.set(names::STROKE, Stroke { width: 2.0, color: Color::BLACK });
        Rc::new(Style::new(StyleKind::Graphic, props))
    }

    fn square() -> Shape {
        Shape {
            id: Some(Id::from("shape-1")),
            path: Path::parse("M 0 0 L 10 0 L 10 10 L 0 10 Z").unwrap(),
            geometry: Geometry {
                natural_size: Some(Size::new(10.0, 10.0)),
                position: Some(Position::new(100.0, 50.0)),
                ..Geometry::default()
            },
            style: Some(filled(Color::new(1.0, 0.0, 0.0, 1.0))),
            text: None,
        }
    }

    fn draw(object: &Object) -> Vec<String> {
        let dictionary = Dictionary::new();
        let mut painter = RecordingPainter::default();
        {
            let mut output = Output::new(&mut painter, &dictionary);
            object.draw(&mut output);
        }
        painter.calls
    }

    #[test]
    fn test_shape_sets_style_before_drawing() {
        let calls = draw(&Object::Shape(square()));
        assert_eq!(
            calls,
            [
                "set_style(draw:fill=solid draw:fill-color=#FF0000 draw:stroke=solid svg:stroke-color=#000000 svg:stroke-width=2)",
                "draw_polygon(100 50, 110 50, 110 60, 100 60)",
            ]
        );
    }

    #[test]
    fn test_curved_shape_draws_path() {
        let mut shape = square();
        shape.path = Path::parse("M 0 0 C 0 5 5 10 10 10 Z").unwrap();
        shape.style = None;
        let calls = draw(&Object::Shape(shape));
        assert_eq!(calls, ["set_style", "draw_path(M 100 50 C 100 55 105 60 110 60 Z)"]);
    }

    #[test]
    fn test_group_children_use_group_space() {
        let group = Group {
            id: None,
            geometry: Some(Geometry {
                natural_size: Some(Size::new(200.0, 200.0)),
                position: Some(Position::new(10.0, 20.0)),
                ..Geometry::default()
            }),
            objects: vec![Rc::new(Object::Line(Line {
                id: None,
                head: Position::new(0.0, 0.0),
                tail: Position::new(5.0, 5.0),
                style: None,
            }))],
        };
        let calls = draw(&Object::Group(group));
        assert_eq!(calls, ["set_style", "draw_polyline(10 20, 15 25)"]);
    }

    #[test]
    fn test_text_body_inherits_styles() {
        let mut body_props = PropertyMap::new();
        body_props.set(names::FONT_SIZE, 24.0);
        let body_style = Rc::new(Style::new(StyleKind::Placeholder, body_props));
        let mut bold_props = PropertyMap::new();
        bold_props.set(names::BOLD, true);
        let bold = Rc::new(Style::new(StyleKind::Character, bold_props));

        let mut text = Text::new(None);
        text.open_paragraph(None);
        text.insert_text(None, "Hi ");
        text.insert_text(Some(bold), "there");
        text.insert_line_break();
        text.close_paragraph();

        let body = TextBody {
            id: None,
            geometry: Geometry {
                natural_size: Some(Size::new(300.0, 40.0)),
                position: Some(Position::new(0.0, 0.0)),
                ..Geometry::default()
            },
            style: Some(body_style),
            text,
        };
        let calls = draw(&Object::TextBody(body));
        assert_eq!(
            calls,
            [
                "start_text_object(svg:x=0 svg:y=0 svg:width=300 svg:height=40)",
                "open_paragraph",
                "open_span(fo:font-size=24)",
                "insert_text(Hi )",
                "close_span",
                "open_span(fo:font-size=24 fo:font-weight=bold)",
                "insert_text(there)",
                "close_span",
                "insert_line_break",
                "close_paragraph",
                "end_text_object",
            ]
        );
    }

    #[test]
    fn test_rotated_image_carries_matrix() {
        let image = Image {
            id: None,
            geometry: Geometry {
                natural_size: Some(Size::new(10.0, 10.0)),
                position: Some(Position::new(0.0, 0.0)),
                angle: Some(90.0),
                ..Geometry::default()
            },
            style: None,
            data: Some(Rc::new(Data {
                path: Some("photo.JPG".into()),
                ..Data::default()
            })),
        };
        let calls = draw(&Object::Image(image));
        assert_eq!(calls.len(), 2);
        assert!(calls[1].contains("draw:transform=matrix(0 -1 1 0 0 10)"), "{}", calls[1]);
        assert!(calls[1].contains("librevenge:mime-type=image/jpeg"));
        assert!(calls[1].contains("xlink:href=photo.JPG"));
    }

    #[test]
    fn test_mime_sniffing_prefers_bytes() {
        let data = Data {
            path: Some("picture.jpg".into()),
            bytes: Some(Rc::from(&b"\x89PNG\r\n\x1a\n...."[..])),
            ..Data::default()
        };
        assert_eq!(data.mime_type(), "image/png");
        assert_eq!(Data::default().mime_type(), "application/octet-stream");
    }
}
