//! Walker of the legacy grammar (version 1).
//!
//! Version 1 documents carry no stylesheets: appearance is written as
//! attributes on each drawable, coordinates as `"x y"` pairs. The walker
//! synthesizes one anonymous style per styled drawable, keyed after the
//! drawable, and presents each master slide as a single master layer.

use crate::collector::Collector;
use crate::common::number::{parse_bool, parse_double, parse_pair};
use crate::common::{Color, DiagnosticKind, Error, Result};
use crate::model::style::names;
use crate::model::{Data, Geometry, Path, Position, Property, PropertyMap, Size, Stroke, Style, StyleKind};
use crate::token::key1::*;
use crate::token::{NO_NAMESPACE, Token};
use crate::xml::{Element, Node};

use super::ParseContext;

/// Unprefixed attribute named `name`.
const fn attr(name: Token) -> (Token, Token) {
    (NO_NAMESPACE, name)
}

const PLACEMENT: [(Token, Token); 3] = [attr(NATURAL_SIZE), attr(POSITION), attr(ANGLE)];

const APPEARANCE: [(Token, Token); 9] = [
    attr(FILL),
    attr(STROKE_COLOR),
    attr(STROKE_WIDTH),
    attr(OPACITY),
    attr(FONT_SIZE),
    attr(FONT_NAME),
    attr(FONT_COLOR),
    attr(BOLD),
    attr(ITALIC),
];

/// Walk an APXL `presentation` document.
pub fn walk(mut root: Element<'_>, collector: &mut dyn Collector, context: &mut ParseContext<'_>) -> Result<()> {
    tracing::debug!("walking legacy grammar");
    Walker {
        collector,
        context,
        anonymous: 0,
    }
    .presentation(&mut root)
}

/// A color written as one grey level or as `r g b [a]` components.
fn parse_color(value: &str) -> Option<Color> {
    let parts = value
        .split_ascii_whitespace()
        .map(parse_double)
        .collect::<Option<Vec<_>>>()?;
    match parts[..] {
        [white] => Some(Color::grey(white, 1.0)),
        [red, green, blue] => Some(Color::new(red, green, blue, 1.0)),
        [red, green, blue, alpha] => Some(Color::new(red, green, blue, alpha)),
        _ => None,
    }
}

struct Walker<'w, 'c> {
    collector: &'w mut dyn Collector,
    context: &'w mut ParseContext<'c>,
    /// Counter naming drawables without an identifier
    anonymous: usize,
}

impl Walker<'_, '_> {
    fn presentation(&mut self, root: &mut Element<'_>) -> Result<()> {
        if root.token() != (APXL, PRESENTATION) {
            return Err(Error::InvalidFormat(format!("unexpected root element {}", root)));
        }
        self.context.check_attributes(root, &[attr(VERSION)]);

        while let Some(mut child) = root.next_child()? {
            match child.token() {
                (APXL, SIZE) => {
                    let size = self.size(&child);
                    self.collector.collect_presentation(size);
                },
                (APXL, THEME) => self.theme(&mut child)?,
                (APXL, SLIDE_LIST) => self.slide_list(&mut child)?,
                _ => self.context.skip_element(&mut child)?,
            }
        }
        Ok(())
    }

    fn size(&self, size: &Element<'_>) -> Option<Size> {
        let width = size.attribute(attr(W)).and_then(parse_double)?;
        let height = size.attribute(attr(H)).and_then(parse_double)?;
        Some(Size::new(width, height))
    }

    fn theme(&mut self, theme: &mut Element<'_>) -> Result<()> {
        self.context.check_deadline()?;
        self.collector.start_themes();
        while let Some(mut child) = theme.next_child()? {
            match child.token() {
                (APXL, SIZE) => {
                    let size = self.size(&child);
                    self.collector.collect_presentation(size);
                },
                (APXL, MASTER_SLIDES) => {
                    while let Some(mut master) = child.next_child()? {
                        match master.token() {
                            (APXL, MASTER_SLIDE) => self.master_slide(&mut master)?,
                            _ => self.context.skip_element(&mut master)?,
                        }
                    }
                },
                _ => self.context.skip_element(&mut child)?,
            }
        }
        self.collector.end_themes();
        Ok(())
    }

    /// A master slide is one page holding one master layer keyed by its id.
    fn master_slide(&mut self, master: &mut Element<'_>) -> Result<()> {
        self.context.check_deadline()?;
        let id = self.identifier(master);
        self.context.check_attributes(master, &[attr(ID)]);

        self.collector.start_slide();
        self.collector.start_page();
        self.collector.start_layer();
        while let Some(mut child) = master.next_child()? {
            match child.token() {
                (APXL, DRAWABLES) => self.drawables(&mut child)?,
                _ => self.context.skip_element(&mut child)?,
            }
        }
        self.collector.end_layer();
        self.collector.collect_layer(Some(&id), false);
        self.collector.end_page();
        self.collector.collect_page(Some(&id));
        Ok(())
    }

    fn slide_list(&mut self, list: &mut Element<'_>) -> Result<()> {
        self.collector.start_slides();
        while let Some(mut child) = list.next_child()? {
            match child.token() {
                (APXL, SLIDE) => self.slide(&mut child)?,
                _ => self.context.skip_element(&mut child)?,
            }
        }
        self.collector.end_slides();
        Ok(())
    }

    /// The master layer is drawn first, then the slide's own drawables and
    /// bullets as one content layer.
    fn slide(&mut self, slide: &mut Element<'_>) -> Result<()> {
        self.context.check_deadline()?;
        let id = self.identifier(slide);
        let master = slide.attribute(attr(MASTER_SLIDE_ID)).map(str::to_string);
        self.context
            .check_attributes(slide, &[attr(ID), attr(MASTER_SLIDE_ID)]);

        self.collector.start_slide();
        self.collector.start_page();
        if master.is_some() {
            self.collector.collect_layer(master.as_deref(), true);
        }
        self.collector.start_layer();
        while let Some(mut child) = slide.next_child()? {
            match child.token() {
                (APXL, DRAWABLES) => self.drawables(&mut child)?,
                (APXL, BULLETS) => self.bullets(&mut child)?,
                (APXL, NOTES) | (APXL, TRANSITION) => self.context.skip_unhandled(&mut child)?,
                _ => self.context.skip_element(&mut child)?,
            }
        }
        self.collector.end_layer();
        self.collector.collect_layer(Some(&id), false);
        self.collector.end_page();
        self.collector.collect_page(Some(&id));
        Ok(())
    }

    /// The `id` attribute, or a generated one.
    fn identifier(&mut self, element: &Element<'_>) -> String {
        match element.attribute(attr(ID)) {
            Some(id) => id.to_string(),
            None => {
                self.anonymous += 1;
                format!("anonymous-{}", self.anonymous)
            },
        }
    }

    fn drawables(&mut self, drawables: &mut Element<'_>) -> Result<()> {
        while let Some(mut child) = drawables.next_child()? {
            if !self.drawable(&mut child)? {
                self.context.skip_element(&mut child)?;
            }
        }
        Ok(())
    }

    fn drawable(&mut self, element: &mut Element<'_>) -> Result<bool> {
        match element.token() {
            (APXL, SHAPE) => self.shape(element),
            (APXL, LINE) => self.line(element),
            (APXL, IMAGE) => self.image(element),
            (APXL, TEXTBOX) => self.textbox(element)?,
            (APXL, G) => self.group(element)?,
            (APXL, PLUGIN) => self.context.skip_unhandled(element)?,
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn shape(&mut self, shape: &Element<'_>) {
        let id = self.identifier(shape);
        self.check_drawable_attributes(shape, &[attr(ID), attr(PATH)]);

        let path = match shape.attribute(attr(PATH)).map(Path::parse) {
            Some(Ok(path)) => path,
            Some(Err(e)) => {
                self.context
                    .diagnostics()
                    .report(DiagnosticKind::Recovered, format_args!("shape '{}': {}", id, e));
                return;
            },
            None => {
                self.context
                    .diagnostics()
                    .report(DiagnosticKind::Recovered, format_args!("shape '{}' has no path", id));
                return;
            },
        };

        self.collect_placement(shape);
        self.collector.collect_path(path);
        let style = self.collect_style(shape, &id, StyleKind::Graphic);
        self.collector.collect_shape(Some(&id), style.as_deref());
    }

    fn line(&mut self, line: &Element<'_>) {
        let id = self.identifier(line);
        self.check_drawable_attributes(line, &[attr(ID), attr(HEAD), attr(TAIL)]);

        let head = self.position(line, HEAD);
        let tail = self.position(line, TAIL);
        let style = self.collect_style(line, &id, StyleKind::Graphic);
        self.collector
            .collect_line(Some(&id), head.zip(tail), style.as_deref(), false);
    }

    fn image(&mut self, image: &Element<'_>) {
        let id = self.identifier(image);
        self.check_drawable_attributes(image, &[attr(ID), attr(DISPLAY_NAME), attr(FILE)]);

        let file = image.attribute(attr(FILE)).map(str::to_string);
        let data = Data {
            id: None,
            bytes: file.as_deref().and_then(|f| self.context.load_member(f)),
            display_name: image.attribute(attr(DISPLAY_NAME)).map(str::to_string),
            hfs_type: None,
            path: file,
        };

        self.collect_placement(image);
        self.collector.collect_data(None, Some(data), false);
        let style = self.collect_style(image, &id, StyleKind::Graphic);
        self.collector
            .collect_image(Some(&id), style.as_deref(), false);
    }

    /// One paragraph per `content` child.
    fn textbox(&mut self, textbox: &mut Element<'_>) -> Result<()> {
        let id = self.identifier(textbox);
        self.check_drawable_attributes(textbox, &[attr(ID)]);
        let style = self.collect_style(textbox, &id, StyleKind::Placeholder);
        self.collect_placement(textbox);

        self.collector.start_text_layout(None);
        while let Some(mut child) = textbox.next_child()? {
            match child.token() {
                (APXL, CONTENT) => self.paragraph(&mut child)?,
                _ => self.context.skip_element(&mut child)?,
            }
        }
        self.collector.end_text_layout();
        self.collector
            .collect_text_body(Some(&id), style.as_deref(), false);
        Ok(())
    }

    /// Slide bullets form one text body; each bullet's content is a paragraph.
    fn bullets(&mut self, bullets: &mut Element<'_>) -> Result<()> {
        let id = self.identifier(bullets);
        self.check_drawable_attributes(bullets, &[attr(ID)]);
        let style = self.collect_style(bullets, &id, StyleKind::Placeholder);
        self.collect_placement(bullets);

        self.collector.start_text_layout(None);
        while let Some(mut bullet) = bullets.next_child()? {
            if bullet.token() != (APXL, BULLET) {
                self.context.skip_element(&mut bullet)?;
                continue;
            }
            // Outline levels are not rendered
            self.context.check_attributes(&bullet, &[]);
            while let Some(mut child) = bullet.next_child()? {
                match child.token() {
                    (APXL, CONTENT) => self.paragraph(&mut child)?,
                    _ => self.context.skip_element(&mut child)?,
                }
            }
        }
        self.collector.end_text_layout();
        self.collector
            .collect_text_body(Some(&id), style.as_deref(), false);
        Ok(())
    }

    fn paragraph(&mut self, content: &mut Element<'_>) -> Result<()> {
        self.collector.start_paragraph(None);
        self.inline(content, None)?;
        self.collector.end_paragraph();
        Ok(())
    }

    fn inline(&mut self, element: &mut Element<'_>, style: Option<&str>) -> Result<()> {
        while let Some(node) = element.next_node()? {
            match node {
                Node::Text(text) => self.collector.collect_text(style, &text),
                Node::Element(mut child) => match child.token() {
                    (APXL, SPAN) => {
                        let id = self.identifier(&child);
                        self.check_drawable_attributes(&child, &[attr(ID)]);
                        let inner = self.collect_style(&child, &id, StyleKind::Character);
                        self.inline(&mut child, inner.as_deref().or(style))?;
                    },
                    (APXL, TAB) => self.collector.collect_tab(),
                    (APXL, BR) => self.collector.collect_line_break(),
                    _ => self.context.skip_element(&mut child)?,
                },
            }
        }
        Ok(())
    }

    fn group(&mut self, group: &mut Element<'_>) -> Result<()> {
        let id = self.identifier(group);
        self.check_drawable_attributes(group, &[attr(ID)]);

        self.collector.start_group();
        while let Some(mut child) = group.next_child()? {
            if !self.drawable(&mut child)? {
                self.context.skip_element(&mut child)?;
            }
        }
        self.collector.end_group();
        if group.attribute(attr(POSITION)).is_some() {
            self.collect_placement(group);
        }
        self.collector.collect_group(Some(&id), false);
        Ok(())
    }

    fn check_drawable_attributes(&self, element: &Element<'_>, own: &[(Token, Token)]) {
        let handled: Vec<_> = own.iter().chain(&PLACEMENT).chain(&APPEARANCE).copied().collect();
        self.context.check_attributes(element, &handled);
    }

    fn position(&self, element: &Element<'_>, name: Token) -> Option<Position> {
        let raw = element.attribute(attr(name))?;
        match parse_pair(raw) {
            Some((x, y)) => Some(Position::new(x, y)),
            None => {
                self.context
                    .diagnostics()
                    .report(DiagnosticKind::Recovered, format_args!("bad coordinates '{}' on {}", raw, element));
                None
            },
        }
    }

    fn collect_placement(&mut self, element: &Element<'_>) {
        let geometry = Geometry {
            natural_size: self
                .position(element, NATURAL_SIZE)
                .map(|p| Size::new(p.x, p.y)),
            position: self.position(element, POSITION),
            angle: element.attribute(attr(ANGLE)).and_then(parse_double),
            ..Geometry::default()
        };
        self.collector.collect_geometry(None, Some(geometry), false);
    }

    /// Synthesize the style written as attributes of `element`, keyed
    /// `"<id>-style"`. Returns the key, or `None` when nothing is styled.
    fn collect_style(&mut self, element: &Element<'_>, id: &str, kind: StyleKind) -> Option<String> {
        let mut props = PropertyMap::new();
        let color = |token| element.attribute(attr(token)).and_then(parse_color);

        if let Some(fill) = element.attribute(attr(FILL)) {
            match fill.trim() {
                "none" => props.set(names::FILL, Property::None),
                value => {
                    if let Some(fill) = parse_color(value) {
                        props.set(names::FILL, fill);
                    }
                },
            }
        }
        let stroke_color = color(STROKE_COLOR);
        let stroke_width = element.attribute(attr(STROKE_WIDTH)).and_then(parse_double);
        if stroke_color.is_some() || stroke_width.is_some() {
            let stroke = Stroke {
                width: stroke_width.unwrap_or(1.0),
                color: stroke_color.unwrap_or(Color::BLACK),
            };
            props.set(names::STROKE, stroke);
        }
        if let Some(opacity) = element.attribute(attr(OPACITY)).and_then(parse_double) {
            props.set(names::OPACITY, opacity);
        }
        if let Some(size) = element.attribute(attr(FONT_SIZE)).and_then(parse_double) {
            props.set(names::FONT_SIZE, size);
        }
        if let Some(name) = element.attribute(attr(FONT_NAME)) {
            props.set(names::FONT_NAME, name);
        }
        if let Some(font_color) = color(FONT_COLOR) {
            props.set(names::FONT_COLOR, font_color);
        }
        if let Some(bold) = element.attribute(attr(BOLD)).and_then(parse_bool) {
            props.set(names::BOLD, bold);
        }
        if let Some(italic) = element.attribute(attr(ITALIC)).and_then(parse_bool) {
            props.set(names::ITALIC, italic);
        }

        if props.is_empty() {
            return None;
        }
        let key = format!("{}-style", id);
        self.collector
            .collect_style(kind, Some(&key), Style::new(kind, props));
        Some(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("1 0 0"), Some(Color::new(1.0, 0.0, 0.0, 1.0)));
        assert_eq!(parse_color("0.5"), Some(Color::grey(0.5, 1.0)));
        assert_eq!(parse_color("0 0 1 0.25").map(|c| c.alpha), Some(0.25));
        assert_eq!(parse_color("1 0"), None);
        assert_eq!(parse_color("red"), None);
    }
}
