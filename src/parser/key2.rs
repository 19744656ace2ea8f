//! Walker of the unified grammar (versions 2 to 5).
//!
//! ```text
//! key:presentation
//! ├── key:size
//! ├── key:theme-list / key:theme
//! │   ├── key:stylesheet
//! │   └── key:master-slides / key:master-slide
//! │       ├── key:stylesheet
//! │       └── key:page / sf:layers / sf:layer / sf:drawables / ...
//! └── key:slide-list / key:slide
//!     ├── key:stylesheet
//!     └── key:page / sf:layers / (sf:layer | key:proxy-master-layer)
//! ```

use crate::collector::Collector;
use crate::common::number::parse_unsigned;
use crate::common::{Color, DiagnosticKind, Error, Result};
use crate::detection::Version;
use crate::model::style::names;
use crate::model::{Callout, Data, Geometry, Path, Position, Property, PropertyMap, Size, Stroke, Style, StyleKind};
use crate::token::Token;
use crate::token::key2::*;
use crate::xml::{Element, Node};

use super::{ParseContext, boolean, number, owned, pair, position_of, size_of};

const GEOMETRY_ATTRIBUTES: [(Token, Token); 8] = [
    (SFA, ID),
    (SF, ANGLE),
    (SF, SHEAR_X_ANGLE),
    (SF, SHEAR_Y_ANGLE),
    (SF, HORIZONTAL_FLIP),
    (SF, VERTICAL_FLIP),
    (SF, ASPECT_RATIO_LOCKED),
    (SF, SIZES_LOCKED),
];

/// Style kind named by a style element, and whether it is a reference.
fn style_kind(token: (Token, Token)) -> Option<(StyleKind, bool)> {
    let kind = match token {
        (SF, CHARACTERSTYLE) => (StyleKind::Character, false),
        (SF, GRAPHIC_STYLE) => (StyleKind::Graphic, false),
        (SF, LAYOUTSTYLE) => (StyleKind::Layout, false),
        (SF, PARAGRAPHSTYLE) => (StyleKind::Paragraph, false),
        (SF, CELL_STYLE) => (StyleKind::Cell, false),
        (SF, CONNECTION_STYLE) => (StyleKind::Connection, false),
        (SF, LISTSTYLE) => (StyleKind::List, false),
        (SF, PLACEHOLDER_STYLE) => (StyleKind::Placeholder, false),
        (KEY, SLIDE_STYLE) => (StyleKind::Slide, false),
        (SF, TABULAR_STYLE) => (StyleKind::Tabular, false),
        (SF, VECTOR_STYLE) => (StyleKind::Vector, false),
        (SF, CHARACTERSTYLE_REF) => (StyleKind::Character, true),
        (SF, GRAPHIC_STYLE_REF) => (StyleKind::Graphic, true),
        (SF, LAYOUTSTYLE_REF) => (StyleKind::Layout, true),
        (SF, PARAGRAPHSTYLE_REF) => (StyleKind::Paragraph, true),
        (SF, CELL_STYLE_REF) => (StyleKind::Cell, true),
        (SF, CONNECTION_STYLE_REF) => (StyleKind::Connection, true),
        (SF, LISTSTYLE_REF) => (StyleKind::List, true),
        (SF, PLACEHOLDER_STYLE_REF) => (StyleKind::Placeholder, true),
        (KEY, SLIDE_STYLE_REF) => (StyleKind::Slide, true),
        (SF, TABULAR_STYLE_REF) => (StyleKind::Tabular, true),
        (SF, VECTOR_STYLE_REF) => (StyleKind::Vector, true),
        _ => return None,
    };
    Some(kind)
}

/// Walk a `key:presentation` document.
pub fn walk(
    mut root: Element<'_>,
    version: Version,
    collector: &mut dyn Collector,
    context: &mut ParseContext<'_>,
) -> Result<()> {
    tracing::debug!(version = version.number(), "walking unified grammar");
    Walker { collector, context }.presentation(&mut root)
}

struct Walker<'w, 'c> {
    collector: &'w mut dyn Collector,
    context: &'w mut ParseContext<'c>,
}

impl Walker<'_, '_> {
    fn presentation(&mut self, root: &mut Element<'_>) -> Result<()> {
        if root.token() != (KEY, PRESENTATION) {
            return Err(Error::InvalidFormat(format!("unexpected root element {}", root)));
        }
        self.context.check_attributes(root, &[(KEY, VERSION)]);

        while let Some(mut child) = root.next_child()? {
            match child.token() {
                (KEY, SIZE) => {
                    let size = self.size(&child);
                    self.collector.collect_presentation(size);
                },
                (KEY, THEME_LIST) => self.theme_list(&mut child)?,
                (KEY, SLIDE_LIST) => self.slide_list(&mut child)?,
                (KEY, METADATA) | (KEY, UI_STATE) | (KEY, CALC_ENGINE) => self.context.skip_unhandled(&mut child)?,
                _ => self.context.skip_element(&mut child)?,
            }
        }
        Ok(())
    }

    fn theme_list(&mut self, list: &mut Element<'_>) -> Result<()> {
        self.collector.start_themes();
        while let Some(mut child) = list.next_child()? {
            match child.token() {
                (KEY, THEME) => self.theme(&mut child)?,
                _ => self.context.skip_element(&mut child)?,
            }
        }
        self.collector.end_themes();
        Ok(())
    }

    fn theme(&mut self, theme: &mut Element<'_>) -> Result<()> {
        self.context.check_deadline()?;
        self.context.check_attributes(theme, &[(SFA, ID)]);

        while let Some(mut child) = theme.next_child()? {
            match child.token() {
                (KEY, SIZE) => {
                    let size = self.size(&child);
                    self.collector.collect_presentation(size);
                },
                (KEY, STYLESHEET) => self.stylesheet(&mut child)?,
                (KEY, MASTER_SLIDES) => {
                    while let Some(mut master) = child.next_child()? {
                        match master.token() {
                            (KEY, MASTER_SLIDE) => self.slide(&mut master)?,
                            _ => self.context.skip_element(&mut master)?,
                        }
                    }
                },
                (KEY, THUMBNAILS) | (KEY, UI_STATE) => self.context.skip_unhandled(&mut child)?,
                _ => self.context.skip_element(&mut child)?,
            }
        }
        Ok(())
    }

    fn slide_list(&mut self, list: &mut Element<'_>) -> Result<()> {
        self.collector.start_slides();
        while let Some(mut child) = list.next_child()? {
            match child.token() {
                (KEY, SLIDE) => self.slide(&mut child)?,
                _ => self.context.skip_element(&mut child)?,
            }
        }
        self.collector.end_slides();
        Ok(())
    }

    /// A slide or master slide.
    fn slide(&mut self, slide: &mut Element<'_>) -> Result<()> {
        self.context.check_deadline()?;
        let id = owned(slide, (SFA, ID));
        self.context.check_attributes(slide, &[(SFA, ID)]);

        self.collector.start_slide();
        while let Some(mut child) = slide.next_child()? {
            match child.token() {
                (KEY, STYLESHEET) => self.stylesheet(&mut child)?,
                (KEY, PAGE) => self.page(&mut child)?,
                (KEY, NOTES)
                | (KEY, TRANSITION)
                | (KEY, BUILD_CHUNKS)
                | (KEY, STICKY_NOTES)
                | (KEY, MASTER_REF)
                | (KEY, STYLESHEET_REF)
                | (KEY, THUMBNAILS) => self.context.skip_unhandled(&mut child)?,
                _ => self.context.skip_element(&mut child)?,
            }
        }
        self.collector.collect_page(id.as_deref());
        Ok(())
    }

    fn page(&mut self, page: &mut Element<'_>) -> Result<()> {
        self.collector.start_page();
        while let Some(mut child) = page.next_child()? {
            match child.token() {
                (SF, LAYERS) => self.layers(&mut child)?,
                _ => self.context.skip_element(&mut child)?,
            }
        }
        self.collector.end_page();
        Ok(())
    }

    fn layers(&mut self, layers: &mut Element<'_>) -> Result<()> {
        while let Some(mut child) = layers.next_child()? {
            match child.token() {
                (SF, LAYER) => self.layer(&mut child)?,
                (KEY, PROXY_MASTER_LAYER) => self.proxy_layer(&mut child)?,
                _ => self.context.skip_element(&mut child)?,
            }
        }
        Ok(())
    }

    fn layer(&mut self, layer: &mut Element<'_>) -> Result<()> {
        let id = owned(layer, (SFA, ID));
        self.context.check_attributes(layer, &[(SFA, ID)]);

        self.collector.start_layer();
        while let Some(mut child) = layer.next_child()? {
            match child.token() {
                (SF, DRAWABLES) => self.drawables(&mut child)?,
                _ => self.context.skip_element(&mut child)?,
            }
        }
        self.collector.end_layer();
        self.collector.collect_layer(id.as_deref(), false);
        Ok(())
    }

    fn proxy_layer(&mut self, proxy: &mut Element<'_>) -> Result<()> {
        while let Some(mut child) = proxy.next_child()? {
            match child.token() {
                (SF, LAYER_REF) => {
                    let id = owned(&child, (SFA, IDREF));
                    self.collector.collect_layer(id.as_deref(), true);
                },
                _ => self.context.skip_element(&mut child)?,
            }
        }
        Ok(())
    }

    fn drawables(&mut self, drawables: &mut Element<'_>) -> Result<()> {
        while let Some(mut child) = drawables.next_child()? {
            if !self.drawable(&mut child)? {
                self.context.skip_element(&mut child)?;
            }
        }
        Ok(())
    }

    /// Dispatch one drawable; `false` when `element` is not one.
    fn drawable(&mut self, element: &mut Element<'_>) -> Result<bool> {
        match element.token() {
            (SF, DRAWABLE_SHAPE) => self.shape(element)?,
            (SF, IMAGE) => self.image(element, false)?,
            (SF, MEDIA) => self.image(element, true)?,
            (SF, LINE) => self.line(element)?,
            (SF, GROUP) => self.group(element)?,
            (KEY, TITLE_PLACEHOLDER) | (KEY, BODY_PLACEHOLDER) => self.placeholder(element)?,
            (SF, IMAGE_REF) => {
                let id = owned(element, (SFA, IDREF));
                self.collector.collect_image(id.as_deref(), None, true);
            },
            (SF, MEDIA_REF) => {
                let id = owned(element, (SFA, IDREF));
                self.collector.collect_media(id.as_deref(), None, true);
            },
            (SF, LINE_REF) => {
                let id = owned(element, (SFA, IDREF));
                self.collector.collect_line(id.as_deref(), None, None, true);
            },
            (SF, GROUP_REF) => {
                let id = owned(element, (SFA, IDREF));
                self.collector.collect_group(id.as_deref(), true);
            },
            (KEY, TITLE_PLACEHOLDER_REF) | (KEY, BODY_PLACEHOLDER_REF) => {
                let id = owned(element, (SFA, IDREF));
                self.collector.collect_text_body(id.as_deref(), None, true);
            },
            (SF, STICKY_NOTE) => self.context.skip_unhandled(element)?,
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn shape(&mut self, shape: &mut Element<'_>) -> Result<()> {
        let id = owned(shape, (SFA, ID));
        self.context.check_attributes(shape, &[(SFA, ID)]);

        let mut style = None;
        while let Some(mut child) = shape.next_child()? {
            match child.token() {
                (SF, GEOMETRY) => self.geometry(&mut child)?,
                (SF, GEOMETRY_REF) => self.geometry_ref(&child),
                (SF, STYLE) => style = self.style_ref(&mut child)?,
                (SF, PATH) => self.path(&mut child)?,
                (SF, TEXT) => self.text(&mut child)?,
                _ => self.context.skip_element(&mut child)?,
            }
        }
        self.collector.collect_shape(id.as_deref(), style.as_deref());
        Ok(())
    }

    fn placeholder(&mut self, placeholder: &mut Element<'_>) -> Result<()> {
        let id = owned(placeholder, (SFA, ID));
        self.context.check_attributes(placeholder, &[(SFA, ID)]);

        let mut style = None;
        while let Some(mut child) = placeholder.next_child()? {
            match child.token() {
                (SF, GEOMETRY) => self.geometry(&mut child)?,
                (SF, GEOMETRY_REF) => self.geometry_ref(&child),
                (SF, STYLE) => style = self.style_ref(&mut child)?,
                (SF, TEXT) => self.text(&mut child)?,
                _ => self.context.skip_element(&mut child)?,
            }
        }
        self.collector.collect_text_body(id.as_deref(), style.as_deref(), false);
        Ok(())
    }

    /// `sf:image` or, with `media`, `sf:media`.
    fn image(&mut self, image: &mut Element<'_>, media: bool) -> Result<()> {
        let id = owned(image, (SFA, ID));
        self.context.check_attributes(image, &[(SFA, ID)]);

        let mut style = None;
        while let Some(mut child) = image.next_child()? {
            match child.token() {
                (SF, GEOMETRY) => self.geometry(&mut child)?,
                (SF, GEOMETRY_REF) => self.geometry_ref(&child),
                (SF, STYLE) => style = self.style_ref(&mut child)?,
                (SF, DATA) => self.data(&child),
                (SF, DATA_REF) => {
                    let data = owned(&child, (SFA, IDREF));
                    self.collector.collect_data(data.as_deref(), None, true);
                },
                _ => self.context.skip_element(&mut child)?,
            }
        }
        if media {
            self.collector.collect_media(id.as_deref(), style.as_deref(), false);
        } else {
            self.collector.collect_image(id.as_deref(), style.as_deref(), false);
        }
        Ok(())
    }

    fn data(&mut self, data: &Element<'_>) {
        let id = owned(data, (SFA, ID));
        self.context
            .check_attributes(data, &[(SFA, ID), (SF, PATH), (SF, DISPLAYNAME), (SF, HFS_TYPE)]);

        let path = owned(data, (SF, PATH));
        let value = Data {
            id: None,
            bytes: path.as_deref().and_then(|p| self.context.load_member(p)),
            display_name: owned(data, (SF, DISPLAYNAME)),
            hfs_type: data.attribute((SF, HFS_TYPE)).and_then(parse_unsigned),
            path,
        };
        self.collector.collect_data(id.as_deref(), Some(value), false);
    }

    fn line(&mut self, line: &mut Element<'_>) -> Result<()> {
        let id = owned(line, (SFA, ID));
        self.context.check_attributes(line, &[(SFA, ID)]);

        let (mut head, mut tail, mut style) = (None, None, None);
        while let Some(mut child) = line.next_child()? {
            match child.token() {
                // End points are in page space; the geometry only repeats them
                (SF, GEOMETRY) => child.skip()?,
                (SF, STYLE) => style = self.style_ref(&mut child)?,
                (SF, HEAD) => head = self.point(&child),
                (SF, TAIL) => tail = self.point(&child),
                _ => self.context.skip_element(&mut child)?,
            }
        }
        self.collector
            .collect_line(id.as_deref(), head.zip(tail), style.as_deref(), false);
        Ok(())
    }

    fn group(&mut self, group: &mut Element<'_>) -> Result<()> {
        let id = owned(group, (SFA, ID));
        self.context.check_attributes(group, &[(SFA, ID)]);

        // Collected after the children, which would otherwise consume it
        let mut placement: Option<(Option<String>, Option<Geometry>, bool)> = None;
        self.collector.start_group();
        while let Some(mut child) = group.next_child()? {
            match child.token() {
                (SF, GEOMETRY) => {
                    let (geometry_id, geometry) = self.read_geometry(&mut child)?;
                    placement = Some((geometry_id, Some(geometry), false));
                },
                (SF, GEOMETRY_REF) => placement = Some((owned(&child, (SFA, IDREF)), None, true)),
                (SF, DRAWABLES) => self.drawables(&mut child)?,
                _ => {
                    if !self.drawable(&mut child)? {
                        self.context.skip_element(&mut child)?;
                    }
                },
            }
        }
        self.collector.end_group();

        if let Some((geometry_id, geometry, is_reference)) = placement {
            self.collector
                .collect_geometry(geometry_id.as_deref(), geometry, is_reference);
        }
        self.collector.collect_group(id.as_deref(), false);
        Ok(())
    }

    fn geometry(&mut self, element: &mut Element<'_>) -> Result<()> {
        let (id, geometry) = self.read_geometry(element)?;
        self.collector.collect_geometry(id.as_deref(), Some(geometry), false);
        Ok(())
    }

    fn geometry_ref(&mut self, element: &Element<'_>) {
        let id = owned(element, (SFA, IDREF));
        self.collector.collect_geometry(id.as_deref(), None, true);
    }

    fn read_geometry(&mut self, element: &mut Element<'_>) -> Result<(Option<String>, Geometry)> {
        let id = owned(element, (SFA, ID));
        self.context.check_attributes(element, &GEOMETRY_ATTRIBUTES);

        let mut geometry = Geometry {
            angle: number(self.context, element, (SF, ANGLE)),
            shear_x_angle: number(self.context, element, (SF, SHEAR_X_ANGLE)),
            shear_y_angle: number(self.context, element, (SF, SHEAR_Y_ANGLE)),
            horizontal_flip: boolean(element, (SF, HORIZONTAL_FLIP)),
            vertical_flip: boolean(element, (SF, VERTICAL_FLIP)),
            aspect_ratio_locked: boolean(element, (SF, ASPECT_RATIO_LOCKED)),
            sizes_locked: boolean(element, (SF, SIZES_LOCKED)),
            ..Geometry::default()
        };
        while let Some(mut child) = element.next_child()? {
            match child.token() {
                (SF, NATURAL_SIZE) => geometry.natural_size = self.size(&child),
                (SF, SIZE) => geometry.size = self.size(&child),
                (SF, POSITION) => geometry.position = self.point(&child),
                _ => self.context.skip_element(&mut child)?,
            }
        }
        Ok((id, geometry))
    }

    fn size(&self, element: &Element<'_>) -> Option<Size> {
        size_of(pair(self.context, element, (SFA, W), (SFA, H)))
    }

    fn point(&self, element: &Element<'_>) -> Option<Position> {
        position_of(pair(self.context, element, (SFA, X), (SFA, Y)))
    }

    fn path(&mut self, path: &mut Element<'_>) -> Result<()> {
        while let Some(mut child) = path.next_child()? {
            match child.token() {
                (SF, BEZIER_PATH) => self.bezier_path(&mut child)?,
                (SF, POINT_PATH) => self.point_path(&mut child)?,
                (SF, SCALAR_PATH) => self.scalar_path(&mut child)?,
                (SF, CONNECTION_PATH) => self.connection_path(&mut child)?,
                (SF, CALLOUT2_PATH) => self.callout_path(&mut child)?,
                (SF, EDITABLE_PATH) => self.context.skip_unhandled(&mut child)?,
                _ => self.context.skip_element(&mut child)?,
            }
        }
        Ok(())
    }

    fn bezier_path(&mut self, element: &mut Element<'_>) -> Result<()> {
        while let Some(mut child) = element.next_child()? {
            match child.token() {
                (SF, BEZIER) => {
                    let id = owned(&child, (SFA, ID));
                    let path = child.attribute((SFA, PATH)).and_then(|source| match Path::parse(source) {
                        Ok(path) => Some(path),
                        Err(e) => {
                            self.context
                                .diagnostics()
                                .report(DiagnosticKind::Recovered, format_args!("bad bezier path: {}", e));
                            None
                        },
                    });
                    self.collector.collect_bezier(id.as_deref(), path, false);
                },
                (SF, BEZIER_REF) => {
                    let id = owned(&child, (SFA, IDREF));
                    self.collector.collect_bezier(id.as_deref(), None, true);
                },
                _ => self.context.skip_element(&mut child)?,
            }
        }
        Ok(())
    }

    /// The `sf:point` and `sf:size` children of a parametric path.
    fn path_parameters(&mut self, element: &mut Element<'_>) -> Result<(Option<Position>, Option<Size>)> {
        let (mut point, mut size) = (None, None);
        while let Some(mut child) = element.next_child()? {
            match child.token() {
                (SF, POINT) => point = self.point(&child),
                (SF, SIZE) => size = self.size(&child),
                _ => self.context.skip_element(&mut child)?,
            }
        }
        if size.is_none() {
            self.context
                .diagnostics()
                .report(DiagnosticKind::Recovered, format_args!("{} without a size", element));
        }
        Ok((point, size))
    }

    fn point_path(&mut self, element: &mut Element<'_>) -> Result<()> {
        let kind = owned(element, (SF, TYPE));
        self.context.check_attributes(element, &[(SF, TYPE)]);
        let (point, size) = self.path_parameters(element)?;
        let Some(size) = size else {
            return Ok(());
        };

        let point = point.unwrap_or_default();
        match kind.as_deref() {
            Some("right-arrow") => self.collector.collect_arrow_path(size, point.x, point.y, false),
            Some("double-arrow") => self.collector.collect_arrow_path(size, point.x, point.y, true),
            Some("star") => self
                .collector
                .collect_star_path(size, point.x.max(0.0).round() as u32, point.y),
            other => self
                .context
                .diagnostics()
                .unhandled_attribute(format_args!("sf:type=\"{}\" on {}", other.unwrap_or_default(), element)),
        }
        Ok(())
    }

    fn scalar_path(&mut self, element: &mut Element<'_>) -> Result<()> {
        let kind = element.attribute((SF, TYPE)).and_then(parse_unsigned);
        let scalar = number(self.context, element, (SF, SCALAR)).unwrap_or(0.0);
        self.context.check_attributes(element, &[(SF, TYPE), (SF, SCALAR)]);
        let (_, size) = self.path_parameters(element)?;
        let Some(size) = size else {
            return Ok(());
        };

        match kind {
            Some(0) => self.collector.collect_rounded_rectangle_path(size, scalar),
            Some(1) => self
                .collector
                .collect_polygon_path(size, scalar.max(0.0).round() as u32),
            _ => self
                .context
                .diagnostics()
                .unhandled_attribute(format_args!("sf:type={:?} on {}", kind, element)),
        }
        Ok(())
    }

    fn connection_path(&mut self, element: &mut Element<'_>) -> Result<()> {
        let (point, size) = self.path_parameters(element)?;
        if let Some(size) = size {
            let middle = point.unwrap_or(Position::new(size.width / 2.0, size.height / 2.0));
            self.collector.collect_connection_path(size, middle);
        }
        Ok(())
    }

    fn callout_path(&mut self, element: &mut Element<'_>) -> Result<()> {
        let callout = Callout {
            corner_radius: number(self.context, element, (SF, CORNER_RADIUS)).unwrap_or(0.0),
            tail: Position::new(
                number(self.context, element, (SF, TAIL_POSITION_X)).unwrap_or(0.0),
                number(self.context, element, (SF, TAIL_POSITION_Y)).unwrap_or(0.0),
            ),
            tail_size: number(self.context, element, (SF, TAIL_SIZE)).unwrap_or(0.0),
            tail_at_center: boolean(element, (SF, TAIL_AT_CENTER)).unwrap_or(false),
        };
        self.context.check_attributes(
            element,
            &[
                (SF, CORNER_RADIUS),
                (SF, TAIL_POSITION_X),
                (SF, TAIL_POSITION_Y),
                (SF, TAIL_SIZE),
                (SF, TAIL_AT_CENTER),
            ],
        );
        let (_, size) = self.path_parameters(element)?;
        if let Some(size) = size {
            self.collector.collect_callout_path(size, &callout);
        }
        Ok(())
    }

    fn text(&mut self, text: &mut Element<'_>) -> Result<()> {
        while let Some(mut storage) = text.next_child()? {
            if storage.token() != (SF, TEXT_STORAGE) {
                self.context.skip_element(&mut storage)?;
                continue;
            }
            while let Some(mut child) = storage.next_child()? {
                match child.token() {
                    (SF, TEXT_BODY) => self.text_body(&mut child)?,
                    _ => self.context.skip_element(&mut child)?,
                }
            }
        }
        Ok(())
    }

    /// Paragraphs outside an `sf:layout` share an implicit layout.
    fn text_body(&mut self, body: &mut Element<'_>) -> Result<()> {
        let mut implicit = false;
        while let Some(mut child) = body.next_child()? {
            match child.token() {
                (SF, LAYOUT) => {
                    if implicit {
                        self.collector.end_text_layout();
                        implicit = false;
                    }
                    self.layout(&mut child)?;
                },
                (SF, P) => {
                    if !implicit {
                        self.collector.start_text_layout(None);
                        implicit = true;
                    }
                    self.paragraph(&mut child)?;
                },
                _ => self.context.skip_element(&mut child)?,
            }
        }
        if implicit {
            self.collector.end_text_layout();
        }
        Ok(())
    }

    fn layout(&mut self, layout: &mut Element<'_>) -> Result<()> {
        let style = owned(layout, (SF, STYLE));
        self.collector.start_text_layout(style.as_deref());
        while let Some(mut child) = layout.next_child()? {
            match child.token() {
                (SF, P) => self.paragraph(&mut child)?,
                _ => self.context.skip_element(&mut child)?,
            }
        }
        self.collector.end_text_layout();
        Ok(())
    }

    fn paragraph(&mut self, paragraph: &mut Element<'_>) -> Result<()> {
        let style = owned(paragraph, (SF, STYLE));
        self.context.check_attributes(paragraph, &[(SF, STYLE)]);
        self.collector.start_paragraph(style.as_deref());
        self.inline(paragraph, None)?;
        self.collector.end_paragraph();
        Ok(())
    }

    /// Mixed content of a paragraph or span; text takes the innermost span style.
    fn inline(&mut self, element: &mut Element<'_>, style: Option<&str>) -> Result<()> {
        while let Some(node) = element.next_node()? {
            match node {
                Node::Text(text) => self.collector.collect_text(style, &text),
                Node::Element(mut child) => match child.token() {
                    (SF, SPAN) => {
                        let inner = owned(&child, (SF, STYLE));
                        self.inline(&mut child, inner.as_deref().or(style))?;
                    },
                    (SF, TAB) => self.collector.collect_tab(),
                    (SF, BR) | (SF, LNBR) | (SF, CRBR) => self.collector.collect_line_break(),
                    _ => self.context.skip_element(&mut child)?,
                },
            }
        }
        Ok(())
    }

    fn stylesheet(&mut self, stylesheet: &mut Element<'_>) -> Result<()> {
        let id = owned(stylesheet, (SFA, ID));
        self.context.check_attributes(stylesheet, &[(SFA, ID)]);

        let mut parent = None;
        while let Some(mut child) = stylesheet.next_child()? {
            match child.token() {
                (SF, STYLES) | (SF, ANON_STYLES) => self.styles(&mut child)?,
                (SF, PARENT_REF) => parent = self.parent_ref(&mut child)?,
                _ => self.context.skip_element(&mut child)?,
            }
        }
        self.collector.collect_stylesheet(id.as_deref(), parent.as_deref());
        Ok(())
    }

    fn styles(&mut self, styles: &mut Element<'_>) -> Result<()> {
        while let Some(mut child) = styles.next_child()? {
            match style_kind(child.token()) {
                Some((kind, false)) => {
                    self.style(&mut child, kind)?;
                },
                _ => self.context.skip_element(&mut child)?,
            }
        }
        Ok(())
    }

    /// `sf:parent-ref`: an `sfa:IDREF` of its own or a style reference child.
    fn parent_ref(&mut self, element: &mut Element<'_>) -> Result<Option<String>> {
        let mut id = owned(element, (SFA, IDREF));
        while let Some(mut child) = element.next_child()? {
            match style_kind(child.token()) {
                Some((_, true)) => id = owned(&child, (SFA, IDREF)),
                _ => self.context.skip_element(&mut child)?,
            }
        }
        Ok(id)
    }

    /// `sf:style` of a drawable: a style reference or an inline style.
    fn style_ref(&mut self, element: &mut Element<'_>) -> Result<Option<String>> {
        let mut id = None;
        while let Some(mut child) = element.next_child()? {
            match style_kind(child.token()) {
                Some((_, true)) => id = owned(&child, (SFA, IDREF)),
                Some((kind, false)) => id = self.style(&mut child, kind)?,
                None => self.context.skip_element(&mut child)?,
            }
        }
        Ok(id)
    }

    /// Capture a style element; returns its identifier.
    fn style(&mut self, element: &mut Element<'_>, kind: StyleKind) -> Result<Option<String>> {
        let id = owned(element, (SFA, ID));
        let ident = owned(element, (SF, IDENT));
        let parent_ident = owned(element, (SF, PARENT_IDENT));
        self.context
            .check_attributes(element, &[(SFA, ID), (SF, IDENT), (SF, PARENT_IDENT)]);

        let mut props = PropertyMap::new();
        let mut parent = None;
        while let Some(mut child) = element.next_child()? {
            match child.token() {
                (SF, PROPERTY_MAP) => self.property_map(&mut child, &mut props)?,
                (SF, PARENT_REF) => parent = self.parent_ref(&mut child)?,
                _ => self.context.skip_element(&mut child)?,
            }
        }

        let style = Style::new(kind, props)
            .with_idents(ident.as_deref(), parent_ident.as_deref())
            .with_parent_ref(parent.as_deref());
        self.collector.collect_style(kind, id.as_deref(), style);
        Ok(id)
    }

    fn property_map(&mut self, map: &mut Element<'_>, props: &mut PropertyMap) -> Result<()> {
        while let Some(mut child) = map.next_child()? {
            let name = match child.token() {
                (SF, FILL) => names::FILL,
                (SF, OPACITY) => names::OPACITY,
                (SF, FONT_SIZE) => names::FONT_SIZE,
                (SF, FONT_NAME) => names::FONT_NAME,
                (SF, BOLD) => names::BOLD,
                (SF, ITALIC) => names::ITALIC,
                (SF, UNDERLINE) => names::UNDERLINE,
                (SF, FONT_COLOR) => names::FONT_COLOR,
                (SF, ALIGNMENT) => names::ALIGNMENT,
                (SF, FIRST_LINE_INDENT) => names::FIRST_LINE_INDENT,
                (SF, STROKE) => {
                    if let Some(stroke) = self.stroke(&mut child)? {
                        props.set(names::STROKE, stroke);
                    }
                    continue;
                },
                (SF, TABS) | (SF, SHADOW) | (SF, REFLECTION) | (SF, PATTERN) => {
                    self.context.skip_unhandled(&mut child)?;
                    continue;
                },
                _ => {
                    self.context.skip_element(&mut child)?;
                    continue;
                },
            };
            match self.value(&mut child)? {
                Some(value) => props.set(name, value),
                None => self
                    .context
                    .diagnostics()
                    .report(DiagnosticKind::Recovered, format_args!("property {} has no value", child)),
            }
        }
        Ok(())
    }

    /// The value element inside a property.
    fn value(&mut self, property: &mut Element<'_>) -> Result<Option<Property>> {
        let mut value = None;
        while let Some(mut child) = property.next_child()? {
            match child.token() {
                (SF, NUMBER) => value = number(self.context, &child, (SFA, NUMBER)).map(Property::Number),
                (SF, STRING) => value = owned(&child, (SFA, STRING)).map(Property::Str),
                (SF, COLOR) => value = self.color(&child).map(Property::Color),
                (SF, NIL) => value = Some(Property::None),
                _ => self.context.skip_element(&mut child)?,
            }
        }
        Ok(value)
    }

    /// `sfa:r`/`sfa:g`/`sfa:b` or `sfa:w` grey, with optional `sfa:a`.
    fn color(&self, color: &Element<'_>) -> Option<Color> {
        let alpha = number(self.context, color, (SFA, A)).unwrap_or(1.0);
        if let Some(white) = number(self.context, color, (SFA, W)) {
            return Some(Color::grey(white, alpha));
        }
        Some(Color::new(
            number(self.context, color, (SFA, R))?,
            number(self.context, color, (SFA, G))?,
            number(self.context, color, (SFA, B))?,
            alpha,
        ))
    }

    fn stroke(&mut self, property: &mut Element<'_>) -> Result<Option<Property>> {
        let mut value = None;
        while let Some(mut child) = property.next_child()? {
            match child.token() {
                (SF, STROKE) => {
                    let mut stroke = Stroke {
                        width: number(self.context, &child, (SF, WIDTH)).unwrap_or(1.0),
                        ..Stroke::default()
                    };
                    while let Some(mut inner) = child.next_child()? {
                        match inner.token() {
                            (SF, COLOR) => {
                                if let Some(color) = self.color(&inner) {
                                    stroke.color = color;
                                }
                            },
                            (SF, PATTERN) => self.context.skip_unhandled(&mut inner)?,
                            _ => self.context.skip_element(&mut inner)?,
                        }
                    }
                    value = Some(Property::Stroke(stroke));
                },
                (SF, NIL) => value = Some(Property::None),
                _ => self.context.skip_element(&mut child)?,
            }
        }
        Ok(value)
    }
}
