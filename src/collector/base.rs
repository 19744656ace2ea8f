//! Bookkeeping shared by both collectors.
//!
//! [`CollectorBase`] owns the dictionary during a pass, the stack of open
//! layers and groups, and the slots a drawable is assembled from: the
//! pending geometry, path, data and text. Every drawable capture consumes
//! and clears the slots, so a slot never leaks into a sibling.

use std::rc::Rc;

use crate::common::{DiagnosticKind, Diagnostics, Id};
use crate::model::object::describe;
use crate::model::{
    Data, Defaults, Dictionary, Geometry, Group, Image, Layer, Line, Media, Object, ObjectKind,
    Path, Position, Shape, Size, Style, StyleKind, Stylesheet, Text, TextBody,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FrameKind {
    Layer,
    Group,
}

#[derive(Debug)]
struct Frame {
    kind: FrameKind,
    objects: Vec<Rc<Object>>,
}

/// Shared state of a collector pass.
#[derive(Debug)]
pub struct CollectorBase {
    dictionary: Dictionary,
    diagnostics: Rc<Diagnostics>,
    defaults: &'static dyn Defaults,
    collecting: bool,
    page_open: bool,
    frames: Vec<Frame>,
    geometry: Option<Geometry>,
    path: Option<Path>,
    data: Option<Rc<Data>>,
    /// Text finished by `end_text_layout`, waiting for its drawable
    text: Option<Text>,
    /// Text layout being filled
    layout: Option<Text>,
    /// Objects of the group closed last, waiting for `collect_group`
    group: Option<Vec<Rc<Object>>>,
    /// Objects of the layer closed last, waiting for `collect_layer`
    layer: Option<Vec<Rc<Object>>>,
    /// Styles captured since the last stylesheet closed
    pending_styles: Vec<Rc<Style>>,
    stylesheet: Option<Rc<Stylesheet>>,
    /// Stylesheet in force around the current slide
    scope: Option<Rc<Stylesheet>>,
}

impl CollectorBase {
    pub fn new(dictionary: Dictionary, defaults: &'static dyn Defaults, diagnostics: Rc<Diagnostics>) -> Self {
        Self {
            dictionary,
            diagnostics,
            defaults,
            collecting: false,
            page_open: false,
            frames: Vec::new(),
            geometry: None,
            path: None,
            data: None,
            text: None,
            layout: None,
            group: None,
            layer: None,
            pending_styles: Vec::new(),
            stylesheet: None,
            scope: None,
        }
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    pub fn dictionary_mut(&mut self) -> &mut Dictionary {
        &mut self.dictionary
    }

    pub fn into_dictionary(self) -> Dictionary {
        self.dictionary
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn is_collecting(&self) -> bool {
        self.collecting
    }

    pub fn set_collecting(&mut self, collecting: bool) {
        tracing::trace!(collecting, "collector phase change");
        self.collecting = collecting;
    }

    /// Presentation size, with the version's default filled in.
    pub fn canvas(&self) -> Size {
        let mut size = self.dictionary.presentation_size();
        self.defaults.presentation_size(&mut size);
        size.unwrap_or_default()
    }

    pub fn collect_presentation(&mut self, size: Option<Size>) {
        if let Some(size) = size {
            self.dictionary.set_presentation_size(size);
        }
    }

    pub fn start_page(&mut self) {
        assert!(!self.page_open, "start_page inside an open page");
        self.page_open = true;
    }

    pub fn end_page(&mut self) {
        assert!(self.page_open, "end_page without start_page");
        assert!(self.frames.is_empty(), "end_page with an open layer or group");
        assert!(self.layout.is_none(), "end_page with an open text layout");
        self.page_open = false;
        self.clear_slots();
        self.group = None;
        self.layer = None;
        self.pending_styles.clear();
        self.stylesheet = self.scope.clone();
    }

    /// Remember the stylesheet in force before a slide's own sheet.
    pub fn start_slide(&mut self) {
        self.scope = self.stylesheet.clone();
    }

    /// Drop the sheet of the slide just finished, so that its siblings
    /// resolve against the enclosing sheet only.
    pub fn end_slide(&mut self) {
        self.stylesheet = self.scope.clone();
    }

    pub fn collect_style(&mut self, kind: StyleKind, id: Option<&str>, style: Style) {
        if !self.collecting {
            return;
        }
        let style = Rc::new(match id {
            Some(_) => style.with_id(id),
            None => style,
        });
        if let Some(id) = id {
            self.dictionary.insert_style(kind, Id::from(id), Rc::clone(&style));
        }
        self.pending_styles.push(style);
    }

    /// Close the styles captured since the previous stylesheet into a
    /// stylesheet node and link them.
    pub fn collect_stylesheet(&mut self, id: Option<&str>, parent: Option<&str>) {
        if !self.collecting {
            return;
        }
        let parent_sheet = parent.and_then(|p| {
            let found = self.dictionary.stylesheet(p);
            if found.is_none() {
                self.diagnostics.missing_reference("stylesheet", p);
            }
            found
        });

        let mut sheet = Stylesheet::new(id, parent_sheet);
        for style in self.pending_styles.drain(..) {
            sheet.insert(style);
        }
        let sheet = Rc::new(sheet);
        for style in sheet.link_all() {
            let name = style
                .parent_ref()
                .map(Id::as_str)
                .or(style.parent_ident())
                .unwrap_or_default();
            self.diagnostics.missing_reference(&format!("parent {} style", style.kind()), name);
        }
        tracing::debug!(id, styles = sheet.len(), "stylesheet collected");

        if let Some(id) = id {
            self.dictionary.insert_stylesheet(Id::from(id), Rc::clone(&sheet));
        }
        self.stylesheet = Some(sheet);
    }

    /// Style of `kind` named by `id`, linked against the current stylesheet.
    pub fn style(&self, kind: StyleKind, id: Option<&str>) -> Option<Rc<Style>> {
        let id = id?;
        let Some(style) = self.dictionary.style(kind, id) else {
            self.diagnostics.missing_reference(&format!("{} style", kind), id);
            return None;
        };
        if !style.is_linked()
            && let Some(sheet) = &self.stylesheet
        {
            style.link(sheet);
        }
        Some(style)
    }

    pub fn collect_geometry(&mut self, id: Option<&str>, geometry: Option<Geometry>, is_reference: bool) {
        if !self.collecting {
            return;
        }
        if is_reference {
            let Some(id) = id else {
                return;
            };
            match self.dictionary.geometry(id) {
                Some(geometry) => self.geometry = Some(geometry),
                None => self.diagnostics.missing_reference("geometry", id),
            }
        } else if let Some(geometry) = geometry {
            if let Some(id) = id {
                self.dictionary.insert_geometry(Id::from(id), geometry.clone());
            }
            self.geometry = Some(geometry);
        }
    }

    pub fn collect_bezier(&mut self, id: Option<&str>, path: Option<Path>, is_reference: bool) {
        if !self.collecting {
            return;
        }
        if is_reference {
            let Some(id) = id else {
                return;
            };
            match self.dictionary.bezier(id) {
                Some(path) => self.path = Some(Path::clone(&path)),
                None => self.diagnostics.missing_reference("bezier", id),
            }
        } else if let Some(path) = path {
            if let Some(id) = id {
                self.dictionary.insert_bezier(Id::from(id), Rc::new(path.clone()));
            }
            self.path = Some(path);
        }
    }

    pub fn collect_path(&mut self, path: Path) {
        if self.collecting {
            self.path = Some(path);
        }
    }

    pub fn collect_data(&mut self, id: Option<&str>, data: Option<Data>, is_reference: bool) {
        if !self.collecting {
            return;
        }
        if is_reference {
            let Some(id) = id else {
                return;
            };
            match self.dictionary.data(id) {
                Some(data) => self.data = Some(data),
                None => self.diagnostics.missing_reference("data", id),
            }
        } else if let Some(mut data) = data {
            data.id = id.map(Id::from);
            let data = Rc::new(data);
            if let Some(id) = id {
                self.dictionary.insert_data(Id::from(id), Rc::clone(&data));
            }
            self.data = Some(data);
        }
    }

    pub fn collect_shape(&mut self, id: Option<&str>, style: Option<&str>) {
        if !self.collecting {
            self.clear_slots();
            return;
        }
        let Some(path) = self.path.take() else {
            self.diagnostics
                .report(DiagnosticKind::Recovered, format_args!("shape '{}' has no path", id.unwrap_or("?")));
            self.clear_slots();
            return;
        };
        let shape = Shape {
            id: id.map(Id::from),
            path,
            geometry: self.take_geometry(),
            style: self.style(StyleKind::Graphic, style),
            text: self.text.take(),
        };
        self.clear_slots();
        self.push_object(Rc::new(Object::Shape(shape)));
    }

    pub fn collect_image(&mut self, id: Option<&str>, style: Option<&str>, is_reference: bool) {
        if !self.collecting {
            self.clear_slots();
            return;
        }
        if is_reference {
            self.clear_slots();
            self.push_reference(ObjectKind::Image, id);
            return;
        }
        let image = Image {
            id: id.map(Id::from),
            geometry: self.take_geometry(),
            style: self.style(StyleKind::Graphic, style),
            data: self.data.take(),
        };
        self.clear_slots();
        self.capture(ObjectKind::Image, id, Object::Image(image));
    }

    pub fn collect_line(
        &mut self,
        id: Option<&str>,
        ends: Option<(Position, Position)>,
        style: Option<&str>,
        is_reference: bool,
    ) {
        self.clear_slots();
        if !self.collecting {
            return;
        }
        if is_reference {
            self.push_reference(ObjectKind::Line, id);
            return;
        }
        let Some((head, tail)) = ends else {
            self.diagnostics
                .report(DiagnosticKind::Recovered, format_args!("line '{}' has no end points", id.unwrap_or("?")));
            return;
        };
        let line = Line {
            id: id.map(Id::from),
            head,
            tail,
            style: self.style(StyleKind::Graphic, style),
        };
        self.capture(ObjectKind::Line, id, Object::Line(line));
    }

    pub fn collect_media(&mut self, id: Option<&str>, style: Option<&str>, is_reference: bool) {
        if !self.collecting {
            self.clear_slots();
            return;
        }
        if is_reference {
            self.clear_slots();
            self.push_reference(ObjectKind::Media, id);
            return;
        }
        let media = Media {
            id: id.map(Id::from),
            geometry: self.take_geometry(),
            style: self.style(StyleKind::Graphic, style),
            data: self.data.take(),
        };
        self.clear_slots();
        self.capture(ObjectKind::Media, id, Object::Media(media));
    }

    pub fn collect_text_body(&mut self, id: Option<&str>, style: Option<&str>, is_reference: bool) {
        if !self.collecting {
            self.clear_slots();
            return;
        }
        if is_reference {
            self.clear_slots();
            self.push_reference(ObjectKind::TextBody, id);
            return;
        }
        let body = TextBody {
            id: id.map(Id::from),
            geometry: self.take_geometry(),
            style: self.style(StyleKind::Placeholder, style),
            text: self.text.take().unwrap_or_default(),
        };
        self.clear_slots();
        self.capture(ObjectKind::TextBody, id, Object::TextBody(body));
    }

    pub fn start_group(&mut self) {
        assert!(
            self.frames.last().is_some(),
            "start_group outside a layer"
        );
        self.frames.push(Frame {
            kind: FrameKind::Group,
            objects: Vec::new(),
        });
    }

    pub fn end_group(&mut self) {
        let frame = self.frames.pop();
        assert!(
            matches!(frame, Some(Frame { kind: FrameKind::Group, .. })),
            "end_group without an open group"
        );
        self.group = frame.map(|f| f.objects);
    }

    /// Capture the group closed last, or push a reference to an earlier one.
    /// A geometry collected after `end_group` places the group.
    pub fn collect_group(&mut self, id: Option<&str>, is_reference: bool) {
        if is_reference {
            self.clear_slots();
            if self.collecting {
                self.push_reference(ObjectKind::Group, id);
            }
            return;
        }
        let objects = self.group.take();
        assert!(objects.is_some(), "collect_group without a closed group");
        if !self.collecting {
            self.clear_slots();
            return;
        }
        let group = Group {
            id: id.map(Id::from),
            geometry: self.geometry.take(),
            objects: objects.unwrap_or_default(),
        };
        self.clear_slots();
        self.capture(ObjectKind::Group, id, Object::Group(group));
    }

    pub fn start_layer(&mut self) {
        assert!(self.page_open, "start_layer outside a page");
        assert!(self.frames.is_empty(), "layers do not nest");
        self.frames.push(Frame {
            kind: FrameKind::Layer,
            objects: Vec::new(),
        });
    }

    pub fn end_layer(&mut self) {
        let frame = self.frames.pop();
        assert!(
            matches!(frame, Some(Frame { kind: FrameKind::Layer, .. })),
            "end_layer without an open layer"
        );
        self.layer = frame.map(|f| f.objects);
    }

    /// The layer closed last, as a concrete layer named `id`.
    pub fn take_layer(&mut self, id: Option<&str>) -> Layer {
        let objects = self.layer.take();
        assert!(objects.is_some(), "collect_layer without a closed layer");
        Layer::new(id.map(Id::from), objects.unwrap_or_default())
    }

    pub fn start_text_layout(&mut self, style: Option<&str>) {
        assert!(self.layout.is_none(), "text layouts do not nest");
        let style = if self.collecting { self.style(StyleKind::Layout, style) } else { None };
        self.layout = Some(Text::new(style));
    }

    pub fn end_text_layout(&mut self) {
        let layout = self.layout.take();
        assert!(
            layout.as_ref().is_some_and(|t| !t.is_paragraph_open()),
            "end_text_layout without a matching start or with an open paragraph"
        );
        if !self.collecting {
            return;
        }
        if let Some(layout) = layout {
            match self.text.as_mut() {
                Some(text) => text.append(layout),
                None => self.text = Some(layout),
            }
        }
    }

    pub fn start_paragraph(&mut self, style: Option<&str>) {
        let style = if self.collecting { self.style(StyleKind::Paragraph, style) } else { None };
        let layout = self.layout.as_mut();
        assert!(layout.is_some(), "start_paragraph outside a text layout");
        if let Some(layout) = layout {
            assert!(layout.open_paragraph(style), "paragraphs do not nest");
        }
    }

    pub fn end_paragraph(&mut self) {
        let closed = self.layout.as_mut().is_some_and(Text::close_paragraph);
        assert!(closed, "end_paragraph without start_paragraph");
    }

    pub fn collect_text(&mut self, style: Option<&str>, text: &str) {
        let style = if self.collecting { self.style(StyleKind::Character, style) } else { None };
        let inserted = self.open_layout().insert_text(style, text);
        debug_assert!(inserted);
    }

    pub fn collect_tab(&mut self) {
        self.open_layout().insert_tab();
    }

    pub fn collect_line_break(&mut self) {
        self.open_layout().insert_line_break();
    }

    fn open_layout(&mut self) -> &mut Text {
        let layout = self.layout.as_mut().filter(|t| t.is_paragraph_open());
        match layout {
            Some(layout) => layout,
            None => panic!("text collected outside a paragraph"),
        }
    }

    fn take_geometry(&mut self) -> Geometry {
        let mut geometry = self.geometry.take().unwrap_or_default();
        self.defaults.geometry(&mut geometry, self.canvas());
        geometry
    }

    fn clear_slots(&mut self) {
        self.geometry = None;
        self.path = None;
        self.data = None;
        self.text = None;
    }

    fn capture(&mut self, kind: ObjectKind, id: Option<&str>, object: Object) {
        let object = Rc::new(object);
        if let Some(id) = id {
            self.dictionary.insert_object(kind, Id::from(id), Rc::clone(&object));
        }
        self.push_object(object);
    }

    fn push_reference(&mut self, kind: ObjectKind, id: Option<&str>) {
        let Some(id) = id else {
            return;
        };
        match self.dictionary.object(kind, id) {
            Some(object) => self.push_object(object),
            None => self.diagnostics.missing_reference(kind.as_str(), id),
        }
    }

    fn push_object(&mut self, object: Rc<Object>) {
        tracing::trace!(object = %describe(&object), "drawable collected");
        match self.frames.last_mut() {
            Some(frame) => frame.objects.push(object),
            None => panic!("drawable collected outside a layer or group"),
        }
    }
}
