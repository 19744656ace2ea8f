//! Identifier-keyed store shared by both collector passes.

use std::collections::HashMap;
use std::rc::Rc;

use crate::common::Id;

use super::geometry::{Geometry, Size};
use super::layer::Layer;
use super::object::{Data, Object};
use super::path::Path;
use super::style::{Style, StyleKind};
use super::stylesheet::Stylesheet;

/// Kinds of drawable that can be captured once and referenced later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Image,
    Line,
    Media,
    Group,
    TextBody,
}

impl ObjectKind {
    const COUNT: usize = 5;

    fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Line => "line",
            Self::Media => "media",
            Self::Group => "group",
            Self::TextBody => "text body",
        }
    }
}

/// Everything captured from one document, by identifier.
///
/// Inserting under an existing identifier replaces the earlier entry.
/// Captured values are immutable and shared: a lookup hands out another
/// reference to the same value.
#[derive(Debug, Default)]
pub struct Dictionary {
    styles: [HashMap<Id, Rc<Style>>; StyleKind::COUNT],
    stylesheets: HashMap<Id, Rc<Stylesheet>>,
    geometries: HashMap<Id, Geometry>,
    beziers: HashMap<Id, Rc<Path>>,
    objects: [HashMap<Id, Rc<Object>>; ObjectKind::COUNT],
    data: HashMap<Id, Rc<Data>>,
    master_layers: HashMap<Id, Rc<Layer>>,
    presentation_size: Option<Size>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_style(&mut self, kind: StyleKind, id: Id, style: Rc<Style>) {
        self.styles[kind.index()].insert(id, style);
    }

    pub fn style(&self, kind: StyleKind, id: &str) -> Option<Rc<Style>> {
        self.styles[kind.index()].get(id).cloned()
    }

    pub fn style_count(&self, kind: StyleKind) -> usize {
        self.styles[kind.index()].len()
    }

    pub fn insert_stylesheet(&mut self, id: Id, stylesheet: Rc<Stylesheet>) {
        self.stylesheets.insert(id, stylesheet);
    }

    pub fn stylesheet(&self, id: &str) -> Option<Rc<Stylesheet>> {
        self.stylesheets.get(id).cloned()
    }

    pub fn insert_geometry(&mut self, id: Id, geometry: Geometry) {
        self.geometries.insert(id, geometry);
    }

    /// Copy of the geometry captured under `id`.
    pub fn geometry(&self, id: &str) -> Option<Geometry> {
        self.geometries.get(id).cloned()
    }

    pub fn insert_bezier(&mut self, id: Id, path: Rc<Path>) {
        self.beziers.insert(id, path);
    }

    pub fn bezier(&self, id: &str) -> Option<Rc<Path>> {
        self.beziers.get(id).cloned()
    }

    pub fn insert_object(&mut self, kind: ObjectKind, id: Id, object: Rc<Object>) {
        self.objects[kind.index()].insert(id, object);
    }

    pub fn object(&self, kind: ObjectKind, id: &str) -> Option<Rc<Object>> {
        self.objects[kind.index()].get(id).cloned()
    }

    pub fn insert_data(&mut self, id: Id, data: Rc<Data>) {
        self.data.insert(id, data);
    }

    pub fn data(&self, id: &str) -> Option<Rc<Data>> {
        self.data.get(id).cloned()
    }

    pub fn insert_master_layer(&mut self, id: Id, layer: Rc<Layer>) {
        self.master_layers.insert(id, layer);
    }

    pub fn master_layer(&self, id: &str) -> Option<Rc<Layer>> {
        self.master_layers.get(id).cloned()
    }

    pub fn master_layer_count(&self) -> usize {
        self.master_layers.len()
    }

    /// Record the presentation size; the first one stated wins.
    pub fn set_presentation_size(&mut self, size: Size) {
        self.presentation_size.get_or_insert(size);
    }

    pub fn presentation_size(&self) -> Option<Size> {
        self.presentation_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::style::PropertyMap;

    #[test]
    fn test_last_writer_wins() {
        let mut dictionary = Dictionary::new();
        let first = Rc::new(Style::new(StyleKind::Graphic, PropertyMap::new()));
        let second = Rc::new(Style::new(StyleKind::Graphic, PropertyMap::new()));
        dictionary.insert_style(StyleKind::Graphic, Id::from("s"), Rc::clone(&first));
        dictionary.insert_style(StyleKind::Graphic, Id::from("s"), Rc::clone(&second));

        let found = dictionary.style(StyleKind::Graphic, "s").unwrap();
        assert!(Rc::ptr_eq(&found, &second));
        assert_eq!(dictionary.style_count(StyleKind::Graphic), 1);
    }

    #[test]
    fn test_kinds_are_separate() {
        let mut dictionary = Dictionary::new();
        let style = Rc::new(Style::new(StyleKind::Paragraph, PropertyMap::new()));
        dictionary.insert_style(StyleKind::Paragraph, Id::from("s"), style);
        assert!(dictionary.style(StyleKind::Character, "s").is_none());
        assert!(dictionary.style(StyleKind::Paragraph, "s").is_some());
    }

    #[test]
    fn test_presentation_size_first_wins() {
        let mut dictionary = Dictionary::new();
        assert!(dictionary.presentation_size().is_none());
        dictionary.set_presentation_size(Size::new(800.0, 600.0));
        dictionary.set_presentation_size(Size::new(1024.0, 768.0));
        assert_eq!(dictionary.presentation_size(), Some(Size::new(800.0, 600.0)));
    }
}
