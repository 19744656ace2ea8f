//! Stylesheets: the theme, master slide and slide nesting of style maps.

use std::collections::HashMap;
use std::rc::Rc;

use crate::common::Id;

use super::style::{Style, StyleKind};

type StyleMap<K> = [HashMap<K, Rc<Style>>; StyleKind::COUNT];

/// One node of the stylesheet chain.
///
/// Styles are reachable both by their stylesheet name (`sf:ident`) and by
/// their document identifier. Lookups that miss continue in the parent
/// stylesheet.
#[derive(Debug, Default)]
pub struct Stylesheet {
    id: Option<Id>,
    parent: Option<Rc<Stylesheet>>,
    named: StyleMap<Box<str>>,
    identified: StyleMap<Id>,
}

impl Stylesheet {
    pub fn new(id: Option<&str>, parent: Option<Rc<Stylesheet>>) -> Self {
        Self {
            id: id.map(Id::from),
            parent,
            ..Self::default()
        }
    }

    pub fn id(&self) -> Option<&Id> {
        self.id.as_ref()
    }

    pub fn parent(&self) -> Option<&Rc<Stylesheet>> {
        self.parent.as_ref()
    }

    /// Add a style; a later style with the same name or identifier wins.
    pub fn insert(&mut self, style: Rc<Style>) {
        let slot = style.kind().index();
        if let Some(ident) = style.ident() {
            self.named[slot].insert(ident.into(), Rc::clone(&style));
        }
        if let Some(id) = style.id() {
            self.identified[slot].insert(id.clone(), style);
        }
    }

    /// Style of `kind` named `ident`, here or in an enclosing stylesheet.
    pub fn find(&self, kind: StyleKind, ident: &str) -> Option<Rc<Style>> {
        self.chain()
            .find_map(|sheet| sheet.named[kind.index()].get(ident).cloned())
    }

    /// Style of `kind` with identifier `id`, here or in an enclosing stylesheet.
    pub fn find_id(&self, kind: StyleKind, id: &str) -> Option<Rc<Style>> {
        self.chain()
            .find_map(|sheet| sheet.identified[kind.index()].get(id).cloned())
    }

    /// Link every style of this stylesheet; returns the styles left unlinked.
    pub fn link_all(&self) -> Vec<Rc<Style>> {
        let mut unlinked = Vec::new();
        for map in &self.identified {
            for style in map.values() {
                if !style.link(self) {
                    unlinked.push(Rc::clone(style));
                }
            }
        }
        for map in &self.named {
            for style in map.values() {
                if style.id().is_none() && !style.link(self) {
                    unlinked.push(Rc::clone(style));
                }
            }
        }
        unlinked
    }

    pub fn len(&self) -> usize {
        self.identified.iter().map(HashMap::len).sum::<usize>()
            + self
                .named
                .iter()
                .flat_map(HashMap::values)
                .filter(|s| s.id().is_none())
                .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn chain(&self) -> impl Iterator<Item = &Stylesheet> {
        std::iter::successors(Some(self), |sheet| sheet.parent.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::style::{Property, PropertyMap};

    fn style(ident: &str, parent: Option<&str>, answer: Option<i32>) -> Rc<Style> {
        let mut props = PropertyMap::new();
        if let Some(answer) = answer {
            props.set("answer", answer);
        }
        Rc::new(Style::new(StyleKind::Paragraph, props).with_idents(Some(ident), parent))
    }

    #[test]
    fn test_find_walks_up_the_chain() {
        let mut theme = Stylesheet::new(Some("theme"), None);
        theme.insert(style("body", None, Some(42)));
        let theme = Rc::new(theme);

        let slide = Stylesheet::new(Some("slide"), Some(Rc::clone(&theme)));
        assert!(slide.find(StyleKind::Paragraph, "body").is_some());
        assert!(slide.find(StyleKind::Character, "body").is_none());
        assert!(slide.find(StyleKind::Paragraph, "title").is_none());
    }

    #[test]
    fn test_self_reference_resolves_in_enclosing_sheet() {
        let mut theme = Stylesheet::new(Some("theme"), None);
        theme.insert(style("body", None, Some(42)));
        let theme = Rc::new(theme);

        let mut slide = Stylesheet::new(Some("slide"), Some(Rc::clone(&theme)));
        let own = style("body", Some("body"), None);
        slide.insert(Rc::clone(&own));

        assert!(slide.link_all().is_empty());
        let parent = own.parent().unwrap();
        assert!(!Rc::ptr_eq(&parent, &own));
        assert_eq!(own.property("answer", true), Some(Property::Number(42.0)));
    }

    #[test]
    fn test_top_level_self_reference_stays_unlinked() {
        let mut theme = Stylesheet::new(Some("theme"), None);
        let own = style("body", Some("body"), Some(1));
        theme.insert(Rc::clone(&own));

        let unlinked = theme.link_all();
        assert_eq!(unlinked.len(), 1);
        assert!(own.parent().is_none());
        assert_eq!(own.property("answer", true), Some(Property::Number(1.0)));
    }

    #[test]
    fn test_missing_parent_is_soft() {
        let mut sheet = Stylesheet::new(None, None);
        let orphan = style("caption", Some("nowhere"), None);
        sheet.insert(Rc::clone(&orphan));
        assert_eq!(sheet.link_all().len(), 1);
        assert!(!orphan.is_linked());
        assert_eq!(orphan.property("answer", true), None);
    }

    #[test]
    fn test_link_by_reference() {
        let mut sheet = Stylesheet::new(None, None);
        let base = Rc::new(
            Style::new(StyleKind::Graphic, {
                let mut props = PropertyMap::new();
                props.set("opacity", 0.5);
                props
            })
            .with_id(Some("SFDGraphicStyle-1")),
        );
        let child = Rc::new(
            Style::new(StyleKind::Graphic, PropertyMap::new())
                .with_id(Some("SFDGraphicStyle-2"))
                .with_parent_ref(Some("SFDGraphicStyle-1")),
        );
        sheet.insert(base);
        sheet.insert(Rc::clone(&child));
        assert_eq!(sheet.len(), 2);

        assert!(sheet.link_all().is_empty());
        assert_eq!(child.property("opacity", true), Some(Property::Number(0.5)));
    }
}
