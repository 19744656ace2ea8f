//! Layers: ordered drawables, or a stand-in for a master-page layer.

use std::rc::Rc;

use crate::common::Id;
use crate::output::{Output, PropertyList, keys};

use super::object::Object;

#[derive(Debug, Clone)]
pub enum LayerContent {
    Objects(Vec<Rc<Object>>),
    /// Reference to a master-page layer, resolved when drawn
    Proxy(Id),
}

#[derive(Debug, Clone)]
pub struct Layer {
    id: Option<Id>,
    content: LayerContent,
}

impl Layer {
    pub fn new(id: Option<Id>, objects: Vec<Rc<Object>>) -> Self {
        Self {
            id,
            content: LayerContent::Objects(objects),
        }
    }

    pub fn proxy(master: Id) -> Self {
        Self {
            id: None,
            content: LayerContent::Proxy(master),
        }
    }

    pub fn id(&self) -> Option<&Id> {
        self.id.as_ref()
    }

    pub fn is_proxy(&self) -> bool {
        matches!(self.content, LayerContent::Proxy(_))
    }

    pub fn objects(&self) -> &[Rc<Object>] {
        match &self.content {
            LayerContent::Objects(objects) => objects,
            LayerContent::Proxy(_) => &[],
        }
    }

    /// Draw the layer. A proxy draws the master layer it names; returns
    /// `false` when that layer does not exist.
    pub fn draw(&self, output: &mut Output<'_>) -> bool {
        match &self.content {
            LayerContent::Objects(objects) => {
                let mut props = PropertyList::new();
                if let Some(id) = &self.id {
                    props.insert(keys::LAYER, id.as_str());
                }
                output.painter().start_layer(&props);
                for object in objects {
                    object.draw(output);
                }
                output.painter().end_layer();
                true
            },
            LayerContent::Proxy(master) => {
                let Some(layer) = output.dictionary().master_layer(master.as_str()) else {
                    return false;
                };
                // Masters never hold proxies, so this cannot recurse
                if layer.is_proxy() {
                    return false;
                }
                layer.draw(output)
            },
        }
    }
}
