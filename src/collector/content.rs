//! Second pass: slide content, drawn as it is collected.

use std::rc::Rc;

use crate::common::{Diagnostics, Id};
use crate::model::{Defaults, Dictionary, Layer};
use crate::output::{Output, Painter, PropertyList, keys};

use super::{Collector, CollectorBase};

/// Resolves slides against the dictionary of the first pass and draws them.
pub struct ContentCollector<'p> {
    base: CollectorBase,
    painter: &'p mut dyn Painter,
    pages: usize,
}

impl<'p> ContentCollector<'p> {
    pub fn new(
        dictionary: Dictionary,
        defaults: &'static dyn Defaults,
        diagnostics: Rc<Diagnostics>,
        painter: &'p mut dyn Painter,
    ) -> Self {
        Self {
            base: CollectorBase::new(dictionary, defaults, diagnostics),
            painter,
            pages: 0,
        }
    }

    /// Pages drawn so far.
    pub fn pages(&self) -> usize {
        self.pages
    }

    pub fn into_dictionary(self) -> Dictionary {
        self.base.into_dictionary()
    }

    fn draw(&mut self, layer: &Layer) -> bool {
        let mut output = Output::new(&mut *self.painter, self.base.dictionary());
        layer.draw(&mut output)
    }
}

impl std::fmt::Debug for ContentCollector<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentCollector")
            .field("base", &self.base)
            .field("pages", &self.pages)
            .finish_non_exhaustive()
    }
}

impl Collector for ContentCollector<'_> {
    fn base(&mut self) -> &mut CollectorBase {
        &mut self.base
    }

    fn start_themes(&mut self) {}

    fn end_themes(&mut self) {}

    fn start_slides(&mut self) {
        self.base.set_collecting(true);
    }

    fn end_slides(&mut self) {
        self.base.set_collecting(false);
    }

    fn start_page(&mut self) {
        self.base.start_page();
        if self.base.is_collecting() {
            let canvas = self.base.canvas();
            let props = PropertyList::new()
                .with(keys::WIDTH, canvas.width)
                .with(keys::HEIGHT, canvas.height);
            self.painter.start_graphics(&props);
        }
    }

    fn end_page(&mut self) {
        self.base.end_page();
        if self.base.is_collecting() {
            self.painter.end_graphics();
            self.pages += 1;
        }
    }

    fn collect_layer(&mut self, id: Option<&str>, is_reference: bool) {
        if is_reference {
            if !self.base.is_collecting() {
                return;
            }
            let Some(id) = id else {
                return;
            };
            if !self.draw(&Layer::proxy(Id::from(id))) {
                self.base.diagnostics().missing_reference("master layer", id);
            }
            return;
        }

        let layer = self.base.take_layer(id);
        if self.base.is_collecting() {
            self.draw(&layer);
        }
    }
}
