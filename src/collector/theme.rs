//! First pass: themes, master slides and their styles.

use std::rc::Rc;

use crate::common::{DiagnosticKind, Diagnostics, Id};
use crate::model::{Defaults, Dictionary};

use super::{Collector, CollectorBase};

/// Collects styles and master layers; draws nothing.
#[derive(Debug)]
pub struct ThemeCollector {
    base: CollectorBase,
}

impl ThemeCollector {
    pub fn new(dictionary: Dictionary, defaults: &'static dyn Defaults, diagnostics: Rc<Diagnostics>) -> Self {
        Self {
            base: CollectorBase::new(dictionary, defaults, diagnostics),
        }
    }

    pub fn into_dictionary(self) -> Dictionary {
        self.base.into_dictionary()
    }
}

impl Collector for ThemeCollector {
    fn base(&mut self) -> &mut CollectorBase {
        &mut self.base
    }

    fn start_themes(&mut self) {
        self.base.set_collecting(true);
    }

    fn end_themes(&mut self) {
        self.base.set_collecting(false);
    }

    fn start_slides(&mut self) {}

    fn end_slides(&mut self) {}

    fn start_page(&mut self) {
        self.base.start_page();
    }

    fn end_page(&mut self) {
        self.base.end_page();
    }

    fn collect_layer(&mut self, id: Option<&str>, is_reference: bool) {
        if is_reference {
            if self.base.is_collecting() {
                self.base.diagnostics().report(
                    DiagnosticKind::ProtocolMisuse,
                    format_args!("master layer '{}' refers to another master layer", id.unwrap_or("?")),
                );
            }
            return;
        }

        let layer = self.base.take_layer(id);
        if !self.base.is_collecting() {
            return;
        }
        match id {
            Some(id) => {
                tracing::debug!(id, objects = layer.objects().len(), "master layer collected");
                self.base.dictionary_mut().insert_master_layer(Id::from(id), Rc::new(layer));
            },
            None => self
                .base
                .diagnostics()
                .report(DiagnosticKind::Recovered, "master layer without identifier dropped"),
        }
    }
}
