//! Drawing context threaded through object drawing.

use std::rc::Rc;

use crate::model::{Dictionary, Style, StyleContext, Transformation};

use super::Painter;

/// Painter, dictionary view, accumulated transformation and style stack of
/// one drawing scope.
///
/// Nested scopes compose transformations child first: a point drawn in a
/// nested scope goes through the child transformation, then the parent's.
pub struct Output<'a> {
    painter: &'a mut dyn Painter,
    dictionary: &'a Dictionary,
    transformation: Transformation,
    styles: StyleContext,
}

impl<'a> Output<'a> {
    pub fn new(painter: &'a mut dyn Painter, dictionary: &'a Dictionary) -> Self {
        Self {
            painter,
            dictionary,
            transformation: Transformation::IDENTITY,
            styles: StyleContext::new(),
        }
    }

    /// Scope drawing through `tr` inside the current transformation.
    pub fn nested(&mut self, tr: Transformation) -> Output<'_> {
        Output {
            painter: &mut *self.painter,
            dictionary: self.dictionary,
            transformation: self.transformation * tr,
            styles: self.styles.clone(),
        }
    }

    pub fn painter(&mut self) -> &mut dyn Painter {
        &mut *self.painter
    }

    pub fn dictionary(&self) -> &Dictionary {
        self.dictionary
    }

    pub fn transformation(&self) -> Transformation {
        self.transformation
    }

    pub fn styles(&self) -> &StyleContext {
        &self.styles
    }

    pub fn push_style(&mut self, style: Rc<Style>) {
        self.styles.push(style);
    }

    pub fn pop_style(&mut self) -> Option<Rc<Style>> {
        self.styles.pop()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::recorder::RecordingPainter;

    #[test]
    fn test_nested_scopes_apply_child_first() {
        let dictionary = Dictionary::new();
        let mut painter = RecordingPainter::default();
        let mut output = Output::new(&mut painter, &dictionary);
        let mut outer = output.nested(Transformation::translate(10.0, 0.0));
        let inner = outer.nested(Transformation::scale(2.0, 2.0));

        // Scale first, then translate
        assert_eq!(inner.transformation().apply(1.0, 1.0), (12.0, 2.0));
        assert_eq!(outer.transformation().apply(1.0, 1.0), (11.0, 1.0));
    }

    #[test]
    fn test_style_stack_is_scoped() {
        use crate::model::{PropertyMap, StyleKind};

        let dictionary = Dictionary::new();
        let mut painter = RecordingPainter::default();
        let mut output = Output::new(&mut painter, &dictionary);
        output.push_style(Rc::new(Style::new(StyleKind::Paragraph, PropertyMap::new())));
        {
            let mut nested = output.nested(Transformation::IDENTITY);
            nested.push_style(Rc::new(Style::new(StyleKind::Character, PropertyMap::new())));
            assert_eq!(nested.styles().depth(), 2);
        }
        assert_eq!(output.styles().depth(), 1);
        assert!(output.pop_style().is_some());
    }
}
