//! Paragraph text, built incrementally in document order.

use std::rc::Rc;

use super::style::Style;

/// Inline content of a paragraph.
#[derive(Debug, Clone)]
pub enum Inline {
    Span { style: Option<Rc<Style>>, text: String },
    Tab,
    /// Run of consecutive line breaks
    LineBreak { count: u32 },
}

#[derive(Debug, Clone, Default)]
pub struct Paragraph {
    /// Style of the layout the paragraph was written in
    pub layout: Option<Rc<Style>>,
    pub style: Option<Rc<Style>>,
    pub inlines: Vec<Inline>,
}

impl Paragraph {
    /// Concatenated span text, tabs as `\t` and breaks as `\n`.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        for inline in &self.inlines {
            match inline {
                Inline::Span { text, .. } => out.push_str(text),
                Inline::Tab => out.push('\t'),
                Inline::LineBreak { count } => {
                    for _ in 0..*count {
                        out.push('\n');
                    }
                },
            }
        }
        out
    }
}

/// Text of a shape or text body.
///
/// Line breaks are counted and only materialized, as one
/// [`Inline::LineBreak`] per run, when text or a tab follows or when the
/// paragraph closes.
///
/// Each paragraph keeps the layout style it was opened under, so texts
/// built from several layouts can be [appended](Text::append) without
/// losing it.
#[derive(Debug, Clone, Default)]
pub struct Text {
    layout_style: Option<Rc<Style>>,
    paragraphs: Vec<Paragraph>,
    open: Option<Paragraph>,
    pending_breaks: u32,
}

impl Text {
    pub fn new(layout_style: Option<Rc<Style>>) -> Self {
        Self {
            layout_style,
            ..Self::default()
        }
    }

    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty() && self.open.is_none()
    }

    pub fn is_paragraph_open(&self) -> bool {
        self.open.is_some()
    }

    /// Open a paragraph; returns `false` if one is already open.
    pub fn open_paragraph(&mut self, style: Option<Rc<Style>>) -> bool {
        if self.open.is_some() {
            return false;
        }
        self.open = Some(Paragraph {
            layout: self.layout_style.clone(),
            style,
            inlines: Vec::new(),
        });
        true
    }

    /// Close the open paragraph; returns `false` if none is open.
    pub fn close_paragraph(&mut self) -> bool {
        self.flush_line_breaks();
        match self.open.take() {
            Some(paragraph) => {
                self.paragraphs.push(paragraph);
                true
            },
            None => false,
        }
    }

    /// Append text to the open paragraph. Adjacent text with the same style
    /// joins the previous span.
    pub fn insert_text(&mut self, style: Option<Rc<Style>>, text: &str) -> bool {
        self.flush_line_breaks();
        let Some(paragraph) = self.open.as_mut() else {
            return false;
        };
        if let Some(Inline::Span { style: last, text: run }) = paragraph.inlines.last_mut()
            && same_style(last.as_ref(), style.as_ref())
        {
            run.push_str(text);
            return true;
        }
        paragraph.inlines.push(Inline::Span {
            style,
            text: text.to_string(),
        });
        true
    }

    pub fn insert_tab(&mut self) -> bool {
        self.flush_line_breaks();
        match self.open.as_mut() {
            Some(paragraph) => {
                paragraph.inlines.push(Inline::Tab);
                true
            },
            None => false,
        }
    }

    pub fn insert_line_break(&mut self) -> bool {
        if self.open.is_none() {
            return false;
        }
        self.pending_breaks += 1;
        true
    }

    /// Move the paragraphs of `other` after the ones of `self`.
    pub fn append(&mut self, mut other: Text) {
        other.close_paragraph();
        self.paragraphs.append(&mut other.paragraphs);
    }

    fn flush_line_breaks(&mut self) {
        if self.pending_breaks == 0 {
            return;
        }
        if let Some(paragraph) = self.open.as_mut() {
            paragraph.inlines.push(Inline::LineBreak {
                count: self.pending_breaks,
            });
        }
        self.pending_breaks = 0;
    }
}

fn same_style(a: Option<&Rc<Style>>, b: Option<&Rc<Style>>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => Rc::ptr_eq(a, b),
        _ => false,
    }
}
