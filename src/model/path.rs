//! Vector paths and their textual mini-language.
//!
//! The mini-language is the one used by bezier records: commands `M x y`,
//! `L x y`, `C x1 y1 x2 y2 x y` and `Z`. Lowercase commands are relative to
//! the current point, and separators may be omitted where a sign or a
//! command letter already ends a number, as in `M0 0L1-1`.

use std::fmt;

use crate::common::number::{parse_double, write_num};
use crate::common::{Error, Result};

use super::transform::Transformation;

/// One drawing command of a [`Path`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathElement {
    MoveTo {
        x: f64,
        y: f64,
    },
    LineTo {
        x: f64,
        y: f64,
    },
    CurveTo {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        x: f64,
        y: f64,
    },
    ClosePath,
}

impl PathElement {
    /// Command letter in the mini-language.
    pub fn letter(&self) -> char {
        match self {
            Self::MoveTo { .. } => 'M',
            Self::LineTo { .. } => 'L',
            Self::CurveTo { .. } => 'C',
            Self::ClosePath => 'Z',
        }
    }

    fn transformed(&self, tr: &Transformation) -> Self {
        match *self {
            Self::MoveTo { x, y } => {
                let (x, y) = tr.apply(x, y);
                Self::MoveTo { x, y }
            },
            Self::LineTo { x, y } => {
                let (x, y) = tr.apply(x, y);
                Self::LineTo { x, y }
            },
            Self::CurveTo { x1, y1, x2, y2, x, y } => {
                let (x1, y1) = tr.apply(x1, y1);
                let (x2, y2) = tr.apply(x2, y2);
                let (x, y) = tr.apply(x, y);
                Self::CurveTo { x1, y1, x2, y2, x, y }
            },
            Self::ClosePath => Self::ClosePath,
        }
    }

    fn coordinates(&self) -> &'static [usize] {
        match self {
            Self::MoveTo { .. } | Self::LineTo { .. } => &[0, 1],
            Self::CurveTo { .. } => &[0, 1, 2, 3, 4, 5],
            Self::ClosePath => &[],
        }
    }

    fn coordinate(&self, index: usize) -> f64 {
        match (*self, index) {
            (Self::MoveTo { x, .. } | Self::LineTo { x, .. }, 0) => x,
            (Self::MoveTo { y, .. } | Self::LineTo { y, .. }, 1) => y,
            (Self::CurveTo { x1, .. }, 0) => x1,
            (Self::CurveTo { y1, .. }, 1) => y1,
            (Self::CurveTo { x2, .. }, 2) => x2,
            (Self::CurveTo { y2, .. }, 3) => y2,
            (Self::CurveTo { x, .. }, 4) => x,
            (Self::CurveTo { y, .. }, 5) => y,
            _ => 0.0,
        }
    }

    /// Same command with every coordinate within `eps` of the other's.
    pub fn approx_eq(&self, other: &Self, eps: f64) -> bool {
        self.letter() == other.letter()
            && self
                .coordinates()
                .iter()
                .all(|&i| (self.coordinate(i) - other.coordinate(i)).abs() <= eps)
    }
}

/// Ordered sequence of path elements. Elements are immutable once appended.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    elements: Vec<PathElement>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the textual mini-language.
    ///
    /// # Examples
    ///
    /// ```
    /// use apxl::model::Path;
    ///
    /// let path = Path::parse("M 0 0 L 1 0 L 1 1 Z")?;
    /// assert_eq!(path.len(), 4);
    /// assert_eq!(path.to_string(), "M 0 0 L 1 0 L 1 1 Z");
    /// # Ok::<(), apxl::common::Error>(())
    /// ```
    pub fn parse(source: &str) -> Result<Self> {
        let tokens = Lexer { source, pos: 0 }.collect::<Result<Vec<_>>>()?;
        let mut tokens = tokens.into_iter().peekable();
        let mut path = Path::new();
        let mut current = (0.0, 0.0);
        let mut subpath_start = (0.0, 0.0);
        let mut previous: Option<char> = None;

        loop {
            let command = match tokens.peek() {
                None => break,
                Some(PathToken::Command(c)) => {
                    let c = *c;
                    tokens.next();
                    c
                },
                // Extra coordinates repeat the command; after a move they draw lines
                Some(PathToken::Number(n)) => match previous {
                    Some('M') => 'L',
                    Some('m') => 'l',
                    Some(c) if !c.eq_ignore_ascii_case(&'z') => c,
                    _ => return Err(Error::InvalidFormat(format!("coordinate '{}' without a command", n))),
                },
            };
            previous = Some(command);

            let origin = if command.is_ascii_lowercase() { current } else { (0.0, 0.0) };
            match command.to_ascii_uppercase() {
                'M' => {
                    let (x, y) = point(&mut tokens, command, origin)?;
                    path.move_to(x, y);
                    current = (x, y);
                    subpath_start = current;
                },
                'L' => {
                    let (x, y) = point(&mut tokens, command, origin)?;
                    path.line_to(x, y);
                    current = (x, y);
                },
                'C' => {
                    let (x1, y1) = point(&mut tokens, command, origin)?;
                    let (x2, y2) = point(&mut tokens, command, origin)?;
                    let (x, y) = point(&mut tokens, command, origin)?;
                    path.curve_to(x1, y1, x2, y2, x, y);
                    current = (x, y);
                },
                _ => {
                    path.close_path();
                    current = subpath_start;
                },
            }
        }
        Ok(path)
    }

    pub fn append(&mut self, element: PathElement) {
        self.elements.push(element);
    }

    pub fn move_to(&mut self, x: f64, y: f64) {
        self.append(PathElement::MoveTo { x, y });
    }

    pub fn line_to(&mut self, x: f64, y: f64) {
        self.append(PathElement::LineTo { x, y });
    }

    pub fn curve_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, x: f64, y: f64) {
        self.append(PathElement::CurveTo { x1, y1, x2, y2, x, y });
    }

    pub fn close_path(&mut self) {
        self.append(PathElement::ClosePath);
    }

    pub fn elements(&self) -> &[PathElement] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Whether the last element closes the path.
    pub fn is_closed(&self) -> bool {
        matches!(self.elements.last(), Some(PathElement::ClosePath))
    }

    /// Copy of this path with `tr` applied to every point.
    pub fn transformed(&self, tr: &Transformation) -> Path {
        Path {
            elements: self.elements.iter().map(|e| e.transformed(tr)).collect(),
        }
    }

    /// Element-wise comparison with an absolute tolerance.
    pub fn approx_eq(&self, other: &Path, eps: f64) -> bool {
        self.len() == other.len()
            && self
                .elements
                .iter()
                .zip(&other.elements)
                .all(|(a, b)| a.approx_eq(b, eps))
    }

    /// Serialize to the mini-language.
    pub fn write_to(&self, out: &mut String) {
        for (i, element) in self.elements.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            out.push(element.letter());
            for &index in element.coordinates() {
                out.push(' ');
                write_num(out, element.coordinate(index));
            }
        }
    }
}

impl From<Vec<PathElement>> for Path {
    fn from(elements: Vec<PathElement>) -> Self {
        Self { elements }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::with_capacity(self.elements.len() * 12);
        self.write_to(&mut out);
        f.write_str(&out)
    }
}

#[derive(Debug, Clone, Copy)]
enum PathToken<'a> {
    Command(char),
    Number(&'a str),
}

/// Splits path text into command letters and numbers. Numbers may be
/// separated by whitespace, commas, a sign or a command letter.
struct Lexer<'a> {
    source: &'a str,
    pos: usize,
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<PathToken<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        let bytes = self.source.as_bytes();
        while bytes.get(self.pos).is_some_and(|&b| b.is_ascii_whitespace() || b == b',') {
            self.pos += 1;
        }
        let &first = bytes.get(self.pos)?;

        if first.is_ascii_alphabetic() {
            self.pos += 1;
            return Some(match first {
                b'M' | b'm' | b'L' | b'l' | b'C' | b'c' | b'Z' | b'z' => Ok(PathToken::Command(char::from(first))),
                _ => Err(Error::InvalidFormat(format!("unknown path command '{}'", char::from(first)))),
            });
        }

        let start = self.pos;
        let mut end = start;
        if matches!(bytes.get(end), Some(b'+' | b'-')) {
            end += 1;
        }
        let mut seen_dot = false;
        while let Some(&b) = bytes.get(end) {
            match b {
                b'0'..=b'9' => end += 1,
                b'.' if !seen_dot => {
                    seen_dot = true;
                    end += 1;
                },
                _ => break,
            }
        }
        if matches!(bytes.get(end), Some(b'e' | b'E')) {
            let mut exponent = end + 1;
            if matches!(bytes.get(exponent), Some(b'+' | b'-')) {
                exponent += 1;
            }
            if bytes.get(exponent).is_some_and(u8::is_ascii_digit) {
                while bytes.get(exponent).is_some_and(u8::is_ascii_digit) {
                    exponent += 1;
                }
                end = exponent;
            }
        }

        if !bytes[start..end].iter().any(u8::is_ascii_digit) {
            let rest = &self.source[start..];
            self.pos = bytes.len();
            let shown = rest.split(|c: char| c.is_ascii_whitespace()).next().unwrap_or(rest);
            return Some(Err(Error::InvalidFormat(format!("invalid coordinate '{}'", shown))));
        }
        self.pos = end;
        Some(Ok(PathToken::Number(&self.source[start..end])))
    }
}

/// Next coordinate pair of `command`, offset by `origin`.
fn point<'a>(
    tokens: &mut impl Iterator<Item = PathToken<'a>>,
    command: char,
    origin: (f64, f64),
) -> Result<(f64, f64)> {
    let mut coordinate = || match tokens.next() {
        Some(PathToken::Number(n)) => {
            parse_double(n).ok_or_else(|| Error::InvalidFormat(format!("invalid coordinate '{}'", n)))
        },
        _ => Err(Error::InvalidFormat(format!("missing coordinate after '{}'", command))),
    };
    let x = coordinate()?;
    let y = coordinate()?;
    Ok((origin.0 + x, origin.1 + y))
}
