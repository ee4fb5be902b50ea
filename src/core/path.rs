//! Path-data interpreter.
//!
//! Turns an SVG-style path command string into the sequence of pixel points
//! the pen visits. Supported opcodes are `M L H V C Z` and their relative
//! lowercase forms. Curves contribute only their end point: the control
//! points are dropped, which is enough for the near-linear traces this crate
//! samples but is not a general curve flattener.
//!
//! Malformed input never fails. Stray characters are skipped, incomplete
//! operand groups are dropped, and unknown opcodes swallow their operands.

use smallvec::SmallVec;
use tracing::trace;

use crate::core::{BOUNDS_TOLERANCE_PX, PixelPoint, PlotRectangle};

/// One lexical unit of path data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathToken {
    Command(char),
    Number(f64),
}

/// Lexer over path data.
#[derive(Debug, Clone)]
pub struct PathTokens<'a> {
    bytes: &'a [u8],
    source: &'a str,
    pos: usize,
}

impl<'a> PathTokens<'a> {
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        Self {
            bytes: source.as_bytes(),
            source,
            pos: 0,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn eat_digits(&mut self) -> usize {
        let start = self.pos;
        while self.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
        }
        self.pos - start
    }

    /// `number := sign? (digits ('.' digits?)? | '.' digits) exponent?`
    fn lex_number(&mut self) -> Option<f64> {
        let start = self.pos;
        if matches!(self.peek(), Some(b'+' | b'-')) {
            self.pos += 1;
        }
        let mut digits = self.eat_digits();
        if self.peek() == Some(b'.') {
            self.pos += 1;
            digits += self.eat_digits();
        }
        if digits == 0 {
            self.pos = start + 1;
            trace!(offset = start, "skipping malformed path number");
            return None;
        }

        if matches!(self.peek(), Some(b'e' | b'E')) {
            let mark = self.pos;
            self.pos += 1;
            if matches!(self.peek(), Some(b'+' | b'-')) {
                self.pos += 1;
            }
            if self.eat_digits() == 0 {
                self.pos = mark;
            }
        }

        let text = &self.source[start..self.pos];
        match text.parse::<f64>() {
            Ok(value) if value.is_finite() => Some(value),
            _ => {
                trace!(token = text, "skipping unparsable path number");
                None
            }
        }
    }
}

impl Iterator for PathTokens<'_> {
    type Item = PathToken;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(byte) = self.peek() {
            match byte {
                b'0'..=b'9' | b'+' | b'-' | b'.' => {
                    if let Some(value) = self.lex_number() {
                        return Some(PathToken::Number(value));
                    }
                }
                b if b.is_ascii_alphabetic() => {
                    self.pos += 1;
                    return Some(PathToken::Command(char::from(b)));
                }
                _ => self.pos += 1,
            }
        }
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Opcode {
    MoveTo,
    LineTo,
    Horizontal,
    Vertical,
    Cubic,
    Close,
    Unsupported,
}

impl Opcode {
    fn from_letter(letter: char) -> (Self, bool) {
        let relative = letter.is_ascii_lowercase();
        let opcode = match letter.to_ascii_uppercase() {
            'M' => Self::MoveTo,
            'L' => Self::LineTo,
            'H' => Self::Horizontal,
            'V' => Self::Vertical,
            'C' => Self::Cubic,
            'Z' => Self::Close,
            _ => Self::Unsupported,
        };
        (opcode, relative)
    }

    fn arity(self) -> Option<usize> {
        match self {
            Self::MoveTo | Self::LineTo => Some(2),
            Self::Horizontal | Self::Vertical => Some(1),
            Self::Cubic => Some(6),
            Self::Close => Some(0),
            Self::Unsupported => None,
        }
    }
}

/// Lazy iterator over the points a path visits, in drawing order.
///
/// Every completed operand group of `M/L/H/V/C` yields exactly one point.
/// `Z` moves the pen back to the subpath start without yielding.
#[derive(Debug, Clone)]
pub struct PathPoints<'a> {
    tokens: PathTokens<'a>,
    active: Option<(Opcode, bool)>,
    operands: SmallVec<[f64; 6]>,
    cursor: PixelPoint,
    subpath_start: PixelPoint,
}

impl<'a> PathPoints<'a> {
    #[must_use]
    pub fn new(path_data: &'a str) -> Self {
        Self {
            tokens: PathTokens::new(path_data),
            active: None,
            operands: SmallVec::new(),
            cursor: PixelPoint::default(),
            subpath_start: PixelPoint::default(),
        }
    }

    fn resolve(&self, x: f64, y: f64, relative: bool) -> PixelPoint {
        if relative {
            PixelPoint::new(self.cursor.x + x, self.cursor.y + y)
        } else {
            PixelPoint::new(x, y)
        }
    }

    fn apply(&mut self, opcode: Opcode, relative: bool) -> PixelPoint {
        let ops = &self.operands;
        let next = match opcode {
            Opcode::MoveTo | Opcode::LineTo => self.resolve(ops[0], ops[1], relative),
            Opcode::Horizontal => {
                let x = if relative { self.cursor.x + ops[0] } else { ops[0] };
                PixelPoint::new(x, self.cursor.y)
            }
            Opcode::Vertical => {
                let y = if relative { self.cursor.y + ops[0] } else { ops[0] };
                PixelPoint::new(self.cursor.x, y)
            }
            Opcode::Cubic => self.resolve(ops[4], ops[5], relative),
            Opcode::Close | Opcode::Unsupported => self.cursor,
        };
        self.cursor = next;
        if opcode == Opcode::MoveTo {
            self.subpath_start = next;
            // Extra coordinate pairs after a move are implicit line-tos.
            self.active = Some((Opcode::LineTo, relative));
        }
        next
    }
}

impl Iterator for PathPoints<'_> {
    type Item = PixelPoint;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(token) = self.tokens.next() {
            match token {
                PathToken::Command(letter) => {
                    if !self.operands.is_empty() {
                        trace!(
                            dropped = self.operands.len(),
                            "dropping incomplete path operand group"
                        );
                        self.operands.clear();
                    }
                    let (opcode, relative) = Opcode::from_letter(letter);
                    if opcode == Opcode::Close {
                        self.cursor = self.subpath_start;
                    }
                    self.active = Some((opcode, relative));
                }
                PathToken::Number(value) => {
                    let Some((opcode, relative)) = self.active else {
                        continue;
                    };
                    let Some(arity) = opcode.arity().filter(|arity| *arity > 0) else {
                        continue;
                    };
                    self.operands.push(value);
                    if self.operands.len() == arity {
                        let point = self.apply(opcode, relative);
                        self.operands.clear();
                        return Some(point);
                    }
                }
            }
        }
        None
    }
}

/// Iterates the points visited by `path_data`. Absent or degenerate data yields nothing.
#[must_use]
pub fn trace_path(path_data: &str) -> PathPoints<'_> {
    PathPoints::new(path_data)
}

/// Visited points that fall inside `plot` (with one pixel of slack), in drawing order.
#[must_use]
pub fn points_within(path_data: &str, plot: PlotRectangle) -> Vec<PixelPoint> {
    trace_path(path_data)
        .filter(|point| plot.contains(*point, BOUNDS_TOLERANCE_PX))
        .collect()
}

/// First in-bounds point. Stops interpreting as soon as one is found.
#[must_use]
pub fn first_point_within(path_data: &str, plot: PlotRectangle) -> Option<PixelPoint> {
    trace_path(path_data).find(|point| plot.contains(*point, BOUNDS_TOLERANCE_PX))
}

/// Last in-bounds point, found without collecting the point cloud.
#[must_use]
pub fn last_point_within(path_data: &str, plot: PlotRectangle) -> Option<PixelPoint> {
    trace_path(path_data)
        .filter(|point| plot.contains(*point, BOUNDS_TOLERANCE_PX))
        .last()
}

/// Whether the path uses a line-to and a close-path opcode (the shape of a drawn column).
#[must_use]
pub fn is_closed_polyline(path_data: &str) -> bool {
    let mut line_to = false;
    let mut close = false;
    for token in PathTokens::new(path_data) {
        if let PathToken::Command(letter) = token {
            match letter {
                'L' | 'l' => line_to = true,
                'Z' | 'z' => close = true,
                _ => {}
            }
        }
    }
    line_to && close
}

/// Smallest x coordinate the path visits.
#[must_use]
pub fn min_x(path_data: &str) -> Option<f64> {
    trace_path(path_data).map(|point| point.x).reduce(f64::min)
}
