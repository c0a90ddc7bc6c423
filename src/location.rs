//! Module with the location types and the merge operation.
//! A [`Coordinate`] addresses a single character of the input, a [`Span`] locates a token.

use std::fmt;
use std::ops::Add;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A position in the input.
///
/// The offset counts characters, not bytes. The line number is 1-based. The column is the
/// number of characters consumed on the current line, i.e. the first character of a line is at
/// column 1 and a newline character itself is reported at column 0 of the line it starts.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Coordinate {
    /// The character offset.
    pub offset: usize,
    /// The line number.
    pub line: usize,
    /// The column number.
    pub column: usize,
}

impl Coordinate {
    /// Create a new coordinate.
    #[inline]
    pub const fn new(offset: usize, line: usize, column: usize) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }

    /// Get the character offset of the coordinate.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Get the line number of the coordinate.
    #[inline]
    pub fn line(&self) -> usize {
        self.line
    }

    /// Get the column number of the coordinate.
    #[inline]
    pub fn column(&self) -> usize {
        self.column
    }

    fn min(self, other: Coordinate) -> Coordinate {
        Coordinate::new(
            self.offset.min(other.offset),
            self.line.min(other.line),
            self.column.min(other.column),
        )
    }

    fn max(self, other: Coordinate) -> Coordinate {
        Coordinate::new(
            self.offset.max(other.offset),
            self.line.max(other.line),
            self.column.max(other.column),
        )
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.offset, self.line, self.column)
    }
}

/// The location of a token in the input.
///
/// A token that consists of a single character (or the end of the stream) is located by a
/// single [`Coordinate`]. Longer tokens are located by the coordinates of their first and their
/// last character, both inclusive.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Span {
    /// A single position.
    Coordinate(Coordinate),
    /// A range of positions. The start never lies behind the end.
    Range(Coordinate, Coordinate),
}

impl Span {
    /// Create a range span.
    #[inline]
    pub fn range(start: Coordinate, end: Coordinate) -> Self {
        debug_assert!(
            start.offset <= end.offset,
            "span start {} lies behind its end {}",
            start,
            end
        );
        Span::Range(start, end)
    }

    /// Get the first position covered by the span.
    #[inline]
    pub fn start(&self) -> Coordinate {
        match self {
            Span::Coordinate(c) => *c,
            Span::Range(start, _) => *start,
        }
    }

    /// Get the last position covered by the span.
    #[inline]
    pub fn end(&self) -> Coordinate {
        match self {
            Span::Coordinate(c) => *c,
            Span::Range(_, end) => *end,
        }
    }
}

impl From<Coordinate> for Span {
    fn from(coordinate: Coordinate) -> Self {
        Span::Coordinate(coordinate)
    }
}

/// Merging yields the smallest span that covers both operands.
/// Two equal coordinates merge into that coordinate.
impl Add for Span {
    type Output = Span;

    fn add(self, rhs: Span) -> Self::Output {
        match (self, rhs) {
            (Span::Coordinate(a), Span::Coordinate(b)) if a == b => Span::Coordinate(a),
            _ => Span::Range(self.start().min(rhs.start()), self.end().max(rhs.end())),
        }
    }
}

impl Add<Coordinate> for Span {
    type Output = Span;

    fn add(self, rhs: Coordinate) -> Self::Output {
        self + Span::Coordinate(rhs)
    }
}

impl Add for Coordinate {
    type Output = Span;

    fn add(self, rhs: Coordinate) -> Self::Output {
        Span::Coordinate(self) + Span::Coordinate(rhs)
    }
}

impl Add<Span> for Coordinate {
    type Output = Span;

    fn add(self, rhs: Span) -> Self::Output {
        Span::Coordinate(self) + rhs
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Span::Coordinate(c) => write!(f, "{}", c),
            Span::Range(start, end) => write!(f, "{}-{}", start, end),
        }
    }
}
