//! The mutable state of a running scanner.
//!
//! [`ScanState`] provides the small set of primitives generated tokenizers are written against.
//! A generated [`crate::Lexicon`] drives these primitives from its state dispatch loop and emits
//! exactly one token per call of its `next_token` function.

use log::trace;

use crate::internal::{BacktrackPoint, Cursor};
use crate::{Coordinate, ReplayBuffer, Span, Token, TokenKind};

/// The character code that stands for the end of the input.
///
/// It lies just above the range of Unicode scalar values, so it can take part in character sets
/// like any other code.
pub const END_OF_STREAM: u32 = 0x11_0000;

/// The state of a scanner between and during token recognition.
#[derive(Debug)]
pub struct ScanState<K, S> {
    buffer: ReplayBuffer<S>,
    // The lookahead. `None` at the end of the input.
    next_ch: Option<char>,
    cursor: Cursor,
    start: Coordinate,
    lexeme: String,
    token: Token<K>,
    backtrack_point: Option<BacktrackPoint<K>>,
    // Number of tokens emitted so far.
    emitted: usize,
}

impl<K, S> ScanState<K, S>
where
    K: TokenKind,
    S: Iterator<Item = char>,
{
    /// Create a new state and read the first lookahead.
    pub(crate) fn new(source: S) -> Self {
        let mut buffer = ReplayBuffer::new(source);
        let next_ch = buffer.read();
        let cursor = Cursor::new();
        let start = cursor.coordinate();
        Self {
            buffer,
            next_ch,
            cursor,
            start,
            lexeme: String::new(),
            token: Token::new(K::END_OF_STREAM, Span::Coordinate(start), String::new()),
            backtrack_point: None,
            emitted: 0,
        }
    }

    /// Returns the code of the lookahead character, or [`END_OF_STREAM`] at the end of the input.
    #[inline]
    pub fn next_code(&self) -> u32 {
        self.next_ch.map_or(END_OF_STREAM, u32::from)
    }

    /// Consumes the lookahead: appends it to the lexeme, advances the cursor over it and reads
    /// the next lookahead.
    #[inline]
    pub fn next_char(&mut self) {
        if let Some(c) = self.next_ch {
            self.lexeme.push(c);
        }
        self.cursor.advance(self.next_ch);
        self.next_ch = self.buffer.read();
    }

    /// Consumes the lookahead as the first character of a new token.
    #[inline]
    pub fn mark_and_next_char(&mut self) {
        self.lexeme.clear();
        self.next_char();
        self.start = self.cursor.coordinate();
    }

    /// Saves a backtrack point for the given token kind at the current position.
    ///
    /// This is called right before the character that leads from an accepting node to a
    /// non-accepting one is consumed. A previously saved point is replaced.
    pub fn mark_backtrack_point(&mut self, kind: K) {
        if self.buffer.is_marking() {
            self.buffer.cancel_mark();
        }
        self.buffer.mark();
        self.backtrack_point = Some(BacktrackPoint {
            kind,
            cursor: self.cursor,
            next_ch: self.next_ch,
            lexeme_len: self.lexeme.len(),
        });
    }

    /// Emits the token saved in the backtrack point after rewinding to it, or emits a token of
    /// the given kind if there is no backtrack point.
    pub fn attempt_backtrack_otherwise(&mut self, kind: K) {
        match self.backtrack_point.take() {
            Some(point) => {
                trace!(
                    "Backtracking from {} to {} for {}",
                    self.cursor.coordinate(),
                    point.cursor.coordinate(),
                    point.kind
                );
                self.cursor = point.cursor;
                self.next_ch = point.next_ch;
                self.lexeme.truncate(point.lexeme_len);
                self.buffer.restore_to_mark();
                self.set_token(point.kind);
            }
            None => self.set_token(kind),
        }
    }

    /// Emits a token of the given kind that spans from the token start to the current position.
    pub fn set_token(&mut self, kind: K) {
        self.backtrack_point = None;
        if self.buffer.is_marking() {
            self.buffer.cancel_mark();
        }
        let end = self.cursor.coordinate();
        let span = if self.start == end {
            Span::Coordinate(end)
        } else {
            Span::range(self.start, end)
        };
        self.token = Token::new(kind, span, std::mem::take(&mut self.lexeme));
        self.emitted += 1;
        trace!("Token {}", self.token);
    }

    /// Discards the backtrack point when the scanner enters a comment. A comment is never
    /// rewound into; the consumed text stays in the lexeme.
    pub fn enter_comment(&mut self) {
        self.backtrack_point = None;
        if self.buffer.is_marking() {
            self.buffer.cancel_mark();
        }
    }

    /// Returns the token emitted last.
    #[inline]
    pub fn current(&self) -> &Token<K> {
        &self.token
    }

    /// Returns the current position, i.e. the coordinate of the character consumed last.
    #[inline]
    pub fn position(&self) -> Coordinate {
        self.cursor.coordinate()
    }

    /// Returns a reference to the character source.
    pub fn source(&self) -> &S {
        self.buffer.source()
    }

    #[inline]
    pub(crate) fn emitted(&self) -> usize {
        self.emitted
    }
}
