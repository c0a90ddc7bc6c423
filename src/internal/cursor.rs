use crate::Coordinate;

/// The position of the scanner after the characters consumed so far.
///
/// Before the first character is consumed the cursor sits at line 1, column 0.
/// The end of the input advances the cursor like an ordinary character.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Cursor {
    consumed: usize,
    line: usize,
    column: usize,
}

impl Cursor {
    pub(crate) fn new() -> Self {
        Self {
            consumed: 0,
            line: 1,
            column: 0,
        }
    }

    /// Advance over the given character. `None` stands for the end of the input.
    #[inline]
    pub(crate) fn advance(&mut self, c: Option<char>) {
        self.consumed += 1;
        if c == Some('\n') {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
    }

    /// The coordinate of the last consumed character.
    #[inline]
    pub(crate) fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.consumed.saturating_sub(1), self.line, self.column)
    }
}
