use log::trace;

use crate::{ScanState, Token, TokenKind};

/// The token recognition procedure of a language.
///
/// Implementations are usually generated. `next_token` skips whitespace and comments and must
/// emit exactly one token through [`ScanState::set_token`] or
/// [`ScanState::attempt_backtrack_otherwise`] before it returns.
pub trait Lexicon {
    /// The token kinds of the language.
    type Kind: TokenKind;

    /// Recognizes the next token.
    fn next_token<S>(s: &mut ScanState<Self::Kind, S>)
    where
        S: Iterator<Item = char>;
}

/// A pull-based scanner that produces the longest-match tokens of a [`Lexicon`].
///
/// The scanner always holds a current token. Once the end-of-stream token has been produced it
/// stays current and [`Scanner::next`] has no effect.
#[derive(Debug)]
pub struct Scanner<L: Lexicon, S> {
    state: ScanState<L::Kind, S>,
}

impl<L, S> Scanner<L, S>
where
    L: Lexicon,
    S: Iterator<Item = char>,
{
    /// Creates a new scanner over the given character source and produces the first token.
    pub fn new(source: S) -> Self {
        let mut scanner = Self {
            state: ScanState::new(source),
        };
        scanner.advance();
        scanner
    }

    /// Returns the current token.
    #[inline]
    pub fn current(&self) -> &Token<L::Kind> {
        self.state.current()
    }

    /// Advances to the next token.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) {
        if self.state.current().is_end_of_stream() {
            trace!("Scanner already at end of stream");
            return;
        }
        self.advance();
    }

    /// Returns an iterator over the tokens, starting with the current one and ending with the
    /// end-of-stream token.
    pub fn tokens(&mut self) -> Tokens<'_, L, S> {
        Tokens {
            scanner: self,
            done: false,
        }
    }

    /// Returns a reference to the character source.
    pub fn source(&self) -> &S {
        self.state.source()
    }

    fn advance(&mut self) {
        let emitted = self.state.emitted();
        L::next_token(&mut self.state);
        debug_assert_eq!(
            self.state.emitted(),
            emitted + 1,
            "a lexicon must emit exactly one token per call"
        );
    }
}

/// An iterator over the tokens of a [`Scanner`].
/// Created by [`Scanner::tokens`].
#[derive(Debug)]
pub struct Tokens<'a, L: Lexicon, S> {
    scanner: &'a mut Scanner<L, S>,
    done: bool,
}

impl<L, S> Iterator for Tokens<'_, L, S>
where
    L: Lexicon,
    S: Iterator<Item = char>,
{
    type Item = Token<L::Kind>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let token = self.scanner.current().clone();
        if token.is_end_of_stream() {
            self.done = true;
        } else {
            self.scanner.next();
        }
        Some(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Coordinate, Span, END_OF_STREAM};
    use rstest::rstest;
    use std::fmt;

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    enum Kind {
        Number,
        Word,
        Eos,
        Error,
    }

    impl fmt::Display for Kind {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{:?}", self)
        }
    }

    impl TokenKind for Kind {
        const END_OF_STREAM: Self = Kind::Eos;
        const ERROR: Self = Kind::Error;
    }

    // Digits form numbers, lowercase letters form words, a word may end in a digit sequence
    // only if it is terminated by '!'. This requires backtracking over the digits.
    struct Words;

    impl Lexicon for Words {
        type Kind = Kind;

        fn next_token<S>(s: &mut ScanState<Kind, S>)
        where
            S: Iterator<Item = char>,
        {
            while matches!(s.next_code(), 32u32 | 10u32) {
                s.next_char();
            }
            let mut state: usize = 0;
            loop {
                match state {
                    0 => {
                        let ch = s.next_code();
                        if matches!(ch, 48u32..=57u32) {
                            s.mark_and_next_char();
                            state = 1;
                        } else if matches!(ch, 97u32..=122u32) {
                            s.mark_and_next_char();
                            state = 2;
                        } else if ch == END_OF_STREAM {
                            s.mark_and_next_char();
                            s.set_token(Kind::Eos);
                            return;
                        } else {
                            s.mark_and_next_char();
                            s.attempt_backtrack_otherwise(Kind::Error);
                            return;
                        }
                    }
                    1 => {
                        if matches!(s.next_code(), 48u32..=57u32) {
                            s.next_char();
                        } else {
                            s.set_token(Kind::Number);
                            return;
                        }
                    }
                    2 => {
                        let ch = s.next_code();
                        if matches!(ch, 97u32..=122u32) {
                            s.next_char();
                        } else if matches!(ch, 48u32..=57u32) {
                            s.mark_backtrack_point(Kind::Word);
                            s.next_char();
                            state = 3;
                        } else {
                            s.set_token(Kind::Word);
                            return;
                        }
                    }
                    3 => {
                        let ch = s.next_code();
                        if matches!(ch, 48u32..=57u32) {
                            s.next_char();
                        } else if ch == '!' as u32 {
                            s.next_char();
                            s.set_token(Kind::Word);
                            return;
                        } else {
                            s.attempt_backtrack_otherwise(Kind::Error);
                            return;
                        }
                    }
                    _ => unreachable!(),
                }
            }
        }
    }

    fn scan(input: &str) -> Vec<(Kind, String)> {
        let mut scanner = Scanner::<Words, _>::new(input.chars());
        scanner.tokens().map(|t| (t.kind, t.lexeme)).collect()
    }

    fn owned(expected: &[(Kind, &str)]) -> Vec<(Kind, String)> {
        expected.iter().map(|(k, l)| (*k, l.to_string())).collect()
    }

    #[rstest]
    #[case::empty("", &[(Kind::Eos, "")])]
    #[case::words_and_numbers("ab 12\ncd", &[
        (Kind::Word, "ab"),
        (Kind::Number, "12"),
        (Kind::Word, "cd"),
        (Kind::Eos, ""),
    ])]
    #[case::suffix_accepted("ab12! x", &[(Kind::Word, "ab12!"), (Kind::Word, "x"), (Kind::Eos, "")])]
    #[case::suffix_rejected("ab123 x", &[
        (Kind::Word, "ab"),
        (Kind::Number, "123"),
        (Kind::Word, "x"),
        (Kind::Eos, ""),
    ])]
    #[case::error("a?b", &[
        (Kind::Word, "a"),
        (Kind::Error, "?"),
        (Kind::Word, "b"),
        (Kind::Eos, ""),
    ])]
    fn test_tokens(#[case] input: &str, #[case] expected: &[(Kind, &str)]) {
        let _ = env_logger::builder().is_test(true).try_init();
        assert_eq!(scan(input), owned(expected));
    }

    #[test]
    fn test_current_is_idempotent_and_eos_is_sticky() {
        let mut scanner = Scanner::<Words, _>::new("   ".chars());
        let first = scanner.current().clone();
        assert_eq!(&first, scanner.current());
        assert_eq!(first.kind, Kind::Eos);
        assert_eq!(first.span, Span::Coordinate(Coordinate::new(3, 1, 4)));
        scanner.next();
        scanner.next();
        assert_eq!(&first, scanner.current());
    }

    #[test]
    fn test_spans() {
        let mut scanner = Scanner::<Words, _>::new("ab\n 7".chars());
        let spans: Vec<Span> = scanner.tokens().map(|t| t.span).collect();
        assert_eq!(
            spans,
            vec![
                Span::range(Coordinate::new(0, 1, 1), Coordinate::new(1, 1, 2)),
                Span::Coordinate(Coordinate::new(4, 2, 2)),
                Span::Coordinate(Coordinate::new(5, 2, 3)),
            ]
        );
    }
}
