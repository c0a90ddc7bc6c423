use std::fmt::{Debug, Display};

use crate::Span;

/// The kind of a token.
///
/// Generated tokenizers implement this trait for their token enum. Besides the tokens of the
/// grammar every kind set contains two reserved kinds, one for the end of the input and one for
/// lexical errors.
pub trait TokenKind: Copy + Eq + Debug + Display {
    /// The kind of the token that is produced at the end of the input.
    const END_OF_STREAM: Self;
    /// The kind of the token that is produced for input no token matches.
    const ERROR: Self;
}

/// A token produced by the scanner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token<K> {
    /// The kind of the token.
    pub kind: K,
    /// The location of the token in the input.
    pub span: Span,
    /// The matched text.
    pub lexeme: String,
}

impl<K: TokenKind> Token<K> {
    /// Create a new token.
    pub fn new(kind: K, span: Span, lexeme: String) -> Self {
        Self { kind, span, lexeme }
    }

    /// Returns true if this is the end-of-stream token.
    #[inline]
    pub fn is_end_of_stream(&self) -> bool {
        self.kind == K::END_OF_STREAM
    }

    /// Returns true if this is an error token.
    #[inline]
    pub fn is_error(&self) -> bool {
        self.kind == K::ERROR
    }
}

/// Line breaks, tabs and backslashes in the lexeme are escaped, so a token always renders on a
/// single line and the rendering stays unambiguous.
impl<K: Display> Display for Token<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} [", self.kind, self.span)?;
        for c in self.lexeme.chars() {
            match c {
                '\\' => f.write_str("\\\\")?,
                '\n' => f.write_str("\\n")?,
                '\r' => f.write_str("\\r")?,
                '\t' => f.write_str("\\t")?,
                _ => write!(f, "{}", c)?,
            }
        }
        write!(f, "]")
    }
}
