#![forbid(missing_docs)]
//! # `scanpile`
//! The `scanpile` crate is the runtime of tokenizers generated by `scanpile_generate`.
//! A generated tokenizer consists of a token enum and a [`Lexicon`], a state dispatch procedure
//! derived from a finite automaton. The runtime turns a forward-only character source into a
//! stream of longest-match tokens on top of it.
//!
//! The scanner reads ahead as far as the automaton requires to find the longest match. When an
//! attempt to extend a match fails, it rewinds to the end of the last complete match. The
//! characters read in vain are kept in a [`ReplayBuffer`] and served again, so the source itself
//! is read only once.
//!
//! Lexical errors do not stop the scanner. They are reported as tokens of the reserved error
//! kind, and scanning continues behind them. Whitespace and comments never show up in the token
//! stream.
//!
//! # Example
//! The following lexicon is written by hand. It recognizes numbers and reports everything else
//! as an error.
//! ```rust
//! use scanpile::{Lexicon, ScanState, Scanner, TokenKind, END_OF_STREAM};
//!
//! #[derive(Clone, Copy, Debug, PartialEq, Eq)]
//! enum Kind {
//!     Number,
//!     Eos,
//!     Error,
//! }
//!
//! impl std::fmt::Display for Kind {
//!     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
//!         write!(f, "{:?}", self)
//!     }
//! }
//!
//! impl TokenKind for Kind {
//!     const END_OF_STREAM: Self = Kind::Eos;
//!     const ERROR: Self = Kind::Error;
//! }
//!
//! struct Numbers;
//!
//! impl Lexicon for Numbers {
//!     type Kind = Kind;
//!
//!     fn next_token<S: Iterator<Item = char>>(s: &mut ScanState<Kind, S>) {
//!         while s.next_code() == ' ' as u32 {
//!             s.next_char();
//!         }
//!         let ch = s.next_code();
//!         s.mark_and_next_char();
//!         if ch == END_OF_STREAM {
//!             s.set_token(Kind::Eos);
//!         } else if matches!(ch, 48u32..=57u32) {
//!             while matches!(s.next_code(), 48u32..=57u32) {
//!                 s.next_char();
//!             }
//!             s.set_token(Kind::Number);
//!         } else {
//!             s.attempt_backtrack_otherwise(Kind::Error);
//!         }
//!     }
//! }
//!
//! let mut scanner = Scanner::<Numbers, _>::new("12 x 345".chars());
//! for token in scanner.tokens() {
//!     println!("{}", token);
//! }
//! ```
//! The output of the example is:
//! ```text
//! Number 0:1:1-1:1:2 [12]
//! Error 3:1:4 [x]
//! Number 5:1:6-7:1:8 [345]
//! Eos 8:1:9 []
//! ```
//!
//! # Crate features
//! - `serde`: Enabled by default. Derives `Serialize` and `Deserialize` for the location types.

/// Module with error definitions
mod errors;
pub use errors::{Result, ScanpileError, ScanpileErrorKind};

/// The module with internal implementation details.
mod internal;

/// Module that provides the location types
mod location;
pub use location::{Coordinate, Span};

/// Module that provides the replay buffer
mod replay_buffer;
pub use replay_buffer::ReplayBuffer;

/// The module with the scan state the generated code operates on.
mod scan_state;
pub use scan_state::{ScanState, END_OF_STREAM};

/// The module with the scanner.
mod scanner;
pub use scanner::{Lexicon, Scanner, Tokens};

/// Module that provides character sources
mod source;
pub use source::ReadSource;

/// Module that provides the token types
mod token;
pub use token::{Token, TokenKind};
