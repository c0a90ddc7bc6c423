#![forbid(missing_docs)]
//! # `scanpile_generate`
//! This crate turns the finite automata of a tokenizer into Rust code that runs on top of the
//! `scanpile` runtime.
//!
//! The automata are built by a grammar compiler, which is not part of this crate. The compiler
//! hands over a [`Definition`]: the token names, the whitespace characters, the comment styles
//! and a deterministic top level automaton, plus one automaton per block comment style. The
//! definition can be built in Rust or read from JSON with `Definition::from_json`.
//!
//! The generated code is a state dispatch loop per automaton. Every node becomes a match arm with
//! a chain of guarded transitions, tried in declaration order. When the scanner leaves an
//! accepting node for a non-accepting one, the generated code saves a backtrack point, so the
//! runtime can fall back to the longest complete match.
//!
//! # Example
//! A build script usually generates the tokenizer into `OUT_DIR`:
//! ```rust
//! use scanpile_generate::{generate, Automaton, CharSet, Definition};
//!
//! let definition = Definition {
//!     tokens: vec!["Number".to_string()],
//!     whitespace: CharSet::from_chars([' ', '\t', '\n']),
//!     comments: vec![],
//!     automaton: Automaton::new()
//!         .transition(0, CharSet::end_of_stream(), 2)
//!         .transition(0, CharSet::range('0', '9'), 1)
//!         .transition(1, CharSet::range('0', '9'), 1)
//!         .accept(1, 0)
//!         .accept(2, 1),
//! };
//! let code = generate(&definition).expect("valid definition");
//! assert!(code.contains("pub enum TToken"));
//! // std::fs::write(out_dir.join("numbers.rs"), code)?;
//! ```
//!
//! # Crate features
//! - `serde`: Enabled by default. Derives `Serialize` and `Deserialize` for the model types and
//!   provides `Definition::from_json`.

#[cfg(test)]
#[macro_use]
extern crate rstest;

/// The automaton type
mod automaton;
pub use automaton::{Automaton, Node};

/// Module with the character set type used as transition label
mod char_set;
pub use char_set::{CharSet, END_OF_STREAM};

/// Module with the tokenizer definition
mod definition;
pub use definition::{Comment, Definition, FinalToken, RESERVED_TOKEN_NAMES};

/// Module with error definitions
mod errors;
pub use errors::{GenerateError, GenerateErrorKind, Result};

/// Module that provides code generation for tokenizers.
mod generate;
pub use generate::{generate, generate_tokens, GenerateOptions};
