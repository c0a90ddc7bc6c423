use log::debug;
use rustc_hash::FxHashSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Automaton, CharSet, GenerateError, GenerateErrorKind, Result, END_OF_STREAM};

/// Names of the tokens every generated tokenizer defines on its own.
pub const RESERVED_TOKEN_NAMES: &[&str] = &["EOS", "ERROR"];

/// A comment style of the language.
///
/// Comments are recognized by the top level automaton up to their opening delimiter, which is
/// reported with the final value of the comment marker. Block comments continue with their own
/// automaton that consumes the comment body including the closing delimiter.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Comment {
    /// A comment that ends at the end of the line. The top level automaton consumes it entirely.
    Line {
        /// The opening delimiter, e.g. `//`.
        open: String,
    },
    /// A block comment that may contain further block comments of the same style.
    ///
    /// The final values of the automaton are `0` for "continue", `1` for "opening delimiter
    /// seen" and `2` for "closing delimiter seen".
    BlockNested {
        /// The opening delimiter, e.g. `(*`.
        open: String,
        /// The closing delimiter, e.g. `*)`.
        close: String,
        /// The automaton that runs over the comment body.
        automaton: Automaton,
    },
    /// A block comment that ends at the first closing delimiter.
    ///
    /// The final values of the automaton are `0` for "continue" and `1` for "closing delimiter
    /// seen".
    BlockNonNested {
        /// The opening delimiter, e.g. `/*`. Only used for diagnostics.
        #[cfg_attr(feature = "serde", serde(default))]
        open: Option<String>,
        /// The closing delimiter, e.g. `*/`.
        close: String,
        /// The automaton that runs over the comment body.
        automaton: Automaton,
    },
}

impl Comment {
    /// Returns the automaton of a block comment.
    pub fn automaton(&self) -> Option<&Automaton> {
        match self {
            Comment::Line { .. } => None,
            Comment::BlockNested { automaton, .. } | Comment::BlockNonNested { automaton, .. } => {
                Some(automaton)
            }
        }
    }

    /// Returns the number of valid final values of the comment automaton.
    fn outcomes(&self) -> usize {
        match self {
            Comment::Line { .. } => 0,
            Comment::BlockNested { .. } => 3,
            Comment::BlockNonNested { .. } => 2,
        }
    }

    /// Returns a short description for diagnostics.
    pub fn describe(&self) -> String {
        match self {
            Comment::Line { open } => format!("line comment {}", open),
            Comment::BlockNested { open, close, .. } => {
                format!("nested block comment {} ... {}", open, close)
            }
            Comment::BlockNonNested { open, close, .. } => format!(
                "block comment {} ... {}",
                open.as_deref().unwrap_or("?"),
                close
            ),
        }
    }
}

/// What a final value of the top level automaton stands for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FinalToken {
    /// A grammar token, by index.
    Token(usize),
    /// The end of the input.
    EndOfStream,
    /// A lexical error.
    Error,
    /// The opening delimiter of a comment, by comment index.
    Comment(usize),
}

/// The complete description of a tokenizer.
///
/// For `n` tokens the final values of the top level automaton are numbered as follows: `0..n`
/// are the tokens in declaration order, `n` is the end of the input, `n + 1` is the error token
/// and `n + 2 + i` is the comment marker of the `i`-th comment.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Definition {
    /// The token names in declaration order. They become the variants of the token enum.
    pub tokens: Vec<String>,
    /// The characters skipped in front of every token.
    #[cfg_attr(feature = "serde", serde(default))]
    pub whitespace: CharSet,
    /// The comment styles.
    #[cfg_attr(feature = "serde", serde(default))]
    pub comments: Vec<Comment>,
    /// The top level automaton.
    pub automaton: Automaton,
}

impl Definition {
    /// Reads a definition from its JSON representation and validates it.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self> {
        let definition: Definition = serde_json::from_str(json)?;
        definition.validate()?;
        Ok(definition)
    }

    /// Writes the definition as JSON.
    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Interprets a final value of the top level automaton.
    pub fn final_token(&self, value: usize) -> Option<FinalToken> {
        let n = self.tokens.len();
        match value {
            v if v < n => Some(FinalToken::Token(v)),
            v if v == n => Some(FinalToken::EndOfStream),
            v if v == n + 1 => Some(FinalToken::Error),
            v if v - (n + 2) < self.comments.len() => Some(FinalToken::Comment(v - (n + 2))),
            _ => None,
        }
    }

    /// Checks the definition before code is generated from it.
    pub fn validate(&self) -> Result<()> {
        debug!(
            "Validating definition with {} tokens and {} comments",
            self.tokens.len(),
            self.comments.len()
        );
        let mut names = FxHashSet::default();
        for name in &self.tokens {
            // Raw identifiers parse as `Ident` but cannot be used as enum variant names as is.
            if RESERVED_TOKEN_NAMES.contains(&name.as_str())
                || name.starts_with("r#")
                || syn::parse_str::<syn::Ident>(name).is_err()
            {
                return Err(GenerateError::new(GenerateErrorKind::InvalidTokenName(
                    name.clone(),
                )));
            }
            if !names.insert(name.as_str()) {
                return Err(GenerateError::new(GenerateErrorKind::DuplicateTokenName(
                    name.clone(),
                )));
            }
        }
        if self.whitespace.contains(END_OF_STREAM) {
            return Err(GenerateError::new(GenerateErrorKind::InvalidWhitespace));
        }

        self.automaton.validate("top level")?;
        let mut accepting: Vec<(usize, usize)> = self
            .automaton
            .accepting
            .iter()
            .map(|(node, value)| (*node, *value))
            .collect();
        accepting.sort_unstable();
        if let Some((node, value)) = accepting
            .iter()
            .find(|(_, value)| self.final_token(*value).is_none())
        {
            return Err(GenerateError::new(GenerateErrorKind::UnknownFinalToken {
                node: *node,
                value: *value,
            }));
        }

        for (index, comment) in self.comments.iter().enumerate() {
            let Some(automaton) = comment.automaton() else {
                continue;
            };
            if automaton.nodes.is_empty() {
                return Err(GenerateError::new(
                    GenerateErrorKind::MissingCommentAutomaton(index),
                ));
            }
            let name = format!("comment #{}", index);
            automaton.validate(&name)?;
            let mut accepting: Vec<(usize, usize)> = automaton
                .accepting
                .iter()
                .map(|(node, value)| (*node, *value))
                .collect();
            accepting.sort_unstable();
            if let Some((node, value)) = accepting
                .iter()
                .find(|(_, value)| *value >= comment.outcomes())
            {
                return Err(GenerateError::new(
                    GenerateErrorKind::InvalidCommentOutcome {
                        automaton: name,
                        node: *node,
                        value: *value,
                    },
                ));
            }
        }
        Ok(())
    }
}
