use thiserror::Error;

/// The result type for the `scanpile_generate` crate.
pub type Result<T> = std::result::Result<T, GenerateError>;

/// The error type for the `scanpile_generate` crate.
#[derive(Error, Debug)]
pub struct GenerateError {
    /// The source of the error.
    pub source: Box<GenerateErrorKind>,
}

impl GenerateError {
    /// Create a new `GenerateError`.
    pub fn new(kind: GenerateErrorKind) -> Self {
        GenerateError {
            source: Box::new(kind),
        }
    }

    /// Get the kind of the error.
    pub fn kind(&self) -> &GenerateErrorKind {
        &self.source
    }
}

impl std::fmt::Display for GenerateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.source)
    }
}

/// The error kind type.
///
/// The `automaton` fields name the automaton an error was found in, `"top level"` or
/// `"comment #<index>"`.
#[derive(Error, Debug)]
pub enum GenerateErrorKind {
    /// A token name is not a valid Rust identifier or collides with a reserved token.
    #[error("Invalid token name '{0}'")]
    InvalidTokenName(String),

    /// A generation option is not a valid identifier or path.
    #[error("Invalid value '{value}' for option {option}")]
    InvalidOption {
        /// The option name.
        option: &'static str,
        /// The rejected value.
        value: String,
    },

    /// A token name is used twice.
    #[error("Duplicate token name '{0}'")]
    DuplicateTokenName(String),

    /// The whitespace set contains the end-of-stream code.
    #[error("The whitespace set must not contain the end of stream")]
    InvalidWhitespace,

    /// An automaton has no start node.
    #[error("The {automaton} automaton has no start node 0")]
    MissingStartNode {
        /// The automaton.
        automaton: String,
    },

    /// A node id is used twice within an automaton.
    #[error("The {automaton} automaton defines node {node} twice")]
    DuplicateNode {
        /// The automaton.
        automaton: String,
        /// The node id.
        node: usize,
    },

    /// A transition leads to a node that does not exist.
    #[error("The {automaton} automaton has a transition from node {from} to unknown node {to}")]
    UnknownDestination {
        /// The automaton.
        automaton: String,
        /// The source node.
        from: usize,
        /// The missing destination node.
        to: usize,
    },

    /// The accepting map refers to a node that does not exist.
    #[error("The {automaton} automaton accepts on unknown node {node}")]
    UnknownAcceptingNode {
        /// The automaton.
        automaton: String,
        /// The missing node.
        node: usize,
    },

    /// The start node is accepting. It would accept without consuming a character.
    #[error("The {automaton} automaton must not accept on its start node")]
    AcceptingStartNode {
        /// The automaton.
        automaton: String,
    },

    /// A final token value of the top level automaton is out of range.
    #[error("Node {node} accepts the unknown final token {value}")]
    UnknownFinalToken {
        /// The accepting node.
        node: usize,
        /// The final token value.
        value: usize,
    },

    /// A final value of a comment automaton is out of range.
    #[error("The {automaton} automaton accepts node {node} with invalid outcome {value}")]
    InvalidCommentOutcome {
        /// The automaton.
        automaton: String,
        /// The accepting node.
        node: usize,
        /// The outcome value.
        value: usize,
    },

    /// A block comment comes with an automaton without any nodes.
    #[error("Block comment #{0} has an empty automaton")]
    MissingCommentAutomaton(usize),

    /// The definition could not be read from JSON.
    #[cfg(feature = "serde")]
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[cfg(feature = "serde")]
impl From<serde_json::Error> for GenerateError {
    fn from(error: serde_json::Error) -> Self {
        GenerateError::new(GenerateErrorKind::Json(error))
    }
}
