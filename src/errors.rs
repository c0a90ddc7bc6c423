use thiserror::Error;

/// The result type for the `scanpile` crate.
pub type Result<T> = std::result::Result<T, ScanpileError>;

/// The error type for the `scanpile` crate.
///
/// Lexical errors are never reported through this type. They are regular tokens of the
/// reserved error kind. This type only covers failures of the character source.
#[derive(Error, Debug)]
pub struct ScanpileError {
    /// The source of the error.
    pub source: Box<ScanpileErrorKind>,
}

impl ScanpileError {
    /// Create a new `ScanpileError`.
    pub fn new(kind: ScanpileErrorKind) -> Self {
        ScanpileError {
            source: Box::new(kind),
        }
    }

    /// Get the kind of the error.
    pub fn kind(&self) -> &ScanpileErrorKind {
        &self.source
    }
}

impl std::fmt::Display for ScanpileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.source)
    }
}

/// The error kind type.
#[derive(Error, Debug)]
pub enum ScanpileErrorKind {
    /// A std::io error occurred while reading the input.
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    /// The input contained a byte sequence that is not valid UTF-8.
    #[error("Invalid UTF-8 sequence {bytes:02x?} at byte offset {offset}")]
    InvalidUtf8 {
        /// The offending bytes.
        bytes: Vec<u8>,
        /// The byte offset of the first offending byte.
        offset: usize,
    },
}

impl From<std::io::Error> for ScanpileError {
    fn from(error: std::io::Error) -> Self {
        ScanpileError::new(ScanpileErrorKind::IoError(error))
    }
}
