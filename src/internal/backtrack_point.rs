use super::Cursor;

/// The state saved when the scanner leaves an accepting node for a non-accepting one.
/// Restoring it rewinds the scanner to the end of the last complete match.
#[derive(Clone, Debug)]
pub(crate) struct BacktrackPoint<K> {
    /// The token of the last complete match.
    pub(crate) kind: K,
    pub(crate) cursor: Cursor,
    /// The lookahead at the time the point was saved.
    pub(crate) next_ch: Option<char>,
    pub(crate) lexeme_len: usize,
}
