//! The replay buffer lets the scanner read ahead speculatively and give the characters back.
//!
//! The buffer works in two modes. While a mark is set, every character handed out is captured.
//! Restoring to the mark schedules the captured characters for replay, so they are served again
//! before any new character is taken from the source.

use std::collections::VecDeque;

use log::trace;

/// A buffer over a forward-only character source that supports speculative reads.
#[derive(Debug)]
pub struct ReplayBuffer<S> {
    source: S,
    // Characters captured since the last mark. `None` if no mark is active.
    capture: Option<Vec<char>>,
    // Characters that are served before the source is read again.
    replay: VecDeque<char>,
    // The source reported its end and must not be polled again.
    exhausted: bool,
}

impl<S> ReplayBuffer<S>
where
    S: Iterator<Item = char>,
{
    /// Create a new replay buffer over the given source.
    pub fn new(source: S) -> Self {
        Self {
            source,
            capture: None,
            replay: VecDeque::new(),
            exhausted: false,
        }
    }

    /// Returns the next character.
    /// Characters scheduled for replay are served first, in their original order.
    /// Returns `None` if both the replay queue and the source are exhausted.
    pub fn read(&mut self) -> Option<char> {
        let c = match self.replay.pop_front() {
            Some(c) => Some(c),
            None if self.exhausted => None,
            None => {
                let c = self.source.next();
                self.exhausted = c.is_none();
                c
            }
        };
        if let (Some(capture), Some(c)) = (self.capture.as_mut(), c) {
            capture.push(c);
        }
        c
    }

    /// Starts capturing the characters handed out by [`ReplayBuffer::read`].
    ///
    /// # Panics
    /// Panics if a mark is already active.
    pub fn mark(&mut self) {
        assert!(
            self.capture.is_none(),
            "ReplayBuffer::mark called while a mark is already active"
        );
        self.capture = Some(Vec::new());
    }

    /// Drops the active mark together with the characters captured since.
    ///
    /// # Panics
    /// Panics if no mark is active.
    pub fn cancel_mark(&mut self) {
        assert!(
            self.capture.take().is_some(),
            "ReplayBuffer::cancel_mark called without an active mark"
        );
    }

    /// Stops capturing and schedules the captured characters for replay.
    /// The restored characters are served ahead of a replay that is still pending.
    ///
    /// # Panics
    /// Panics if no mark is active.
    pub fn restore_to_mark(&mut self) {
        let Some(captured) = self.capture.take() else {
            panic!("ReplayBuffer::restore_to_mark called without an active mark");
        };
        trace!("Restoring {} character(s) for replay", captured.len());
        for c in captured.into_iter().rev() {
            self.replay.push_front(c);
        }
    }

    /// Returns true if a mark is active.
    #[inline]
    pub fn is_marking(&self) -> bool {
        self.capture.is_some()
    }

    /// Returns the number of characters waiting to be replayed.
    #[inline]
    pub fn pending(&self) -> usize {
        self.replay.len()
    }

    /// Returns a reference to the underlying source.
    pub fn source(&self) -> &S {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CountingSource<I> {
        inner: I,
        polls: usize,
    }

    impl<I: Iterator<Item = char>> Iterator for CountingSource<I> {
        type Item = char;

        fn next(&mut self) -> Option<char> {
            self.polls += 1;
            self.inner.next()
        }
    }

    fn read_all<S: Iterator<Item = char>>(buffer: &mut ReplayBuffer<S>) -> String {
        std::iter::from_fn(|| buffer.read()).collect()
    }

    #[test]
    fn test_reads_through_without_mark() {
        let mut buffer = ReplayBuffer::new("abc".chars());
        assert!(!buffer.is_marking());
        assert_eq!(read_all(&mut buffer), "abc");
        assert_eq!(buffer.read(), None);
    }

    #[test]
    fn test_restore_replays_captured_characters() {
        let mut buffer = ReplayBuffer::new("abcdef".chars());
        assert_eq!(buffer.read(), Some('a'));
        buffer.mark();
        assert_eq!(buffer.read(), Some('b'));
        assert_eq!(buffer.read(), Some('c'));
        buffer.restore_to_mark();
        assert!(!buffer.is_marking());
        assert_eq!(buffer.pending(), 2);
        assert_eq!(read_all(&mut buffer), "bcdef");
    }

    #[test]
    fn test_cancel_keeps_stream_position() {
        let mut buffer = ReplayBuffer::new("abcd".chars());
        buffer.mark();
        assert_eq!(buffer.read(), Some('a'));
        assert_eq!(buffer.read(), Some('b'));
        buffer.cancel_mark();
        assert_eq!(buffer.pending(), 0);
        assert_eq!(read_all(&mut buffer), "cd");
    }

    #[test]
    fn test_restore_while_replay_is_pending() {
        let mut buffer = ReplayBuffer::new("abcdef".chars());
        buffer.mark();
        for _ in 0..4 {
            buffer.read();
        }
        buffer.restore_to_mark();
        // Replay pending: a b c d
        assert_eq!(buffer.read(), Some('a'));
        buffer.mark();
        assert_eq!(buffer.read(), Some('b'));
        assert_eq!(buffer.read(), Some('c'));
        buffer.restore_to_mark();
        assert_eq!(buffer.pending(), 3);
        assert_eq!(read_all(&mut buffer), "bcdef");
    }

    #[test]
    fn test_restore_with_empty_capture() {
        let mut buffer = ReplayBuffer::new("xy".chars());
        buffer.mark();
        buffer.restore_to_mark();
        assert!(!buffer.is_marking());
        assert_eq!(buffer.pending(), 0);
        assert_eq!(read_all(&mut buffer), "xy");
    }

    #[test]
    fn test_exhausted_source_is_not_polled_again() {
        let mut buffer = ReplayBuffer::new(CountingSource {
            inner: "a".chars(),
            polls: 0,
        });
        buffer.mark();
        assert_eq!(buffer.read(), Some('a'));
        assert_eq!(buffer.read(), None);
        assert_eq!(buffer.read(), None);
        buffer.restore_to_mark();
        assert_eq!(buffer.read(), Some('a'));
        assert_eq!(buffer.read(), None);
        assert_eq!(buffer.source().polls, 2);
    }

    #[test]
    #[should_panic(expected = "already active")]
    fn test_double_mark_panics() {
        let mut buffer = ReplayBuffer::new("a".chars());
        buffer.mark();
        buffer.mark();
    }

    #[test]
    #[should_panic(expected = "without an active mark")]
    fn test_cancel_without_mark_panics() {
        let mut buffer = ReplayBuffer::new("a".chars());
        buffer.cancel_mark();
    }

    #[test]
    #[should_panic(expected = "without an active mark")]
    fn test_restore_without_mark_panics() {
        let mut buffer = ReplayBuffer::new("a".chars());
        buffer.restore_to_mark();
    }
}
