//! Character sources the scanner can read from.
//!
//! Every `Iterator<Item = char>` is a character source. The iterator is read strictly forward
//! and never asked for another character after it returned `None`.
//! [`ReadSource`] adapts a byte stream implementing [`std::io::Read`] to such an iterator.

use std::io::{BufReader, ErrorKind, Read};

use log::debug;

use crate::{Result, ScanpileError, ScanpileErrorKind};

/// A character source that decodes UTF-8 from a [`Read`] implementation.
///
/// The first I/O error or invalid byte sequence ends the character stream. The error is kept
/// and can be inspected with [`ReadSource::error`] or taken with [`ReadSource::take_error`].
#[derive(Debug)]
pub struct ReadSource<R: Read> {
    reader: BufReader<R>,
    // Number of bytes decoded so far.
    offset: usize,
    error: Option<ScanpileError>,
    finished: bool,
}

impl<R: Read> ReadSource<R> {
    /// Create a new character source from the given reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
            offset: 0,
            error: None,
            finished: false,
        }
    }

    /// Returns the error that ended the character stream, if any.
    pub fn error(&self) -> Option<&ScanpileError> {
        self.error.as_ref()
    }

    /// Takes the error that ended the character stream, if any.
    /// Returns `Ok(())` if the stream was not ended by an error.
    pub fn take_error(&mut self) -> Result<()> {
        match self.error.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    // Reads one byte. `Ok(None)` signals the end of the byte stream.
    fn read_byte(&mut self) -> Result<Option<u8>> {
        let mut buf = [0u8; 1];
        loop {
            match self.reader.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf[0])),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn decode_char(&mut self) -> Result<Option<char>> {
        let Some(first) = self.read_byte()? else {
            return Ok(None);
        };
        let width = match first {
            0x00..=0x7f => 1,
            0xc2..=0xdf => 2,
            0xe0..=0xef => 3,
            0xf0..=0xf4 => 4,
            _ => 0,
        };
        let mut bytes = vec![first];
        if width == 0 {
            return Err(self.invalid_utf8(bytes));
        }
        while bytes.len() < width {
            match self.read_byte()? {
                Some(b) => bytes.push(b),
                None => return Err(self.invalid_utf8(bytes)),
            }
        }
        match std::str::from_utf8(&bytes) {
            Ok(s) => {
                self.offset += width;
                Ok(s.chars().next())
            }
            Err(_) => Err(self.invalid_utf8(bytes)),
        }
    }

    fn invalid_utf8(&self, bytes: Vec<u8>) -> ScanpileError {
        ScanpileError::new(ScanpileErrorKind::InvalidUtf8 {
            bytes,
            offset: self.offset,
        })
    }
}

impl<R: Read> Iterator for ReadSource<R> {
    type Item = char;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.decode_char() {
            Ok(Some(c)) => Some(c),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(e) => {
                debug!("Character source ended by error: {}", e);
                self.finished = true;
                self.error = Some(e);
                None
            }
        }
    }
}
