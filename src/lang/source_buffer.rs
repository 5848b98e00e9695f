use std::{
    fmt::{self, Display, Formatter},
    io::{self, Bytes, Read},
};

/// The location in the source code where a token was found.  This structure is used all over the
/// interpreter to keep track where important things are found in the source code.  This is used
/// extensively in the error reporting.
///
/// This is a read-only structure.  Use the field accessor methods to get the values.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Eq, Hash)]
pub struct SourceLocation {
    /// The 1 based line number in the source code where the token was found.
    line: usize,

    /// The 1 based column number in the source code where the token was found.
    column: usize,
}

impl Default for SourceLocation {
    fn default() -> Self {
        Self::new()
    }
}

/// Used for error reporting to show where in the source code an error originated.
impl Display for SourceLocation {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}:{}", self.line, self.column)
    }
}

impl SourceLocation {
    /// Create a new SourceLocation pointing at the very start of the source.
    pub fn new() -> SourceLocation {
        SourceLocation { line: 1, column: 1 }
    }

    /// Create a new SourceLocation with all of the needed information.
    pub fn new_from_info(line: usize, column: usize) -> Self {
        SourceLocation { line, column }
    }

    /// The 1 based line number in the source code.
    pub fn line(&self) -> usize {
        self.line
    }

    /// The 1 based column number in the source code.
    pub fn column(&self) -> usize {
        self.column
    }
}

/// A buffer for processing source code.  This is used by the tokenizer to extract meaningful tokens
/// from the source code.  This buffer acts as a forward only iterator over the code.  As bytes are
/// consumed the location of the cursor in that source is maintained.  Thus allowing the tokenizer
/// to keep track of important points in the source code.
///
/// The buffer pulls bytes from the reader lazily, one at a time, so a source can be an
/// interactive stream such as standard input or a network connection.
pub struct SourceBuffer<R: Read> {
    /// The byte stream being processed.
    bytes: Bytes<R>,

    /// The logical location of the cursor in the source code.
    location: SourceLocation,

    /// The byte waiting to be consumed, if we've already peeked at it.
    current: Option<u8>,
}

impl<R: Read> SourceBuffer<R> {
    /// Create a new SourceBuffer reading from the given source.
    pub fn new(source: R) -> Self {
        SourceBuffer {
            bytes: source.bytes(),
            location: SourceLocation::new(),
            current: None,
        }
    }

    /// The location the cursor is at in the source code being processed.
    pub fn location(&self) -> &SourceLocation {
        &self.location
    }

    /// Take a peek at the next byte in the source code without consuming it.  End of input is
    /// reported as `None`, read failures of the underlying source are passed through.
    pub fn peek_next(&mut self) -> io::Result<Option<u8>> {
        if self.current.is_none() {
            self.current = self.bytes.next().transpose()?;
        }

        Ok(self.current)
    }

    /// Get and consume the next byte in the source code.
    pub fn next_byte(&mut self) -> io::Result<Option<u8>> {
        let next = match self.current.take() {
            Some(byte) => Some(byte),
            None => self.bytes.next().transpose()?,
        };

        if let Some(byte) = next {
            self.increment_location(byte);
        }

        Ok(next)
    }

    /// Increment the location based on the next byte.  Advance one column for regular bytes.
    /// Reset the colum to 1 and increment the line for new line characters.
    fn increment_location(&mut self, next: u8) {
        if next == b'\n' {
            self.location.line += 1;
            self.location.column = 1;
        } else {
            self.location.column += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_lines_and_columns() {
        let mut buffer = SourceBuffer::new("ab\ncd".as_bytes());

        assert_eq!(buffer.next_byte().unwrap(), Some(b'a'));
        assert_eq!(buffer.location(), &SourceLocation::new_from_info(1, 2));

        assert_eq!(buffer.next_byte().unwrap(), Some(b'b'));
        assert_eq!(buffer.next_byte().unwrap(), Some(b'\n'));
        assert_eq!(buffer.location(), &SourceLocation::new_from_info(2, 1));
    }

    #[test]
    fn peeking_does_not_move_the_cursor() {
        let mut buffer = SourceBuffer::new("x".as_bytes());

        assert_eq!(buffer.peek_next().unwrap(), Some(b'x'));
        assert_eq!(buffer.peek_next().unwrap(), Some(b'x'));
        assert_eq!(buffer.location(), &SourceLocation::new());

        assert_eq!(buffer.next_byte().unwrap(), Some(b'x'));
        assert_eq!(buffer.next_byte().unwrap(), None);
        assert_eq!(buffer.peek_next().unwrap(), None);
    }
}
