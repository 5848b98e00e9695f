use std::io::{self, BufRead, Write};

/// The byte that ends every message.
pub const MESSAGE_TERMINATOR: u8 = 0;

/// Write one message followed by its terminator and flush the writer.  A message can't contain the
/// terminator itself.
pub fn write_message<W: Write + ?Sized>(writer: &mut W, message: &[u8]) -> io::Result<()> {
    if message.contains(&MESSAGE_TERMINATOR) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "message contains a zero byte",
        ));
    }

    writer.write_all(message)?;
    writer.write_all(&[MESSAGE_TERMINATOR])?;
    writer.flush()
}

/// Read up to and including the next terminator and return the message without it.  A stream that
/// ends before a terminator is seen is an `UnexpectedEof` error, any partial data is dropped.
pub fn read_message<R: BufRead + ?Sized>(reader: &mut R) -> io::Result<Vec<u8>> {
    let mut message = Vec::new();

    reader.read_until(MESSAGE_TERMINATOR, &mut message)?;

    if message.pop() != Some(MESSAGE_TERMINATOR) {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "connection closed before the end of the message",
        ));
    }

    Ok(message)
}

/// Escape text so that it can be placed between the quotes of a literal text in generated code.
pub fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());

    for character in text.chars() {
        match character {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            _ => escaped.push(character),
        }
    }

    escaped
}
