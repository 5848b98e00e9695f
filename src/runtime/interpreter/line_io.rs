use std::{
    cell::RefCell,
    io::{self, BufRead, BufReader, Cursor, Read, Write},
    rc::Rc,
};

/// The line-oriented surface words use to talk to the outside world.  Failures are passed back to
/// the calling word untouched.
pub trait LineIo {
    /// Write the text as-is, no newline is added.
    fn write(&mut self, text: &str) -> io::Result<()>;

    /// Read one line, without its line ending.  Blocks until a line is available.  A closed source
    /// is reported as an `UnexpectedEof` error.
    fn read_line(&mut self) -> io::Result<String>;
}

/// Read one line from a buffered reader and strip the `\n`, or `\r\n`, ending.  A last line
/// without an ending is still returned.
pub fn read_trimmed_line<R: BufRead + ?Sized>(reader: &mut R) -> io::Result<String> {
    let mut line = String::new();

    if reader.read_line(&mut line)? == 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "input closed",
        ));
    }

    if line.ends_with('\n') {
        line.pop();

        if line.ends_with('\r') {
            line.pop();
        }
    }

    Ok(line)
}

/// Talk to the process's standard input and output.
#[derive(Default)]
pub struct StdIo;

impl LineIo for StdIo {
    fn write(&mut self, text: &str) -> io::Result<()> {
        let mut stdout = io::stdout().lock();

        stdout.write_all(text.as_bytes())?;
        stdout.flush()
    }

    fn read_line(&mut self) -> io::Result<String> {
        read_trimmed_line(&mut io::stdin().lock())
    }
}

/// Talk over any pair of reader and writer, such as the two halves of a network connection.
pub struct StreamIo<R: Read, W: Write> {
    reader: BufReader<R>,
    writer: W,
}

impl<R: Read, W: Write> StreamIo<R, W> {
    /// Read lines from the reader and write everything to the writer.
    pub fn new(reader: R, writer: W) -> Self {
        StreamIo {
            reader: BufReader::new(reader),
            writer,
        }
    }
}

impl<R: Read, W: Write> LineIo for StreamIo<R, W> {
    fn write(&mut self, text: &str) -> io::Result<()> {
        self.writer.write_all(text.as_bytes())?;
        self.writer.flush()
    }

    fn read_line(&mut self) -> io::Result<String> {
        read_trimmed_line(&mut self.reader)
    }
}

/// An in-memory sink.  Input is a fixed block of text, output is collected in a shared string that
/// stays readable after the sink has been handed to an interpreter.
pub struct MemoryIo {
    input: Cursor<Vec<u8>>,
    output: Rc<RefCell<String>>,
}

impl MemoryIo {
    /// Serve the lines of the input, then report end of input.
    pub fn new(input: &str) -> Self {
        MemoryIo {
            input: Cursor::new(input.as_bytes().to_vec()),
            output: Rc::new(RefCell::new(String::new())),
        }
    }

    /// A handle on everything written so far.
    pub fn output(&self) -> Rc<RefCell<String>> {
        self.output.clone()
    }
}

impl LineIo for MemoryIo {
    fn write(&mut self, text: &str) -> io::Result<()> {
        self.output.borrow_mut().push_str(text);
        Ok(())
    }

    fn read_line(&mut self) -> io::Result<String> {
        read_trimmed_line(&mut self.input)
    }
}
