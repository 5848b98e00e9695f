use crate::{
    net::{connection::Connection, framing::escape_text, server::serve},
    runtime::{
        error,
        interpreter::{
            CodeManagement, Interpreter, InterpreterConfig, jul_interpreter::JulInterpreter,
            line_io::StreamIo,
        },
    },
};
use std::{
    io,
    net::{TcpListener, TcpStream, ToSocketAddrs},
};
use tracing::{info, warn};

/// Shown before every line read by the network REPL.
pub const REPL_PROMPT: &str = "> ";

/// The program the echo server pushes to every new client.  It defines a `prompt` word that reads a
/// line from the user and sends it back to the server, and then runs it forever.
pub const ECHO_WELCOME: &str = r#"
"
Welcome to the echo server.
Say something and I will repeat it back to you!

" write

*prompt ["?> " write read retrieve] define
[drop prompt true] repeat
"#;

/// The interpreter options shared by every session a front end starts.
#[derive(Clone, Copy, Debug, Default)]
pub struct SessionOptions {
    /// Data stack capacity of every session.  Zero selects the default.
    pub stack_capacity: usize,

    /// Seed for the random words, a fresh time based seed when absent.
    pub seed: Option<u64>,
}

impl SessionOptions {
    /// The interpreter configuration for one new session, without any I/O or connection set.
    pub fn config(&self) -> InterpreterConfig {
        let mut config = InterpreterConfig::default().with_stack_capacity(self.stack_capacity);

        config.seed = self.seed;
        config
    }
}

/// Read lines from the interpreter's own I/O and execute each one.  A failing line is reported back
/// and the session carries on with the next line.  The session ends cleanly when the input closes.
pub fn run_line_session(interpreter: &mut dyn Interpreter, prompt: &str) -> io::Result<()> {
    loop {
        interpreter.io().write(prompt)?;

        let line = match interpreter.io().read_line() {
            Ok(line) => line,
            Err(error) if error.kind() == io::ErrorKind::UnexpectedEof => return Ok(()),
            Err(error) => return Err(error),
        };

        if let Err(error) = interpreter.execute_str(&line) {
            warn!(%error, "input failed");
            interpreter.io().write(&format!("{}\n", error))?;
        }
    }
}

fn repl_session(stream: TcpStream, options: SessionOptions) -> error::Result<()> {
    let reader = stream.try_clone()?;
    let io = StreamIo::new(reader, stream);
    let mut interpreter = JulInterpreter::new(options.config().with_io(Box::new(io)))?;

    run_line_session(&mut interpreter, REPL_PROMPT)?;
    Ok(())
}

/// Serve a line oriented REPL.  Every connection gets its own interpreter on its own thread.
pub fn serve_repl(listener: TcpListener, options: SessionOptions) {
    serve(listener, move |stream| {
        let peer = stream.peer_addr().ok();

        match repl_session(stream, options) {
            Ok(()) => info!(?peer, "session closed"),
            Err(error) => warn!(?peer, %error, "session ended with an error"),
        }
    });
}

/// Connect to a code pushing server, then run the first message it sends.  The connection stays
/// available to `retrieve` for the rest of the run.
pub fn run_pushed_code<A: ToSocketAddrs>(address: A, options: SessionOptions) -> error::Result<()> {
    let mut connection = Connection::connect(address)?;
    let code = connection.receive()?;

    let mut interpreter = JulInterpreter::new(options.config().with_connection(connection))?;

    interpreter.execute_str(&code)
}

/// One echo server conversation: push the welcome program, then answer every message with code
/// that writes it back.
pub fn echo_session(stream: TcpStream) -> io::Result<()> {
    let mut connection = Connection::from_stream(stream)?;

    connection.send(ECHO_WELCOME)?;

    loop {
        let message = match connection.receive() {
            Ok(message) => message,
            Err(error) if error.kind() == io::ErrorKind::UnexpectedEof => return Ok(()),
            Err(error) => return Err(error),
        };

        connection.send(&format!("\"Received: {}\\n\" write", escape_text(&message)))?;
    }
}

/// Serve the echo demo.
pub fn serve_echo(listener: TcpListener) {
    serve(listener, |stream| {
        let peer = stream.peer_addr().ok();

        match echo_session(stream) {
            Ok(()) => info!(?peer, "session closed"),
            Err(error) => warn!(?peer, %error, "session ended with an error"),
        }
    });
}
