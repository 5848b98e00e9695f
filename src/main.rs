use anyhow::Context;
use clap::{Parser, Subcommand};
use jul::{
    front_end::{SessionOptions, run_pushed_code, serve_echo, serve_repl},
    runtime::{
        data_structures::value_stack::DEFAULT_STACK_CAPACITY,
        error::ScriptError,
        interpreter::{
            CodeManagement, WordManagement,
            jul_interpreter::{INTERPRETER_THREAD_STACK_SIZE, JulInterpreter},
        },
    },
};
use std::{
    fs::File,
    io::{self, BufReader},
    net::{SocketAddr, TcpListener},
    path::PathBuf,
    process::ExitCode,
    thread,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "jul")]
#[command(about = "A small stack based concatenative language")]
struct Cli {
    /// Script to run, standard input is read when absent
    file: Option<PathBuf>,

    /// List every known word and exit
    #[arg(long)]
    words: bool,

    #[command(flatten)]
    interpreter: InterpreterArgs,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(clap::Args, Debug, Clone, Copy)]
struct InterpreterArgs {
    /// Seed for the random generator, the current time is used when absent
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Maximum depth of the data stack
    #[arg(long, global = true, default_value_t = DEFAULT_STACK_CAPACITY)]
    stack_capacity: usize,
}

impl InterpreterArgs {
    fn session_options(&self) -> SessionOptions {
        SessionOptions {
            stack_capacity: self.stack_capacity,
            seed: self.seed,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve a line oriented REPL, one interpreter per connection
    Serve {
        #[arg(long, default_value = "127.0.0.1:8080")]
        listen: SocketAddr,
    },

    /// Connect to a code pushing server and run what it sends
    Connect { address: String },

    /// Serve the echo demo to connecting clients
    EchoServer {
        #[arg(long, default_value = "127.0.0.1:8080")]
        listen: SocketAddr,
    },
}

fn run_script(cli: &Cli) -> anyhow::Result<()> {
    let mut interpreter =
        JulInterpreter::new(cli.interpreter.session_options().config()).context("starting up")?;

    if cli.words {
        print!("{}", interpreter.dictionary());
        return Ok(());
    }

    match &cli.file {
        Some(path) => {
            let file =
                File::open(path).with_context(|| format!("opening {}", path.display()))?;

            interpreter.execute(&mut BufReader::new(file))?;
        }

        None => interpreter.execute(&mut io::stdin())?,
    }

    Ok(())
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let options = cli.interpreter.session_options();

    match &cli.command {
        None => run_script(&cli),

        Some(Command::Serve { listen }) => {
            let listener = TcpListener::bind(listen).with_context(|| format!("binding {listen}"))?;

            serve_repl(listener, options);
            Ok(())
        }

        Some(Command::EchoServer { listen }) => {
            let listener = TcpListener::bind(listen).with_context(|| format!("binding {listen}"))?;

            serve_echo(listener);
            Ok(())
        }

        Some(Command::Connect { address }) => match run_pushed_code(address.as_str(), options) {
            Err(error) if is_closed_input(&error) => {
                info!("input closed");
                Ok(())
            }

            result => Ok(result?),
        },
    }
}

/// Running out of input while a pushed program waits for a line is how a client session ends.
fn is_closed_input(error: &ScriptError) -> bool {
    matches!(
        error.root_cause(),
        ScriptError::Io(io_error) if io_error.kind() == io::ErrorKind::UnexpectedEof
    )
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("jul=info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    // Deeply nested scripts need more native stack than the main thread has.  Errors are
    // reported on the same thread, since dropping a deep error chain recurses too.
    let spawned = thread::Builder::new()
        .name("jul-main".to_string())
        .stack_size(INTERPRETER_THREAD_STACK_SIZE)
        .spawn(move || match run(cli) {
            Ok(()) => ExitCode::SUCCESS,
            Err(error) => {
                error!("{:#}", error);
                ExitCode::FAILURE
            }
        });

    match spawned.map(|handle| handle.join()) {
        Ok(Ok(code)) => code,
        Ok(Err(_)) => {
            error!("the interpreter thread panicked");
            ExitCode::FAILURE
        }
        Err(error) => {
            error!(%error, "failed to start the interpreter thread");
            ExitCode::FAILURE
        }
    }
}
