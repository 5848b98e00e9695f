/// Module for managing source code and turning it into tokens.
pub mod lang;

/// Module for the runtime and the data structures used by the interpreter.  As well as the
/// interpreter itself.
#[macro_use]
pub mod runtime;

/// Message framing and the TCP plumbing used to push code between processes.
pub mod net;

/// The line oriented sessions and servers the binary offers.
pub mod front_end;
