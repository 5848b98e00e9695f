/// The core words of the language.
pub mod base_words;

/// Words that read and write lines of text.
pub mod io_words;

/// Words that work with points in time.
pub mod time_words;

/// Words that talk to a remote peer.
pub mod net_words;

use crate::runtime::{
    built_ins::{
        base_words::register_base_words, io_words::register_io_words,
        net_words::register_net_words, time_words::register_time_words,
    },
    error,
    interpreter::Interpreter,
};

/// Register every built-in word, always in the same order.  This runs before the prelude.
pub fn register_built_ins(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    register_base_words(interpreter)?;
    register_io_words(interpreter)?;
    register_time_words(interpreter)?;
    register_net_words(interpreter)?;

    Ok(())
}
