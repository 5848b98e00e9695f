use crate::{
    add_native_word,
    runtime::{error, interpreter::Interpreter},
};

/// Convert a number or text to an integer.  Text that doesn't parse leaves a description of the
/// failure on the stack instead.
///
/// Signature: `value -- integer-or-text`
fn word_to_integer(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    interpreter.stack_mut().to_integer()
}

/// Signature: `value -- text`
fn word_to_text(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    interpreter.stack_mut().to_text()
}

pub fn register_value_type_words(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    add_native_word!(
        interpreter,
        "to-integer",
        word_to_integer,
        "Convert to an integer.  Unparsable text leaves an error description instead.",
        "value -- integer-or-text"
    )?;

    add_native_word!(
        interpreter,
        "to-text",
        word_to_text,
        "Convert a number to text.  Floats get 5 decimal digits.",
        "value -- text"
    )?;

    Ok(())
}
