use crate::{
    add_native_word,
    runtime::{error, interpreter::Interpreter},
};

/// Drop the top value on the data stack.
///
/// Signature: `value -- `
fn word_drop(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    interpreter.stack_mut().drop_top()
}

/// Copy the value n places below the top, after the index itself has been removed.
///
/// Signature: `... n -- ... value`
fn word_pick(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    interpreter.stack_mut().pick()
}

/// Swap the top 2 values on the data stack.
///
/// Signature: `a b -- b a`
fn word_swap(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    interpreter.stack_mut().swap()
}

/// Rotate the top 3 values on the stack.
///
/// Signature: `a b c -- b c a`
fn word_rot(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    interpreter.stack_mut().rot()
}

pub fn register_stack_words(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    add_native_word!(
        interpreter,
        "drop",
        word_drop,
        "Discard the top value on the stack.",
        "value -- "
    )?;

    add_native_word!(
        interpreter,
        "pick",
        word_pick,
        "Copy the value n places below the top of the stack.  0 is the top.",
        "... n -- ... value"
    )?;

    add_native_word!(
        interpreter,
        "swap",
        word_swap,
        "Swap the top 2 values on the stack.",
        "a b -- b a"
    )?;

    add_native_word!(
        interpreter,
        "rot",
        word_rot,
        "Move the third value on the stack to the top.",
        "a b c -- b c a"
    )?;

    Ok(())
}
