use crate::{
    add_native_word,
    runtime::{data_structures::value::ToValue, error, interpreter::Interpreter},
};

/// Run a quotation against the current stack.
///
/// Signature: `quotation -- ...`
fn word_do(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let code = interpreter.pop_as_quotation()?;

    interpreter.execute_str(&code)
}

/// Run one of two quotations depending on a boolean.
///
/// Signature: `bool then-quotation else-quotation -- ...`
fn word_if(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let else_code = interpreter.pop_as_quotation()?;
    let then_code = interpreter.pop_as_quotation()?;
    let condition = interpreter.pop_as_bool()?;

    if condition {
        interpreter.execute_str(&then_code)
    } else {
        interpreter.execute_str(&else_code)
    }
}

/// Run the quotation over and over.  Each pass gets the iteration count, starting at 0, pushed
/// before it runs and must leave a boolean on top.  The loop ends when that boolean is false.
///
/// Signature: `quotation -- ...`
fn word_repeat(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let code = interpreter.pop_as_quotation()?;
    let mut iteration: i64 = 0;

    loop {
        interpreter.push(iteration.to_value())?;
        interpreter.execute_str(&code)?;

        if !interpreter.pop_as_bool()? {
            return Ok(());
        }

        iteration = iteration.wrapping_add(1);
    }
}

pub fn register_control_words(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    add_native_word!(
        interpreter,
        "do",
        word_do,
        "Execute a quotation.",
        "quotation -- ..."
    )?;

    add_native_word!(
        interpreter,
        "if",
        word_if,
        "Execute the first quotation if the boolean is true, the second otherwise.",
        "bool then else -- ..."
    )?;

    add_native_word!(
        interpreter,
        "repeat",
        word_repeat,
        "Push the iteration count and run the quotation until it leaves false on the stack.",
        "quotation -- ..."
    )?;

    Ok(())
}
