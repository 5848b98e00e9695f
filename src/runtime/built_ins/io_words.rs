use crate::{
    add_native_word,
    runtime::{
        data_structures::value::{ToValue, Value},
        error::{self, TypeError},
        interpreter::Interpreter,
    },
};

/// Render a value for output.  Floats get 2 decimal digits here, unlike `to-text`.
fn render(value: &Value) -> error::Result<String> {
    match value {
        Value::Boolean(value) => Ok(value.to_string()),
        Value::Integer(value) => Ok(value.to_string()),
        Value::Float(value) => Ok(format!("{:.2}", value)),
        Value::Text(text) => Ok(text.clone()),
        other => Err(TypeError::InvalidType {
            found: other.type_name(),
        }
        .into()),
    }
}

/// Signature: `value -- `
fn word_print(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let value = interpreter.pop()?;
    let text = render(&value)?;

    interpreter.io().write(&text)?;
    Ok(())
}

/// Signature: ` -- text`
fn word_read(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let line = interpreter.io().read_line()?;

    interpreter.push(line.to_value())
}

pub fn register_io_words(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    add_native_word!(
        interpreter,
        "print",
        word_print,
        "Write a boolean, number or text to the output.",
        "value -- "
    )?;

    add_native_word!(
        interpreter,
        "write",
        word_print,
        "Write a boolean, number or text to the output.",
        "value -- "
    )?;

    add_native_word!(
        interpreter,
        "ask",
        word_read,
        "Read a line of input, without its line ending.",
        " -- text"
    )?;

    add_native_word!(
        interpreter,
        "read",
        word_read,
        "Read a line of input, without its line ending.",
        " -- text"
    )?;

    Ok(())
}
