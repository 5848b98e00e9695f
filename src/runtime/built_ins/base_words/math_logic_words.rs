use crate::{
    add_native_word,
    runtime::{
        data_structures::value::{ToValue, Value},
        error::{self, ScriptError, TypeError},
        interpreter::Interpreter,
    },
};
use rand::Rng;

/// Signature: `a b -- bool`
fn word_is_equal(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    interpreter.stack_mut().is_equal()
}

/// Signature: `a b -- bool`
fn word_is_greater(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    interpreter.stack_mut().is_greater()
}

/// Signature: `a b -- bool`
fn word_is_smaller(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    interpreter.stack_mut().is_smaller()
}

/// Signature: `a b -- result`
fn word_add(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    interpreter.stack_mut().add()
}

/// Signature: `a b -- result`
fn word_subtract(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    interpreter.stack_mut().subtract()
}

/// Signature: `a b -- result`
fn word_multiply(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    interpreter.stack_mut().multiply()
}

/// Signature: `a b -- result`
fn word_divide(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    interpreter.stack_mut().divide()
}

/// Signature: `a b -- result`
fn word_modulo(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    interpreter.stack_mut().modulo()
}

/// Signature: `bool -- !bool`
fn word_invert(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    interpreter.stack_mut().invert()
}

/// Push a random integer from zero up to, but not including, the bound.  A float bound scales a
/// uniform random float and truncates it, so the result is an integer either way.
///
/// Signature: `bound -- integer`
fn word_random(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let number = match interpreter.pop()? {
        Value::Integer(bound) if bound > 0 => interpreter.rng().gen_range(0..bound),

        Value::Integer(bound) => {
            return ScriptError::new_as_result(format!(
                "random bound must be greater than zero, got {}",
                bound
            ));
        }

        Value::Float(bound) => (interpreter.rng().gen_range(0.0..1.0) * bound) as i64,

        other => {
            return Err(TypeError::InvalidType {
                found: other.type_name(),
            }
            .into());
        }
    };

    interpreter.push(number.to_value())
}

pub fn register_math_logic_words(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    add_native_word!(
        interpreter,
        "is-equal",
        word_is_equal,
        "Are the two values equal?  Both must be of the same type.",
        "a b -- bool"
    )?;

    add_native_word!(
        interpreter,
        "is-greater",
        word_is_greater,
        "Is a greater than b?",
        "a b -- bool"
    )?;

    add_native_word!(
        interpreter,
        "is-smaller",
        word_is_smaller,
        "Is a smaller than b?",
        "a b -- bool"
    )?;

    add_native_word!(
        interpreter,
        "add",
        word_add,
        "Add two numbers or join two texts.",
        "a b -- result"
    )?;

    add_native_word!(
        interpreter,
        "subtract",
        word_subtract,
        "Subtract b from a.",
        "a b -- result"
    )?;

    add_native_word!(
        interpreter,
        "multiply",
        word_multiply,
        "Multiply two numbers.",
        "a b -- result"
    )?;

    add_native_word!(
        interpreter,
        "divide",
        word_divide,
        "Divide a by b.  Integer division truncates.",
        "a b -- result"
    )?;

    add_native_word!(
        interpreter,
        "modulo",
        word_modulo,
        "The remainder of dividing a by b.",
        "a b -- result"
    )?;

    add_native_word!(
        interpreter,
        "invert",
        word_invert,
        "Boolean not.",
        "bool -- !bool"
    )?;

    add_native_word!(
        interpreter,
        "random",
        word_random,
        "A random integer from 0 up to, but not including, the bound.",
        "bound -- integer"
    )?;

    Ok(())
}
