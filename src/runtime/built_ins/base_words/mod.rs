/// Words that manipulate the data stack.
mod stack_words;

/// Words that work with math, logic and Value comparison.
mod math_logic_words;

/// Words that convert between Value types.
mod value_type_words;

/// Words that run quotations.
mod control_words;

/// Words that create new words.
mod word_creation_words;

use crate::runtime::{
    built_ins::base_words::{
        control_words::register_control_words, math_logic_words::register_math_logic_words,
        stack_words::register_stack_words, value_type_words::register_value_type_words,
        word_creation_words::register_word_creation_words,
    },
    error,
    interpreter::Interpreter,
};

/// Called to register all of the core words of the language.
pub fn register_base_words(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    register_control_words(interpreter)?;
    register_word_creation_words(interpreter)?;
    register_stack_words(interpreter)?;
    register_math_logic_words(interpreter)?;
    register_value_type_words(interpreter)?;

    Ok(())
}
