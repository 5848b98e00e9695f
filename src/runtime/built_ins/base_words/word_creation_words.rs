use crate::{
    add_native_word,
    runtime::{
        data_structures::dictionary::{WordInfo, WordType},
        error,
        interpreter::Interpreter,
    },
};
use std::rc::Rc;
use tracing::debug;

/// Create a new word that runs the given quotation.  The body is kept as text and looked up word by
/// word each time it runs, so it may call words that are defined after it.
///
/// Signature: `name quotation -- `
fn word_define(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let body = interpreter.pop_as_quotation()?;
    let name = interpreter.pop_as_text()?;

    let mut word = WordInfo::new(
        name.clone(),
        WordType::Scripted,
        Rc::new(move |interpreter: &mut dyn Interpreter| interpreter.execute_str(&body)),
    );

    word.description = "Defined by a script.".to_string();

    interpreter.add_word(word)?;
    debug!(word = %name, "defined word");

    Ok(())
}

pub fn register_word_creation_words(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    add_native_word!(
        interpreter,
        "define",
        word_define,
        "Define a new word that executes the quotation.  Existing names can't be redefined.",
        "name quotation -- "
    )?;

    Ok(())
}
