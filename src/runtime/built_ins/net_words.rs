use crate::{
    add_native_word,
    runtime::{
        error::{self, ScriptError},
        interpreter::Interpreter,
    },
};

/// Send the text to the connected peer as one message, then run the code the peer sends back.
/// Blocks until the reply arrives, a peer that never replies blocks the caller forever.
///
/// Signature: `text -- ...`
fn word_retrieve(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let text = interpreter.pop_as_text()?;

    let reply = match interpreter.connection() {
        Some(connection) => {
            connection.send(&text)?;
            connection.receive()?
        }

        None => {
            return ScriptError::new_as_result("no server connection configured".to_string());
        }
    };

    interpreter.execute_str(&reply)
}

pub fn register_net_words(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    add_native_word!(
        interpreter,
        "retrieve",
        word_retrieve,
        "Send the text to the server and run the code it answers with.",
        "text -- ..."
    )?;

    Ok(())
}
