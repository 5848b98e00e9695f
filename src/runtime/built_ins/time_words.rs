use crate::{
    add_native_word,
    runtime::{
        data_structures::value::{ToValue, Value},
        error::{self, TypeError},
        interpreter::Interpreter,
    },
};
use chrono::Utc;
use std::{thread, time::Duration};

/// Signature: ` -- timestamp`
fn word_now(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    interpreter.push(Utc::now().to_value())
}

/// How long `wait` should sleep for the given value.  Anything already in the past, or not
/// positive, means not sleeping at all.
fn wait_duration(value: &Value) -> error::Result<Duration> {
    match value {
        Value::Integer(milliseconds) => Ok(Duration::from_millis((*milliseconds).max(0) as u64)),

        Value::Float(seconds) if *seconds > 0.0 => {
            Ok(Duration::try_from_secs_f64(*seconds).unwrap_or(Duration::MAX))
        }

        Value::Float(_) => Ok(Duration::ZERO),

        Value::Timestamp(deadline) => Ok((*deadline - Utc::now()).to_std().unwrap_or(Duration::ZERO)),

        other => Err(TypeError::InvalidType {
            found: other.type_name(),
        }
        .into()),
    }
}

/// Block the thread for a number of milliseconds, a number of seconds, or until a point in time.
///
/// Signature: `milliseconds|seconds|timestamp -- `
fn word_wait(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let value = interpreter.pop()?;
    let duration = wait_duration(&value)?;

    if !duration.is_zero() {
        thread::sleep(duration);
    }

    Ok(())
}

pub fn register_time_words(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    add_native_word!(
        interpreter,
        "now",
        word_now,
        "The current point in time.",
        " -- timestamp"
    )?;

    add_native_word!(
        interpreter,
        "wait",
        word_wait,
        "Sleep for integer milliseconds, float seconds, or until a timestamp.",
        "duration -- "
    )?;

    Ok(())
}
