use crate::lang::source_buffer::SourceLocation;
use std::io;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScriptError>;

/// The tokenizer found something it could not make sense of.  Always carries the location in the
/// source where the problem was detected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message} ({location})")]
pub struct SyntaxError {
    location: SourceLocation,
    message: String,
}

impl SyntaxError {
    /// Create a new SyntaxError.
    pub fn new(location: SourceLocation, message: String) -> SyntaxError {
        SyntaxError { location, message }
    }

    /// Where in the source the error was detected.
    pub fn location(&self) -> &SourceLocation {
        &self.location
    }
}

/// Failures of the bounded data stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum StackError {
    #[error("stack overflow")]
    Overflow,

    #[error("stack underflow")]
    Underflow,
}

/// An operand did not have a variant the operation can work with.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TypeError {
    /// The operation does not support this variant at all.
    #[error("invalid type {found}")]
    InvalidType { found: &'static str },

    /// The operation needed one specific variant.
    #[error("got {found} instead of {expected}")]
    UnexpectedType {
        expected: &'static str,
        found: &'static str,
    },

    /// Both operands are supported on their own but not together.
    #[error("type mismatch between {a} A and {b} B")]
    TypeMismatch { a: &'static str, b: &'static str },
}

/// Any error that occurs during the execution of a script.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    #[error(transparent)]
    Stack(#[from] StackError),

    #[error(transparent)]
    Type(#[from] TypeError),

    #[error(transparent)]
    Runtime(Box<RuntimeError>),

    #[error("unknown word \"{0}\"")]
    UnknownWord(String),

    #[error("already defined word: \"{0}\"")]
    AlreadyDefined(String),

    #[error("{0}")]
    Message(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl From<RuntimeError> for ScriptError {
    fn from(error: RuntimeError) -> ScriptError {
        ScriptError::Runtime(Box::new(error))
    }
}

impl ScriptError {
    /// Create a free-form error and wrap it in a Result::Err.
    pub fn new_as_result<T>(message: String) -> Result<T> {
        Err(ScriptError::Message(message))
    }

    /// Follow the chain of runtime errors down to the failure that started it all.
    pub fn root_cause(&self) -> &ScriptError {
        match self {
            ScriptError::Runtime(runtime) => runtime.cause().root_cause(),
            _ => self,
        }
    }
}

/// A failure surfaced from executing source code.  Records the location of the token that was
/// being executed and, for word calls, the name of the word.
#[derive(Debug, Error)]
#[error("(at {location}) {}{cause}", word_prefix(.word))]
pub struct RuntimeError {
    location: SourceLocation,
    word: Option<String>,
    cause: ScriptError,
}

fn word_prefix(word: &Option<String>) -> String {
    match word {
        Some(word) => format!("{}: ", word),
        None => String::new(),
    }
}

impl RuntimeError {
    /// Create a new RuntimeError.
    pub fn new(location: SourceLocation, word: Option<String>, cause: ScriptError) -> RuntimeError {
        RuntimeError {
            location,
            word,
            cause,
        }
    }

    /// The location of the call site in the source code.
    pub fn location(&self) -> &SourceLocation {
        &self.location
    }

    /// The word being executed, if the failure came from a word call.
    pub fn word(&self) -> Option<&str> {
        self.word.as_deref()
    }

    /// What actually went wrong.
    pub fn cause(&self) -> &ScriptError {
        &self.cause
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runtime_error_names_word_and_location() {
        let error = RuntimeError::new(
            SourceLocation::new_from_info(2, 7),
            Some("swap".to_string()),
            StackError::Underflow.into(),
        );

        assert_eq!(error.to_string(), "(at 2:7) swap: stack underflow");
    }

    #[test]
    fn root_cause_unwraps_nested_runtime_errors() {
        let inner = RuntimeError::new(
            SourceLocation::new(),
            Some("drop".to_string()),
            StackError::Underflow.into(),
        );
        let outer: ScriptError =
            RuntimeError::new(SourceLocation::new_from_info(1, 5), Some("do".to_string()), inner.into())
                .into();

        assert!(matches!(
            outer.root_cause(),
            ScriptError::Stack(StackError::Underflow)
        ));
        assert_eq!(outer.to_string(), "(at 1:5) do: (at 1:1) drop: stack underflow");
    }
}
