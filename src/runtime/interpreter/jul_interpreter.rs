use crate::{
    lang::{
        source_buffer::SourceLocation,
        tokenizing::{Token, Tokenizer},
    },
    net::connection::Connection,
    runtime::{
        built_ins::register_built_ins,
        data_structures::{
            dictionary::{Dictionary, WordInfo},
            value::Value,
            value_stack::ValueStack,
        },
        error::{self, RuntimeError, ScriptError},
        interpreter::{
            CodeManagement, Interpreter, InterpreterConfig, InterpreterStack, WordHandler,
            WordManagement,
            line_io::{LineIo, StdIo},
        },
    },
};
use chrono::Utc;
use rand::{SeedableRng, rngs::StdRng};
use std::{io::Read, rc::Rc};
use tracing::{debug, error};

/// The standard library every interpreter runs before it accepts any other code.
pub const PRELUDE: &str = include_str!("../../prelude.jul");

/// How many levels of quotations and scripted words may be running inside each other before
/// execution is refused.
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 10_000;

/// Native stack size for threads that run an interpreter.  Every nesting level is a handful of
/// native frames, this leaves room for the default nesting depth even in debug builds.
pub const INTERPRETER_THREAD_STACK_SIZE: usize = 256 * 1024 * 1024;

/// The core interpreter implementation.  Each instance owns its own stack, dictionary, random
/// generator and I/O, and is meant to be driven by one thread at a time.
pub struct JulInterpreter {
    /// The data stack used by the interpreter.
    stack: ValueStack,

    /// The dictionary of words known by the interpreter.
    dictionary: Dictionary,

    rng: StdRng,

    /// Where `print`, `write`, `ask` and `read` go.
    io: Box<dyn LineIo>,

    /// The peer used by `retrieve`, if any.
    connection: Option<Connection>,

    /// How many calls to `execute` are currently running.
    depth: usize,

    max_depth: usize,
}

impl Interpreter for JulInterpreter {
    fn io(&mut self) -> &mut dyn LineIo {
        self.io.as_mut()
    }

    fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    fn connection(&mut self) -> Option<&mut Connection> {
        self.connection.as_mut()
    }
}

impl InterpreterStack for JulInterpreter {
    fn stack(&self) -> &ValueStack {
        &self.stack
    }

    fn stack_mut(&mut self) -> &mut ValueStack {
        &mut self.stack
    }
}

impl CodeManagement for JulInterpreter {
    fn execute(&mut self, source: &mut dyn Read) -> error::Result<()> {
        if self.depth >= self.max_depth {
            return ScriptError::new_as_result(format!(
                "recursion too deep, more than {} nested levels",
                self.max_depth
            ));
        }

        self.depth += 1;
        let result = self.execute_tokens(source);
        self.depth -= 1;

        result
    }
}

impl WordManagement for JulInterpreter {
    fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    fn add_word(&mut self, word: WordInfo) -> error::Result<()> {
        self.dictionary.define(word)
    }

    fn execute_word(
        &mut self,
        location: &SourceLocation,
        name: &str,
        handler: &WordHandler,
    ) -> error::Result<()> {
        handler(self)
            .map_err(|cause| RuntimeError::new(*location, Some(name.to_string()), cause).into())
    }
}

// Helper methods for the token handling.
impl JulInterpreter {
    /// Run every token of the source in turn.
    fn execute_tokens(&mut self, source: &mut dyn Read) -> error::Result<()> {
        let mut tokenizer = Tokenizer::new(source);

        loop {
            match tokenizer.next_token()? {
                Token::EndOfInput(_) => return Ok(()),

                Token::Comment(_, _) => {}

                Token::Quotation(location, code) => {
                    self.push_at(location, Value::Quotation(code))?
                }

                Token::Text(location, text) | Token::TextWord(location, text) => {
                    self.push_at(location, Value::Text(text))?
                }

                Token::Call(location, name) => self.execute_call(location, name)?,
            }
        }
    }

    /// Push a literal found in the source, tagging a full stack with the literal's location.
    fn push_at(&mut self, location: SourceLocation, value: Value) -> error::Result<()> {
        self.stack
            .push(value)
            .map_err(|cause| RuntimeError::new(location, None, cause).into())
    }

    /// Run the named word.  Names that aren't in the dictionary must be integer literals.
    fn execute_call(&mut self, location: SourceLocation, name: String) -> error::Result<()> {
        let handler = self
            .dictionary
            .find_latest(&name)
            .map(|word| Rc::clone(&word.handler));

        if let Some(handler) = handler {
            return self.execute_word(&location, &name, handler.as_ref());
        }

        match name.parse::<i64>() {
            Ok(number) => self.push_at(location, Value::Integer(number)),
            Err(_) => Err(RuntimeError::new(location, None, ScriptError::UnknownWord(name)).into()),
        }
    }
}

impl JulInterpreter {
    /// Create a ready to use interpreter: the built-in words are registered and then the prelude
    /// is run.  A failing prelude means the bundled library itself is broken, so its error is
    /// returned as is.
    pub fn new(config: InterpreterConfig) -> error::Result<JulInterpreter> {
        let mut interpreter = JulInterpreter::new_without_prelude(config)?;

        if let Err(prelude_error) = interpreter.execute_str(PRELUDE) {
            error!(%prelude_error, "the bundled prelude failed to run");
            return Err(prelude_error);
        }

        debug!(words = interpreter.dictionary.len(), "interpreter ready");

        Ok(interpreter)
    }

    /// Create an interpreter that only knows the built-in words.
    pub fn new_without_prelude(config: InterpreterConfig) -> error::Result<JulInterpreter> {
        let seed = config.seed.unwrap_or_else(time_seed);

        let mut interpreter = JulInterpreter {
            stack: ValueStack::with_capacity(config.stack_capacity),
            dictionary: Dictionary::new(),
            rng: StdRng::seed_from_u64(seed),
            io: config.io.unwrap_or_else(|| Box::new(StdIo)),
            connection: config.connection,
            depth: 0,
            max_depth: match config.max_nesting_depth {
                0 => DEFAULT_MAX_NESTING_DEPTH,
                depth => depth,
            },
        };

        register_built_ins(&mut interpreter)?;

        Ok(interpreter)
    }
}

fn time_seed() -> u64 {
    Utc::now().timestamp_nanos_opt().unwrap_or_default() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::{
        data_structures::value::ToValue,
        error::{StackError, TypeError},
        interpreter::line_io::MemoryIo,
    };
    use std::{cell::RefCell, rc::Rc};

    fn interpreter() -> JulInterpreter {
        JulInterpreter::new(InterpreterConfig::default().with_seed(7).with_io(Box::new(MemoryIo::new(""))))
            .unwrap()
    }

    fn interpreter_with_output(input: &str) -> (JulInterpreter, Rc<RefCell<String>>) {
        let io = MemoryIo::new(input);
        let output = io.output();
        let config = InterpreterConfig::default().with_seed(7).with_io(Box::new(io));

        (JulInterpreter::new(config).unwrap(), output)
    }

    fn contents(interpreter: &JulInterpreter) -> Vec<Value> {
        interpreter.stack().iter().cloned().collect()
    }

    #[test]
    fn prelude_leaves_the_stack_empty() {
        assert!(interpreter().stack().is_empty());
    }

    #[test]
    fn pushes_literals() {
        let mut interpreter = interpreter();

        interpreter
            .execute_str("1 -2 [a b] \"text\" *word (ignored)")
            .unwrap();

        assert_eq!(
            contents(&interpreter),
            vec![
                Value::Integer(1),
                Value::Integer(-2),
                Value::Quotation("a b".into()),
                "text".to_value(),
                "word".to_value(),
            ]
        );
    }

    #[test]
    fn unknown_word_is_a_runtime_error_at_the_call_site() {
        let mut interpreter = interpreter();

        let Err(ScriptError::Runtime(error)) = interpreter.execute_str("1\n  nonsense") else {
            panic!("expected a runtime error");
        };

        assert_eq!(error.location(), &SourceLocation::new_from_info(2, 3));
        assert!(error.word().is_none());
        assert!(matches!(error.cause(), ScriptError::UnknownWord(name) if name == "nonsense"));
    }

    #[test]
    fn word_failures_name_the_word() {
        let mut interpreter = interpreter();

        let Err(ScriptError::Runtime(error)) = interpreter.execute_str("swap") else {
            panic!("expected a runtime error");
        };

        assert_eq!(error.word(), Some("swap"));
        assert!(matches!(
            error.cause(),
            ScriptError::Stack(StackError::Underflow)
        ));
    }

    #[test]
    fn syntax_errors_are_not_wrapped() {
        let mut interpreter = interpreter();

        assert!(matches!(
            interpreter.execute_str("1 [2"),
            Err(ScriptError::Syntax(_))
        ));
    }

    #[test]
    fn execution_stops_at_the_first_failure() {
        let mut interpreter = interpreter();

        assert!(interpreter.execute_str("1 drop drop 2").is_err());
        assert!(interpreter.stack().is_empty());
    }

    #[test]
    fn full_stack_on_literal_is_reported_at_the_literal() {
        let config = InterpreterConfig::default()
            .with_stack_capacity(1)
            .with_io(Box::new(MemoryIo::new("")));
        let mut interpreter = JulInterpreter::new_without_prelude(config).unwrap();

        let Err(ScriptError::Runtime(error)) = interpreter.execute_str("1 2") else {
            panic!("expected a runtime error");
        };

        assert_eq!(error.location(), &SourceLocation::new_from_info(1, 3));
        assert!(matches!(
            error.cause(),
            ScriptError::Stack(StackError::Overflow)
        ));
    }

    #[test]
    fn converts_reads_and_prints() {
        let (mut interpreter, output) = interpreter_with_output("");

        interpreter
            .execute_str("\"3\" to-integer 4 add to-text print")
            .unwrap();

        assert_eq!(*output.borrow(), "7");
    }

    #[test]
    fn do_runs_a_quotation_on_the_same_stack() {
        let mut interpreter = interpreter();

        interpreter.execute_str("2 [3 multiply] do").unwrap();

        assert_eq!(contents(&interpreter), vec![Value::Integer(6)]);
    }

    #[test]
    fn do_requires_a_quotation() {
        let mut interpreter = interpreter();

        let Err(error) = interpreter.execute_str("\"2 3\" do") else {
            panic!("expected do to fail");
        };

        assert!(matches!(
            error.root_cause(),
            ScriptError::Type(TypeError::UnexpectedType {
                expected: "quotation",
                found: "text"
            })
        ));
    }

    #[test]
    fn if_picks_a_branch() {
        let mut interpreter = interpreter();

        interpreter
            .execute_str("1 2 is-smaller [*yes] [*no] if 1 2 is-greater [*yes] [*no] if")
            .unwrap();

        assert_eq!(contents(&interpreter), vec!["yes".to_value(), "no".to_value()]);
    }

    #[test]
    fn if_requires_a_boolean_condition() {
        let mut interpreter = interpreter();

        assert!(interpreter.execute_str("1 [] [] if").is_err());
    }

    #[test]
    fn define_makes_a_callable_word() {
        let mut interpreter = interpreter();

        interpreter
            .execute_str("*triple [3 multiply] define 5 triple")
            .unwrap();

        assert_eq!(contents(&interpreter), vec![Value::Integer(15)]);
    }

    #[test]
    fn define_sees_words_defined_later() {
        let mut interpreter = interpreter();

        interpreter
            .execute_str("*outer [inner 1 add] define *inner [10] define outer")
            .unwrap();

        assert_eq!(contents(&interpreter), vec![Value::Integer(11)]);
    }

    #[test]
    fn redefining_fails_and_keeps_the_original() {
        let mut interpreter = interpreter();

        interpreter.execute_str("*answer [42] define").unwrap();
        let words = interpreter.dictionary().len();

        let Err(error) = interpreter.execute_str("*answer [0] define") else {
            panic!("expected the redefinition to fail");
        };

        assert!(matches!(error.root_cause(), ScriptError::AlreadyDefined(name) if name == "answer"));
        assert_eq!(interpreter.dictionary().len(), words);

        interpreter.execute_str("answer").unwrap();
        assert_eq!(contents(&interpreter), vec![Value::Integer(42)]);
    }

    #[test]
    fn built_in_names_cannot_be_redefined() {
        let mut interpreter = interpreter();

        assert!(interpreter.execute_str("*drop [] define").is_err());
    }

    #[test]
    fn defined_words_take_precedence_over_integer_literals() {
        let mut interpreter = interpreter();

        interpreter.execute_str("*7 [*seven] define 7").unwrap();

        assert_eq!(contents(&interpreter), vec!["seven".to_value()]);
    }

    #[test]
    fn repeat_pushes_the_iteration_count() {
        let mut interpreter = interpreter();

        interpreter.execute_str("[dup 3 is-smaller] repeat").unwrap();

        assert_eq!(
            contents(&interpreter),
            vec![
                Value::Integer(0),
                Value::Integer(1),
                Value::Integer(2),
                Value::Integer(3),
            ]
        );
    }

    #[test]
    fn repeat_stops_on_a_non_boolean() {
        let mut interpreter = interpreter();

        let Err(error) = interpreter.execute_str("[] repeat") else {
            panic!("expected repeat to fail");
        };

        assert!(matches!(
            error.root_cause(),
            ScriptError::Type(TypeError::UnexpectedType {
                expected: "boolean",
                found: "integer"
            })
        ));
    }

    #[test]
    fn ask_and_read_push_lines() {
        let (mut interpreter, _) = interpreter_with_output("first line\nsecond\n");

        interpreter.execute_str("ask read").unwrap();

        assert_eq!(
            contents(&interpreter),
            vec!["first line".to_value(), "second".to_value()]
        );
    }

    #[test]
    fn reading_past_the_input_fails() {
        let (mut interpreter, _) = interpreter_with_output("");

        let Err(error) = interpreter.execute_str("read") else {
            panic!("expected read to fail");
        };

        assert!(matches!(error.root_cause(), ScriptError::Io(_)));
    }

    #[test]
    fn write_formats_floats_with_two_digits() {
        let (mut interpreter, output) = interpreter_with_output("");

        interpreter.push(Value::Float(2.0 / 3.0)).unwrap();
        interpreter
            .execute_str("write \" \" write 1 2 is-equal print \" \" write 7 2 divide write")
            .unwrap();

        assert_eq!(*output.borrow(), "0.67 false 3");
    }

    #[test]
    fn print_rejects_quotations() {
        let (mut interpreter, _) = interpreter_with_output("");

        assert!(interpreter.execute_str("[1] print").is_err());
    }

    #[test]
    fn random_with_a_bound_of_one_is_zero() {
        let mut interpreter = interpreter();

        interpreter.execute_str("1 random").unwrap();

        assert_eq!(contents(&interpreter), vec![Value::Integer(0)]);
    }

    #[test]
    fn random_rejects_non_positive_bounds() {
        let mut interpreter = interpreter();

        assert!(interpreter.execute_str("0 random").is_err());
        assert!(interpreter.execute_str("-3 random").is_err());
    }

    #[test]
    fn random_with_a_float_pushes_an_integer() {
        let mut interpreter = interpreter();

        interpreter.push(Value::Float(10.0)).unwrap();
        interpreter.execute_str("random").unwrap();

        let Value::Integer(number) = interpreter.pop().unwrap() else {
            panic!("expected an integer");
        };
        assert!((0..10).contains(&number));
    }

    #[test]
    fn same_seed_gives_the_same_numbers() {
        let mut first = interpreter();
        let mut second = interpreter();

        first.execute_str("1000000 random 1000000 random").unwrap();
        second.execute_str("1000000 random 1000000 random").unwrap();

        assert_eq!(contents(&first), contents(&second));
    }

    const COUNTDOWN: &str = "*down [dup 0 is-greater [decrement down] [] if] define";

    fn shallow_interpreter(depth: usize) -> JulInterpreter {
        let config = InterpreterConfig::default()
            .with_seed(7)
            .with_max_nesting_depth(depth)
            .with_io(Box::new(MemoryIo::new("")));
        let mut interpreter = JulInterpreter::new(config).unwrap();

        interpreter.execute_str(COUNTDOWN).unwrap();
        interpreter
    }

    fn is_too_deep(error: &ScriptError) -> bool {
        matches!(error.root_cause(), ScriptError::Message(message) if message.contains("recursion too deep"))
    }

    #[test]
    fn recursion_within_the_nesting_limit_runs() {
        let mut interpreter = shallow_interpreter(50);

        interpreter.execute_str("10 down").unwrap();

        assert_eq!(contents(&interpreter), vec![Value::Integer(0)]);
    }

    #[test]
    fn recursion_past_the_nesting_limit_fails() {
        let mut interpreter = shallow_interpreter(50);

        let Err(error) = interpreter.execute_str("1000 down") else {
            panic!("expected the recursion to be refused");
        };

        assert!(is_too_deep(&error));

        while !interpreter.stack().is_empty() {
            interpreter.pop().unwrap();
        }

        interpreter.execute_str("10 down").unwrap();
        assert_eq!(contents(&interpreter), vec![Value::Integer(0)]);
    }

    #[test]
    fn runaway_recursion_fails_at_the_default_limit() {
        let outcome = std::thread::Builder::new()
            .stack_size(INTERPRETER_THREAD_STACK_SIZE)
            .spawn(|| {
                let mut interpreter = interpreter();

                interpreter.execute_str(COUNTDOWN).unwrap();

                match interpreter.execute_str("100000 down") {
                    Ok(()) => false,
                    Err(error) => is_too_deep(&error),
                }
            })
            .unwrap()
            .join()
            .unwrap();

        assert!(outcome);
    }

    #[test]
    fn retrieve_needs_a_connection() {
        let mut interpreter = interpreter();

        let Err(error) = interpreter.execute_str("*hello retrieve") else {
            panic!("expected retrieve to fail");
        };

        assert!(matches!(error.root_cause(), ScriptError::Message(_)));
    }
}
