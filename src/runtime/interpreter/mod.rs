use crate::{
    lang::source_buffer::SourceLocation,
    net::connection::Connection,
    runtime::{
        data_structures::{
            dictionary::{Dictionary, WordInfo},
            value::Value,
            value_stack::{DEFAULT_STACK_CAPACITY, ValueStack},
        },
        interpreter::jul_interpreter::DEFAULT_MAX_NESTING_DEPTH,
        error::{self, TypeError},
    },
};
use rand::rngs::StdRng;
use std::io::Read;

pub mod jul_interpreter;
pub mod line_io;

use line_io::LineIo;

/// Trait for managing the interpreter's data stack.  Intended to be called by words, both native
/// and scripted.
pub trait InterpreterStack {
    /// Use to examine the full data stack when required.
    fn stack(&self) -> &ValueStack;

    /// Direct access to the stack for words that are implemented as stack operations.
    fn stack_mut(&mut self) -> &mut ValueStack;

    /// Push a script value onto the stack.  This is the primary way of sending values to words.
    /// Fails if the stack is already full.
    fn push(&mut self, value: Value) -> error::Result<()> {
        self.stack_mut().push(value)
    }

    /// Pop a value from the stack.  This is the primary way of receiving outputs from words.  If
    /// the stack is empty a stack underflow error is returned.
    fn pop(&mut self) -> error::Result<Value> {
        self.stack_mut().pop()
    }

    /// Pop the top value and make sure it is a boolean.
    fn pop_as_bool(&mut self) -> error::Result<bool> {
        match self.pop()? {
            Value::Boolean(value) => Ok(value),
            other => Err(unexpected_type("boolean", &other)),
        }
    }

    /// Pop the top value and make sure it is a text.
    fn pop_as_text(&mut self) -> error::Result<String> {
        match self.pop()? {
            Value::Text(text) => Ok(text),
            other => Err(unexpected_type("text", &other)),
        }
    }

    /// Pop the top value and make sure it is a quotation, returning its source text.
    fn pop_as_quotation(&mut self) -> error::Result<String> {
        match self.pop()? {
            Value::Quotation(code) => Ok(code),
            other => Err(unexpected_type("quotation", &other)),
        }
    }
}

fn unexpected_type(expected: &'static str, found: &Value) -> error::ScriptError {
    TypeError::UnexpectedType {
        expected,
        found: found.type_name(),
    }
    .into()
}

/// Trait for running source code.
pub trait CodeManagement {
    /// Tokenize and execute the source until its end, or until the first failure.  Tokens are
    /// pulled from the source one at a time as execution proceeds.
    fn execute(&mut self, source: &mut dyn Read) -> error::Result<()>;

    /// Execute an in-memory source, such as the body of a quotation.
    fn execute_str(&mut self, source: &str) -> error::Result<()> {
        self.execute(&mut source.as_bytes())
    }
}

/// Definition of a word handler function.  This is the function that is called when a word is to be
/// executed.  Can be a lambda, a callable object or a Rust function.
pub type WordHandler = dyn Fn(&mut dyn Interpreter) -> error::Result<()>;

/// Simplify registering a native word with the interpreter.
///
/// Required parameters are, the interpreter instance to register with.  The name of the word to
/// register.  The word function handler to execute for the word.  A simple description of the word.
/// As well as the word's stack signature.
///
/// Evaluates to the result of adding the word, which fails if the name is already taken.
#[macro_export]
macro_rules! add_native_word {
    (
        $interpreter:expr ,
        $name:expr ,
        $function:expr ,
        $description:expr ,
        $signature:expr
    ) => {{
        use std::rc::Rc;
        use $crate::runtime::data_structures::dictionary::{WordInfo, WordType};

        $interpreter.add_word(WordInfo {
            name: $name.to_string(),
            word_type: WordType::Native,
            description: $description.to_string(),
            signature: $signature.to_string(),
            handler: Rc::new($function),
        })
    }};
}

/// Trait for managing and executing words known to the interpreter.
pub trait WordManagement {
    /// The current word dictionary of words known to the interpreter.
    fn dictionary(&self) -> &Dictionary;

    /// Add a new word to the interpreter's dictionary.  Fails if the name is already defined.
    fn add_word(&mut self, word: WordInfo) -> error::Result<()>;

    /// Run a word's handler.  Any failure is reported as a runtime error at the given call site,
    /// naming the word.
    fn execute_word(
        &mut self,
        location: &SourceLocation,
        name: &str,
        handler: &WordHandler,
    ) -> error::Result<()>;
}

/// Core interpreter trait.
///
/// This trait brings together the stack, code and word management traits along with the outside
/// world the words can reach: the line-oriented I/O sink, the random generator and, when one was
/// configured, the connection to a remote peer.
pub trait Interpreter: InterpreterStack + CodeManagement + WordManagement {
    /// The sink used by the words that read and write lines of text.
    fn io(&mut self) -> &mut dyn LineIo;

    /// The interpreter's own pseudo-random generator.
    fn rng(&mut self) -> &mut StdRng;

    /// The outbound connection, if the interpreter was started with one.
    fn connection(&mut self) -> Option<&mut Connection>;
}

/// Options used when constructing an interpreter.
pub struct InterpreterConfig {
    /// Maximum depth of the data stack.  Zero selects the default.
    pub stack_capacity: usize,

    /// How deeply source may nest, counting every quotation or scripted word being run inside
    /// another.  Zero selects the default.
    pub max_nesting_depth: usize,

    /// Seed for the random generator.  When absent a seed is derived from the current time.
    pub seed: Option<u64>,

    /// The line-oriented I/O sink.  When absent standard input and output are used.
    pub io: Option<Box<dyn LineIo>>,

    /// The peer `retrieve` talks to.
    pub connection: Option<Connection>,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        InterpreterConfig {
            stack_capacity: DEFAULT_STACK_CAPACITY,
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
            seed: None,
            io: None,
            connection: None,
        }
    }
}

impl InterpreterConfig {
    /// Set the maximum depth of the data stack.
    pub fn with_stack_capacity(mut self, capacity: usize) -> Self {
        self.stack_capacity = capacity;
        self
    }

    /// Set how deeply quotations and scripted words may nest.
    pub fn with_max_nesting_depth(mut self, depth: usize) -> Self {
        self.max_nesting_depth = depth;
        self
    }

    /// Use a fixed seed so random numbers repeat from run to run.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Send line I/O somewhere other than stdin and stdout.
    pub fn with_io(mut self, io: Box<dyn LineIo>) -> Self {
        self.io = Some(io);
        self
    }

    /// Give `retrieve` a peer to talk to.
    pub fn with_connection(mut self, connection: Connection) -> Self {
        self.connection = Some(connection);
        self
    }
}
