/// Module contains the Value enumeration and it's implementation.  The value is one of the core
/// data structures of the interpreter.  It is used to represent all data types that scripts can
/// understand and manage.
pub mod value;

/// The bounded data stack and the operations words perform on it.
pub mod value_stack;

/// The dictionary module provides the core interpreter word dictionary.
pub mod dictionary;
