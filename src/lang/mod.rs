/// Module for managing the original source code and the location of the cursor within it.
pub mod source_buffer;

/// Module for turning the source code into a stream of tokens for the interpreter to execute.
pub mod tokenizing;
