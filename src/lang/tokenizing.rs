use crate::{
    lang::source_buffer::{SourceBuffer, SourceLocation},
    runtime::error::{self, SyntaxError},
};
use std::{
    fmt::{self, Display, Formatter},
    io::Read,
};

/// Opens a quotation, a block of code stored as raw text.
pub const MARK_QUOTATION_START: u8 = b'[';

/// Closes a quotation.
pub const MARK_QUOTATION_END: u8 = b']';

/// Opens and closes a literal text.
pub const MARK_LITERAL_TEXT_QUOTE: u8 = b'"';

/// Starts a literal text word, text without any whitespace.
pub const MARK_LITERAL_TEXT_WORD_START: u8 = b'*';

/// Opens a comment.
pub const MARK_COMMENT_START: u8 = b'(';

/// Closes a comment.
pub const MARK_COMMENT_END: u8 = b')';

/// A token is a simple unit of the language.  Every token holds the location in the original source
/// code where it was found.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Token {
    /// There is nothing left to read.
    EndOfInput(SourceLocation),

    /// A word to be executed, or an integer literal when no such word exists.
    Call(SourceLocation, String),

    /// The raw text between a balanced pair of brackets, brackets stripped.
    Quotation(SourceLocation, String),

    /// A `"..."` literal with its escapes already processed.
    Text(SourceLocation, String),

    /// A `*word` literal, taken verbatim.
    TextWord(SourceLocation, String),

    /// The text between a balanced pair of parentheses.
    Comment(SourceLocation, String),
}

/// A list of tokens found in the source code.
pub type TokenList = Vec<Token>;

/// Make sure that the tokens are nicely printable for debugging purposes.
impl Display for Token {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Token::EndOfInput(location) => write!(f, "end-of-input ({})", location),
            Token::Call(location, text) => write!(f, "function-call ({}) {:?}", location, text),
            Token::Quotation(location, text) => write!(f, "quotation ({}) {:?}", location, text),
            Token::Text(location, text) => write!(f, "literal-text ({}) {:?}", location, text),
            Token::TextWord(location, text) => {
                write!(f, "literal-text-word ({}) {:?}", location, text)
            }
            Token::Comment(location, text) => write!(f, "comment ({}) {:?}", location, text),
        }
    }
}

impl Token {
    /// Check if the token marks the end of the input.
    pub fn is_end_of_input(&self) -> bool {
        matches!(self, Token::EndOfInput(_))
    }
}

/// Check if the given byte is considered whitespace.
fn is_whitespace(next: u8) -> bool {
    next == b' ' || next == b'\t' || next == b'\n'
}

/// Printable bytes are the visible ASCII characters.
fn is_printable(next: u8) -> bool {
    (33..=126).contains(&next)
}

fn to_text(bytes: Vec<u8>) -> String {
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Pulls tokens one at a time out of a byte source.  Nothing past the whitespace byte that ends a
/// token is read, so the source can be shared with words that read from the same stream.
pub struct Tokenizer<R: Read> {
    buffer: SourceBuffer<R>,
}

impl<R: Read> Tokenizer<R> {
    /// Create a new tokenizer over the given source.
    pub fn new(source: R) -> Self {
        Tokenizer {
            buffer: SourceBuffer::new(source),
        }
    }

    /// Extract the next token.  Once the end of input has been reached every further call returns
    /// another end of input token.
    pub fn next_token(&mut self) -> error::Result<Token> {
        loop {
            let start = *self.buffer.location();

            let Some(next) = self.buffer.next_byte()? else {
                return Ok(Token::EndOfInput(start));
            };

            let token = match next {
                _ if is_whitespace(next) => continue,

                MARK_QUOTATION_START => {
                    let text = self.read_enclosed(MARK_QUOTATION_START, MARK_QUOTATION_END)?;
                    Token::Quotation(start, text)
                }

                MARK_COMMENT_START => {
                    let text = self.read_enclosed(MARK_COMMENT_START, MARK_COMMENT_END)?;
                    Token::Comment(start, text)
                }

                MARK_LITERAL_TEXT_QUOTE => Token::Text(start, self.read_literal_text()?),

                MARK_LITERAL_TEXT_WORD_START => {
                    Token::TextWord(start, to_text(self.read_until_whitespace()?))
                }

                _ if is_printable(next) && next != MARK_QUOTATION_END => {
                    let mut text = vec![next];
                    text.extend(self.read_until_whitespace()?);
                    Token::Call(start, to_text(text))
                }

                _ => {
                    return Err(SyntaxError::new(
                        *self.buffer.location(),
                        format!("unexpected character {:?}", next as char),
                    )
                    .into());
                }
            };

            return Ok(token);
        }
    }

    /// Drain the tokenizer into a list that always ends with the end of input token.
    pub fn tokens(&mut self) -> error::Result<TokenList> {
        let mut token_list = TokenList::new();

        loop {
            let token = self.next_token()?;
            let done = token.is_end_of_input();

            token_list.push(token);

            if done {
                return Ok(token_list);
            }
        }
    }

    /// Pull bytes out of the buffer until we hit a whitespace byte or the end of input.  The
    /// whitespace itself is left in the buffer.
    fn read_until_whitespace(&mut self) -> error::Result<Vec<u8>> {
        let mut text = Vec::new();

        while let Some(next) = self.buffer.peek_next()?
            && !is_whitespace(next)
        {
            let _ = self.buffer.next_byte()?;
            text.push(next);
        }

        Ok(text)
    }

    /// Read the body of a construct whose opening mark has already been consumed.  Nested pairs of
    /// the same marks are kept in the body, only the outermost closing mark ends it.
    fn read_enclosed(&mut self, start_mark: u8, end_mark: u8) -> error::Result<String> {
        let mut depth = 1;
        let mut text = Vec::new();

        loop {
            let Some(next) = self.buffer.next_byte()? else {
                return Err(SyntaxError::new(
                    *self.buffer.location(),
                    format!("missing closing character: {:?}", end_mark as char),
                )
                .into());
            };

            if next == start_mark {
                depth += 1;
            } else if next == end_mark {
                depth -= 1;

                if depth == 0 {
                    return Ok(to_text(text));
                }
            }

            text.push(next);
        }
    }

    /// Read a literal text whose opening quote has already been consumed.  Reaching the end of
    /// input ends the text just like the closing quote would.
    fn read_literal_text(&mut self) -> error::Result<String> {
        let mut text = Vec::new();
        let mut is_escaped = false;

        while let Some(next) = self.buffer.next_byte()? {
            if is_escaped {
                text.push(match next {
                    b'n' => b'\n',
                    b't' => b'\t',
                    other => other,
                });
                is_escaped = false;
            } else if next == b'\\' {
                is_escaped = true;
            } else if next == MARK_LITERAL_TEXT_QUOTE {
                break;
            } else {
                text.push(next);
            }
        }

        Ok(to_text(text))
    }
}

/// Tokenize a complete in-memory source.
pub fn tokenize_from_source(source: &str) -> error::Result<TokenList> {
    Tokenizer::new(source.as_bytes()).tokens()
}
