use crate::runtime::{
    error::{self, ScriptError},
    interpreter::WordHandler,
};
use std::{
    fmt::{self, Debug, Display, Formatter},
    rc::Rc,
};

/// The type of a word in the dictionary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WordType {
    /// The word is a native word written in Rust.
    Native,

    /// The word was defined by a script and runs the quotation it was defined with.
    Scripted,
}

impl Display for WordType {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            WordType::Native => write!(f, "native"),
            WordType::Scripted => write!(f, "scripted"),
        }
    }
}

/// The information stored in the dictionary for each word.  Once created a word is never changed.
#[derive(Clone)]
pub struct WordInfo {
    /// The name of the word.
    pub name: String,

    /// What kind of word is it?
    pub word_type: WordType,

    /// A simple description of the word.
    pub description: String,

    /// The stack signature of the word.
    pub signature: String,

    /// The code to run when the word is called.
    pub handler: Rc<WordHandler>,
}

impl Debug for WordInfo {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("WordInfo")
            .field("name", &self.name)
            .field("word_type", &self.word_type)
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}

impl WordInfo {
    /// Create a new word without any documentation.
    pub fn new(name: String, word_type: WordType, handler: Rc<WordHandler>) -> WordInfo {
        WordInfo {
            name,
            word_type,
            description: String::new(),
            signature: String::new(),
            handler,
        }
    }
}

/// The dictionary used by the interpreter to keep track of all of the words it knows.
///
/// Words are only ever appended.  Lookups scan from the newest word to the oldest, so a later
/// word takes precedence over an earlier one of the same name without removing it.
#[derive(Default)]
pub struct Dictionary {
    words: Vec<WordInfo>,
}

/// Pretty print the dictionary in definition order.
impl Display for Dictionary {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        let max_size = self.iter().map(|word| word.name.len()).max().unwrap_or(0);

        writeln!(formatter, "{} words defined.\n", self.len())?;

        for word in self.iter() {
            writeln!(
                formatter,
                "{:width$}  {:8}  {:24}  --  {}",
                word.name,
                word.word_type.to_string(),
                word.signature,
                word.description,
                width = max_size
            )?;
        }

        Ok(())
    }
}

impl Dictionary {
    /// Create a new empty dictionary.
    pub fn new() -> Dictionary {
        Dictionary { words: Vec::new() }
    }

    /// The number of words defined so far.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// True until the first word is defined.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Find the most recently added word with the given name.
    pub fn find_latest(&self, name: &str) -> Option<&WordInfo> {
        self.words.iter().rev().find(|word| word.name == name)
    }

    /// Append a new word.  Fails, leaving the dictionary untouched, if the name already resolves.
    pub fn define(&mut self, word: WordInfo) -> error::Result<()> {
        if self.find_latest(&word.name).is_some() {
            return Err(ScriptError::AlreadyDefined(word.name));
        }

        self.words.push(word);
        Ok(())
    }

    /// All words, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &WordInfo> {
        self.words.iter()
    }
}
