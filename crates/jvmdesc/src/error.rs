use core::fmt;

use thiserror::Error;

/// The nonterminals of the descriptor grammar, plus the end-of-input check
/// performed by the text-level entry points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Nonterminal {
    ClassName,
    BaseType,
    ObjectType,
    ArrayType,
    ComponentType,
    FieldType,
    FieldDescriptor,
    ParameterDescriptor,
    ReturnDescriptor,
    MethodDescriptor,
    EndOfInput,
}

impl fmt::Display for Nonterminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ClassName => "class name",
            Self::BaseType => "base type",
            Self::ObjectType => "object type",
            Self::ArrayType => "array type",
            Self::ComponentType => "component type",
            Self::FieldType => "field type",
            Self::FieldDescriptor => "field descriptor",
            Self::ParameterDescriptor => "parameter descriptor",
            Self::ReturnDescriptor => "return descriptor",
            Self::MethodDescriptor => "method descriptor",
            Self::EndOfInput => "end of input",
        };
        f.write_str(name)
    }
}

/// Input did not match the grammar of `expected`.
///
/// `offset` is the byte offset at which the failed attempt started and
/// `remainder` is the unconsumed input from that offset on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("expected {expected} at offset {offset}, found {remainder:?}")]
pub struct GrammarError {
    pub expected: Nonterminal,
    pub offset: usize,
    pub remainder: String,
}

impl GrammarError {
    pub(crate) fn new(expected: Nonterminal, offset: usize, remainder: &str) -> Self {
        Self {
            expected,
            offset,
            remainder: remainder.into(),
        }
    }
}

/// A range passed to a range-taking scanner operation was invalid.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeError {
    #[error("inverted range {begin}..{end}")]
    Inverted { begin: usize, end: usize },
    #[error("range {begin}..{end} exceeds input length {len}")]
    OutOfBounds { begin: usize, end: usize, len: usize },
    #[error("offset {offset} is not on a character boundary")]
    NotCharBoundary { offset: usize },
}

/// A malformed `\uXXXX` escape found while preparing scanner input.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscapeError {
    #[error("invalid unicode escape character {found:?} at offset {offset}")]
    InvalidDigit { found: char, offset: usize },
    #[error("truncated unicode escape at offset {offset}")]
    Truncated { offset: usize },
    #[error("unpaired surrogate \\u{code:04X} at offset {offset}")]
    UnpairedSurrogate { code: u32, offset: usize },
}

/// Crate-level error returned by the text and file entry points.
#[derive(Error, Debug)]
pub enum Error {
    #[error("syntax error: {0}")]
    Grammar(#[from] GrammarError),
    #[error("escape error: {0}")]
    Escape(#[from] EscapeError),
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns the grammar error if this is one.
    #[must_use]
    pub fn as_grammar(&self) -> Option<&GrammarError> {
        match self {
            Self::Grammar(e) => Some(e),
            _ => None,
        }
    }
}
