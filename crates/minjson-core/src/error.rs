//! Error types for minjson writing and parsing.
//!
//! Writer failures and parser failures are kept as two separate taxonomies so
//! callers can tell an unsupported value apart from malformed input. Exceeding
//! the configured nesting depth is reported by both directions as
//! [`Error::NestingTooDeep`].

use thiserror::Error;

/// Errors that can occur while dumping or loading.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The value tree contains something the writer cannot represent.
    #[error("type error: {0}")]
    Type(#[from] TypeError),

    /// The input text is not a valid document.
    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),

    /// Object nesting went past `Options::max_depth`.
    #[error("nesting exceeds maximum depth of {max}")]
    NestingTooDeep { max: usize },
}

impl Error {
    pub fn is_type(&self) -> bool {
        matches!(self, Error::Type(_))
    }

    pub fn is_syntax(&self) -> bool {
        matches!(self, Error::Syntax(_))
    }

    /// The syntax error kind, if this is a parse failure.
    pub fn syntax_kind(&self) -> Option<SyntaxErrorKind> {
        match self {
            Error::Syntax(e) => Some(e.kind),
            _ => None,
        }
    }

    /// The type error kind, if this is a writer or lowering failure.
    pub fn type_kind(&self) -> Option<&TypeErrorKind> {
        match self {
            Error::Type(e) => Some(&e.kind),
            _ => None,
        }
    }
}

/// A value the writer refused to serialize.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind}")]
pub struct TypeError {
    pub kind: TypeErrorKind,
}

impl TypeError {
    pub fn new(kind: TypeErrorKind) -> Self {
        Self { kind }
    }

    pub fn unsupported(kind: &'static str) -> Self {
        Self::new(TypeErrorKind::UnsupportedValue { kind })
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TypeErrorKind {
    /// The top-level value is not an object.
    #[error("expected object at top level")]
    ExpectedObject,

    /// An object key is not a string.
    #[error("keys must be strings")]
    KeyMustBeString,

    /// A value kind outside `{int, str, object}`.
    #[error("unsupported value type: {kind}")]
    UnsupportedValue { kind: &'static str },
}

/// A grammar violation found while parsing, with the byte offset where it was
/// detected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{kind} at byte {offset}")]
pub struct SyntaxError {
    pub kind: SyntaxErrorKind,
    pub offset: usize,
}

impl SyntaxError {
    pub fn new(kind: SyntaxErrorKind, offset: usize) -> Self {
        Self { kind, offset }
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxErrorKind {
    #[error("expected '{{'")]
    ExpectedObject,

    #[error("expected ':'")]
    ExpectedColon,

    #[error("expected ',' or '}}'")]
    ExpectedCommaOrBrace,

    #[error("invalid object syntax")]
    UnterminatedObject,

    #[error("invalid string escape")]
    InvalidStringEscape,

    #[error("invalid number")]
    InvalidNumber,

    #[error("unexpected end of input")]
    UnexpectedEnd,

    #[error("extra data after object")]
    TrailingData,

    #[error("input is not valid UTF-8")]
    InvalidUtf8,
}

/// Convenience alias used throughout minjson-core.
pub type Result<T> = std::result::Result<T, Error>;
