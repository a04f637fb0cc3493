//! Error types for path parsing and evaluation.
//!
//! Two families are kept apart:
//! [`ParseError`] means the text could not even be split into segments, while
//! [`EvalError`] means the segments were well formed but could not be run
//! against a tree.

use thiserror::Error;

/// Errors raised while splitting a path into segments.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The input was empty or contained no segments.
    #[error("Path is empty")]
    Empty,
    /// The input did not start with `/` or `//`.
    #[error("Path must start with '/' or '//'")]
    MissingOrigin,
    /// A closing bracket without a matching opener.
    #[error("Unbalanced '{found}' at position {position}")]
    UnbalancedBracket { position: usize, found: char },
    /// An opening bracket that is never closed.
    #[error("Unclosed '{open}' opened at position {position}")]
    UnclosedBracket { position: usize, open: char },
    /// A quoted literal that is never closed.
    #[error("Unterminated string literal starting at position {position}")]
    UnterminatedLiteral { position: usize },
    /// Two separators with nothing between them.
    #[error("Empty segment at position {position}")]
    EmptySegment { position: usize },
}

/// Errors raised while compiling segments into executable steps.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// The tag matcher is neither a name nor `*`.
    #[error("Invalid tag matcher in segment '{segment}'")]
    InvalidNameTest { segment: String },
    /// A predicate could not be understood.
    #[error("Invalid predicate in segment '{segment}': {message}")]
    InvalidPredicate { segment: String, message: String },
    /// A function that this dialect does not provide.
    #[error("Unsupported function '{name}()'")]
    UnsupportedFunction { name: String },
    /// An attribute selector that is not the final segment.
    #[error("Attribute selector '{segment}' must be the last segment")]
    MisplacedAttribute { segment: String },
}

/// Any failure of `parse + evaluate`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum XPathError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Eval(#[from] EvalError),
}

impl XPathError {
    /// Returns true if the text could not be split into segments.
    pub fn is_parse_error(&self) -> bool {
        matches!(self, XPathError::Parse(_))
    }
}
