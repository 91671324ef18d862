//! Errors raised while pre-lexing
//!
//!     Every failure carries one of two kinds plus the 1-based source line at which it was
//!     detected. Errors are never repaired: the output sequence stops at the first one.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Classification of a pre-lexing failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorKind {
    /// Unterminated string or comment, misplaced comment, unmatched `}`.
    Syntax,
    /// Indented first line, or a dedent that matches no enclosing level.
    WrongIndent,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Syntax => write!(f, "syntax error"),
            ErrorKind::WrongIndent => write!(f, "wrong indentation"),
        }
    }
}

/// A classified error located at a source line.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{kind} at line {line}: {message}")]
pub struct PreLexError {
    pub kind: ErrorKind,
    /// 1-based line number in the input sequence.
    pub line: usize,
    pub message: String,
}

impl PreLexError {
    pub fn syntax(line: usize, message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Syntax,
            line,
            message: message.into(),
        }
    }

    pub fn wrong_indent(line: usize, message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::WrongIndent,
            line,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PreLexError>;
