use std::fmt;
use std::io;

use thiserror::Error;

use crate::types::Type;

/// 1-based position of a parse failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(line {}, column {})", self.line, self.column)
    }
}

fn at(location: &Option<Location>) -> String {
    match location {
        Some(location) => format!(" at {location}"),
        None => String::new(),
    }
}

/// Errors produced by value access, parsing and printing.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid type, expected {expected}, got {actual}")]
    BadType { expected: Type, actual: Type },
    #[error("Key '{key}' does not exist")]
    KeyNotFound { key: String },
    #[error("Parse error{}: {message}", at(.location))]
    Parse {
        message: String,
        location: Option<Location>,
    },
    #[error("{0}")]
    OutOfRange(String),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn bad_type(expected: Type, actual: Type) -> Self {
        Error::BadType { expected, actual }
    }

    pub fn key_not_found(key: impl Into<String>) -> Self {
        Error::KeyNotFound { key: key.into() }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Error::Parse {
            message: message.into(),
            location: None,
        }
    }

    pub fn parse_at(message: impl Into<String>, line: usize, column: usize) -> Self {
        Error::Parse {
            message: message.into(),
            location: Some(Location { line, column }),
        }
    }

    pub fn index_out_of_range(index: usize, len: usize) -> Self {
        Error::OutOfRange(format!("Index {index} out of range (len {len})"))
    }

    pub fn unresolved(token: &str) -> Self {
        Error::OutOfRange(format!("Unresolved reference token {token}"))
    }

    pub fn is_key_not_found(&self) -> bool {
        matches!(self, Error::KeyNotFound { .. })
    }

    pub fn is_out_of_range(&self) -> bool {
        matches!(self, Error::OutOfRange(_))
    }
}
