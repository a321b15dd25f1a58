//! CSS scanning error types

use std::fmt;
use thiserror::Error;

/// CSS scanning result type
pub type CssResult<T> = Result<T, CssError>;

/// Source location. Both line and column are 0-based; the column reported
/// at end of input is that of the last character read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl Location {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {} column {}", self.line, self.column)
    }
}

/// CSS scanning errors
#[derive(Debug, Error)]
pub enum CssError {
    #[error("Unterminated string at {location}")]
    UnterminatedString { location: Location },

    #[error("Unterminated comment at {location}")]
    UnterminatedComment { location: Location },

    #[error("Unterminated url at {location}")]
    UnterminatedUrl { location: Location },

    #[error("Invalid character '{character}' in string at {location}")]
    MalformedString { character: char, location: Location },

    #[error("Invalid escape at {location}")]
    BadEscape { location: Location },

    #[error("Malformed number at {location}")]
    MalformedNumber { location: Location },

    #[error("Malformed unicode range at {location}")]
    MalformedUnicodeRange { location: Location },

    #[error("Illegal character '{character}' at {location}")]
    IllegalCharacter { character: char, location: Location },

    #[error("Parse error: {message} at {location}")]
    ParseError { message: String, location: Location },
}

impl CssError {
    /// Get the source location of this error
    pub fn location(&self) -> Location {
        match self {
            Self::UnterminatedString { location } => *location,
            Self::UnterminatedComment { location } => *location,
            Self::UnterminatedUrl { location } => *location,
            Self::MalformedString { location, .. } => *location,
            Self::BadEscape { location } => *location,
            Self::MalformedNumber { location } => *location,
            Self::MalformedUnicodeRange { location } => *location,
            Self::IllegalCharacter { location, .. } => *location,
            Self::ParseError { location, .. } => *location,
        }
    }

    pub fn parse_error(message: impl Into<String>, location: Location) -> Self {
        Self::ParseError { message: message.into(), location }
    }
}
